use credit_core::model::{ForecastDraft, ForecastResponse};

use crate::vm::{format_amount, format_confidence, format_dollars};

/// Options offered by the forecast form, as `(value, label)`.
pub const FACILITY_TYPES: [(&str, &str); 4] = [
    ("industrial", "Industrial facility"),
    ("direct_air_capture", "Direct air capture"),
    ("power_plant", "Electric generating facility"),
    ("other", "Other"),
];

pub const SEQUESTRATION_METHODS: [(&str, &str); 3] = [
    ("geological_storage", "Geological storage"),
    ("enhanced_oil_recovery", "Enhanced oil recovery"),
    ("utilization", "Utilization"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastRowVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastPeriodVm {
    pub year: i32,
    pub tonnes: String,
    pub rate: String,
    pub credits: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForecastVm {
    Ready {
        totals: Vec<ForecastRowVm>,
        periods: Vec<ForecastPeriodVm>,
        confidence: String,
        recommendations: Vec<String>,
        warnings: Vec<String>,
        next_steps: Vec<String>,
    },
    /// The backend answered without a forecast.
    Failed { warnings: Vec<String> },
}

#[must_use]
pub fn map_forecast(response: &ForecastResponse) -> ForecastVm {
    let Some(forecast) = response.forecast.as_ref() else {
        return ForecastVm::Failed {
            warnings: response.warnings.clone(),
        };
    };

    let totals = vec![
        row("Total Credits (10 years)", forecast.total_credits_10_years),
        row("Total Value (10 years)", forecast.total_value_10_years),
        row("Total Credits (12 years)", forecast.total_credits_12_years),
        row("Total Value (12 years)", forecast.total_value_12_years),
        row("Average Annual Credits", forecast.average_annual_credits),
        row("Average Annual Value", forecast.average_annual_value),
    ];
    let periods = forecast
        .forecast_periods
        .iter()
        .map(|period| ForecastPeriodVm {
            year: period.year,
            tonnes: format_amount(period.co2_captured_tons),
            rate: format_dollars(Some(period.credit_rate)),
            credits: format_dollars(Some(period.total_credits + period.bonus_credits)),
            value: format_dollars(Some(period.total_value)),
        })
        .collect();

    ForecastVm::Ready {
        totals,
        periods,
        confidence: format_confidence(response.confidence_score),
        recommendations: forecast.recommendations.clone(),
        warnings: response.warnings.clone(),
        next_steps: response.next_steps.clone(),
    }
}

fn row(label: &'static str, value: Option<f64>) -> ForecastRowVm {
    ForecastRowVm {
        label,
        value: format_dollars(value),
    }
}

/// Form field identifiers for [`update_draft`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    FacilityType,
    AnnualCo2,
    CaptureEfficiency,
    SequestrationMethod,
    StartDate,
    DomesticContent,
    Location,
}

pub fn update_draft(draft: &mut ForecastDraft, field: DraftField, value: String) {
    let slot = match field {
        DraftField::FacilityType => &mut draft.facility_type,
        DraftField::AnnualCo2 => &mut draft.annual_co2_captured,
        DraftField::CaptureEfficiency => &mut draft.capture_efficiency,
        DraftField::SequestrationMethod => &mut draft.sequestration_method,
        DraftField::StartDate => &mut draft.start_date,
        DraftField::DomesticContent => &mut draft.domestic_content,
        DraftField::Location => &mut draft.location,
    };
    *slot = value;
}
