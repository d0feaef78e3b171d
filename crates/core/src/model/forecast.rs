use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::SessionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForecastDraftError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: &'static str,
        max: &'static str,
    },

    #[error("start date must be YYYY-MM-DD, got {raw:?}")]
    InvalidDate { raw: String },
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Facility attributes the forecast form does not ask for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityProfile {
    pub facility_type: String,
    pub location: String,
    pub ownership: String,
    pub technology_ownership: String,
}

/// Body of `POST /forecast-credits`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub session_id: SessionId,
    pub facility_info: FacilityProfile,
    pub annual_co2_captured: f64,
    /// Fraction in `[0, 1]`.
    pub capture_efficiency: f64,
    pub sequestration_method: String,
    pub sequestration_location: String,
    pub start_date: NaiveDate,
    pub domestic_content_percentage: f64,
    pub energy_community_eligible: bool,
}

/// Raw forecast form input, as typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastDraft {
    pub facility_type: String,
    pub annual_co2_captured: String,
    /// Percent, 0–100.
    pub capture_efficiency: String,
    pub sequestration_method: String,
    pub start_date: String,
    /// Percent, 0–100.
    pub domestic_content: String,
    pub energy_community: bool,
    pub location: String,
    pub ownership: String,
    pub technology_ownership: String,
}

impl ForecastDraft {
    /// Draft pre-filled the way the forecast panel opens: 90% efficiency,
    /// start date today, facility located in Texas.
    #[must_use]
    pub fn with_start_date(start_date: NaiveDate) -> Self {
        Self {
            facility_type: "industrial".into(),
            annual_co2_captured: String::new(),
            capture_efficiency: "90".into(),
            sequestration_method: "geological_storage".into(),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            domestic_content: "0".into(),
            energy_community: false,
            location: "Texas".into(),
            ownership: "Private".into(),
            technology_ownership: "Owned".into(),
        }
    }

    /// Validate the draft into a request body.
    ///
    /// # Errors
    ///
    /// Returns `ForecastDraftError` for blank, non-numeric, out-of-range or
    /// malformed fields.
    pub fn validate(&self, session_id: SessionId) -> Result<ForecastRequest, ForecastDraftError> {
        let facility_type = required("facility type", &self.facility_type)?;
        let sequestration_method = required("sequestration method", &self.sequestration_method)?;

        let annual_co2_captured = number("annual CO2 captured", &self.annual_co2_captured)?;
        if annual_co2_captured <= 0.0 {
            return Err(ForecastDraftError::OutOfRange {
                field: "annual CO2 captured",
                min: "0 (exclusive)",
                max: "any",
            });
        }

        let efficiency_pct = percent("capture efficiency", &self.capture_efficiency)?;
        let domestic_content_percentage = percent("domestic content", &self.domestic_content)?;

        let raw_date = self.start_date.trim();
        let start_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            ForecastDraftError::InvalidDate {
                raw: raw_date.to_string(),
            }
        })?;

        let location = self.location.trim().to_string();
        Ok(ForecastRequest {
            session_id,
            facility_info: FacilityProfile {
                facility_type,
                location: location.clone(),
                ownership: self.ownership.trim().to_string(),
                technology_ownership: self.technology_ownership.trim().to_string(),
            },
            annual_co2_captured,
            capture_efficiency: efficiency_pct / 100.0,
            sequestration_method,
            sequestration_location: location,
            start_date,
            domestic_content_percentage,
            energy_community_eligible: self.energy_community,
        })
    }
}

fn required(field: &'static str, raw: &str) -> Result<String, ForecastDraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ForecastDraftError::Missing { field });
    }
    Ok(trimmed.to_string())
}

fn number(field: &'static str, raw: &str) -> Result<f64, ForecastDraftError> {
    let trimmed = required(field, raw)?;
    let value: f64 = trimmed
        .replace(',', "")
        .parse()
        .map_err(|_| ForecastDraftError::NotANumber {
            field,
            raw: trimmed.clone(),
        })?;
    if !value.is_finite() {
        return Err(ForecastDraftError::NotANumber { field, raw: trimmed });
    }
    Ok(value)
}

fn percent(field: &'static str, raw: &str) -> Result<f64, ForecastDraftError> {
    let value = number(field, raw)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ForecastDraftError::OutOfRange {
            field,
            min: "0",
            max: "100",
        });
    }
    Ok(value)
}

//
// ─── RESPONSE ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub year: i32,
    pub co2_captured_tons: f64,
    pub credit_rate: f64,
    pub total_credits: f64,
    #[serde(default)]
    pub bonus_credits: f64,
    pub total_value: f64,
}

/// Projections returned by the backend. Totals the backend omits stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditForecast {
    #[serde(default)]
    pub forecast_periods: Vec<ForecastPeriod>,
    #[serde(default)]
    pub total_credits_10_years: Option<f64>,
    #[serde(default)]
    pub total_value_10_years: Option<f64>,
    #[serde(default)]
    pub total_credits_12_years: Option<f64>,
    #[serde(default)]
    pub total_value_12_years: Option<f64>,
    #[serde(default)]
    pub average_annual_credits: Option<f64>,
    #[serde(default)]
    pub average_annual_value: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub session_id: String,
    #[serde(default)]
    pub forecast: Option<CreditForecast>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}
