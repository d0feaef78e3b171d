use dioxus::prelude::*;

use credit_core::model::ForecastDraft;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::components::ResultList;
use crate::vm::{
    DraftField, FACILITY_TYPES, ForecastVm, SEQUESTRATION_METHODS, map_forecast, update_draft,
};

#[component]
pub fn ForecastView() -> Element {
    let ctx = use_context::<AppContext>();
    let today = ctx.services().clock().now().date_naive();
    let forecast = ctx.forecast();
    let session_id = ctx.session_id();

    let mut draft = use_signal(move || ForecastDraft::with_start_date(today));
    let mut result = use_signal(|| None::<ForecastVm>);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let forecast = forecast.clone();
        let session_id = session_id.clone();
        spawn(async move {
            busy.set(true);
            let current = draft();
            match forecast.forecast(&current, &session_id).await {
                Ok(response) => {
                    result.set(Some(map_forecast(&response)));
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    let mut edit = move |field: DraftField, value: String| {
        update_draft(&mut draft.write(), field, value);
    };
    let form = draft();
    let is_busy = busy();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Credit forecast" }
            }

            form { class: "forecast-form", onsubmit: submit,
                label { "Facility type"
                    select {
                        value: "{form.facility_type}",
                        onchange: move |evt: FormEvent| edit(DraftField::FacilityType, evt.value()),
                        for (value, label) in FACILITY_TYPES {
                            option { value, selected: form.facility_type == value, "{label}" }
                        }
                    }
                }
                label { "Annual CO2 captured (metric tons)"
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{form.annual_co2_captured}",
                        oninput: move |evt: FormEvent| edit(DraftField::AnnualCo2, evt.value()),
                    }
                }
                label { "Capture efficiency (%)"
                    input {
                        r#type: "number",
                        min: "0",
                        max: "100",
                        value: "{form.capture_efficiency}",
                        oninput: move |evt: FormEvent| edit(DraftField::CaptureEfficiency, evt.value()),
                    }
                }
                label { "Sequestration method"
                    select {
                        value: "{form.sequestration_method}",
                        onchange: move |evt: FormEvent| edit(DraftField::SequestrationMethod, evt.value()),
                        for (value, label) in SEQUESTRATION_METHODS {
                            option { value, selected: form.sequestration_method == value, "{label}" }
                        }
                    }
                }
                label { "Start date"
                    input {
                        r#type: "date",
                        value: "{form.start_date}",
                        oninput: move |evt: FormEvent| edit(DraftField::StartDate, evt.value()),
                    }
                }
                label { "Domestic content (%)"
                    input {
                        r#type: "number",
                        min: "0",
                        max: "100",
                        value: "{form.domestic_content}",
                        oninput: move |evt: FormEvent| edit(DraftField::DomesticContent, evt.value()),
                    }
                }
                label { "Location"
                    input {
                        r#type: "text",
                        value: "{form.location}",
                        oninput: move |evt: FormEvent| edit(DraftField::Location, evt.value()),
                    }
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: form.energy_community,
                        onchange: move |evt: FormEvent| draft.write().energy_community = evt.checked(),
                    }
                    "Located in an energy community"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: is_busy,
                    if is_busy { "Calculating..." } else { "Calculate forecast" }
                }
            }

            if let Some(err) = error() {
                p { class: "status error", "{err.message()}" }
            }

            if let Some(vm) = result() {
                ForecastCard { vm }
            }
        }
    }
}

#[component]
fn ForecastCard(vm: ForecastVm) -> Element {
    match vm {
        ForecastVm::Failed { warnings } => rsx! {
            div { class: "forecast-card failed",
                h4 { "Forecast Calculation Failed" }
                p { "Unable to calculate credits. Please check your inputs." }
                for warning in warnings {
                    p { class: "warning", "{warning}" }
                }
            }
        },
        ForecastVm::Ready {
            totals,
            periods,
            confidence,
            recommendations,
            warnings,
            next_steps,
        } => rsx! {
            div { class: "forecast-card",
                h4 { "Credit Forecast Results" }
                for row in totals {
                    p { strong { "{row.label}: " } "{row.value}" }
                }
                p { class: "confidence-score", "Confidence: {confidence}" }
                if !periods.is_empty() {
                    table { class: "forecast-periods",
                        thead {
                            tr {
                                th { "Year" }
                                th { "Tons captured" }
                                th { "Rate" }
                                th { "Credits" }
                                th { "Value" }
                            }
                        }
                        tbody {
                            for period in periods {
                                tr {
                                    td { "{period.year}" }
                                    td { "{period.tonnes}" }
                                    td { "{period.rate}" }
                                    td { "{period.credits}" }
                                    td { "{period.value}" }
                                }
                            }
                        }
                    }
                }
                ResultList { title: "Recommendations", items: recommendations }
                ResultList { title: "Warnings", items: warnings }
                ResultList { title: "Next steps", items: next_steps }
            }
        },
    }
}
