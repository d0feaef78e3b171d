use dioxus::prelude::*;

use services::StepController;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::components::ResultList;
use crate::views::controller_slot::run_with;
use crate::views::question_input::QuestionInput;
use crate::vm::{AnswerUpdate, EligibilityVm, GuidanceVm, StepVm, map_guidance};

#[component]
pub fn AssessmentView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_signal(|| Some(ctx.services().step_controller(ctx.session_id())));
    let mut vm = use_signal(|| StepVm::NotStarted);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);
    let mut guidance = use_signal(|| None::<GuidanceVm>);

    let start = move |_| {
        spawn(async move {
            busy.set(true);
            let outcome = run_with(controller, async |step: &mut StepController| {
                let result = step.start().await;
                (result, StepVm::snapshot(step))
            })
            .await;
            if let Some((result, snapshot)) = outcome {
                vm.set(snapshot);
                error.set(result.err().map(ViewError::from));
            }
            busy.set(false);
        });
    };

    let submit = move |_| {
        spawn(async move {
            busy.set(true);
            let outcome = run_with(controller, async |step: &mut StepController| {
                let result = step.submit_current().await;
                (result, StepVm::snapshot(step))
            })
            .await;
            if let Some((result, snapshot)) = outcome {
                vm.set(snapshot);
                error.set(result.err().map(ViewError::from));
            }
            busy.set(false);
        });
    };

    let on_update = move |update: AnswerUpdate| {
        let mut slot = controller;
        let snapshot = slot.write().as_mut().map(|step| {
            match update {
                AnswerUpdate::Store(value) => step.set_answer(value),
                AnswerUpdate::Clear => step.set_answer(String::new()),
            }
            StepVm::snapshot(step)
        });
        if let Some(snapshot) = snapshot {
            vm.set(snapshot);
        }
    };

    let load_guidance = move |_| {
        spawn(async move {
            busy.set(true);
            let outcome = run_with(controller, async |step: &mut StepController| {
                step.detailed_guidance().await
            })
            .await;
            match outcome {
                Some(Ok(found)) => {
                    guidance.set(Some(map_guidance(&found)));
                    error.set(None);
                }
                Some(Err(err)) => error.set(Some(err.into())),
                None => {}
            }
            busy.set(false);
        });
    };

    let is_busy = busy();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Step-by-step assessment" }
            }

            match vm() {
                StepVm::NotStarted => rsx! {
                    p { "Answer one question at a time. The backend picks the next question from your answers." }
                    button {
                        class: "btn btn-primary",
                        disabled: is_busy,
                        onclick: start,
                        if is_busy { "Starting..." } else { "Start assessment" }
                    }
                },
                StepVm::Asking { question, answer, progress } => rsx! {
                    div { class: "progress",
                        div { class: "progress-label", "{progress.label}" }
                        div { class: "progress-track",
                            div { class: "progress-fill", style: "width: {progress.width}" }
                        }
                    }
                    QuestionInput {
                        key: "{question.text()}",
                        name: "answer",
                        question,
                        answer,
                        disabled: is_busy,
                        on_update,
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: is_busy,
                        onclick: submit,
                        if is_busy { "Submitting..." } else { "Next" }
                    }
                },
                StepVm::Complete { result } => rsx! {
                    match result {
                        Some(result) => rsx! { EligibilityCard { result } },
                        None => rsx! { p { "Assessment complete." } },
                    }
                    if guidance().is_none() {
                        button {
                            class: "btn",
                            disabled: is_busy,
                            onclick: load_guidance,
                            if is_busy { "Loading..." } else { "Get detailed guidance" }
                        }
                    }
                },
            }

            if let Some(found) = guidance() {
                GuidanceCard { guidance: found }
            }

            if let Some(err) = error() {
                p { class: "status error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn EligibilityCard(result: EligibilityVm) -> Element {
    rsx! {
        div { class: "{result.class}",
            h3 { "{result.headline}" }
            p { "Estimated credit rate: {result.credit_rate}" }
            p { "Confidence: {result.confidence}" }
            ResultList { title: "Applicable provisions", items: result.provisions }
            ResultList { title: "Reasons", items: result.reasons }
            ResultList { title: "Requirements not met", items: result.requirements_not_met }
            ResultList { title: "Recommendations", items: result.recommendations }
        }
    }
}

#[component]
fn GuidanceCard(guidance: GuidanceVm) -> Element {
    rsx! {
        div { class: "guidance-card",
            h3 { "Detailed guidance" }
            if let Some(html) = guidance.answer_html {
                div { class: "markdown", dangerous_inner_html: "{html}" }
            }
            if let Some(confidence) = guidance.confidence {
                p { class: "confidence-score", "Confidence: {confidence}" }
            }
            if !guidance.facility.is_empty() {
                dl {
                    for (label, value) in guidance.facility {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
        }
    }
}
