use std::path::PathBuf;

use dioxus::prelude::*;

use services::EnhancedQuestionnaire;

use crate::context::AppContext;
use crate::views::controller_slot::run_with;
use crate::views::question_input::QuestionInput;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AnswerUpdate, QuestionnaireVm, saved_progress_line};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Save,
    Resume,
    Reset,
    Submit,
    Export,
}

#[component]
pub fn QuestionnaireView() -> Element {
    let ctx = use_context::<AppContext>();
    let session_id = ctx.session_id();
    let controller = use_signal(|| Some(ctx.services().questionnaire(ctx.session_id())));
    let mut vm = use_signal(QuestionnaireVm::default);
    let mut busy = use_signal(|| None::<Action>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut status = use_signal(|| None::<String>);
    let mut export_path = use_signal(move || format!("45q-assessment-{session_id}.md"));
    // Bumped when answers are replaced wholesale so inputs rebuild their state.
    let mut generation = use_signal(|| 0u32);

    let mut resource = use_resource(move || async move {
        let loaded = run_with(controller, async |form: &mut EnhancedQuestionnaire| {
            let result = form.load().await;
            (result, QuestionnaireVm::snapshot(form))
        })
        .await;
        match loaded {
            Some((Ok(_), snapshot)) => {
                vm.set(snapshot);
                Ok(())
            }
            Some((Err(err), _)) => Err(ViewError::from(err)),
            None => Err(ViewError::Unknown),
        }
    });
    let state = view_state_from_resource(&resource);

    let run = move |action: Action| {
        spawn(async move {
            busy.set(Some(action));
            let path = PathBuf::from(export_path());
            let outcome = run_with(controller, async |form: &mut EnhancedQuestionnaire| {
                let message = match action {
                    Action::Save => form
                        .save()
                        .await
                        .map(|_| Some("Progress saved.".to_string())),
                    Action::Resume => form.resume().await.map(|saved| {
                        Some(saved.map_or_else(
                            || "No saved progress found.".to_string(),
                            |saved| saved_progress_line(&saved),
                        ))
                    }),
                    Action::Reset => form.reset().await.map(|()| Some("Progress cleared.".to_string())),
                    Action::Submit => form.submit().await.map(|_| None),
                    Action::Export => form
                        .export(&path)
                        .await
                        .map(|()| Some(format!("Report written to {}", path.display()))),
                };
                (message, QuestionnaireVm::snapshot(form))
            })
            .await;
            if let Some((message, snapshot)) = outcome {
                vm.set(snapshot);
                match message {
                    Ok(message) => {
                        if matches!(action, Action::Resume | Action::Reset) {
                            generation += 1;
                        }
                        status.set(message);
                        error.set(None);
                    }
                    Err(err) => error.set(Some(err.into())),
                }
            }
            busy.set(None);
        });
    };

    let mut on_answer = move |(index, update): (usize, AnswerUpdate)| {
        let mut slot = controller;
        let snapshot = slot.write().as_mut().map(|form| {
            let value = match update {
                AnswerUpdate::Store(value) => value,
                AnswerUpdate::Clear => String::new(),
            };
            let result = form.set_answer(index, value);
            (result, QuestionnaireVm::snapshot(form))
        });
        if let Some((result, snapshot)) = snapshot {
            vm.set(snapshot);
            if let Err(err) = result {
                error.set(Some(err.into()));
            }
        }
    };

    let current = vm();
    let input_generation = generation();
    let in_flight = busy();
    let is_busy = in_flight.is_some();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Full questionnaire" }
                p { class: "view-subtitle", "Session {current.session_id}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "status error", "{err.message()}" }
                    button {
                        class: "btn",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    p { class: "answered-count", "Answered {current.answered} of {current.total}" }
                    for group in current.groups.clone() {
                        section { class: "category",
                            h3 { "{group.label}" }
                            for item in group.items {
                                QuestionInput {
                                    key: "{input_generation}-{item.index}",
                                    name: "question-{item.index}",
                                    question: item.question,
                                    answer: item.answer,
                                    disabled: is_busy,
                                    on_update: move |update| on_answer((item.index, update)),
                                }
                            }
                        }
                    }
                    div { class: "actions",
                        button {
                            class: "btn btn-primary",
                            disabled: is_busy,
                            onclick: move |_| run(Action::Submit),
                            if in_flight == Some(Action::Submit) { "Assessing..." } else { "Complete assessment" }
                        }
                        button { class: "btn", disabled: is_busy, onclick: move |_| run(Action::Save), "Save progress" }
                        button { class: "btn", disabled: is_busy, onclick: move |_| run(Action::Resume), "Resume saved" }
                        button { class: "btn", disabled: is_busy, onclick: move |_| run(Action::Reset), "Reset" }
                    }
                },
            }

            if let Some(html) = current.report_html.clone() {
                div { class: "assessment-report",
                    h3 { "Assessment" }
                    div { class: "markdown", dangerous_inner_html: "{html}" }
                    div { class: "export",
                        input {
                            r#type: "text",
                            class: "form-control",
                            value: "{export_path}",
                            oninput: move |evt: FormEvent| export_path.set(evt.value()),
                        }
                        button {
                            class: "btn",
                            disabled: is_busy,
                            onclick: move |_| run(Action::Export),
                            "Export report"
                        }
                    }
                }
            }

            if let Some(message) = status() {
                p { class: "status", "{message}" }
            }
            if let Some(err) = error() {
                p { class: "status error", "{err.message()}" }
            }
        }
    }
}
