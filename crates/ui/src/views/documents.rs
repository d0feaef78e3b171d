use std::path::PathBuf;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::StatusLine;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{stats_line, upload_status};

const REGENERATED: &str = "Question base regenerated. New assessments use the updated questions.";

/// Split the path box into one path per line or comma.
fn parse_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[component]
pub fn DocumentsView() -> Element {
    let ctx = use_context::<AppContext>();
    let knowledge = ctx.knowledge();

    let mut paths = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut status = use_signal(|| None::<Result<String, ViewError>>);

    let mut stats = {
        let knowledge = knowledge.clone();
        use_resource(move || {
            let knowledge = knowledge.clone();
            async move {
                let found = knowledge.stats().await.map_err(ViewError::from)?;
                Ok(stats_line(&found))
            }
        })
    };
    let stats_state = view_state_from_resource(&stats);

    let upload = {
        let knowledge = knowledge.clone();
        move |_| {
            let knowledge = knowledge.clone();
            spawn(async move {
                busy.set(true);
                let selected = parse_paths(&paths());
                match knowledge.upload_paths(&selected).await {
                    Ok(summary) => {
                        status.set(Some(Ok(upload_status(&summary))));
                        paths.set(String::new());
                        stats.restart();
                    }
                    Err(err) => status.set(Some(Err(err.into()))),
                }
                busy.set(false);
            });
        }
    };

    let regenerate = {
        let knowledge = knowledge.clone();
        move |_| {
            let knowledge = knowledge.clone();
            spawn(async move {
                busy.set(true);
                let outcome = knowledge
                    .regenerate_question_base()
                    .await
                    .map(|_| REGENERATED.to_string())
                    .map_err(ViewError::from);
                status.set(Some(outcome));
                busy.set(false);
            });
        }
    };

    let check_health = move |_| {
        let knowledge = knowledge.clone();
        spawn(async move {
            busy.set(true);
            let outcome = knowledge
                .health()
                .await
                .map(|health| format!("Backend {} (version {})", health.status, health.version))
                .map_err(ViewError::from);
            status.set(Some(outcome));
            busy.set(false);
        });
    };

    let is_busy = busy();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Documents" }
            }

            section { class: "stats",
                h3 { "Knowledge base" }
                match stats_state {
                    ViewState::Idle | ViewState::Loading => rsx! { p { "Loading stats..." } },
                    ViewState::Ready(line) => rsx! { p { "{line}" } },
                    ViewState::Error(err) => rsx! {
                        StatusLine { message: err.message(), is_error: true }
                        button { class: "btn", onclick: move |_| stats.restart(), "Retry" }
                    },
                }
            }

            section { class: "upload",
                h3 { "Upload documents" }
                p { "One file path per line (PDF, TXT or DOCX)." }
                textarea {
                    class: "form-control",
                    rows: "3",
                    value: "{paths}",
                    oninput: move |evt: FormEvent| paths.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    disabled: is_busy,
                    onclick: upload,
                    if is_busy { "Working..." } else { "Upload" }
                }
            }

            section { class: "admin",
                h3 { "Maintenance" }
                button { class: "btn", disabled: is_busy, onclick: regenerate, "Regenerate question base" }
                button { class: "btn", disabled: is_busy, onclick: check_health, "Check backend health" }
            }

            match status() {
                Some(Ok(message)) => rsx! { StatusLine { message } },
                Some(Err(err)) => rsx! { StatusLine { message: err.message(), is_error: true } },
                None => rsx! {},
            }
        }
    }
}
