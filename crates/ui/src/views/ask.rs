use dioxus::prelude::*;

use services::prompts::DOCUMENT_ANALYSIS_PROMPT;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::components::StatusLine;
use crate::vm::{AnswerVm, map_query_answer};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Query {
    Typed,
    DocumentAnalysis,
}

#[component]
pub fn AskView() -> Element {
    let ctx = use_context::<AppContext>();
    let knowledge = use_signal(|| ctx.knowledge());

    let mut question = use_signal(String::new);
    let mut answer = use_signal(|| None::<AnswerVm>);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let run = move |query: Query| {
        let knowledge = knowledge();
        spawn(async move {
            busy.set(true);
            let result = match query {
                Query::Typed => knowledge.ask(&question()).await,
                Query::DocumentAnalysis => {
                    question.set(DOCUMENT_ANALYSIS_PROMPT.to_string());
                    knowledge.analyze_documents_for_questions().await
                }
            };
            match result {
                Ok(found) => {
                    answer.set(Some(map_query_answer(&found)));
                    error.set(None);
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    let is_busy = busy();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Ask a question" }
            }
            p { "Questions are answered from the uploaded 45Q guidance documents." }
            textarea {
                class: "form-control",
                rows: "4",
                placeholder: "e.g. What is the credit rate for direct air capture?",
                value: "{question}",
                oninput: move |evt: FormEvent| question.set(evt.value()),
            }
            div { class: "button-row",
                button {
                    class: "btn btn-primary",
                    disabled: is_busy,
                    onclick: move |_| run(Query::Typed),
                    if is_busy { "Asking..." } else { "Ask" }
                }
                button {
                    class: "btn",
                    disabled: is_busy,
                    onclick: move |_| run(Query::DocumentAnalysis),
                    "Analyze documents"
                }
            }

            if let Some(err) = error() {
                StatusLine { message: err.message(), is_error: true }
            }

            if let Some(found) = answer() {
                div { class: "answer-card",
                    h4 { "AI Response" }
                    div { class: "markdown", dangerous_inner_html: "{found.answer_html}" }
                }
                div { class: "confidence-score", "{found.confidence}" }
                if !found.sources.is_empty() {
                    div { class: "sources",
                        h4 { "Sources" }
                        for source in found.sources {
                            div { class: "source-item",
                                p { "{source.excerpt}" }
                                div { class: "source-meta",
                                    strong { "File: " }
                                    "{source.file_name} | "
                                    strong { "Page: " }
                                    "{source.page}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
