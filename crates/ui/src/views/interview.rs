use dioxus::prelude::*;

use services::{ChatController, ChatError};

use crate::context::AppContext;
use crate::views::controller_slot::run_with;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChatBody, ChatLineVm, map_chat_entries};

#[derive(Clone, Debug, Default, PartialEq)]
struct ChatSnapshot {
    lines: Vec<ChatLineVm>,
    is_complete: bool,
}

impl ChatSnapshot {
    fn of(chat: &ChatController) -> Self {
        Self {
            lines: map_chat_entries(chat.entries()),
            is_complete: chat.is_complete(),
        }
    }
}

#[component]
pub fn InterviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let services = ctx.services();
    let mut controller = use_signal(|| None::<ChatController>);
    let mut snapshot = use_signal(ChatSnapshot::default);
    let mut draft = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut notice = use_signal(|| None::<ViewError>);

    let mut resource = use_resource(move || {
        let services = services.clone();
        async move {
            let chat = services.interview().await;
            snapshot.set(ChatSnapshot::of(&chat));
            controller.set(Some(chat));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let send = move || {
        let message = draft();
        if message.trim().is_empty() || busy() {
            return;
        }
        spawn(async move {
            busy.set(true);
            let outcome = run_with(controller, async |chat: &mut ChatController| {
                let result = chat.send(&message).await;
                (result, ChatSnapshot::of(chat))
            })
            .await;
            if let Some((result, next)) = outcome {
                snapshot.set(next);
                match result {
                    Ok(_) => {
                        draft.set(String::new());
                        notice.set(None);
                    }
                    // Failures already show up as an inline chat entry.
                    Err(ChatError::Api(_)) => notice.set(None),
                    Err(err) => notice.set(Some(err.into())),
                }
            }
            busy.set(false);
        });
    };

    let complete = move |_| {
        spawn(async move {
            busy.set(true);
            let outcome = run_with(controller, async |chat: &mut ChatController| {
                let result = chat.request_complete_assessment().await;
                (result, ChatSnapshot::of(chat))
            })
            .await;
            if let Some((result, next)) = outcome {
                snapshot.set(next);
                match result {
                    // Api failures already show up as an inline chat entry.
                    Ok(_) | Err(ChatError::Api(_)) => notice.set(None),
                    Err(err) => notice.set(Some(err.into())),
                }
            }
            busy.set(false);
        });
    };

    let current = snapshot();
    let is_busy = busy();

    rsx! {
        div { class: "page interview",
            header { class: "view-header",
                h2 { class: "view-title", "AI interview" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Preparing the interview..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "status error", "{err.message()}" }
                    button { class: "btn", onclick: move |_| resource.restart(), "Retry" }
                },
                ViewState::Ready(()) => rsx! {
                    div { class: "chat-messages",
                        for (i, line) in current.lines.into_iter().enumerate() {
                            ChatLine { key: "{i}", line }
                        }
                        if is_busy {
                            div { class: "message assistant-message typing", "Thinking..." }
                        }
                    }
                    if current.is_complete {
                        p { class: "status", "Final assessment generated. You can keep asking follow-up questions." }
                    }
                    div { class: "chat-input",
                        textarea {
                            class: "form-control",
                            placeholder: "Type your answer...",
                            value: "{draft}",
                            disabled: is_busy,
                            oninput: move |evt: FormEvent| draft.set(evt.value()),
                            onkeydown: move |evt: KeyboardEvent| {
                                if evt.data.key() == Key::Enter
                                    && !evt.data.modifiers().contains(Modifiers::SHIFT)
                                {
                                    evt.prevent_default();
                                    send();
                                }
                            },
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: is_busy,
                            onclick: move |_| send(),
                            "Send"
                        }
                        button {
                            class: "btn",
                            disabled: is_busy,
                            onclick: complete,
                            "Complete assessment"
                        }
                    }
                },
            }

            if let Some(err) = notice() {
                p { class: "status error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn ChatLine(line: ChatLineVm) -> Element {
    rsx! {
        div { class: "{line.class}",
            match line.body {
                ChatBody::Html(html) => rsx! {
                    div { class: "message-content", dangerous_inner_html: "{html}" }
                },
                ChatBody::Text(text) => rsx! {
                    div { class: "message-content", "{text}" }
                },
            }
        }
    }
}
