use credit_core::model::ChatRole;
use services::ChatEntry;

use crate::vm::assistant_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatBody {
    /// Sanitized markup for assistant turns.
    Html(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLineVm {
    pub class: &'static str,
    pub body: ChatBody,
}

#[must_use]
pub fn map_chat_entries(entries: &[ChatEntry]) -> Vec<ChatLineVm> {
    entries.iter().map(map_chat_entry).collect()
}

fn map_chat_entry(entry: &ChatEntry) -> ChatLineVm {
    match entry {
        ChatEntry::Turn(turn) => match turn.role() {
            ChatRole::Assistant => ChatLineVm {
                class: "message assistant-message",
                body: ChatBody::Html(assistant_html(turn.content())),
            },
            ChatRole::User => ChatLineVm {
                class: "message user-message",
                body: ChatBody::Text(turn.content().to_string()),
            },
        },
        ChatEntry::Error(message) => ChatLineVm {
            class: "message error-message",
            body: ChatBody::Text(message.clone()),
        },
    }
}
