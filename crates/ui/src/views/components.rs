use dioxus::prelude::*;

/// Titled bullet list; renders nothing when empty.
#[component]
pub fn ResultList(title: &'static str, items: Vec<String>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        h4 { "{title}" }
        ul {
            for item in items {
                li { "{item}" }
            }
        }
    }
}

/// Status line under a form; errors get the error style.
#[component]
pub fn StatusLine(message: String, #[props(default)] is_error: bool) -> Element {
    let class = if is_error { "status error" } else { "status" };
    rsx! {
        p { class, "{message}" }
    }
}
