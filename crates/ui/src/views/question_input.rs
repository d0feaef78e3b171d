use dioxus::prelude::*;

use credit_core::model::Question;

use crate::vm::{AnswerUpdate, BOOLEAN_CHOICES, ChoiceState, InputWidget};

/// One input widget bound to a question; every change is reported at once.
#[component]
pub fn QuestionInput(
    name: String,
    question: Question,
    answer: String,
    disabled: bool,
    on_update: EventHandler<AnswerUpdate>,
) -> Element {
    let widget = InputWidget::for_question(&question);
    let mut choice = use_signal(|| ChoiceState::restore(question.options(), Some(&answer)));

    let input = match widget {
        InputWidget::Radio { options } => {
            let radios = options.into_iter().map(|option| {
                let checked = choice.read().is_selected(&option);
                let selected = option.clone();
                rsx! {
                    label { key: "{option}", class: "radio-option",
                        input {
                            r#type: "radio",
                            name: "{name}",
                            value: "{option}",
                            checked,
                            disabled,
                            onchange: move |_| {
                                let update = choice.write().select(&selected);
                                on_update.call(update);
                            },
                        }
                        span { "{option}" }
                    }
                }
            });
            let other_visible = choice.read().other_visible();
            let other_text = choice.read().other_text().to_string();
            rsx! {
                div { class: "radio-group",
                    {radios}
                    if other_visible {
                        div { class: "other-input",
                            input {
                                r#type: "text",
                                class: "form-control",
                                placeholder: "Please specify...",
                                value: "{other_text}",
                                disabled,
                                oninput: move |evt: FormEvent| {
                                    let update = choice.write().type_other(&evt.value());
                                    on_update.call(update);
                                },
                            }
                        }
                    }
                }
            }
        }
        InputWidget::Boolean => {
            let radios = BOOLEAN_CHOICES.into_iter().map(|(value, label)| {
                rsx! {
                    label { key: "{value}", class: "radio-option",
                        input {
                            r#type: "radio",
                            name: "{name}",
                            value,
                            checked: answer == value,
                            disabled,
                            onchange: move |_| on_update.call(AnswerUpdate::Store(value.to_string())),
                        }
                        span { "{label}" }
                    }
                }
            });
            rsx! {
                div { class: "radio-group", {radios} }
            }
        }
        single => rsx! {
            input {
                r#type: single.input_type(),
                class: "form-control",
                value: "{answer}",
                disabled,
                oninput: move |evt: FormEvent| on_update.call(AnswerUpdate::Store(evt.value())),
            }
        },
    };

    rsx! {
        div { class: "question",
            label { class: "question-text",
                "{question.text()}"
                if question.required() {
                    span { class: "required", " *" }
                }
            }
            if let Some(help) = question.help_text() {
                p { class: "help-text", "{help}" }
            }
            {input}
        }
    }
}
