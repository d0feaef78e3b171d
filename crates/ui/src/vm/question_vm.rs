use credit_core::model::{AnswerStore, Question, QuestionId, QuestionKind};

/// Input widget chosen for a question descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputWidget {
    Radio { options: Vec<String> },
    Boolean,
    Text,
    Number,
    Date,
}

impl InputWidget {
    #[must_use]
    pub fn for_question(question: &Question) -> Self {
        match question.input_kind() {
            QuestionKind::Select => Self::Radio {
                options: question.options().to_vec(),
            },
            QuestionKind::Boolean => Self::Boolean,
            QuestionKind::Number => Self::Number,
            QuestionKind::Date => Self::Date,
            QuestionKind::Text | QuestionKind::Unknown => Self::Text,
        }
    }

    /// HTML `type` attribute for single-input widgets.
    #[must_use]
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            _ => "text",
        }
    }
}

/// Literal values stored for boolean questions, with their labels.
pub const BOOLEAN_CHOICES: [(&str, &str); 2] = [("true", "Yes"), ("false", "No")];

/// What a choice interaction does to the stored answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerUpdate {
    Store(String),
    Clear,
}

impl AnswerUpdate {
    pub fn apply(self, store: &mut AnswerStore, key: QuestionId) {
        match self {
            Self::Store(value) => store.set(key, value),
            Self::Clear => store.clear(&key),
        }
    }
}

/// Radio group state for a select question with an optional "other" field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceState {
    selected: Option<String>,
    other_text: String,
}

impl ChoiceState {
    /// Rebuild the widget state from a previously stored answer.
    #[must_use]
    pub fn restore(options: &[String], answer: Option<&str>) -> Self {
        let Some(answer) = answer.filter(|value| !value.is_empty()) else {
            return Self::default();
        };
        if let Some(option) = options.iter().find(|option| option.as_str() == answer) {
            return Self {
                selected: Some(option.clone()),
                other_text: String::new(),
            };
        }
        match options.iter().find(|option| Question::is_other_option(option)) {
            Some(other) => Self {
                selected: Some(other.clone()),
                other_text: answer.to_string(),
            },
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.as_deref() == Some(option)
    }

    /// The free-text field is shown only while "other" is the selection.
    #[must_use]
    pub fn other_visible(&self) -> bool {
        self.selected.as_deref().is_some_and(Question::is_other_option)
    }

    #[must_use]
    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    pub fn select(&mut self, option: &str) -> AnswerUpdate {
        self.selected = Some(option.to_string());
        self.other_text.clear();
        if Question::is_other_option(option) {
            AnswerUpdate::Clear
        } else {
            AnswerUpdate::Store(option.to_string())
        }
    }

    /// Typing in the "other" field overrides the radio value.
    pub fn type_other(&mut self, text: &str) -> AnswerUpdate {
        self.other_text = text.to_string();
        AnswerUpdate::Store(text.to_string())
    }
}
