use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Input widget family for a question.
///
/// The enhanced question base calls single-select questions `multiple_choice`
/// and the backend model also knows `multi_select`; all three render as
/// radio groups. Unrecognised kinds fall back to free text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(alias = "multiple_choice", alias = "multi_select")]
    Select,
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    #[serde(other)]
    Unknown,
}

/// A question descriptor as fetched from the backend. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    id: Option<QuestionId>,
    #[serde(rename = "question")]
    text: String,
    #[serde(rename = "type", default)]
    kind: QuestionKind,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    help_text: Option<String>,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    category_key: Option<String>,
}

fn default_required() -> bool {
    true
}

impl Question {
    #[must_use]
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            kind,
            options: None,
            help_text: None,
            required: true,
            category: None,
            category_key: None,
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, label: impl Into<String>, key: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self.category_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    /// Id reported to the backend for this question at `index` in its list:
    /// the backend id, or the position when the backend sent none.
    #[must_use]
    pub fn key(&self, index: usize) -> QuestionId {
        self.id
            .clone()
            .unwrap_or_else(|| QuestionId::from_index(index))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// The widget actually rendered: a select without options degrades to text.
    #[must_use]
    pub fn input_kind(&self) -> QuestionKind {
        match self.kind {
            QuestionKind::Select if self.options().is_empty() => QuestionKind::Text,
            QuestionKind::Unknown => QuestionKind::Text,
            kind => kind,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn category_key(&self) -> Option<&str> {
        self.category_key.as_deref()
    }

    /// Whether `option` is the free-text "other" choice.
    #[must_use]
    pub fn is_other_option(option: &str) -> bool {
        option.trim().eq_ignore_ascii_case("other")
    }
}
