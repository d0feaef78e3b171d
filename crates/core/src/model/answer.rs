use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId};

/// Current answer text per question. Last write wins; no history is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<QuestionId, String>,
}

impl AnswerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: QuestionId, value: impl Into<String>) {
        self.answers.insert(id, value.into());
    }

    /// Store an empty value for `id`, keeping the key present.
    pub fn clear(&mut self, id: &QuestionId) {
        if let Some(value) = self.answers.get_mut(id) {
            value.clear();
        } else {
            self.answers.insert(id.clone(), String::new());
        }
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Number of answers that are not blank.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .values()
            .filter(|value| !value.trim().is_empty())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.answers.iter().map(|(id, value)| (id, value.as_str()))
    }

    /// Pair every non-blank answer with its question, in question order.
    ///
    /// The store is keyed by position in `questions`; backend ids may repeat
    /// across categories. Each collected answer carries the backend id, or the
    /// position when the question has none.
    #[must_use]
    pub fn collect(&self, questions: &[Question]) -> Vec<CollectedAnswer> {
        questions
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                let answer = self.get(&QuestionId::from_index(index))?;
                if answer.trim().is_empty() {
                    return None;
                }
                Some(CollectedAnswer {
                    question_id: question.key(index),
                    question: question.text().to_string(),
                    answer: answer.to_string(),
                    category: question.category().map(str::to_string),
                    category_key: question.category_key().map(str::to_string),
                })
            })
            .collect()
    }
}

/// One answered question as submitted with the whole questionnaire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedAnswer {
    pub question_id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub category_key: Option<String>,
}
