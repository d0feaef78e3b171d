use credit_core::model::{
    DetailedGuidance, EligibilityResult, FacilitySnapshot, Question, SavedProgress, StepProgress,
};
use services::{EnhancedQuestionnaire, StepController};

use crate::vm::{format_confidence, format_datetime, format_dollars, markdown_to_html};

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressVm {
    pub label: String,
    pub width: String,
}

#[must_use]
pub fn map_progress(progress: StepProgress) -> ProgressVm {
    let label = if progress.total() > 0 {
        format!("Question {} of {}", progress.number(), progress.total())
    } else {
        format!("Question {}", progress.number())
    };
    ProgressVm {
        label,
        width: format!("{:.0}%", progress.width_percent()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EligibilityVm {
    pub headline: &'static str,
    pub class: &'static str,
    pub credit_rate: String,
    pub confidence: String,
    pub provisions: Vec<String>,
    pub reasons: Vec<String>,
    pub requirements_not_met: Vec<String>,
    pub recommendations: Vec<String>,
}

#[must_use]
pub fn map_eligibility(result: &EligibilityResult) -> EligibilityVm {
    let (headline, class) = if result.is_eligible {
        ("Likely eligible for the 45Q credit", "result eligible")
    } else {
        ("Not eligible based on the answers given", "result not-eligible")
    };
    EligibilityVm {
        headline,
        class,
        credit_rate: result
            .estimated_credit_rate
            .map_or_else(|| "N/A".to_string(), |rate| format!("{}/ton", format_dollars(Some(rate)))),
        confidence: format_confidence(result.confidence_score),
        provisions: result.applicable_provisions.clone(),
        reasons: result.reasons.clone(),
        requirements_not_met: result.requirements_not_met.clone(),
        recommendations: result.recommendations.clone(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceVm {
    pub answer_html: Option<String>,
    pub confidence: Option<String>,
    pub facility: Vec<(&'static str, String)>,
}

#[must_use]
pub fn map_guidance(guidance: &DetailedGuidance) -> GuidanceVm {
    let rag = guidance.rag_guidance.as_ref();
    let facility = guidance
        .facility_info
        .as_ref()
        .map(|info| {
            vec![
                ("Facility", FacilitySnapshot::field(info.facility_name.as_ref())),
                ("Type", FacilitySnapshot::field(info.facility_type.as_ref())),
                ("State", FacilitySnapshot::field(info.location_state.as_ref())),
                (
                    "Annual CO2 captured",
                    FacilitySnapshot::field(info.annual_co2_captured.as_ref()),
                ),
            ]
        })
        .unwrap_or_default();
    GuidanceVm {
        answer_html: rag
            .and_then(|rag| rag.answer.as_deref())
            .map(markdown_to_html),
        confidence: rag.map(|rag| format_confidence(rag.confidence_score)),
        facility,
    }
}

/// Render snapshot of a [`StepController`], taken after each action.
#[derive(Clone, Debug, PartialEq)]
pub enum StepVm {
    NotStarted,
    Asking {
        question: Question,
        answer: String,
        progress: ProgressVm,
    },
    Complete {
        result: Option<EligibilityVm>,
    },
}

impl StepVm {
    #[must_use]
    pub fn snapshot(controller: &StepController) -> Self {
        if controller.is_complete() {
            return Self::Complete {
                result: controller.eligibility_result().map(map_eligibility),
            };
        }
        match (controller.current_question(), controller.current_key()) {
            (Some(question), Some(key)) => Self::Asking {
                question: question.clone(),
                answer: controller.answers().get(&key).unwrap_or_default().to_string(),
                progress: map_progress(controller.progress()),
            },
            _ => Self::NotStarted,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionItemVm {
    pub index: usize,
    pub question: Question,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionGroupVm {
    pub label: String,
    pub items: Vec<QuestionItemVm>,
}

/// Render snapshot of an [`EnhancedQuestionnaire`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionnaireVm {
    pub session_id: String,
    pub groups: Vec<QuestionGroupVm>,
    pub answered: usize,
    pub total: usize,
    pub report_html: Option<String>,
}

impl QuestionnaireVm {
    #[must_use]
    pub fn snapshot(questionnaire: &EnhancedQuestionnaire) -> Self {
        let groups = questionnaire
            .groups()
            .into_iter()
            .map(|group| QuestionGroupVm {
                label: group.label.to_string(),
                items: group
                    .questions
                    .into_iter()
                    .map(|(index, question)| QuestionItemVm {
                        index,
                        question: question.clone(),
                        answer: questionnaire.answer(index).unwrap_or_default().to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            session_id: questionnaire.session_id().to_string(),
            groups,
            answered: questionnaire.answers().answered_count(),
            total: questionnaire.questions().len(),
            report_html: questionnaire
                .result()
                .map(|result| markdown_to_html(&result.assessment)),
        }
    }
}

#[must_use]
pub fn saved_progress_line(saved: &SavedProgress) -> String {
    format!(
        "Restored {} answer(s) for {} saved {}",
        saved.answers.answered_count(),
        saved.session_id,
        format_datetime(saved.saved_at)
    )
}

#[cfg(test)]
mod tests {
    use credit_core::model::{AnswerStore, SessionId};
    use credit_core::time::fixed_now;

    use super::*;

    #[test]
    fn progress_label_hides_unknown_total() {
        assert_eq!(map_progress(StepProgress::new(0, 0, 0.25)).label, "Question 1");
        let vm = map_progress(StepProgress::new(2, 10, 0.3));
        assert_eq!(vm.label, "Question 3 of 10");
        assert_eq!(vm.width, "30%");
    }

    #[test]
    fn eligibility_maps_rate_and_headline() {
        let result = EligibilityResult {
            is_eligible: true,
            applicable_provisions: vec!["45Q(a)(3)".into()],
            reasons: vec![],
            requirements_not_met: vec![],
            recommendations: vec![],
            estimated_credit_rate: Some(85.0),
            confidence_score: 0.9,
        };
        let vm = map_eligibility(&result);
        assert_eq!(vm.credit_rate, "$85/ton");
        assert_eq!(vm.class, "result eligible");
        assert_eq!(vm.confidence, "90.0%");
    }

    #[test]
    fn saved_progress_line_counts_answers() {
        let mut answers = AnswerStore::new();
        answers.set("a".into(), "yes");
        answers.set("b".into(), "");
        let saved = SavedProgress {
            session_id: SessionId::new("company-1").unwrap(),
            answers,
            saved_at: fixed_now(),
        };
        assert!(saved_progress_line(&saved).starts_with("Restored 1 answer(s) for company-1 saved "));
    }
}
