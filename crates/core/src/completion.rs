//! Deciding when an open-ended interview should stop and a final report be
//! forced.
//!
//! The upstream model gives no structured "done" signal, so the decision is a
//! policy over the latest assistant turn. [`LexicalCompletionPolicy`] is the
//! phrase-matching default; anything implementing [`CompletionPolicy`] can
//! replace it without touching the chat controller.

/// Minimum transcript length (four user/assistant exchanges) before a final
/// report may be forced.
pub const MIN_TRANSCRIPT_LEN: usize = 8;

/// Phrases showing the assistant is still gathering requirements.
pub const QUESTION_PHRASES: &[&str] = &[
    "can you",
    "could you",
    "please provide",
    "please confirm",
    "one last",
    "one more",
    "just to confirm",
    "specifically",
    "details about",
    "information on",
];

/// Phrases showing the assistant is deflecting instead of concluding.
pub const DEFLECTION_PHRASES: &[&str] = &[
    "tax professional",
    "legal advisor",
    "cannot be given",
    "impossible to determine",
    "consult with",
    "recommend consulting",
];

/// Bold section headers of a structured final report.
pub const REPORT_MARKERS: &[&str] = &[
    "**eligibility determination**",
    "**credit forecasting**",
    "**specific 45q sections**",
    "**bonus opportunities**",
    "**compliance requirements**",
    "**documentation checklist**",
    "**next steps**",
];

/// What the controller should do after an assistant turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnVerdict {
    Continue,
    ForceFinal,
}

/// The assistant turn under evaluation.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    /// Transcript length including the turn being evaluated.
    pub transcript_len: usize,
    pub text: &'a str,
}

pub trait CompletionPolicy: Send + Sync {
    fn classify(&self, turn: TurnContext<'_>) -> TurnVerdict;
}

/// Individual lexical signals behind a verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnSignals {
    pub has_enough_info: bool,
    pub is_asking_question: bool,
    pub is_being_conservative: bool,
    pub looks_complete: bool,
}

impl TurnSignals {
    #[must_use]
    pub fn verdict(self) -> TurnVerdict {
        let deflecting = self.has_enough_info && self.is_being_conservative;
        let stalled =
            self.has_enough_info && !self.is_asking_question && !self.looks_complete;
        if deflecting || stalled {
            TurnVerdict::ForceFinal
        } else {
            TurnVerdict::Continue
        }
    }
}

/// Case-insensitive substring matching over fixed phrase lists.
#[derive(Clone, Debug)]
pub struct LexicalCompletionPolicy {
    min_transcript_len: usize,
    question_phrases: &'static [&'static str],
    deflection_phrases: &'static [&'static str],
    report_markers: &'static [&'static str],
}

impl Default for LexicalCompletionPolicy {
    fn default() -> Self {
        Self {
            min_transcript_len: MIN_TRANSCRIPT_LEN,
            question_phrases: QUESTION_PHRASES,
            deflection_phrases: DEFLECTION_PHRASES,
            report_markers: REPORT_MARKERS,
        }
    }
}

impl LexicalCompletionPolicy {
    #[must_use]
    pub fn with_min_transcript_len(mut self, len: usize) -> Self {
        self.min_transcript_len = len;
        self
    }

    #[must_use]
    pub fn signals(&self, turn: TurnContext<'_>) -> TurnSignals {
        let lower = turn.text.to_lowercase();
        let contains_any = |phrases: &[&str]| phrases.iter().any(|phrase| lower.contains(phrase));
        TurnSignals {
            has_enough_info: turn.transcript_len >= self.min_transcript_len,
            is_asking_question: contains_any(self.question_phrases),
            is_being_conservative: contains_any(self.deflection_phrases),
            looks_complete: contains_any(self.report_markers),
        }
    }
}

impl CompletionPolicy for LexicalCompletionPolicy {
    fn classify(&self, turn: TurnContext<'_>) -> TurnVerdict {
        self.signals(turn).verdict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(len: usize, text: &str) -> TurnVerdict {
        LexicalCompletionPolicy::default().classify(TurnContext {
            transcript_len: len,
            text,
        })
    }

    #[test]
    fn short_transcripts_never_force_final() {
        let texts = [
            "I recommend consulting a tax professional.",
            "Thanks, that's everything I need.",
            "",
        ];
        for len in 0..MIN_TRANSCRIPT_LEN {
            for text in texts {
                assert_eq!(classify(len, text), TurnVerdict::Continue, "len {len}: {text}");
            }
        }
    }

    #[test]
    fn follow_up_question_keeps_chatting() {
        let text = "Could you confirm your facility's placement-in-service date?";
        let policy = LexicalCompletionPolicy::default();
        let signals = policy.signals(TurnContext {
            transcript_len: 8,
            text,
        });
        assert!(signals.is_asking_question);
        assert!(!signals.is_being_conservative);
        assert_eq!(signals.verdict(), TurnVerdict::Continue);
    }

    #[test]
    fn deflection_forces_final_even_while_asking() {
        let text = "I recommend consulting a tax professional for further details.";
        assert_eq!(classify(8, text), TurnVerdict::ForceFinal);

        let asking_and_deflecting = "Could you consult with your CPA about this?";
        assert_eq!(classify(9, asking_and_deflecting), TurnVerdict::ForceFinal);
    }

    #[test]
    fn structured_report_is_not_forced_again() {
        let text = "**Eligibility Determination**\n• YES - eligible";
        let policy = LexicalCompletionPolicy::default();
        let signals = policy.signals(TurnContext {
            transcript_len: 10,
            text,
        });
        assert!(signals.looks_complete);
        assert!(!signals.is_asking_question);
        assert_eq!(signals.verdict(), TurnVerdict::Continue);
    }

    #[test]
    fn statement_without_question_forces_final() {
        assert_eq!(
            classify(8, "Thanks. That covers the capture side."),
            TurnVerdict::ForceFinal
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify(8, "PLEASE CONSULT WITH COUNSEL"), TurnVerdict::ForceFinal);
        assert_eq!(classify(8, "CAN YOU share the capture rate?"), TurnVerdict::Continue);
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = LexicalCompletionPolicy::default().with_min_transcript_len(2);
        let verdict = policy.classify(TurnContext {
            transcript_len: 2,
            text: "Noted.",
        });
        assert_eq!(verdict, TurnVerdict::ForceFinal);
    }
}
