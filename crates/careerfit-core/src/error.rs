//! Assessment error types.
//!
//! Every failure the engine can report is one of these kinds. Scoring never
//! degrades into a partial report: a caller either gets a complete
//! `AssessmentReport` or one of the variants below.

use thiserror::Error;

use crate::flow::FlowStage;
use crate::model::Section;

/// Errors raised while collecting answers or computing a report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// The raw answer is malformed or outside the question's range.
    #[error("invalid answer '{value}' for question {question_id}: {reason}")]
    InvalidAnswerValue {
        question_id: String,
        value: String,
        reason: String,
    },

    /// One or more questions (or dimensions) have not been answered yet.
    #[error("assessment incomplete: {} missing ({})", missing.len(), missing.join(", "))]
    IncompleteAssessment { missing: Vec<String> },

    /// An answer references a question id the catalog does not define.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// A dimension score has no entry in the aggregation weight table.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// The section was already submitted; its answers are frozen.
    #[error("section {0} has already been submitted")]
    SectionSealed(Section),

    /// The flow cannot move on from its current stage.
    #[error("cannot advance past {from}")]
    InvalidTransition { from: FlowStage },

    /// The question catalog violates a structural invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The scoring configuration is unusable.
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),

    /// A stored report does not describe a complete assessment.
    #[error("invalid report: {0}")]
    InvalidReport(String),
}

impl AssessmentError {
    /// Returns `true` if the user can fix this by answering (or re-answering)
    /// questions. Everything else is a programmer or data error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AssessmentError::InvalidAnswerValue { .. } | AssessmentError::IncompleteAssessment { .. }
        )
    }

    pub(crate) fn incomplete<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AssessmentError::IncompleteAssessment {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_classification() {
        assert!(AssessmentError::incomplete(["psych-1"]).is_recoverable());
        assert!(AssessmentError::InvalidAnswerValue {
            question_id: "will-1".into(),
            value: "9".into(),
            reason: "out of range".into(),
        }
        .is_recoverable());
        assert!(!AssessmentError::UnknownQuestion("q9".into()).is_recoverable());
        assert!(!AssessmentError::SectionSealed(Section::Wiscar).is_recoverable());
    }

    #[test]
    fn incomplete_message_lists_missing_items() {
        let err = AssessmentError::incomplete(["tech-1", "tech-4"]);
        assert_eq!(
            err.to_string(),
            "assessment incomplete: 2 missing (tech-1, tech-4)"
        );
    }
}
