//! The linear quiz flow.
//!
//! `Introduction -> PsychologicalFit -> TechnicalAptitude -> WiscarAnalysis -> Results`.
//! Leaving a question stage requires every question of its section to be
//! answered, and seals that section in the response store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::QuestionCatalog;
use crate::error::AssessmentError;
use crate::model::Section;
use crate::responses::ResponseStore;

/// A stage of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Introduction,
    PsychologicalFit,
    TechnicalAptitude,
    WiscarAnalysis,
    Results,
}

impl FlowStage {
    pub const ALL: [FlowStage; 5] = [
        FlowStage::Introduction,
        FlowStage::PsychologicalFit,
        FlowStage::TechnicalAptitude,
        FlowStage::WiscarAnalysis,
        FlowStage::Results,
    ];

    /// The stage after this one, or `None` from `Results`.
    pub fn next(&self) -> Option<FlowStage> {
        match self {
            FlowStage::Introduction => Some(FlowStage::PsychologicalFit),
            FlowStage::PsychologicalFit => Some(FlowStage::TechnicalAptitude),
            FlowStage::TechnicalAptitude => Some(FlowStage::WiscarAnalysis),
            FlowStage::WiscarAnalysis => Some(FlowStage::Results),
            FlowStage::Results => None,
        }
    }

    /// The section answered on this stage, if it asks questions.
    pub fn section(&self) -> Option<Section> {
        match self {
            FlowStage::PsychologicalFit => Some(Section::PsychologicalFit),
            FlowStage::TechnicalAptitude => Some(Section::TechnicalAptitude),
            FlowStage::WiscarAnalysis => Some(Section::Wiscar),
            FlowStage::Introduction | FlowStage::Results => None,
        }
    }

    /// Overall progress shown while on this stage.
    pub fn progress_percent(&self) -> u8 {
        match self {
            FlowStage::Introduction => 20,
            FlowStage::PsychologicalFit => 40,
            FlowStage::TechnicalAptitude => 60,
            FlowStage::WiscarAnalysis => 80,
            FlowStage::Results => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlowStage::Introduction => "Introduction",
            FlowStage::PsychologicalFit => "Psychological Fit",
            FlowStage::TechnicalAptitude => "Technical Aptitude",
            FlowStage::WiscarAnalysis => "WISCAR Analysis",
            FlowStage::Results => "Results",
        }
    }
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::Introduction => write!(f, "introduction"),
            FlowStage::PsychologicalFit => write!(f, "psychological_fit"),
            FlowStage::TechnicalAptitude => write!(f, "technical_aptitude"),
            FlowStage::WiscarAnalysis => write!(f, "wiscar_analysis"),
            FlowStage::Results => write!(f, "results"),
        }
    }
}

/// Tracks the current stage of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentFlow {
    stage: FlowStage,
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self {
            stage: FlowStage::Introduction,
        }
    }
}

impl AssessmentFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage == FlowStage::Results
    }

    /// Move to the next stage.
    ///
    /// From a question stage this fails with
    /// [`AssessmentError::IncompleteAssessment`] until the section is fully
    /// answered; on success the section is sealed. From `Results` it fails
    /// with [`AssessmentError::InvalidTransition`].
    pub fn advance(
        &mut self,
        catalog: &QuestionCatalog,
        responses: &mut ResponseStore,
    ) -> Result<FlowStage, AssessmentError> {
        let next = self
            .stage
            .next()
            .ok_or(AssessmentError::InvalidTransition { from: self.stage })?;

        if let Some(section) = self.stage.section() {
            let missing = responses.missing_in(catalog, section);
            if !missing.is_empty() {
                return Err(AssessmentError::IncompleteAssessment { missing });
            }
            responses.seal(section);
        }

        tracing::debug!(from = %self.stage, to = %next, "flow advanced");
        self.stage = next;
        Ok(next)
    }

    /// Start over: drop every answer and return to the introduction.
    pub fn retake(&mut self, responses: &mut ResponseStore) {
        responses.clear();
        self.stage = FlowStage::Introduction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn answer_section(catalog: &QuestionCatalog, store: &mut ResponseStore, section: Section) {
        for q in catalog.questions_in(section) {
            let raw = match q.kind {
                QuestionKind::Likert => "4",
                QuestionKind::MultipleChoice { .. } => "0",
            };
            store.submit(catalog, &q.id, raw).unwrap();
        }
    }

    #[test]
    fn stages_are_linear() {
        let mut stage = FlowStage::Introduction;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }
        assert_eq!(seen, FlowStage::ALL.to_vec());
        let percents: Vec<u8> = FlowStage::ALL.iter().map(|s| s.progress_percent()).collect();
        assert_eq!(percents, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn cannot_leave_incomplete_section() {
        let catalog = QuestionCatalog::medical_coding();
        let mut store = ResponseStore::new();
        let mut flow = AssessmentFlow::new();

        assert_eq!(
            flow.advance(&catalog, &mut store).unwrap(),
            FlowStage::PsychologicalFit
        );
        store.submit(&catalog, "psych-1", "5").unwrap();
        let err = flow.advance(&catalog, &mut store).unwrap_err();
        match err {
            AssessmentError::IncompleteAssessment { missing } => {
                assert_eq!(missing, vec!["psych-2", "psych-3", "psych-4", "psych-5"])
            }
            other => panic!("expected IncompleteAssessment, got {other:?}"),
        }
        assert_eq!(flow.stage(), FlowStage::PsychologicalFit);
        assert!(!store.is_sealed(Section::PsychologicalFit));
    }

    #[test]
    fn full_walk_seals_sections_and_stops_at_results() {
        let catalog = QuestionCatalog::medical_coding();
        let mut store = ResponseStore::new();
        let mut flow = AssessmentFlow::new();

        flow.advance(&catalog, &mut store).unwrap();
        for section in Section::ALL {
            answer_section(&catalog, &mut store, section);
            flow.advance(&catalog, &mut store).unwrap();
            assert!(store.is_sealed(section));
        }
        assert!(flow.is_finished());

        let err = flow.advance(&catalog, &mut store).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidTransition {
                from: FlowStage::Results
            }
        );

        let err = store.submit(&catalog, "psych-1", "1").unwrap_err();
        assert_eq!(err, AssessmentError::SectionSealed(Section::PsychologicalFit));
    }

    #[test]
    fn retake_resets_everything() {
        let catalog = QuestionCatalog::medical_coding();
        let mut store = ResponseStore::new();
        let mut flow = AssessmentFlow::new();
        flow.advance(&catalog, &mut store).unwrap();
        answer_section(&catalog, &mut store, Section::PsychologicalFit);
        flow.advance(&catalog, &mut store).unwrap();

        flow.retake(&mut store);
        assert_eq!(flow.stage(), FlowStage::Introduction);
        assert!(store.is_empty());
        assert!(!store.is_sealed(Section::PsychologicalFit));
    }
}
