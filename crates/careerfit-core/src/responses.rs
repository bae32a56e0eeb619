//! The per-session response store.
//!
//! Answers may be overwritten until their section is sealed. Sealing happens
//! when the flow leaves a section; after that the section's answers are frozen
//! until the store is cleared for a retake.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::QuestionCatalog;
use crate::error::AssessmentError;
use crate::model::{AnswerValue, Section};

/// Answers collected for one session, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseStore {
    answers: BTreeMap<String, AnswerValue>,
    sealed: BTreeSet<Section>,
}

/// How far along a section is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub answered: usize,
    pub total: usize,
}

impl SectionProgress {
    /// Answered share as a whole percentage (rounded).
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.answered as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw answer against the catalog and store it, replacing any
    /// earlier answer to the same question.
    pub fn submit(
        &mut self,
        catalog: &QuestionCatalog,
        question_id: &str,
        raw: &str,
    ) -> Result<AnswerValue, AssessmentError> {
        let question = catalog
            .get(question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.to_string()))?;
        let value = question.parse_answer(raw)?;
        self.insert_checked(question.section(), question_id, value)?;
        Ok(value)
    }

    fn insert_checked(
        &mut self,
        section: Section,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<(), AssessmentError> {
        if self.sealed.contains(&section) {
            return Err(AssessmentError::SectionSealed(section));
        }
        if let Some(previous) = self.answers.insert(question_id.to_string(), value) {
            tracing::debug!(question_id, %previous, %value, "answer replaced");
        }
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<AnswerValue> {
        self.answers.get(question_id).copied()
    }

    /// All stored answers, ordered by question id.
    pub fn answers(&self) -> impl Iterator<Item = (&str, AnswerValue)> {
        self.answers.iter().map(|(id, v)| (id.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Catalog questions without an answer, in catalog order.
    pub fn missing(&self, catalog: &QuestionCatalog) -> Vec<String> {
        catalog
            .questions()
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    /// Unanswered questions of one section, in catalog order.
    pub fn missing_in(&self, catalog: &QuestionCatalog, section: Section) -> Vec<String> {
        catalog
            .questions_in(section)
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    pub fn is_section_complete(&self, catalog: &QuestionCatalog, section: Section) -> bool {
        catalog
            .questions_in(section)
            .all(|q| self.answers.contains_key(&q.id))
    }

    pub fn section_progress(&self, catalog: &QuestionCatalog, section: Section) -> SectionProgress {
        let (answered, total) = catalog
            .questions_in(section)
            .fold((0, 0), |(answered, total), q| {
                let hit = usize::from(self.answers.contains_key(&q.id));
                (answered + hit, total + 1)
            });
        SectionProgress { answered, total }
    }

    /// Freeze a section's answers.
    pub fn seal(&mut self, section: Section) {
        if self.sealed.insert(section) {
            tracing::info!(%section, answers = self.answers.len(), "section submitted");
        }
    }

    pub fn is_sealed(&self, section: Section) -> bool {
        self.sealed.contains(&section)
    }

    /// Drop every answer and seal, as for a retake.
    pub fn clear(&mut self) {
        self.answers.clear();
        self.sealed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::medical_coding()
    }

    #[test]
    fn submit_and_overwrite() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        store.submit(&catalog, "will-1", "2").unwrap();
        store.submit(&catalog, "will-1", "4").unwrap();
        assert_eq!(store.get("will-1"), Some(AnswerValue::Likert(4)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn submit_rejects_unknown_question() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        let err = store.submit(&catalog, "q1", "3").unwrap_err();
        assert_eq!(err, AssessmentError::UnknownQuestion("q1".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn submit_rejects_out_of_range_and_keeps_previous() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        store.submit(&catalog, "tech-1", "0").unwrap();
        assert!(store.submit(&catalog, "tech-1", "4").is_err());
        assert_eq!(store.get("tech-1"), Some(AnswerValue::Choice(0)));
    }

    #[test]
    fn section_completeness_and_progress() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        assert!(!store.is_section_complete(&catalog, Section::PsychologicalFit));

        for id in ["psych-1", "psych-2", "psych-3"] {
            store.submit(&catalog, id, "4").unwrap();
        }
        let progress = store.section_progress(&catalog, Section::PsychologicalFit);
        assert_eq!(progress, SectionProgress { answered: 3, total: 5 });
        assert_eq!(progress.percent(), 60);
        assert_eq!(
            store.missing_in(&catalog, Section::PsychologicalFit),
            vec!["psych-4", "psych-5"]
        );

        store.submit(&catalog, "psych-4", "3").unwrap();
        store.submit(&catalog, "psych-5", "5").unwrap();
        assert!(store.is_section_complete(&catalog, Section::PsychologicalFit));
        assert!(!store.is_section_complete(&catalog, Section::Wiscar));
    }

    #[test]
    fn sealed_section_rejects_changes() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        store.submit(&catalog, "skill-1", "3").unwrap();
        store.seal(Section::Wiscar);

        let err = store.submit(&catalog, "skill-1", "5").unwrap_err();
        assert_eq!(err, AssessmentError::SectionSealed(Section::Wiscar));
        assert_eq!(store.get("skill-1"), Some(AnswerValue::Likert(3)));

        // Other sections stay open.
        store.submit(&catalog, "psych-1", "5").unwrap();
    }

    #[test]
    fn clear_resets_answers_and_seals() {
        let catalog = catalog();
        let mut store = ResponseStore::new();
        store.submit(&catalog, "psych-1", "5").unwrap();
        store.seal(Section::PsychologicalFit);
        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_sealed(Section::PsychologicalFit));
        assert_eq!(store.missing(&catalog).len(), catalog.len());
    }
}
