//! The question catalog.
//!
//! A catalog is validated once on construction and read-only afterwards, so
//! it can be shared between sessions behind an `Arc`.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{is_valid_weight, DimensionId, Question, QuestionKind, Section, MAX_WEIGHT};

/// A validated, versioned set of questions.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCatalog {
    id: String,
    name: String,
    description: String,
    version: String,
    questions: Vec<Question>,
}

/// Identifying fields of a catalog, without the questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub question_count: usize,
}

impl QuestionCatalog {
    /// Build a catalog, enforcing the structural invariants:
    /// unique ids, positive weights, non-empty options and an in-range
    /// correct index for every multiple-choice question.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, AssessmentError> {
        let catalog = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            version: version.into(),
            questions,
        };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn check(&self) -> Result<(), AssessmentError> {
        if self.questions.is_empty() {
            return Err(AssessmentError::InvalidCatalog(format!(
                "catalog '{}' has no questions",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if q.id.trim().is_empty() {
                return Err(AssessmentError::InvalidCatalog(
                    "question with empty id".into(),
                ));
            }
            if !seen.insert(q.id.as_str()) {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "duplicate question id: {}",
                    q.id
                )));
            }
            if !is_valid_weight(q.weight) {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "question {} has weight {} outside (0, {MAX_WEIGHT}]",
                    q.id, q.weight
                )));
            }
            if let QuestionKind::MultipleChoice {
                options,
                correct_index,
            } = &q.kind
            {
                if options.is_empty() {
                    return Err(AssessmentError::InvalidCatalog(format!(
                        "question {} has no options",
                        q.id
                    )));
                }
                if *correct_index >= options.len() {
                    return Err(AssessmentError::InvalidCatalog(format!(
                        "question {} has correct index {} but only {} options",
                        q.id,
                        correct_index,
                        options.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// All questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Questions measuring one dimension.
    pub fn questions_for(&self, dimension: DimensionId) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.dimension == dimension)
    }

    /// Questions presented on one section page.
    pub fn questions_in(&self, section: Section) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.section() == section)
    }

    /// Dimensions with at least one question, in canonical order.
    pub fn dimensions(&self) -> Vec<DimensionId> {
        let present: BTreeSet<DimensionId> = self.questions.iter().map(|q| q.dimension).collect();
        present.into_iter().collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            question_count: self.questions.len(),
        }
    }

    /// The built-in "Should I Learn Medical Coding?" catalog.
    pub fn medical_coding() -> Self {
        Self {
            id: "medical-coding".into(),
            name: "Should I Learn Medical Coding?".into(),
            description: "Comprehensive career assessment covering psychological fit, \
                          technical aptitude and the WISCAR framework."
                .into(),
            version: "1".into(),
            questions: medical_coding_questions(),
        }
    }
}

fn medical_coding_questions() -> Vec<Question> {
    use DimensionId::*;

    vec![
        Question::likert(
            "psych-1",
            PsychologicalFit,
            "I enjoy organizing information into clear, structured categories",
        ),
        Question::likert(
            "psych-2",
            PsychologicalFit,
            "I prefer working with detailed rules and procedures rather than ambiguous guidelines",
        ),
        Question::likert(
            "psych-3",
            PsychologicalFit,
            "I find satisfaction in repetitive tasks when they serve a meaningful purpose",
        ),
        Question::likert(
            "psych-4",
            PsychologicalFit,
            "I am comfortable spending long periods focusing on detail-oriented work",
        ),
        Question::likert(
            "psych-5",
            PsychologicalFit,
            "I prefer to double-check my work for accuracy rather than move quickly to the next task",
        ),
        Question::multiple_choice(
            "tech-1",
            TechnicalAptitude,
            "What does ICD-10 stand for?",
            &[
                "International Classification of Diseases, 10th Revision",
                "Internal Coding Database, 10th Version",
                "International Clinical Documentation, 10th Edition",
                "Internal Care Diagnosis, 10th Release",
            ],
            0,
        ),
        Question::multiple_choice(
            "tech-2",
            TechnicalAptitude,
            "A patient receives 15 units of insulin. If the total daily dose is 45 units, \
             what percentage was this injection?",
            &["25%", "33.3%", "40%", "50%"],
            1,
        ),
        Question::multiple_choice(
            "tech-3",
            TechnicalAptitude,
            "Which code format is used for medical procedures?",
            &["ICD-10-CM", "CPT", "HCPCS", "All of the above"],
            3,
        ),
        Question::multiple_choice(
            "tech-4",
            TechnicalAptitude,
            "In the following series, what comes next? A1, B2, C3, D4, ?",
            &["E5", "F6", "E4", "D5"],
            0,
        ),
        Question::multiple_choice(
            "tech-5",
            TechnicalAptitude,
            "Find the error in: 'Patient has diabetis mellitus type 2'",
            &[
                "No errors found",
                "Should be 'diabetes mellitus'",
                "Should be 'Type II'",
                "Should be 'diabetic mellitus'",
            ],
            1,
        ),
        Question::likert(
            "will-1",
            Will,
            "When faced with a challenging coding problem, I tend to stick with it until I find the solution",
        ),
        Question::likert(
            "will-2",
            Will,
            "I can maintain focus on detailed work for several hours without getting frustrated",
        ),
        Question::likert(
            "interest-1",
            Interest,
            "I find healthcare terminology and medical concepts genuinely interesting",
        ),
        Question::likert(
            "interest-2",
            Interest,
            "I would enjoy working behind the scenes to support healthcare operations",
        ),
        Question::likert(
            "skill-1",
            Skill,
            "I am comfortable using Excel or similar spreadsheet software",
        ),
        Question::likert(
            "skill-2",
            Skill,
            "I have experience with data entry or similar detail-oriented work",
        ),
        Question::likert(
            "cognitive-1",
            Cognitive,
            "I can quickly identify patterns and follow logical sequences",
        ),
        Question::likert(
            "cognitive-2",
            Cognitive,
            "I excel at tasks requiring sustained attention to detail",
        ),
        Question::likert(
            "ability-1",
            AbilityToLearn,
            "I pick up new classification systems or rule sets quickly when I study them",
        ),
        Question::likert(
            "ability-2",
            AbilityToLearn,
            "I am willing to complete structured coursework and a certification exam",
        ),
        Question::likert(
            "real-world-1",
            RealWorldAlignment,
            "A desk-based role reviewing clinical documentation matches the work environment I want",
        ),
        Question::likert(
            "real-world-2",
            RealWorldAlignment,
            "Steady, compliance-driven work with clear accuracy targets suits my career goals",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid_and_covers_every_dimension() {
        let catalog = QuestionCatalog::medical_coding();
        catalog.check().unwrap();
        assert_eq!(catalog.dimensions(), DimensionId::ALL.to_vec());
        assert_eq!(catalog.questions_in(Section::PsychologicalFit).count(), 5);
        assert_eq!(catalog.questions_in(Section::TechnicalAptitude).count(), 5);
        assert_eq!(catalog.questions_in(Section::Wiscar).count(), 12);
        assert_eq!(catalog.summary().question_count, 22);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = QuestionCatalog::new(
            "dupes",
            "Dupes",
            "1",
            vec![
                Question::likert("q1", DimensionId::Will, "a"),
                Question::likert("q1", DimensionId::Interest, "b"),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate question id: q1"));
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = QuestionCatalog::new(
            "bad",
            "Bad",
            "1",
            vec![Question::multiple_choice(
                "t1",
                DimensionId::TechnicalAptitude,
                "pick",
                &["a", "b"],
                2,
            )],
        )
        .unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_out_of_range_weight() {
        for weight in [0.0, -1.0, f64::NAN, 1e308, f64::INFINITY] {
            let result = QuestionCatalog::new(
                "w",
                "W",
                "1",
                vec![Question::likert("q1", DimensionId::Skill, "a").with_weight(weight)],
            );
            assert!(result.is_err(), "weight {weight} should be rejected");
        }
    }

    #[test]
    fn lookup_by_id_and_dimension() {
        let catalog = QuestionCatalog::medical_coding();
        let q = catalog.get("tech-3").unwrap();
        assert_eq!(q.dimension, DimensionId::TechnicalAptitude);
        assert!(catalog.get("q1").is_none());
        let ids: Vec<&str> = catalog
            .questions_for(DimensionId::Will)
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["will-1", "will-2"]);
    }
}
