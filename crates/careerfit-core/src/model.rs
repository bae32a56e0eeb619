//! Core data model types for careerfit.
//!
//! Dimensions, sections, questions and answer values: the vocabulary every
//! other module in the engine speaks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssessmentError;

/// Lowest value on the Likert agreement scale.
pub const LIKERT_MIN: u8 = 1;
/// Highest value on the Likert agreement scale.
pub const LIKERT_MAX: u8 = 5;

/// Labels for Likert values `1..=5`, in order.
pub const LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Upper bound for question and dimension weights. Keeps weighted sums finite.
pub const MAX_WEIGHT: f64 = 1_000.0;

/// Whether `weight` is usable in a weighted mean: finite, positive and at
/// most [`MAX_WEIGHT`].
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0 && weight <= MAX_WEIGHT
}

/// A trait or skill axis being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionId {
    PsychologicalFit,
    TechnicalAptitude,
    Will,
    Interest,
    Skill,
    Cognitive,
    AbilityToLearn,
    RealWorldAlignment,
}

impl DimensionId {
    /// Every dimension, in canonical report order.
    pub const ALL: [DimensionId; 8] = [
        DimensionId::PsychologicalFit,
        DimensionId::TechnicalAptitude,
        DimensionId::Will,
        DimensionId::Interest,
        DimensionId::Skill,
        DimensionId::Cognitive,
        DimensionId::AbilityToLearn,
        DimensionId::RealWorldAlignment,
    ];

    /// Stable machine name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionId::PsychologicalFit => "psychological_fit",
            DimensionId::TechnicalAptitude => "technical_aptitude",
            DimensionId::Will => "will",
            DimensionId::Interest => "interest",
            DimensionId::Skill => "skill",
            DimensionId::Cognitive => "cognitive",
            DimensionId::AbilityToLearn => "ability_to_learn",
            DimensionId::RealWorldAlignment => "real_world_alignment",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            DimensionId::PsychologicalFit => "Psychological Fit",
            DimensionId::TechnicalAptitude => "Technical Aptitude",
            DimensionId::Will => "Will",
            DimensionId::Interest => "Interest",
            DimensionId::Skill => "Skill",
            DimensionId::Cognitive => "Cognitive Readiness",
            DimensionId::AbilityToLearn => "Ability to Learn",
            DimensionId::RealWorldAlignment => "Real-World Alignment",
        }
    }

    /// The quiz section whose questions measure this dimension.
    pub fn section(&self) -> Section {
        match self {
            DimensionId::PsychologicalFit => Section::PsychologicalFit,
            DimensionId::TechnicalAptitude => Section::TechnicalAptitude,
            DimensionId::Will
            | DimensionId::Interest
            | DimensionId::Skill
            | DimensionId::Cognitive
            | DimensionId::AbilityToLearn
            | DimensionId::RealWorldAlignment => Section::Wiscar,
        }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "psychological_fit" | "psychological" => Ok(DimensionId::PsychologicalFit),
            "technical_aptitude" | "technical" => Ok(DimensionId::TechnicalAptitude),
            "will" => Ok(DimensionId::Will),
            "interest" => Ok(DimensionId::Interest),
            "skill" => Ok(DimensionId::Skill),
            "cognitive" | "cognitive_readiness" => Ok(DimensionId::Cognitive),
            "ability_to_learn" | "ability" => Ok(DimensionId::AbilityToLearn),
            "real_world_alignment" | "real_world" => Ok(DimensionId::RealWorldAlignment),
            other => Err(format!("unknown dimension: {other}")),
        }
    }
}

/// A group of dimensions answered together on one quiz page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PsychologicalFit,
    TechnicalAptitude,
    Wiscar,
}

impl Section {
    /// Sections in the order the quiz presents them.
    pub const ALL: [Section; 3] = [
        Section::PsychologicalFit,
        Section::TechnicalAptitude,
        Section::Wiscar,
    ];

    /// Dimensions measured by this section.
    pub fn dimensions(&self) -> &'static [DimensionId] {
        match self {
            Section::PsychologicalFit => &[DimensionId::PsychologicalFit],
            Section::TechnicalAptitude => &[DimensionId::TechnicalAptitude],
            Section::Wiscar => &[
                DimensionId::Will,
                DimensionId::Interest,
                DimensionId::Skill,
                DimensionId::Cognitive,
                DimensionId::AbilityToLearn,
                DimensionId::RealWorldAlignment,
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::PsychologicalFit => "Psychological Fit",
            Section::TechnicalAptitude => "Technical Aptitude",
            Section::Wiscar => "WISCAR Analysis",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::PsychologicalFit => write!(f, "psychological_fit"),
            Section::TechnicalAptitude => write!(f, "technical_aptitude"),
            Section::Wiscar => write!(f, "wiscar"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "psychological_fit" | "psychological" => Ok(Section::PsychologicalFit),
            "technical_aptitude" | "technical" => Ok(Section::TechnicalAptitude),
            "wiscar" => Ok(Section::Wiscar),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Agreement on the 1-5 scale.
    Likert,
    /// Pick one option; exactly one is correct.
    MultipleChoice {
        options: Vec<String>,
        correct_index: usize,
    },
}

/// A single catalog question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Text shown to the user.
    pub prompt: String,
    /// The one dimension this question measures.
    pub dimension: DimensionId,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Relative weight inside its dimension. Must be positive.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

pub(crate) fn default_weight() -> f64 {
    1.0
}

impl Question {
    pub fn likert(id: impl Into<String>, dimension: DimensionId, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            dimension,
            kind: QuestionKind::Likert,
            weight: default_weight(),
        }
    }

    pub fn multiple_choice(
        id: impl Into<String>,
        dimension: DimensionId,
        prompt: impl Into<String>,
        options: &[&str],
        correct_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            dimension,
            kind: QuestionKind::MultipleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_index,
            },
            weight: default_weight(),
        }
    }

    /// Builder-style weight override.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn section(&self) -> Section {
        self.dimension.section()
    }

    /// Parse a raw answer as submitted by the UI.
    ///
    /// Likert questions take `"1"`..`"5"`; multiple-choice questions take the
    /// zero-based index of the selected option.
    pub fn parse_answer(&self, raw: &str) -> Result<AnswerValue, AssessmentError> {
        let trimmed = raw.trim();
        let value = match self.kind {
            QuestionKind::Likert => trimmed
                .parse::<u8>()
                .map(AnswerValue::Likert)
                .map_err(|_| self.invalid(raw, "expected an integer between 1 and 5"))?,
            QuestionKind::MultipleChoice { .. } => trimmed
                .parse::<usize>()
                .map(AnswerValue::Choice)
                .map_err(|_| self.invalid(raw, "expected an option index"))?,
        };
        self.check_answer(&value)?;
        Ok(value)
    }

    /// Check that an already-typed answer fits this question's kind and range.
    pub fn check_answer(&self, value: &AnswerValue) -> Result<(), AssessmentError> {
        match (&self.kind, value) {
            (QuestionKind::Likert, AnswerValue::Likert(v)) => {
                if (LIKERT_MIN..=LIKERT_MAX).contains(v) {
                    Ok(())
                } else {
                    Err(self.invalid(&v.to_string(), "Likert answers must be between 1 and 5"))
                }
            }
            (QuestionKind::MultipleChoice { options, .. }, AnswerValue::Choice(i)) => {
                if *i < options.len() {
                    Ok(())
                } else {
                    Err(self.invalid(
                        &i.to_string(),
                        &format!("option index must be below {}", options.len()),
                    ))
                }
            }
            (QuestionKind::Likert, other) => {
                Err(self.invalid(&other.to_string(), "question expects a Likert answer"))
            }
            (QuestionKind::MultipleChoice { .. }, other) => Err(self.invalid(
                &other.to_string(),
                "question expects a multiple-choice answer",
            )),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> AssessmentError {
        AssessmentError::InvalidAnswerValue {
            question_id: self.id.clone(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A validated answer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    /// Likert agreement, `1..=5`.
    Likert(u8),
    /// Zero-based index of the selected option.
    Choice(usize),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Likert(v) => write!(f, "{v}"),
            AnswerValue::Choice(i) => write!(f, "{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice() -> Question {
        Question::multiple_choice(
            "tech-4",
            DimensionId::TechnicalAptitude,
            "A1, B2, C3, D4, ?",
            &["E5", "F6", "E4", "D5"],
            0,
        )
    }

    #[test]
    fn dimension_display_and_parse() {
        assert_eq!(DimensionId::AbilityToLearn.to_string(), "ability_to_learn");
        assert_eq!(
            "real-world-alignment".parse::<DimensionId>().unwrap(),
            DimensionId::RealWorldAlignment
        );
        assert_eq!(
            "Psychological".parse::<DimensionId>().unwrap(),
            DimensionId::PsychologicalFit
        );
        assert!("grit".parse::<DimensionId>().is_err());
        for dim in DimensionId::ALL {
            assert_eq!(dim.as_str().parse::<DimensionId>().unwrap(), dim);
        }
    }

    #[test]
    fn sections_partition_dimensions() {
        let mut covered: Vec<DimensionId> = Section::ALL
            .iter()
            .flat_map(|s| s.dimensions().iter().copied())
            .collect();
        covered.sort();
        assert_eq!(covered, DimensionId::ALL.to_vec());
        for dim in DimensionId::ALL {
            assert!(dim.section().dimensions().contains(&dim));
        }
    }

    #[test]
    fn likert_parsing_accepts_scale_only() {
        let q = Question::likert("will-1", DimensionId::Will, "I stick with hard problems");
        assert_eq!(q.parse_answer("1").unwrap(), AnswerValue::Likert(1));
        assert_eq!(q.parse_answer(" 5 ").unwrap(), AnswerValue::Likert(5));
        for bad in ["0", "6", "", "agree", "-1", "3.5"] {
            let err = q.parse_answer(bad).unwrap_err();
            assert!(
                matches!(err, AssessmentError::InvalidAnswerValue { .. }),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn choice_parsing_checks_bounds() {
        let q = choice();
        assert_eq!(q.parse_answer("3").unwrap(), AnswerValue::Choice(3));
        assert!(q.parse_answer("4").is_err());
        assert!(q.parse_answer("E5").is_err());
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let q = choice();
        let err = q.check_answer(&AnswerValue::Likert(3)).unwrap_err();
        match err {
            AssessmentError::InvalidAnswerValue { question_id, .. } => {
                assert_eq!(question_id, "tech-4")
            }
            other => panic!("expected InvalidAnswerValue, got {other:?}"),
        }
    }

    #[test]
    fn question_serde_roundtrip_keeps_kind() {
        let q = choice().with_weight(2.0);
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"type\":\"multiple-choice\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
