//! Dimension scoring.
//!
//! Turns raw answers into one 0-100 score per dimension:
//!
//! - Likert `v` in `1..=5` scores `(v - 1) / 4 * 100`
//! - multiple choice scores `100` when correct, `0` otherwise
//! - a dimension is the weight-averaged score of its questions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::QuestionCatalog;
use crate::error::AssessmentError;
use crate::model::{AnswerValue, DimensionId, Question, QuestionKind, LIKERT_MAX, LIKERT_MIN};
use crate::responses::ResponseStore;

/// Score of a single dimension, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: DimensionId,
    pub value: f64,
}

/// Scores keyed by dimension, iterated in canonical dimension order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<DimensionId, f64>);

impl DimensionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a dimension's score, clamped to `[0, 100]`.
    pub fn insert(&mut self, dimension: DimensionId, value: f64) {
        self.0.insert(dimension, value.clamp(0.0, 100.0));
    }

    pub fn get(&self, dimension: DimensionId) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DimensionScore> + '_ {
        self.0.iter().map(|(&dimension, &value)| DimensionScore { dimension, value })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimensions of the fixed set that have no score.
    pub fn missing(&self) -> Vec<DimensionId> {
        DimensionId::ALL
            .into_iter()
            .filter(|d| !self.0.contains_key(d))
            .collect()
    }
}

impl FromIterator<(DimensionId, f64)> for DimensionScores {
    fn from_iter<I: IntoIterator<Item = (DimensionId, f64)>>(iter: I) -> Self {
        let mut scores = DimensionScores::new();
        for (dimension, value) in iter {
            scores.insert(dimension, value);
        }
        scores
    }
}

impl FromIterator<DimensionScore> for DimensionScores {
    fn from_iter<I: IntoIterator<Item = DimensionScore>>(iter: I) -> Self {
        iter.into_iter().map(|s| (s.dimension, s.value)).collect()
    }
}

/// Map a Likert value onto `[0, 100]`: 1 -> 0, 3 -> 50, 5 -> 100.
pub fn normalize_likert(value: u8) -> f64 {
    let span = f64::from(LIKERT_MAX - LIKERT_MIN);
    (f64::from(value) - f64::from(LIKERT_MIN)) / span * 100.0
}

/// All-or-nothing credit for a multiple-choice answer.
pub fn score_choice(selected: usize, correct_index: usize) -> f64 {
    if selected == correct_index {
        100.0
    } else {
        0.0
    }
}

/// Score one answered question.
pub fn question_score(question: &Question, value: AnswerValue) -> Result<f64, AssessmentError> {
    question.check_answer(&value)?;
    let score = match (&question.kind, value) {
        (QuestionKind::Likert, AnswerValue::Likert(v)) => normalize_likert(v),
        (QuestionKind::MultipleChoice { correct_index, .. }, AnswerValue::Choice(i)) => {
            score_choice(i, *correct_index)
        }
        _ => unreachable!("check_answer rejects mismatched kinds"),
    };
    Ok(score)
}

/// Compute one score per dimension present in the catalog.
///
/// Fails with [`AssessmentError::UnknownQuestion`] if the store holds an
/// answer the catalog does not define, and with
/// [`AssessmentError::IncompleteAssessment`] if any catalog question is
/// unanswered. Neither input is modified.
pub fn score_dimensions(
    catalog: &QuestionCatalog,
    responses: &ResponseStore,
) -> Result<DimensionScores, AssessmentError> {
    if let Some((stray, _)) = responses.answers().find(|(id, _)| catalog.get(id).is_none()) {
        return Err(AssessmentError::UnknownQuestion(stray.to_string()));
    }

    let missing = responses.missing(catalog);
    if !missing.is_empty() {
        return Err(AssessmentError::IncompleteAssessment { missing });
    }

    // (Σ weight * score, Σ weight) per dimension
    let mut sums: BTreeMap<DimensionId, (f64, f64)> = BTreeMap::new();
    for question in catalog.questions() {
        let value = responses
            .get(&question.id)
            .ok_or_else(|| AssessmentError::incomplete([question.id.as_str()]))?;
        let score = question_score(question, value)?;
        let entry = sums.entry(question.dimension).or_insert((0.0, 0.0));
        entry.0 += question.weight * score;
        entry.1 += question.weight;
    }

    let scores: DimensionScores = sums
        .into_iter()
        .map(|(dimension, (weighted, total_weight))| {
            let value = weighted / total_weight;
            tracing::debug!(%dimension, value, "dimension scored");
            (dimension, value)
        })
        .collect();

    Ok(scores)
}
