//! Overall score and recommendation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{is_valid_weight, DimensionId, MAX_WEIGHT};
use crate::scoring::DimensionScores;

/// Categorical outcome derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    pub const ALL: [Recommendation; 3] = [
        Recommendation::Yes,
        Recommendation::Maybe,
        Recommendation::No,
    ];

    /// Headline shown above the overall score.
    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Yes: this career path is a strong fit",
            Recommendation::Maybe => "Maybe: promising, with gaps to close first",
            Recommendation::No => "No: consider a related path instead",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "Yes"),
            Recommendation::Maybe => write!(f, "Maybe"),
            Recommendation::No => write!(f, "No"),
        }
    }
}

impl FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Recommendation::Yes),
            "maybe" => Ok(Recommendation::Maybe),
            "no" => Ok(Recommendation::No),
            other => Err(format!("unknown recommendation: {other}")),
        }
    }
}

/// Per-dimension weights for the overall score.
///
/// Exposed as a plain mapping so callers can inspect or override the table
/// instead of relying on numbers buried in the aggregation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionWeights(BTreeMap<DimensionId, f64>);

impl DimensionWeights {
    /// The default table: core traits (psychological fit, technical aptitude,
    /// will, interest) outweigh the peripheral WISCAR dimensions.
    pub const DEFAULT_TABLE: [(DimensionId, f64); 8] = [
        (DimensionId::PsychologicalFit, 1.5),
        (DimensionId::TechnicalAptitude, 1.5),
        (DimensionId::Will, 1.25),
        (DimensionId::Interest, 1.25),
        (DimensionId::Skill, 0.75),
        (DimensionId::Cognitive, 1.0),
        (DimensionId::AbilityToLearn, 1.0),
        (DimensionId::RealWorldAlignment, 0.75),
    ];

    pub fn get(&self, dimension: DimensionId) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn set(&mut self, dimension: DimensionId, weight: f64) {
        self.0.insert(dimension, weight);
    }

    pub fn iter(&self) -> impl Iterator<Item = (DimensionId, f64)> + '_ {
        self.0.iter().map(|(&d, &w)| (d, w))
    }

    /// Every dimension must carry a positive weight no larger than
    /// [`MAX_WEIGHT`].
    pub fn validate(&self) -> Result<(), AssessmentError> {
        for dimension in DimensionId::ALL {
            match self.get(dimension) {
                None => {
                    return Err(AssessmentError::InvalidConfig(format!(
                        "no weight for dimension {dimension}"
                    )))
                }
                Some(w) => check_weight(dimension, w)?,
            }
        }
        Ok(())
    }
}

fn check_weight(dimension: DimensionId, weight: f64) -> Result<(), AssessmentError> {
    if is_valid_weight(weight) {
        Ok(())
    } else {
        Err(AssessmentError::InvalidConfig(format!(
            "weight for {dimension} must be within (0, {MAX_WEIGHT}], got {weight}"
        )))
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self(Self::DEFAULT_TABLE.into_iter().collect())
    }
}

impl FromIterator<(DimensionId, f64)> for DimensionWeights {
    fn from_iter<I: IntoIterator<Item = (DimensionId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lower bounds (inclusive) for `Yes` and `Maybe`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_yes")]
    pub yes: f64,
    #[serde(default = "default_maybe")]
    pub maybe: f64,
}

fn default_yes() -> f64 {
    75.0
}

fn default_maybe() -> f64 {
    50.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            yes: default_yes(),
            maybe: default_maybe(),
        }
    }
}

impl Thresholds {
    pub fn classify(&self, overall_score: f64) -> Recommendation {
        if overall_score >= self.yes {
            Recommendation::Yes
        } else if overall_score >= self.maybe {
            Recommendation::Maybe
        } else {
            Recommendation::No
        }
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.yes) || !in_range(self.maybe) {
            return Err(AssessmentError::InvalidConfig(format!(
                "thresholds must be within 0..=100 (yes {}, maybe {})",
                self.yes, self.maybe
            )));
        }
        if self.maybe > self.yes {
            return Err(AssessmentError::InvalidConfig(format!(
                "maybe threshold {} is above yes threshold {}",
                self.maybe, self.yes
            )));
        }
        Ok(())
    }
}

/// Overall score plus the category it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub overall_score: f64,
    pub recommendation: Recommendation,
}

/// Weighted mean of all eight dimension scores, rounded to two decimals.
///
/// Every dimension must be scored; a missing one fails with
/// [`AssessmentError::IncompleteAssessment`] naming the gaps. Out-of-range
/// weights or thresholds and non-finite dimension scores fail with
/// [`AssessmentError::InvalidConfig`] instead of being clamped.
pub fn aggregate(
    scores: &DimensionScores,
    weights: &DimensionWeights,
    thresholds: &Thresholds,
) -> Result<Aggregate, AssessmentError> {
    thresholds.validate()?;

    let missing = scores.missing();
    if !missing.is_empty() {
        return Err(AssessmentError::incomplete(
            missing.iter().map(|d| d.to_string()),
        ));
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for score in scores.iter() {
        let weight = weights
            .get(score.dimension)
            .ok_or_else(|| AssessmentError::UnknownDimension(score.dimension.to_string()))?;
        check_weight(score.dimension, weight)?;
        if !(0.0..=100.0).contains(&score.value) {
            return Err(AssessmentError::InvalidConfig(format!(
                "{} scored {} outside 0..=100",
                score.dimension, score.value
            )));
        }
        weighted += weight * score.value;
        total_weight += weight;
    }
    let mean = weighted / total_weight;
    if !mean.is_finite() {
        return Err(AssessmentError::InvalidConfig(format!(
            "overall score is not finite (weighted sum {weighted}, total weight {total_weight})"
        )));
    }

    let overall_score = round2(mean).clamp(0.0, 100.0);
    let recommendation = thresholds.classify(overall_score);
    tracing::debug!(overall_score, %recommendation, "assessment aggregated");

    Ok(Aggregate {
        overall_score,
        recommendation,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
