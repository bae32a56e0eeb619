//! The final assessment report and its JSON export envelope.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{Aggregate, Recommendation};
use crate::catalog::CatalogSummary;
use crate::error::AssessmentError;
use crate::model::{DimensionId, Section};
use crate::scoring::{DimensionScore, DimensionScores};

/// Dimension scores at or above this are called out as strengths.
pub const STRENGTH_THRESHOLD: f64 = 80.0;
/// Dimension scores below this are called out as growth areas.
pub const GROWTH_THRESHOLD: f64 = 50.0;

/// One recommended action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStep {
    pub title: String,
    pub detail: String,
}

impl NextStep {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Next steps keyed by recommendation category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStepTable {
    #[serde(default = "default_yes_steps")]
    pub yes: Vec<NextStep>,
    #[serde(default = "default_maybe_steps")]
    pub maybe: Vec<NextStep>,
    #[serde(default = "default_no_steps")]
    pub no: Vec<NextStep>,
}

impl NextStepTable {
    pub fn for_recommendation(&self, recommendation: Recommendation) -> &[NextStep] {
        match recommendation {
            Recommendation::Yes => &self.yes,
            Recommendation::Maybe => &self.maybe,
            Recommendation::No => &self.no,
        }
    }
}

impl Default for NextStepTable {
    fn default() -> Self {
        Self {
            yes: default_yes_steps(),
            maybe: default_maybe_steps(),
            no: default_no_steps(),
        }
    }
}

fn default_yes_steps() -> Vec<NextStep> {
    vec![
        NextStep::new(
            "Start with ICD-10-CM Basics",
            "Begin with foundational courses through AAPC or Coursera",
        ),
        NextStep::new(
            "Learn HIPAA Compliance",
            "Essential for working with medical records",
        ),
        NextStep::new(
            "Practice with Real Cases",
            "Apply your knowledge with practical coding exercises",
        ),
        NextStep::new(
            "Pursue CPC Certification",
            "Get certified through AAPC for career readiness",
        ),
    ]
}

fn default_maybe_steps() -> Vec<NextStep> {
    vec![
        NextStep::new(
            "Take an Introductory Course",
            "Try a short medical terminology or ICD-10-CM primer before committing",
        ),
        NextStep::new(
            "Shadow a Working Coder",
            "Talk to coders or billing staff about a typical day",
        ),
        NextStep::new(
            "Strengthen Your Growth Areas",
            "Focus on the dimensions that scored below 50, then retake the assessment",
        ),
    ]
}

fn default_no_steps() -> Vec<NextStep> {
    vec![
        NextStep::new(
            "Explore Related Career Paths",
            "Review the related healthcare roles listed below",
        ),
        NextStep::new(
            "Revisit Your Priorities",
            "Consider which kind of work environment and daily tasks motivate you",
        ),
    ]
}

/// An adjacent career worth considering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub summary: String,
}

/// Careers adjacent to medical coding, listed for every outcome.
pub fn related_career_paths() -> Vec<CareerPath> {
    [
        (
            "Health Information Management",
            "Broader healthcare data management role",
        ),
        (
            "Medical Billing Specialist",
            "Focus on insurance claims and billing",
        ),
        ("Clinical Data Analyst", "Healthcare analytics and reporting"),
        ("Healthcare Compliance", "Ensure regulatory compliance"),
    ]
    .into_iter()
    .map(|(title, summary)| CareerPath {
        title: title.to_string(),
        summary: summary.to_string(),
    })
    .collect()
}

/// The immutable result of a completed assessment.
///
/// Recomputing a report from the same answers yields an equal value.
/// Deserialized reports are checked with [`AssessmentReport::check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredReport")]
pub struct AssessmentReport {
    overall_score: f64,
    recommendation: Recommendation,
    dimension_scores: Vec<DimensionScore>,
    insights: Vec<String>,
    next_steps: Vec<NextStep>,
    related_paths: Vec<CareerPath>,
}

/// Wire shape of [`AssessmentReport`] before its invariants are checked.
#[derive(Deserialize)]
struct StoredReport {
    overall_score: f64,
    recommendation: Recommendation,
    dimension_scores: Vec<DimensionScore>,
    insights: Vec<String>,
    next_steps: Vec<NextStep>,
    related_paths: Vec<CareerPath>,
}

impl TryFrom<StoredReport> for AssessmentReport {
    type Error = AssessmentError;

    fn try_from(stored: StoredReport) -> Result<Self, Self::Error> {
        let report = AssessmentReport {
            overall_score: stored.overall_score,
            recommendation: stored.recommendation,
            dimension_scores: stored.dimension_scores,
            insights: stored.insights,
            next_steps: stored.next_steps,
            related_paths: stored.related_paths,
        };
        report.check()?;
        Ok(report)
    }
}

impl AssessmentReport {
    /// Every dimension scored exactly once and every score within 0..=100.
    pub fn check(&self) -> Result<(), AssessmentError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.overall_score) {
            return Err(AssessmentError::InvalidReport(format!(
                "overall score {} outside 0..=100",
                self.overall_score
            )));
        }
        for dimension in DimensionId::ALL {
            let mut matching = self
                .dimension_scores
                .iter()
                .filter(|s| s.dimension == dimension);
            match (matching.next(), matching.next()) {
                (None, _) => {
                    return Err(AssessmentError::InvalidReport(format!(
                        "no score for {dimension}"
                    )))
                }
                (Some(_), Some(_)) => {
                    return Err(AssessmentError::InvalidReport(format!(
                        "{dimension} scored more than once"
                    )))
                }
                (Some(score), None) if !in_range(score.value) => {
                    return Err(AssessmentError::InvalidReport(format!(
                        "{dimension} score {} outside 0..=100",
                        score.value
                    )))
                }
                (Some(_), None) => {}
            }
        }
        Ok(())
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    /// One entry per dimension, in canonical order.
    pub fn dimension_scores(&self) -> &[DimensionScore] {
        &self.dimension_scores
    }

    pub fn score(&self, dimension: DimensionId) -> Option<f64> {
        self.dimension_scores
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.value)
    }

    /// Scores of the dimensions measured by one section.
    pub fn section_scores(&self, section: Section) -> impl Iterator<Item = &DimensionScore> {
        self.dimension_scores
            .iter()
            .filter(move |s| s.dimension.section() == section)
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn next_steps(&self) -> &[NextStep] {
        &self.next_steps
    }

    pub fn related_paths(&self) -> &[CareerPath] {
        &self.related_paths
    }

    pub fn strengths(&self) -> Vec<DimensionId> {
        self.dimension_scores
            .iter()
            .filter(|s| s.value >= STRENGTH_THRESHOLD)
            .map(|s| s.dimension)
            .collect()
    }

    pub fn growth_areas(&self) -> Vec<DimensionId> {
        self.dimension_scores
            .iter()
            .filter(|s| s.value < GROWTH_THRESHOLD)
            .map(|s| s.dimension)
            .collect()
    }
}

/// Assemble the final report from an aggregate and its dimension scores.
pub fn build_report(
    aggregate: &Aggregate,
    scores: &DimensionScores,
    next_steps: &NextStepTable,
) -> Result<AssessmentReport, AssessmentError> {
    let missing = scores.missing();
    if !missing.is_empty() {
        return Err(AssessmentError::incomplete(
            missing.iter().map(|d| d.to_string()),
        ));
    }

    let dimension_scores: Vec<DimensionScore> = scores.iter().collect();
    let insights = insights(aggregate, &dimension_scores);

    let report = AssessmentReport {
        overall_score: aggregate.overall_score,
        recommendation: aggregate.recommendation,
        dimension_scores,
        insights,
        next_steps: next_steps
            .for_recommendation(aggregate.recommendation)
            .to_vec(),
        related_paths: related_career_paths(),
    };
    report.check()?;
    Ok(report)
}

fn insights(aggregate: &Aggregate, scores: &[DimensionScore]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} (overall confidence {:.2}/100).",
        aggregate.recommendation.headline(),
        aggregate.overall_score
    )];

    let describe = |filter: &dyn Fn(f64) -> bool| -> Vec<String> {
        scores
            .iter()
            .filter(|s| filter(s.value))
            .map(|s| format!("{} ({:.0})", s.dimension.label(), s.value))
            .collect()
    };

    let strengths = describe(&|v| v >= STRENGTH_THRESHOLD);
    let growth = describe(&|v| v < GROWTH_THRESHOLD);

    if !strengths.is_empty() {
        lines.push(format!("Strengths: {}.", strengths.join(", ")));
    }
    if !growth.is_empty() {
        lines.push(format!("Areas to develop: {}.", growth.join(", ")));
    }
    if strengths.is_empty() && growth.is_empty() {
        lines.push("Scores are balanced, with no dimension standing out either way.".into());
    }

    let value = |d: DimensionId| {
        scores
            .iter()
            .find(|s| s.dimension == d)
            .map(|s| s.value)
            .unwrap_or_default()
    };
    if value(DimensionId::Skill) < GROWTH_THRESHOLD
        && value(DimensionId::AbilityToLearn) >= STRENGTH_THRESHOLD
    {
        lines.push(
            "Current domain skills are limited, but strong learning aptitude suggests they \
             can be acquired."
                .into(),
        );
    }

    lines
}

/// A report wrapped with identity and provenance for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    /// Unique export identifier.
    pub id: Uuid,
    /// When the export was generated.
    pub generated_at: DateTime<Utc>,
    /// The catalog the answers were scored against.
    pub catalog: CatalogSummary,
    pub report: AssessmentReport,
}

impl ReportExport {
    pub fn new(catalog: CatalogSummary, report: AssessmentReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            catalog,
            report,
        }
    }

    /// Save the export as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let export: ReportExport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, DimensionWeights, Thresholds};
    use crate::catalog::QuestionCatalog;

    fn uniform(value: f64) -> DimensionScores {
        DimensionId::ALL.into_iter().map(|d| (d, value)).collect()
    }

    fn report_for(scores: &DimensionScores) -> AssessmentReport {
        let agg = aggregate(scores, &DimensionWeights::default(), &Thresholds::default()).unwrap();
        build_report(&agg, scores, &NextStepTable::default()).unwrap()
    }

    #[test]
    fn yes_report_carries_certification_steps() {
        let report = report_for(&uniform(80.0));
        assert_eq!(report.recommendation(), Recommendation::Yes);
        assert_eq!(report.overall_score(), 80.0);
        assert_eq!(report.dimension_scores().len(), 8);
        let titles: Vec<&str> = report.next_steps().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Start with ICD-10-CM Basics",
                "Learn HIPAA Compliance",
                "Practice with Real Cases",
                "Pursue CPC Certification",
            ]
        );
        assert_eq!(report.related_paths().len(), 4);
        assert_eq!(report.strengths().len(), 8);
        assert!(report.growth_areas().is_empty());
    }

    #[test]
    fn no_report_lists_growth_areas() {
        let report = report_for(&uniform(40.0));
        assert_eq!(report.recommendation(), Recommendation::No);
        assert_eq!(report.next_steps(), NextStepTable::default().no.as_slice());
        assert_eq!(report.growth_areas(), DimensionId::ALL.to_vec());
        assert!(report.insights()[0].starts_with("No:"));
        assert!(report.insights()[1].starts_with("Areas to develop: Psychological Fit (40)"));
    }

    #[test]
    fn learning_aptitude_insight() {
        let mut scores = uniform(65.0);
        scores.insert(DimensionId::Skill, 25.0);
        scores.insert(DimensionId::AbilityToLearn, 87.5);
        let report = report_for(&scores);
        assert!(report
            .insights()
            .iter()
            .any(|i| i.contains("strong learning aptitude")));
        assert_eq!(report.strengths(), vec![DimensionId::AbilityToLearn]);
        assert_eq!(report.growth_areas(), vec![DimensionId::Skill]);
    }

    #[test]
    fn balanced_scores_get_neutral_insight() {
        let report = report_for(&uniform(60.0));
        assert_eq!(report.recommendation(), Recommendation::Maybe);
        assert_eq!(report.insights().len(), 2);
        assert!(report.insights()[1].contains("balanced"));
    }

    #[test]
    fn section_scores_filter_by_section() {
        let report = report_for(&uniform(70.0));
        assert_eq!(report.section_scores(Section::Wiscar).count(), 6);
        assert_eq!(report.section_scores(Section::TechnicalAptitude).count(), 1);
        assert_eq!(report.score(DimensionId::Will), Some(70.0));
    }

    #[test]
    fn missing_dimension_fails() {
        let full = uniform(80.0);
        let agg = aggregate(&full, &DimensionWeights::default(), &Thresholds::default()).unwrap();
        let partial: DimensionScores = full
            .iter()
            .filter(|s| s.dimension != DimensionId::Skill)
            .collect();
        let err = build_report(&agg, &partial, &NextStepTable::default()).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::IncompleteAssessment {
                missing: vec!["skill".into()]
            }
        );
    }

    #[test]
    fn out_of_range_aggregate_is_rejected() {
        let agg = Aggregate {
            overall_score: 512.0,
            recommendation: Recommendation::Yes,
        };
        let err = build_report(&agg, &uniform(80.0), &NextStepTable::default()).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidReport(_)));
    }

    #[test]
    fn custom_next_steps_are_used() {
        let table = NextStepTable {
            maybe: vec![NextStep::new("Book a mentor call", "One hour")],
            ..NextStepTable::default()
        };
        let scores = uniform(55.0);
        let agg = aggregate(&scores, &DimensionWeights::default(), &Thresholds::default()).unwrap();
        let report = build_report(&agg, &scores, &table).unwrap();
        assert_eq!(report.next_steps().len(), 1);
        assert_eq!(report.next_steps()[0].title, "Book a mentor call");
    }

    #[test]
    fn export_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let export = ReportExport::new(
            QuestionCatalog::medical_coding().summary(),
            report_for(&uniform(80.0)),
        );
        export.save_json(&path).unwrap();

        let loaded = ReportExport::load_json(&path).unwrap();
        assert_eq!(loaded.id, export.id);
        assert_eq!(loaded.catalog, export.catalog);
        assert_eq!(loaded.report, export.report);
    }

    #[test]
    fn load_rejects_report_with_broken_invariants() {
        let dir = tempfile::tempdir().unwrap();
        let export = ReportExport::new(
            QuestionCatalog::medical_coding().summary(),
            report_for(&uniform(80.0)),
        );
        let good = serde_json::to_value(&export).unwrap();

        let mut out_of_range = good.clone();
        out_of_range["report"]["overall_score"] = serde_json::json!(512.0);
        let mut no_dimensions = good.clone();
        no_dimensions["report"]["dimension_scores"] = serde_json::json!([]);
        let mut duplicated = good.clone();
        let first = good["report"]["dimension_scores"][0].clone();
        duplicated["report"]["dimension_scores"]
            .as_array_mut()
            .unwrap()
            .push(first);

        for (name, value) in [
            ("range", out_of_range),
            ("empty", no_dimensions),
            ("duplicate", duplicated),
        ] {
            let path = dir.path().join(format!("{name}.json"));
            std::fs::write(&path, value.to_string()).unwrap();
            let err = ReportExport::load_json(&path).unwrap_err();
            assert!(
                format!("{err:#}").contains("invalid report"),
                "{name}: {err:#}"
            );
        }
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = ReportExport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read report"));
    }
}
