//! The session facade the UI talks to.

use std::sync::Arc;

use crate::aggregate::aggregate;
use crate::catalog::QuestionCatalog;
use crate::config::ScoringConfig;
use crate::error::AssessmentError;
use crate::flow::{AssessmentFlow, FlowStage};
use crate::model::{AnswerValue, Section};
use crate::report::{build_report, AssessmentReport};
use crate::responses::{ResponseStore, SectionProgress};
use crate::scoring::score_dimensions;

/// Score, aggregate and assemble a report in one pass.
///
/// Pure: neither the catalog nor the store is touched, so calling this twice
/// on the same inputs yields equal reports.
pub fn compute_report(
    catalog: &QuestionCatalog,
    responses: &ResponseStore,
    config: &ScoringConfig,
) -> Result<AssessmentReport, AssessmentError> {
    let scores = score_dimensions(catalog, responses)?;
    let result = aggregate(&scores, &config.weights, &config.thresholds)?;
    build_report(&result, &scores, &config.next_steps)
}

/// One user's pass through the quiz.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    catalog: Arc<QuestionCatalog>,
    config: ScoringConfig,
    responses: ResponseStore,
    flow: AssessmentFlow,
}

impl AssessmentSession {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self::with_config(catalog, ScoringConfig::default())
    }

    pub fn with_config(catalog: Arc<QuestionCatalog>, config: ScoringConfig) -> Self {
        Self {
            catalog,
            config,
            responses: ResponseStore::new(),
            flow: AssessmentFlow::new(),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    pub fn stage(&self) -> FlowStage {
        self.flow.stage()
    }

    pub fn progress_percent(&self) -> u8 {
        self.flow.stage().progress_percent()
    }

    /// Record a raw answer. Re-answering overwrites until the section is
    /// submitted.
    pub fn submit_answer(
        &mut self,
        question_id: &str,
        raw: &str,
    ) -> Result<AnswerValue, AssessmentError> {
        self.responses.submit(&self.catalog, question_id, raw)
    }

    pub fn is_section_complete(&self, section: Section) -> bool {
        self.responses.is_section_complete(&self.catalog, section)
    }

    pub fn section_progress(&self, section: Section) -> SectionProgress {
        self.responses.section_progress(&self.catalog, section)
    }

    pub fn advance(&mut self) -> Result<FlowStage, AssessmentError> {
        self.flow.advance(&self.catalog, &mut self.responses)
    }

    pub fn compute_report(&self) -> Result<AssessmentReport, AssessmentError> {
        let report = compute_report(&self.catalog, &self.responses, &self.config)?;
        tracing::info!(
            catalog = self.catalog.id(),
            overall_score = report.overall_score(),
            recommendation = %report.recommendation(),
            "report computed"
        );
        Ok(report)
    }

    pub fn retake(&mut self) {
        tracing::info!(catalog = self.catalog.id(), "assessment restarted");
        self.flow.retake(&mut self.responses);
    }
}
