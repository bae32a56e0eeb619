//! The `careerfit score` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use careerfit_core::config::load_config_from;
use careerfit_core::flow::FlowStage;
use careerfit_core::parser::parse_answers;
use careerfit_core::report::ReportExport;
use careerfit_core::session::AssessmentSession;
use careerfit_report::{generate_html, to_markdown, write_html_report, write_markdown_report};

/// Directory used when every format is requested and no `--output` is given.
const DEFAULT_OUTPUT_DIR: &str = "./careerfit-results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
    Markdown,
    Html,
}

impl ReportFormat {
    const ALL: [ReportFormat; 4] = [
        ReportFormat::Text,
        ReportFormat::Json,
        ReportFormat::Markdown,
        ReportFormat::Html,
    ];

    /// Parse `all` or a comma-separated list such as `text,json`.
    fn parse_list(spec: &str) -> Result<Vec<ReportFormat>> {
        if spec.trim() == "all" {
            return Ok(ReportFormat::ALL.to_vec());
        }
        spec.split(',')
            .map(|f| match f.trim() {
                "text" => Ok(ReportFormat::Text),
                "json" => Ok(ReportFormat::Json),
                "markdown" | "md" => Ok(ReportFormat::Markdown),
                "html" => Ok(ReportFormat::Html),
                other => anyhow::bail!(
                    "unknown format: {other} (expected text, json, markdown, html or all)"
                ),
            })
            .collect()
    }
}

pub fn execute(
    answers_path: PathBuf,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let catalog = Arc::new(super::load_catalog(catalog_path.as_deref())?);
    let config = load_config_from(config_path.as_deref())?;
    let answers = parse_answers(&answers_path)?;
    let formats = ReportFormat::parse_list(&format)?;

    let mut session = AssessmentSession::with_config(Arc::clone(&catalog), config);
    for (question_id, raw) in &answers {
        session
            .submit_answer(question_id, raw)
            .with_context(|| format!("in {}", answers_path.display()))?;
    }
    while session.stage() != FlowStage::Results {
        let stage = session.stage();
        session
            .advance()
            .with_context(|| format!("cannot finish {}", stage.label()))?;
    }

    let report = session.compute_report()?;
    let export = ReportExport::new(catalog.summary(), report);

    let output = match output {
        Some(dir) => Some(dir),
        None if ReportFormat::ALL.iter().all(|f| formats.contains(f)) => {
            Some(PathBuf::from(DEFAULT_OUTPUT_DIR))
        }
        None => None,
    };

    let timestamp = export.generated_at.format("%Y-%m-%dT%H%M%S");
    for fmt in formats {
        match (fmt, &output) {
            (ReportFormat::Text, _) => print_summary(&export),
            (ReportFormat::Json, Some(dir)) => {
                let path = dir.join(format!("report-{timestamp}.json"));
                export.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            (ReportFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&export)?),
            (ReportFormat::Markdown, Some(dir)) => {
                let path = dir.join(format!("report-{timestamp}.md"));
                write_markdown_report(&export, &path)?;
                eprintln!("Markdown report: {}", path.display());
            }
            (ReportFormat::Markdown, None) => print!("{}", to_markdown(&export)),
            (ReportFormat::Html, Some(dir)) => {
                let path = dir.join(format!("report-{timestamp}.html"));
                write_html_report(&export, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            (ReportFormat::Html, None) => println!("{}", generate_html(&export)),
        }
    }

    Ok(())
}

fn print_summary(export: &ReportExport) {
    use comfy_table::{Cell, Table};

    let report = &export.report;

    let mut table = Table::new();
    table.set_header(vec!["Section", "Dimension", "Score"]);
    for score in report.dimension_scores() {
        table.add_row(vec![
            Cell::new(score.dimension.section().label()),
            Cell::new(score.dimension.label()),
            Cell::new(format!("{:.1}", score.value)),
        ]);
    }

    println!("{} ({} questions)", export.catalog.name, export.catalog.question_count);
    println!("\n{table}\n");
    println!("Overall confidence score: {:.2}/100", report.overall_score());
    println!("Recommendation: {}", report.recommendation().headline());

    println!("\nInsights:");
    for insight in report.insights() {
        println!("  - {insight}");
    }

    println!("\nNext steps:");
    for (i, step) in report.next_steps().iter().enumerate() {
        println!("  {}. {}: {}", i + 1, step.title, step.detail);
    }

    println!("\nRelated career paths:");
    for path in report.related_paths() {
        println!("  - {}: {}", path.title, path.summary);
    }
}
