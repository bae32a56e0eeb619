//! Markdown report generator.

use std::path::Path;

use anyhow::{Context, Result};

use careerfit_core::model::Section;
use careerfit_core::report::ReportExport;

/// Render an exported report as Markdown.
pub fn to_markdown(export: &ReportExport) -> String {
    let report = &export.report;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", export.catalog.name));
    md.push_str(&format!(
        "_Catalog `{}` v{}, {} questions, generated {}_\n\n",
        export.catalog.id,
        export.catalog.version,
        export.catalog.question_count,
        export.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str(&format!(
        "## {}\n\n**Overall confidence score:** {:.2}/100\n\n",
        report.recommendation().headline(),
        report.overall_score()
    ));

    md.push_str("## Key Insights\n\n");
    for insight in report.insights() {
        md.push_str(&format!("- {insight}\n"));
    }
    md.push('\n');

    md.push_str("## Assessment Scores\n\n");
    md.push_str("| Section | Dimension | Score |\n");
    md.push_str("|---------|-----------|-------|\n");
    for section in Section::ALL {
        for score in report.section_scores(section) {
            md.push_str(&format!(
                "| {} | {} | {:.1} |\n",
                section.label(),
                score.dimension.label(),
                score.value
            ));
        }
    }
    md.push('\n');

    md.push_str("## Recommended Next Steps\n\n");
    for (i, step) in report.next_steps().iter().enumerate() {
        md.push_str(&format!("{}. **{}**: {}\n", i + 1, step.title, step.detail));
    }
    md.push('\n');

    md.push_str("## Related Career Paths\n\n");
    for path in report.related_paths() {
        md.push_str(&format!("- **{}**: {}\n", path.title, path.summary));
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(export: &ReportExport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_markdown(export))
        .with_context(|| format!("failed to write Markdown report to {}", path.display()))?;
    Ok(())
}
