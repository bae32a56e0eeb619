//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use careerfit_core::aggregate::Recommendation;
use careerfit_core::model::Section;
use careerfit_core::report::ReportExport;
use careerfit_core::scoring::DimensionScore;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Bar colour for a 0-100 score.
fn score_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "#22c55e"
    } else if score >= 50.0 {
        "#eab308"
    } else {
        "#ef4444"
    }
}

fn recommendation_class(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Yes => "yes",
        Recommendation::Maybe => "maybe",
        Recommendation::No => "no",
    }
}

/// Generate an HTML page for an exported report.
pub fn generate_html(export: &ReportExport) -> String {
    let report = &export.report;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>careerfit report: {}</title>\n",
        html_escape(&export.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&export.catalog.name)));
    html.push_str(&format!(
        "<p class=\"meta\">Catalog <strong>{}</strong> v{} | {} questions | {}</p>\n",
        html_escape(&export.catalog.id),
        html_escape(&export.catalog.version),
        export.catalog.question_count,
        export.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Overall result
    html.push_str(&format!(
        "<section class=\"overall {}\">\n",
        recommendation_class(report.recommendation())
    ));
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        html_escape(report.recommendation().headline())
    ));
    html.push_str(&format!(
        "<div class=\"score\">{:.2}</div>\n<p>Overall Confidence Score</p>\n",
        report.overall_score()
    ));
    html.push_str("</section>\n");

    // Insights
    html.push_str("<section>\n<h2>Key Insights</h2>\n<ul>\n");
    for insight in report.insights() {
        html.push_str(&format!("<li>{}</li>\n", html_escape(insight)));
    }
    html.push_str("</ul>\n</section>\n");

    // Scores per section
    html.push_str("<section>\n<h2>Assessment Scores</h2>\n");
    for section in Section::ALL {
        let scores: Vec<&DimensionScore> = report.section_scores(section).collect();
        html.push_str(&format!("<h3>{}</h3>\n", section.label()));
        html.push_str(&generate_bar_chart(&scores));
    }
    html.push_str("</section>\n");

    // Next steps
    html.push_str("<section>\n<h2>Recommended Next Steps</h2>\n<ol>\n");
    for step in report.next_steps() {
        html.push_str(&format!(
            "<li><strong>{}</strong><p>{}</p></li>\n",
            html_escape(&step.title),
            html_escape(&step.detail)
        ));
    }
    html.push_str("</ol>\n</section>\n");

    // Related paths
    html.push_str("<section>\n<h2>Related Career Paths to Consider</h2>\n<div class=\"paths\">\n");
    for path in report.related_paths() {
        html.push_str(&format!(
            "<div class=\"path\"><h4>{}</h4><p>{}</p></div>\n",
            html_escape(&path.title),
            html_escape(&path.summary)
        ));
    }
    html.push_str("</div>\n</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(export).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(export: &ReportExport, path: &Path) -> Result<()> {
    let html = generate_html(export);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(scores: &[&DimensionScore]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, score) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (score.value / 100.0 * max_width as f64).round() as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(score.dimension.label())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            score_color(score.value)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}/100</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score.value
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --muted: #6b7280; --border: #e5e7eb; --yes: #dcfce7; --maybe: #fef9c3; --no: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --yes: #064e3b; --maybe: #713f12; --no: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 960px; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, li p, .path p { color: var(--muted); }
.overall { border: 2px solid var(--border); border-radius: 12px; padding: 2rem; text-align: center; }
.overall.yes { background: var(--yes); }
.overall.maybe { background: var(--maybe); }
.overall.no { background: var(--no); }
.score { font-size: 4rem; font-weight: bold; }
.paths { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; }
.path { border: 1px solid var(--border); border-radius: 8px; padding: 0 1rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 0.5rem 0; }
"#;
