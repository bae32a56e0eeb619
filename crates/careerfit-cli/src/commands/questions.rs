//! The `careerfit questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use careerfit_core::model::{QuestionKind, Section, LIKERT_LABELS};

pub fn execute(catalog_path: Option<PathBuf>, section: Option<String>) -> Result<()> {
    let catalog = super::load_catalog(catalog_path.as_deref())?;
    let section: Option<Section> = section
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!("{e}")))
        .transpose()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Section", "Dimension", "Answer", "Prompt"]);

    let mut shown = 0;
    for q in catalog.questions() {
        if section.is_some_and(|s| q.section() != s) {
            continue;
        }
        let answer = match &q.kind {
            QuestionKind::Likert => format!("1-5 ({} .. {})", LIKERT_LABELS[0], LIKERT_LABELS[4]),
            QuestionKind::MultipleChoice { options, .. } => options
                .iter()
                .enumerate()
                .map(|(i, o)| format!("{i}: {o}"))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(q.section().label()),
            Cell::new(q.dimension.label()),
            Cell::new(answer),
            Cell::new(&q.prompt),
        ]);
        shown += 1;
    }

    println!("{} v{}", catalog.name(), catalog.version());
    println!("{table}");
    println!("{shown} questions");

    Ok(())
}
