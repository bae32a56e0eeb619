//! The `careerfit init` command.

use std::path::Path;

use anyhow::{Context, Result};

use careerfit_core::catalog::QuestionCatalog;
use careerfit_core::config::CONFIG_FILE_NAME;
use careerfit_core::model::QuestionKind;

const ANSWERS_FILE_NAME: &str = "answers.toml";

pub fn execute() -> Result<()> {
    write_if_absent(Path::new(CONFIG_FILE_NAME), SAMPLE_CONFIG)?;
    write_if_absent(
        Path::new(ANSWERS_FILE_NAME),
        &answers_template(&QuestionCatalog::medical_coding()),
    )?;

    println!("\nNext steps:");
    println!("  1. Fill in {ANSWERS_FILE_NAME} (run `careerfit questions` to see the options)");
    println!("  2. Adjust weights and thresholds in {CONFIG_FILE_NAME} if needed");
    println!("  3. Run: careerfit score --answers {ANSWERS_FILE_NAME}");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

/// A complete, neutral answer sheet: every Likert item at 3, every
/// multiple-choice item on its first option.
fn answers_template(catalog: &QuestionCatalog) -> String {
    let mut out = format!(
        "# Answers for \"{}\" (catalog {} v{})\n\
         #\n\
         # Likert: 1 = Strongly Disagree .. 5 = Strongly Agree\n\
         # Multiple choice: zero-based option index\n\n\
         [answers]\n",
        catalog.name(),
        catalog.id(),
        catalog.version()
    );
    for q in catalog.questions() {
        out.push_str(&format!("# {}\n", q.prompt));
        match &q.kind {
            QuestionKind::Likert => out.push_str(&format!("{} = 3\n", q.id)),
            QuestionKind::MultipleChoice { options, .. } => {
                for (i, option) in options.iter().enumerate() {
                    out.push_str(&format!("#   {i}: {option}\n"));
                }
                out.push_str(&format!("{} = 0\n", q.id));
            }
        }
    }
    out
}

const SAMPLE_CONFIG: &str = r#"# careerfit scoring configuration

# Relative weight of each dimension in the overall score.
[weights]
psychological_fit = 1.5
technical_aptitude = 1.5
will = 1.25
interest = 1.25
skill = 0.75
cognitive = 1.0
ability_to_learn = 1.0
real_world_alignment = 0.75

# Overall score at or above `yes` is a Yes, at or above `maybe` a Maybe.
[thresholds]
yes = 75.0
maybe = 50.0

# Replace the next steps for a category:
# [[next_steps.maybe]]
# title = "Take an Introductory Course"
# detail = "Try a short medical terminology primer before committing"
"#;
