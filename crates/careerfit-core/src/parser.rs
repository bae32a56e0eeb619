//! TOML catalog and answer-sheet parser.
//!
//! Loads question catalogs from TOML files and directories, reads answer
//! sheets, and reports soft validation warnings.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::QuestionCatalog;
use crate::error::AssessmentError;
use crate::model::{default_weight, DimensionId, Question, QuestionKind};

/// Dimensions measured by fewer questions than this get a warning.
pub const MIN_QUESTIONS_PER_DIMENSION: usize = 2;

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_version")]
    version: String,
}

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum TomlQuestionType {
    Likert,
    MultipleChoice,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    dimension: String,
    #[serde(rename = "type")]
    kind: TomlQuestionType,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct: Option<usize>,
}

impl TomlQuestion {
    fn into_question(self) -> Result<Question, AssessmentError> {
        let dimension: DimensionId = self.dimension.parse().map_err(|e: String| {
            AssessmentError::InvalidCatalog(format!("question {}: {e}", self.id))
        })?;

        let kind = match self.kind {
            TomlQuestionType::Likert => {
                if !self.options.is_empty() || self.correct.is_some() {
                    return Err(AssessmentError::InvalidCatalog(format!(
                        "question {} is likert but sets options or correct",
                        self.id
                    )));
                }
                QuestionKind::Likert
            }
            TomlQuestionType::MultipleChoice => {
                let correct_index = self.correct.ok_or_else(|| {
                    AssessmentError::InvalidCatalog(format!(
                        "question {} is multiple-choice but has no correct index",
                        self.id
                    ))
                })?;
                QuestionKind::MultipleChoice {
                    options: self.options,
                    correct_index,
                }
            }
        };

        Ok(Question {
            id: self.id,
            prompt: self.prompt,
            dimension,
            kind,
            weight: self.weight,
        })
    }
}

/// Parse a single TOML file into a `QuestionCatalog`.
pub fn parse_catalog(path: &Path) -> Result<QuestionCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `QuestionCatalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<QuestionCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(TomlQuestion::into_question)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    let catalog = QuestionCatalog::new(
        parsed.catalog.id,
        parsed.catalog.name,
        parsed.catalog.version,
        questions,
    )
    .with_context(|| format!("invalid catalog: {}", source_path.display()))?
    .with_description(parsed.catalog.description);

    Ok(catalog)
}

/// Recursively load all `.toml` catalogs from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<QuestionCatalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    answers: BTreeMap<String, TomlAnswer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlAnswer {
    Number(i64),
    Text(String),
}

/// Raw answers keyed by question id, as read from an answer sheet.
pub type AnswerSheet = BTreeMap<String, String>;

/// Read an answer sheet: an `[answers]` table of `question_id = "4"` or
/// `question_id = 4`.
pub fn parse_answers(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_answers_str(&content, path)
}

pub fn parse_answers_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse answers: {}", source_path.display()))?;

    Ok(parsed
        .answers
        .into_iter()
        .map(|(id, answer)| {
            let raw = match answer {
                TomlAnswer::Number(n) => n.to_string(),
                TomlAnswer::Text(s) => s,
            };
            (id, raw)
        })
        .collect())
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a structurally valid catalog for issues that still make for a poor
/// assessment.
pub fn validate_catalog(catalog: &QuestionCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for q in catalog.questions() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt is empty".into(),
            });
        }
        if let QuestionKind::MultipleChoice { options, .. } = &q.kind {
            if options.len() < 2 {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: "multiple-choice question has a single option".into(),
                });
            }
        }
    }

    for dimension in DimensionId::ALL {
        let count = catalog.questions_for(dimension).count();
        if count == 0 {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "no questions measure {dimension}; a full report cannot be computed"
                ),
            });
        } else if count < MIN_QUESTIONS_PER_DIMENSION {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("only {count} question measures {dimension}"),
            });
        }
    }

    warnings
}
