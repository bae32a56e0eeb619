pub mod init;
pub mod questions;
pub mod score;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use careerfit_core::catalog::QuestionCatalog;

/// Load a catalog file, or fall back to the built-in catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<QuestionCatalog> {
    match path {
        Some(path) => careerfit_core::parser::parse_catalog(path),
        None => Ok(QuestionCatalog::medical_coding()),
    }
}
