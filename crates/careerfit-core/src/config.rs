//! Scoring configuration.
//!
//! Weights, thresholds and next steps can be overridden from `careerfit.toml`.
//! Anything the file leaves out keeps its default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::{DimensionWeights, Thresholds};
use crate::error::AssessmentError;
use crate::model::DimensionId;
use crate::report::NextStepTable;

/// Name of the project-local config file.
pub const CONFIG_FILE_NAME: &str = "careerfit.toml";

/// Everything the aggregator and report builder need besides the scores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    pub thresholds: Thresholds,
    pub next_steps: NextStepTable,
}

/// On-disk shape: every table optional, weights may be partial.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    weights: BTreeMap<DimensionId, f64>,
    #[serde(default)]
    thresholds: Option<Thresholds>,
    #[serde(default)]
    next_steps: Option<NextStepTable>,
}

impl ScoringConfig {
    /// Parse a config from TOML, filling gaps with defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("failed to parse scoring config")?;
        let mut config = ScoringConfig::default();
        for (dimension, weight) in file.weights {
            config.weights.set(dimension, weight);
        }
        if let Some(thresholds) = file.thresholds {
            config.thresholds = thresholds;
        }
        if let Some(next_steps) = file.next_steps {
            config.next_steps = next_steps;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        self.weights.validate()?;
        self.thresholds.validate()
    }

    /// Apply `CAREERFIT_YES_THRESHOLD` / `CAREERFIT_MAYBE_THRESHOLD` style
    /// overrides using `lookup` to read variables.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("CAREERFIT_YES_THRESHOLD") {
            self.thresholds.yes = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("CAREERFIT_YES_THRESHOLD is not a number: {raw}"))?;
        }
        if let Some(raw) = lookup("CAREERFIT_MAYBE_THRESHOLD") {
            self.thresholds.maybe = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("CAREERFIT_MAYBE_THRESHOLD is not a number: {raw}"))?;
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `path`, which must exist when given
/// 2. `careerfit.toml` in the current directory
/// 3. `~/.config/careerfit/config.toml`
///
/// Environment overrides `CAREERFIT_YES_THRESHOLD` and
/// `CAREERFIT_MAYBE_THRESHOLD` apply last. The result is validated.
pub fn load_config_from(path: Option<&Path>) -> Result<ScoringConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            global_config_path().filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading scoring config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            ScoringConfig::from_toml_str(&content)
                .with_context(|| format!("failed to load config: {}", path.display()))?
        }
        None => ScoringConfig::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("careerfit")
            .join("config.toml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Recommendation;

    #[test]
    fn default_config_is_valid() {
        let config = ScoringConfig::default();
        config.validate().unwrap();
        assert_eq!(config.thresholds.yes, 75.0);
        assert_eq!(config.thresholds.maybe, 50.0);
        assert_eq!(config.next_steps.yes.len(), 4);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ScoringConfig::from_toml_str(
            r#"
[weights]
skill = 2.0

[thresholds]
yes = 80.0
"#,
        )
        .unwrap();
        assert_eq!(config.weights.get(DimensionId::Skill), Some(2.0));
        assert_eq!(config.weights.get(DimensionId::Will), Some(1.25));
        assert_eq!(config.thresholds.yes, 80.0);
        assert_eq!(config.thresholds.maybe, 50.0);
        assert_eq!(config.next_steps, NextStepTable::default());
    }

    #[test]
    fn next_steps_override() {
        let config = ScoringConfig::from_toml_str(
            r#"
[[next_steps.no]]
title = "Try a billing course"
detail = "Billing is a close neighbour"
"#,
        )
        .unwrap();
        let steps = config.next_steps.for_recommendation(Recommendation::No);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Try a billing course");
        assert_eq!(config.next_steps.yes, NextStepTable::default().yes);
    }

    #[test]
    fn unknown_dimension_key_is_a_parse_error() {
        let err = ScoringConfig::from_toml_str("[weights]\ngrit = 1.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse scoring config"));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let config = ScoringConfig::from_toml_str("[weights]\nwill = 0.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(AssessmentError::InvalidConfig(_))
        ));

        let config =
            ScoringConfig::from_toml_str("[thresholds]\nyes = 40.0\nmaybe = 60.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ScoringConfig::default();
        config
            .apply_overrides(|key| match key {
                "CAREERFIT_YES_THRESHOLD" => Some("90".into()),
                "CAREERFIT_MAYBE_THRESHOLD" => Some(" 60.5 ".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.thresholds.yes, 90.0);
        assert_eq!(config.thresholds.maybe, 60.5);

        let err = config
            .apply_overrides(|key| (key == "CAREERFIT_YES_THRESHOLD").then(|| "high".into()))
            .unwrap_err();
        assert!(err.to_string().contains("CAREERFIT_YES_THRESHOLD"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/careerfit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careerfit.toml");
        std::fs::write(&path, "[weights]\ninterest = 3.0\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.weights.get(DimensionId::Interest), Some(3.0));
    }
}
