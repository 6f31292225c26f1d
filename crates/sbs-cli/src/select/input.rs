//! Configuration for the `select` subcommand.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use sbs_selector::{ModelConfig, ModelType, ScoringMode, SelectorConfig};

/// Parameters for one backward selection run from the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    pub selector: SelectorConfig,
    pub model: ModelConfig,
    /// Header of the target column. Defaults to the last column.
    pub target_column: Option<String>,
}

/// Load a selection configuration from a JSON file. Missing fields keep
/// their defaults.
pub fn load_select_config<P: AsRef<Path>>(path: P) -> Result<SelectConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SelectConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

impl SelectConfig {
    /// Apply command-line overrides on top of the file (or default) values.
    pub fn apply_overrides(&mut self, matches: &ArgMatches) -> Result<()> {
        if let Some(target) = matches.get_one::<String>("target") {
            self.target_column = Some(target.clone());
        }

        if let Some(model) = matches.get_one::<String>("model") {
            self.model.model_type = ModelType::from_str(model).map_err(anyhow::Error::msg)?;
        }

        if let Some(&reduced) = matches.get_one::<usize>("reduced_size") {
            self.selector.reduced_feature_size = reduced;
        }

        if matches.get_flag("direct") {
            self.selector.scoring = ScoringMode::Direct;
        } else if let Some(&folds) = matches.get_one::<usize>("folds") {
            if let ScoringMode::CrossValidated { n_folds, .. } = &mut self.selector.scoring {
                *n_folds = folds;
            } else {
                self.selector.scoring = ScoringMode::cross_validated(folds);
            }
        }

        if matches.get_flag("parallel") {
            self.selector.parallel = true;
        }

        Ok(())
    }
}
