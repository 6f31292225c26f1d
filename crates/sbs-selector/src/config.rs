use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SelectionError;

/// How a candidate subset is turned into a single score.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Mean held-out score over `n_folds` folds.
    CrossValidated {
        #[serde(default = "default_n_folds")]
        n_folds: usize,
        #[serde(default)]
        shuffle: bool,
        #[serde(default = "default_seed")]
        seed: u64,
        #[serde(default)]
        stratified: bool,
    },
    /// Fit and score on the same rows. Optimistic: there is no held-out data.
    Direct,
}

fn default_n_folds() -> usize {
    5
}

fn default_seed() -> u64 {
    42
}

impl ScoringMode {
    /// Unshuffled, unstratified k-fold cross-validation.
    pub fn cross_validated(n_folds: usize) -> Self {
        ScoringMode::CrossValidated {
            n_folds,
            shuffle: false,
            seed: default_seed(),
            stratified: false,
        }
    }
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::cross_validated(default_n_folds())
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cv" | "cross-validated" | "cross_validated" => Ok(ScoringMode::default()),
            "direct" => Ok(ScoringMode::Direct),
            _ => Err(format!(
                "Unknown scoring mode: {}. Valid options are: cv, direct",
                s
            )),
        }
    }
}

/// Configuration of one selection run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Smallest feature count to reduce to (inclusive).
    pub reduced_feature_size: usize,
    pub scoring: ScoringMode,
    /// Score the candidates of a level on the rayon pool.
    pub parallel: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reduced_feature_size: 1,
            scoring: ScoringMode::default(),
            parallel: false,
        }
    }
}

impl SelectorConfig {
    pub fn new(reduced_feature_size: usize, scoring: ScoringMode) -> Self {
        Self {
            reduced_feature_size,
            scoring,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn use_cross_validation(&self) -> bool {
        matches!(self.scoring, ScoringMode::CrossValidated { .. })
    }

    /// Check the configuration against a dataset with `n_features` columns.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidReducedFeatureSize`] if the floor is
    /// outside `[1, n_features]` and [`SelectionError::InvalidFoldCount`] if
    /// cross-validation is requested with fewer than two folds.
    pub fn validate(&self, n_features: usize) -> Result<(), SelectionError> {
        if self.reduced_feature_size < 1 || self.reduced_feature_size > n_features {
            return Err(SelectionError::InvalidReducedFeatureSize {
                reduced_feature_size: self.reduced_feature_size,
                n_features,
            });
        }
        if let ScoringMode::CrossValidated { n_folds, .. } = self.scoring {
            if n_folds < 2 {
                return Err(SelectionError::InvalidFoldCount { n_folds });
            }
        }
        Ok(())
    }
}

/// Central configuration for the built-in models.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ModelConfig {
    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported built-in models and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelType {
    NearestCentroid,
    LeastSquares { ridge: f64 },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::NearestCentroid
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest-centroid" | "nearest_centroid" => Ok(ModelType::NearestCentroid),
            "least-squares" | "least_squares" => Ok(ModelType::LeastSquares { ridge: 0.0 }),
            "ridge" => Ok(ModelType::LeastSquares { ridge: 1.0 }),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: nearest-centroid, least-squares, ridge",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(model_type: ModelType) -> Self {
        Self { model_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selector_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.reduced_feature_size, 1);
        assert!(config.use_cross_validation());
        assert!(!config.parallel);
        match config.scoring {
            ScoringMode::CrossValidated { n_folds, .. } => assert_eq!(n_folds, 5),
            ScoringMode::Direct => panic!("expected cross-validation by default"),
        }
    }

    #[test]
    fn validate_rejects_out_of_range_floor() {
        let config = SelectorConfig::new(0, ScoringMode::Direct);
        assert!(config.validate(5).unwrap_err().is_invalid_configuration());

        let config = SelectorConfig::new(6, ScoringMode::Direct);
        assert!(config.validate(5).is_err());

        let config = SelectorConfig::new(5, ScoringMode::Direct);
        assert!(config.validate(5).is_ok());
    }

    #[test]
    fn validate_rejects_single_fold() {
        let config = SelectorConfig::new(
            1,
            ScoringMode::CrossValidated {
                n_folds: 1,
                shuffle: false,
                seed: 0,
                stratified: false,
            },
        );
        assert!(matches!(
            config.validate(3),
            Err(SelectionError::InvalidFoldCount { n_folds: 1 })
        ));
    }

    #[test]
    fn scoring_mode_from_str() {
        assert_eq!(ScoringMode::from_str("direct").unwrap(), ScoringMode::Direct);
        assert_eq!(ScoringMode::from_str("CV").unwrap(), ScoringMode::default());
        assert!(ScoringMode::from_str("holdout").is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{"reduced_feature_size": 3, "scoring": "direct"}"#).unwrap();
        assert_eq!(config.reduced_feature_size, 3);
        assert_eq!(config.scoring, ScoringMode::Direct);
        assert!(!config.parallel);
    }

    #[test]
    fn partial_cross_validation_json_fills_defaults() {
        let mode: ScoringMode =
            serde_json::from_str(r#"{"cross_validated": {"n_folds": 3}}"#).unwrap();
        assert_eq!(mode, ScoringMode::cross_validated(3));

        let mode: ScoringMode = serde_json::from_str(r#"{"cross_validated": {}}"#).unwrap();
        assert_eq!(mode, ScoringMode::default());

        let config: SelectorConfig = serde_json::from_str(
            r#"{"scoring": {"cross_validated": {"n_folds": 4, "stratified": true}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.scoring,
            ScoringMode::CrossValidated {
                n_folds: 4,
                shuffle: false,
                seed: 42,
                stratified: true,
            }
        );
    }

    #[test]
    fn model_config_json_uses_model_tag() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"model": "least_squares", "ridge": 0.5}"#).unwrap();
        assert_eq!(config.model_type, ModelType::LeastSquares { ridge: 0.5 });
        assert_eq!(
            ModelType::from_str("nearest-centroid").unwrap(),
            ModelType::NearestCentroid
        );
    }
}
