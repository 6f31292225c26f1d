use crate::feature_set::FeatureSet;

/// Broad category of a [`SelectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The run was rejected before any subset was scored.
    InvalidConfiguration,
    /// A candidate subset could not be fit or scored; the run was aborted.
    Fit,
}

/// Errors from sequential backward selection.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Returned when the feature floor is outside `[1, n_features]`.
    #[error("reduced_feature_size must be in [1, {n_features}], got {reduced_feature_size}")]
    InvalidReducedFeatureSize {
        /// The requested floor.
        reduced_feature_size: usize,
        /// The number of feature columns in the dataset.
        n_features: usize,
    },

    /// Returned when the feature matrix and the target vector disagree on the sample count.
    #[error("feature matrix has {n_rows} rows but target vector has {n_targets} values")]
    DimensionMismatch {
        /// Rows in the feature matrix.
        n_rows: usize,
        /// Length of the target vector.
        n_targets: usize,
    },

    /// Returned when the dataset has zero samples.
    #[error("dataset has zero samples")]
    EmptyDataset,

    /// Returned when cross-validation is requested with fewer than two folds.
    #[error("n_folds must be at least 2, got {n_folds}")]
    InvalidFoldCount {
        /// The invalid fold count.
        n_folds: usize,
    },

    /// Returned when a feature set is built from indices containing a repeat.
    #[error("feature index {index} appears more than once")]
    DuplicateFeature {
        /// The repeated column index.
        index: usize,
    },

    /// Returned when the model fails to fit or score a candidate subset.
    #[error("failed to score feature subset {features}")]
    Fit {
        /// The subset being evaluated.
        features: FeatureSet,
        /// The underlying model or evaluator error.
        source: anyhow::Error,
    },

    /// Returned when a subset score is NaN or infinite.
    #[error("feature subset {features} produced non-finite score {score}")]
    NonFiniteScore {
        /// The subset being evaluated.
        features: FeatureSet,
        /// The offending score.
        score: f64,
    },
}

impl SelectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SelectionError::InvalidReducedFeatureSize { .. }
            | SelectionError::DimensionMismatch { .. }
            | SelectionError::EmptyDataset
            | SelectionError::InvalidFoldCount { .. }
            | SelectionError::DuplicateFeature { .. } => ErrorKind::InvalidConfiguration,
            SelectionError::Fit { .. } | SelectionError::NonFiniteScore { .. } => ErrorKind::Fit,
        }
    }

    pub fn is_invalid_configuration(&self) -> bool {
        self.kind() == ErrorKind::InvalidConfiguration
    }

    pub fn is_fit_error(&self) -> bool {
        self.kind() == ErrorKind::Fit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        let err = SelectionError::InvalidReducedFeatureSize {
            reduced_feature_size: 0,
            n_features: 5,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(err.to_string().contains("[1, 5]"));

        let err = SelectionError::DimensionMismatch {
            n_rows: 4,
            n_targets: 3,
        };
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn fit_errors_keep_the_subset() {
        let err = SelectionError::Fit {
            features: FeatureSet::full(2),
            source: anyhow::anyhow!("singular matrix"),
        };
        assert!(err.is_fit_error());
        assert_eq!(err.to_string(), "failed to score feature subset [0, 1]");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("singular matrix"));
    }
}
