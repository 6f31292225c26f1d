//! Turns a feature subset into a single fitness value.
use crate::config::ScoringMode;
use crate::cross_validation::{Evaluator, KFold};
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::feature_set::FeatureSet;
use crate::models::SubsetModel;

/// Scores candidate subsets with a caller-supplied model.
///
/// In [`Scorer::Direct`] mode the model is fit and scored on the same rows,
/// which rewards overfitting; prefer cross-validation unless the model's
/// score is already a held-out estimate.
pub enum Scorer {
    CrossValidated(Box<dyn Evaluator + Send + Sync>),
    Direct,
}

impl Scorer {
    /// Build the scorer described by a scoring mode, using [`KFold`] for
    /// cross-validation.
    pub fn from_mode(mode: &ScoringMode) -> Result<Self, SelectionError> {
        Ok(match KFold::from_mode(mode)? {
            Some(kfold) => Scorer::CrossValidated(Box::new(kfold)),
            None => Scorer::Direct,
        })
    }

    pub fn with_evaluator<E>(evaluator: E) -> Self
    where
        E: Evaluator + Send + Sync + 'static,
    {
        Scorer::CrossValidated(Box::new(evaluator))
    }

    pub fn is_cross_validated(&self) -> bool {
        matches!(self, Scorer::CrossValidated(_))
    }

    /// Score `model` on the columns of `data` listed in `features`.
    ///
    /// The model's fitted state afterwards belongs to whichever fit ran last
    /// and should not be relied upon.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SelectionError::Fit`] | Empty subset, or the model/evaluator failed |
    /// | [`SelectionError::NonFiniteScore`] | The score is NaN or infinite |
    pub fn score<M>(
        &self,
        model: &mut M,
        data: &Dataset,
        features: &FeatureSet,
    ) -> Result<f64, SelectionError>
    where
        M: SubsetModel,
    {
        if features.is_empty() {
            return Err(SelectionError::Fit {
                features: features.clone(),
                source: anyhow::anyhow!("cannot score an empty feature subset"),
            });
        }

        let x = data.select_features(features);
        let outcome = match self {
            Scorer::CrossValidated(evaluator) => evaluator.evaluate(model, x.view(), data.y),
            Scorer::Direct => model
                .fit(x.view(), data.y)
                .and_then(|()| model.score(x.view(), data.y)),
        };

        let score = outcome.map_err(|source| SelectionError::Fit {
            features: features.clone(),
            source,
        })?;

        if !score.is_finite() {
            return Err(SelectionError::NonFiniteScore {
                features: features.clone(),
                score,
            });
        }
        Ok(score)
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Scorer::CrossValidated(evaluator) => write!(f, "CrossValidated({})", evaluator.name()),
            Scorer::Direct => write!(f, "Direct"),
        }
    }
}
