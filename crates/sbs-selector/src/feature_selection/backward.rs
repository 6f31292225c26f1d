//! Sequential backward selection.
//!
//! Starting from every column, the selector records the score of the full
//! set, then repeatedly drops the single feature whose removal leaves the
//! best-scoring subset. Dropped features are never reconsidered, so a full
//! reduction to one feature costs O(n²) subset scores instead of the 2ⁿ of
//! an exhaustive search.
use log::{debug, info};
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::config::SelectorConfig;
use crate::cross_validation::Evaluator;
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::feature_set::FeatureSet;
use crate::models::SubsetModel;
use crate::result::{ScoreRecord, SelectionResult};
use crate::scorer::Scorer;

/// Index and value of the first strictly largest score.
///
/// The running best starts at negative infinity so that legitimately
/// negative scores (e.g. R² of a poor regression) are still selected.
fn first_best(scores: &[f64]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (idx, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_idx = idx;
            best_score = score;
        }
    }
    (best_idx, best_score)
}

/// The level loop shared by the sequential and parallel runs.
///
/// `score_level` must return one score per candidate, in candidate order.
fn reduce<F>(
    n_features: usize,
    reduced_feature_size: usize,
    mut score_level: F,
) -> Result<SelectionResult, SelectionError>
where
    F: FnMut(&[FeatureSet]) -> Result<Vec<f64>, SelectionError>,
{
    let mut result = SelectionResult::with_capacity(n_features - reduced_feature_size + 1);

    let full = FeatureSet::full(n_features);
    let (_, full_score) = first_best(&score_level(std::slice::from_ref(&full))?);
    info!("{} features: score {:.6} (full set)", n_features, full_score);
    result.push(ScoreRecord::new(full_score, full.clone()));

    let mut current = full;
    for feature_count in (reduced_feature_size..n_features).rev() {
        let (dropped, mut candidates): (Vec<usize>, Vec<FeatureSet>) =
            current.drop_one_candidates().into_iter().unzip();
        let scores = score_level(&candidates)?;

        for (feature, score) in dropped.iter().zip(&scores) {
            debug!(
                "{} features: dropping feature {} scores {:.6}",
                feature_count, feature, score
            );
        }

        let (best_idx, best_score) = first_best(&scores);
        info!(
            "{} features: score {:.6} after dropping feature {}",
            feature_count, best_score, dropped[best_idx]
        );

        current = candidates.swap_remove(best_idx);
        result.push(ScoreRecord::new(best_score, current.clone()));
    }

    Ok(result)
}

fn check_floor(reduced_feature_size: usize, n_features: usize) -> Result<(), SelectionError> {
    if reduced_feature_size < 1 || reduced_feature_size > n_features {
        return Err(SelectionError::InvalidReducedFeatureSize {
            reduced_feature_size,
            n_features,
        });
    }
    Ok(())
}

/// Run one backward selection over `data` and return its records.
///
/// Every candidate is scored with the same `model` and `scorer`. The run is
/// all-or-nothing: the first failing candidate aborts it.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SelectionError::InvalidReducedFeatureSize`] | Floor outside `[1, n_features]`; nothing is scored |
/// | [`SelectionError::Fit`] / [`SelectionError::NonFiniteScore`] | A candidate could not be scored |
pub fn select_backward<M>(
    model: &mut M,
    data: &Dataset,
    reduced_feature_size: usize,
    scorer: &Scorer,
) -> Result<SelectionResult, SelectionError>
where
    M: SubsetModel,
{
    check_floor(reduced_feature_size, data.n_features())?;
    reduce(data.n_features(), reduced_feature_size, |candidates| {
        candidates
            .iter()
            .map(|features| scorer.score(&mut *model, data, features))
            .collect()
    })
}

/// Sequential backward selector for [`SubsetModel`]s.
///
/// ```ignore
/// let mut selector = SequentialBackwardSelector::new(NearestCentroid::new(), SelectorConfig::default())?;
/// selector.fit(x.view(), y.view())?;
/// for record in selector.best_features() {
///     println!("{} {:.3} {}", record.feature_count(), record.score(), record.features());
/// }
/// ```
pub struct SequentialBackwardSelector<M> {
    model: M,
    config: SelectorConfig,
    scorer: Scorer,
    best_features: SelectionResult,
}

impl<M: SubsetModel> SequentialBackwardSelector<M> {
    /// Create a selector; the scorer is derived from `config.scoring`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidFoldCount`] if cross-validation is
    /// configured with fewer than two folds.
    pub fn new(model: M, config: SelectorConfig) -> Result<Self, SelectionError> {
        let scorer = Scorer::from_mode(&config.scoring)?;
        Ok(SequentialBackwardSelector {
            model,
            config,
            scorer,
            best_features: SelectionResult::default(),
        })
    }

    /// Replace the cross-validation procedure with a custom evaluator.
    #[must_use]
    pub fn with_evaluator<E>(mut self, evaluator: E) -> Self
    where
        E: Evaluator + Send + Sync + 'static,
    {
        self.scorer = Scorer::with_evaluator(evaluator);
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Records of the last successful run; empty before `fit` and after a
    /// failed run.
    pub fn best_features(&self) -> &SelectionResult {
        &self.best_features
    }

    /// Validate the inputs, clearing any previous result.
    fn prepare<'a>(
        &mut self,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
    ) -> Result<Dataset<'a>, SelectionError> {
        self.best_features = SelectionResult::default();
        let data = Dataset::new(x, y)?;
        self.config.validate(data.n_features())?;
        data.log_input_data_summary();
        info!(
            "Backward selection with {} down to {} features ({:?} scoring)",
            self.model.name(),
            self.config.reduced_feature_size,
            self.scorer
        );
        Ok(data)
    }

    /// Run the selection, scoring one candidate at a time.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SelectionError::DimensionMismatch`] | `x` rows differ from `y` length |
    /// | [`SelectionError::EmptyDataset`] | Zero samples |
    /// | [`SelectionError::InvalidReducedFeatureSize`] | Floor outside `[1, n_features]` |
    /// | [`SelectionError::Fit`] / [`SelectionError::NonFiniteScore`] | A candidate could not be scored |
    pub fn fit<'a>(
        &mut self,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
    ) -> Result<(), SelectionError> {
        let data = self.prepare(x, y)?;
        let result = select_backward(
            &mut self.model,
            &data,
            self.config.reduced_feature_size,
            &self.scorer,
        )?;
        self.best_features = result;
        Ok(())
    }
}

impl<M> SequentialBackwardSelector<M>
where
    M: SubsetModel + Clone + Send + Sync,
{
    /// Same as [`fit`](Self::fit), but the candidates of each level are
    /// scored on the rayon pool, one model clone per candidate. Scores are
    /// compared in candidate order, so the records are identical to `fit`.
    pub fn par_fit<'a>(
        &mut self,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
    ) -> Result<(), SelectionError> {
        let data = self.prepare(x, y)?;
        let model = &self.model;
        let scorer = &self.scorer;
        let result = reduce(
            data.n_features(),
            self.config.reduced_feature_size,
            |candidates| {
                candidates
                    .par_iter()
                    .map(|features| {
                        let mut model = model.clone();
                        scorer.score(&mut model, &data, features)
                    })
                    .collect()
            },
        )?;
        self.best_features = result;
        Ok(())
    }

    /// `par_fit` when `config.parallel` is set, `fit` otherwise.
    pub fn run<'a>(
        &mut self,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
    ) -> Result<(), SelectionError> {
        if self.config.parallel {
            self.par_fit(x, y)
        } else {
            self.fit(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_best_keeps_the_earliest_maximum() {
        assert_eq!(first_best(&[0.2, 0.9, 0.9, 0.1]), (1, 0.9));
    }

    #[test]
    fn first_best_handles_all_negative_scores() {
        assert_eq!(first_best(&[-3.0, -0.5, -2.0]), (1, -0.5));
    }

    #[test]
    fn reduce_records_every_level() {
        // Score = sum of indices, so the smallest index is always dropped.
        let result = reduce(4, 1, |candidates| {
            Ok(candidates
                .iter()
                .map(|c| c.iter().sum::<usize>() as f64)
                .collect())
        })
        .unwrap();

        let sizes: Vec<usize> = result.iter().map(|r| r.feature_count()).collect();
        assert_eq!(sizes, vec![4, 3, 2, 1]);
        assert_eq!(result.records()[0].features().as_slice(), &[0, 1, 2, 3]);
        assert_eq!(result.records()[1].features().as_slice(), &[1, 2, 3]);
        assert_eq!(result.records()[3].features().as_slice(), &[3]);
        assert_eq!(result.records()[3].score(), 3.0);
    }

    #[test]
    fn reduce_stops_at_the_first_error() {
        let mut calls = 0;
        let err = reduce(3, 1, |candidates| {
            calls += 1;
            if candidates.len() > 1 {
                return Err(SelectionError::Fit {
                    features: candidates[0].clone(),
                    source: anyhow::anyhow!("boom"),
                });
            }
            Ok(vec![1.0])
        })
        .unwrap_err();
        assert!(err.is_fit_error());
        assert_eq!(calls, 2);
    }

    #[test]
    fn check_floor_bounds() {
        assert!(check_floor(0, 3).is_err());
        assert!(check_floor(4, 3).is_err());
        assert!(check_floor(1, 3).is_ok());
        assert!(check_floor(3, 3).is_ok());
    }
}
