//! K-fold cross-validation for subset scoring.
//!
//! The selector only needs a number per subset; how the rows are split is
//! delegated to an [`Evaluator`]. [`KFold`] is the stock implementation.
use anyhow::{bail, Context};
use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::ScoringMode;
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::models::SubsetModel;

/// Turns a model and a (column-restricted) dataset into one validation score.
pub trait Evaluator {
    fn evaluate(
        &self,
        model: &mut dyn SubsetModel,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
    ) -> anyhow::Result<f64>;

    fn name(&self) -> &str {
        "evaluator"
    }
}

/// K-fold cross-validation.
///
/// Construct via [`KFold::new`], then chain `with_shuffle` or
/// `with_stratification` if desired. Without shuffling the folds are
/// contiguous blocks of rows, the first `n % k` folds one row larger.
#[derive(Debug, Clone)]
pub struct KFold {
    n_folds: usize,
    shuffle: bool,
    seed: u64,
    stratified: bool,
}

impl KFold {
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidFoldCount`] if `n_folds` < 2.
    pub fn new(n_folds: usize) -> Result<Self, SelectionError> {
        if n_folds < 2 {
            return Err(SelectionError::InvalidFoldCount { n_folds });
        }
        Ok(Self {
            n_folds,
            shuffle: false,
            seed: 42,
            stratified: false,
        })
    }

    /// Shuffle rows with a seeded RNG before assigning folds.
    #[must_use]
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    /// Keep the proportion of each target value roughly equal across folds.
    #[must_use]
    pub fn with_stratification(mut self, stratified: bool) -> Self {
        self.stratified = stratified;
        self
    }

    /// The evaluator described by a scoring mode, if it cross-validates.
    pub fn from_mode(mode: &ScoringMode) -> Result<Option<Self>, SelectionError> {
        match *mode {
            ScoringMode::CrossValidated {
                n_folds,
                shuffle,
                seed,
                stratified,
            } => {
                let mut kfold = KFold::new(n_folds)?.with_stratification(stratified);
                if shuffle {
                    kfold = kfold.with_shuffle(seed);
                }
                Ok(Some(kfold))
            }
            ScoringMode::Direct => Ok(None),
        }
    }

    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Fold id for every row of `y`.
    pub fn fold_assignments(&self, y: ArrayView1<f64>) -> anyhow::Result<Vec<usize>> {
        let n_samples = y.len();
        if n_samples < self.n_folds {
            bail!(
                "cannot split {} samples into {} folds",
                n_samples,
                self.n_folds
            );
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut assignments = vec![0usize; n_samples];

        if self.stratified {
            // Group row indices by target value, in ascending value order.
            let mut labels: Vec<f64> = y.iter().copied().collect();
            labels.sort_by(|a, b| a.total_cmp(b));
            labels.dedup();

            // Carry the fold offset across classes so remainders spread out.
            let mut offset = 0;
            for label in labels {
                let mut members: Vec<usize> = (0..n_samples).filter(|&i| y[i] == label).collect();
                if members.len() < self.n_folds {
                    bail!(
                        "class {} has only {} samples, need at least {} for stratified folds",
                        label,
                        members.len(),
                        self.n_folds
                    );
                }
                if self.shuffle {
                    members.shuffle(&mut rng);
                }
                for (j, &idx) in members.iter().enumerate() {
                    assignments[idx] = (offset + j) % self.n_folds;
                }
                offset = (offset + members.len()) % self.n_folds;
            }
        } else {
            let mut order: Vec<usize> = (0..n_samples).collect();
            if self.shuffle {
                order.shuffle(&mut rng);
            }
            let base = n_samples / self.n_folds;
            let extra = n_samples % self.n_folds;
            let mut start = 0;
            for fold in 0..self.n_folds {
                let size = base + usize::from(fold < extra);
                for &idx in &order[start..start + size] {
                    assignments[idx] = fold;
                }
                start += size;
            }
        }

        Ok(assignments)
    }

    /// `(train, test)` row indices for every fold.
    pub fn splits(&self, y: ArrayView1<f64>) -> anyhow::Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let assignments = self.fold_assignments(y)?;
        Ok((0..self.n_folds)
            .map(|fold| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..assignments.len()).partition(|&i| assignments[i] == fold);
                (train, test)
            })
            .collect())
    }
}

impl Evaluator for KFold {
    fn evaluate(
        &self,
        model: &mut dyn SubsetModel,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
    ) -> anyhow::Result<f64> {
        let splits = self.splits(y)?;
        let mut fold_scores = Vec::with_capacity(splits.len());

        for (fold, (train, test)) in splits.iter().enumerate() {
            let (x_train, y_train) = Dataset::select_rows(x, y, train);
            let (x_test, y_test) = Dataset::select_rows(x, y, test);

            model
                .fit(x_train.view(), y_train.view())
                .with_context(|| format!("fit failed on fold {}", fold))?;
            let score = model
                .score(x_test.view(), y_test.view())
                .with_context(|| format!("score failed on fold {}", fold))?;

            log::trace!(
                "fold {}: {} train rows, {} test rows, score {:.6}",
                fold,
                train.len(),
                test.len(),
                score
            );
            fold_scores.push(score);
        }

        Ok(fold_scores.iter().sum::<f64>() / fold_scores.len() as f64)
    }

    fn name(&self) -> &str {
        "kfold"
    }
}
