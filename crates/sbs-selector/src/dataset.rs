//! Borrowed views over the caller's feature matrix and target vector.
//!
//! A `Dataset` never owns or mutates the data it points to. The selector
//! restricts it column-wise for each candidate subset, and evaluators
//! restrict it row-wise to build train/test folds.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::SelectionError;
use crate::feature_set::FeatureSet;

#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    pub x: ArrayView2<'a, f64>,
    pub y: ArrayView1<'a, f64>,
}

impl<'a> Dataset<'a> {
    /// Pair a feature matrix (rows = samples) with its target vector.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::DimensionMismatch`] if the row count and the
    /// target length differ, and [`SelectionError::EmptyDataset`] if there are
    /// no samples.
    pub fn new(x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>) -> Result<Self, SelectionError> {
        if x.nrows() != y.len() {
            return Err(SelectionError::DimensionMismatch {
                n_rows: x.nrows(),
                n_targets: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(SelectionError::EmptyDataset);
        }
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Copy of the feature matrix restricted to `features`, in set order.
    pub fn select_features(&self, features: &FeatureSet) -> Array2<f64> {
        self.x.select(Axis(1), features.as_slice())
    }

    /// Copy of the rows listed in `rows`, for both the matrix and the target.
    pub fn select_rows(x: ArrayView2<f64>, y: ArrayView1<f64>, rows: &[usize]) -> (Array2<f64>, Array1<f64>) {
        (x.select(Axis(0), rows), y.select(Axis(0), rows))
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!("{} samples, {} feature columns", self.n_samples(), self.n_features());
        log::info!("-------------------------------");
    }
}
