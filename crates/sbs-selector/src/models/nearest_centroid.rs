use anyhow::{bail, ensure};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use crate::models::subset_model::SubsetModel;

/// Nearest centroid classifier.
///
/// Each class is represented by the mean of its training rows; a sample is
/// assigned the label of the closest mean (squared Euclidean distance).
/// Labels are the target values themselves, compared exactly, so integer
/// valued targets such as `0.0`/`1.0` work as class ids. [`score`] returns
/// accuracy in `[0, 1]`.
///
/// [`score`]: SubsetModel::score
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    classes: Vec<f64>,
    centroids: Vec<Array1<f64>>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Predict a label for every row of `x`.
    pub fn predict(&self, x: ArrayView2<f64>) -> anyhow::Result<Array1<f64>> {
        ensure!(!self.centroids.is_empty(), "model has not been fit");
        let n_features = self.centroids[0].len();
        ensure!(
            x.ncols() == n_features,
            "prediction input has {} features, expected {}",
            x.ncols(),
            n_features
        );

        Ok(x.axis_iter(Axis(0))
            .map(|row| {
                let mut best_class = self.classes[0];
                let mut best_dist = f64::INFINITY;
                for (class, centroid) in self.classes.iter().zip(&self.centroids) {
                    let dist: f64 = row
                        .iter()
                        .zip(centroid.iter())
                        .map(|(a, b)| (a - b).powi(2))
                        .sum();
                    if dist < best_dist {
                        best_dist = dist;
                        best_class = *class;
                    }
                }
                best_class
            })
            .collect())
    }
}

impl SubsetModel for NearestCentroid {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()> {
        ensure!(x.nrows() > 0, "cannot fit on zero samples");
        ensure!(x.ncols() > 0, "cannot fit on zero features");
        ensure!(
            x.nrows() == y.len(),
            "feature matrix has {} rows but target has {} values",
            x.nrows(),
            y.len()
        );

        let mut classes: Vec<f64> = Vec::new();
        let mut sums: Vec<Array1<f64>> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();

        for (row, &label) in x.axis_iter(Axis(0)).zip(y.iter()) {
            if !label.is_finite() {
                bail!("non-finite target value {}", label);
            }
            let class_idx = match classes.iter().position(|&c| c == label) {
                Some(idx) => idx,
                None => {
                    classes.push(label);
                    sums.push(Array1::zeros(x.ncols()));
                    counts.push(0);
                    classes.len() - 1
                }
            };
            sums[class_idx] += &row;
            counts[class_idx] += 1;
        }

        // Sorted classes make distance ties resolve to the smallest label.
        let mut order: Vec<usize> = (0..classes.len()).collect();
        order.sort_by(|&a, &b| classes[a].total_cmp(&classes[b]));

        self.classes = order.iter().map(|&i| classes[i]).collect();
        self.centroids = order
            .iter()
            .map(|&i| &sums[i] / counts[i] as f64)
            .collect();

        log::trace!(
            "NearestCentroid fit {} classes on {} features",
            self.classes.len(),
            x.ncols()
        );
        Ok(())
    }

    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64> {
        ensure!(y.len() > 0, "cannot score on zero samples");
        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }

    fn name(&self) -> &str {
        "nearest_centroid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_nearest_centroid_separable() {
        let x = array![[0.0, 5.0], [0.2, -3.0], [0.1, 1.0], [4.0, 2.0], [4.2, -1.0], [3.9, 0.0]];
        let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];

        let mut model = NearestCentroid::new();
        model.fit(x.view(), y.view()).unwrap();

        assert_eq!(model.classes(), &[0.0, 1.0]);
        assert_eq!(model.score(x.view(), y.view()).unwrap(), 1.0);
        let preds = model.predict(array![[0.5, 0.0], [3.5, 0.0]].view()).unwrap();
        assert_eq!(preds, array![0.0, 1.0]);
    }

    #[test]
    fn test_refit_forgets_previous_subset() {
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let y = array![0.0, 1.0];
        let mut model = NearestCentroid::new();
        model.fit(x.view(), y.view()).unwrap();

        let x1 = x.column(0).insert_axis(Axis(1)).to_owned();
        model.fit(x1.view(), y.view()).unwrap();
        assert_eq!(model.score(x1.view(), y.view()).unwrap(), 1.0);
        assert!(model.score(x.view(), y.view()).is_err());
    }

    #[test]
    fn test_errors_on_degenerate_input() {
        let mut model = NearestCentroid::new();
        let x = Array2::<f64>::zeros((3, 0));
        let y = array![0.0, 1.0, 0.0];
        assert!(model.fit(x.view(), y.view()).is_err());
        assert!(model.score(x.view(), y.view()).is_err());
    }
}
