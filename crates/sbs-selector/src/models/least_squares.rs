use anyhow::{bail, ensure};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::models::subset_model::SubsetModel;

/// Linear regression with intercept, fit by solving the (optionally ridge
/// penalized) normal equations on centered data.
///
/// [`score`] returns the coefficient of determination R², which is negative
/// for fits worse than predicting the mean.
///
/// [`score`]: SubsetModel::score
#[derive(Debug, Clone)]
pub struct LeastSquares {
    ridge: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl LeastSquares {
    /// Smallest pivot accepted by the solver before the system is treated as singular.
    const MIN_PIVOT: f64 = 1e-12;

    pub fn new(ridge: f64) -> Self {
        LeastSquares {
            ridge: ridge.max(0.0),
            coefficients: None,
            intercept: 0.0,
        }
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn predict(&self, x: ArrayView2<f64>) -> anyhow::Result<Array1<f64>> {
        let Some(w) = self.coefficients.as_ref() else {
            bail!("model has not been fit");
        };
        ensure!(
            x.ncols() == w.len(),
            "prediction input has {} features, expected {}",
            x.ncols(),
            w.len()
        );
        Ok(x.dot(w) + self.intercept)
    }
}

impl Default for LeastSquares {
    fn default() -> Self {
        LeastSquares::new(0.0)
    }
}

/// Solve `a * w = b` by Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> anyhow::Result<Array1<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[(i, col)].abs().total_cmp(&a[(j, col)].abs()))
            .unwrap_or(col);
        if a[(pivot_row, col)].abs() < LeastSquares::MIN_PIVOT {
            bail!("normal equations are singular (column {} is collinear or constant)", col);
        }
        if pivot_row != col {
            for k in 0..n {
                a.swap((col, k), (pivot_row, k));
            }
            b.swap(col, pivot_row);
        }
        for row in col + 1..n {
            let factor = a[(row, col)] / a[(col, col)];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut w = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[(row, k)] * w[k]).sum();
        w[row] = (b[row] - tail) / a[(row, row)];
    }
    Ok(w)
}

/// Coefficient of determination.
pub fn r_squared(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let mean_true = y_true.sum() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

impl SubsetModel for LeastSquares {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()> {
        ensure!(x.nrows() > 0, "cannot fit on zero samples");
        ensure!(x.ncols() > 0, "cannot fit on zero features");
        ensure!(
            x.nrows() == y.len(),
            "feature matrix has {} rows but target has {} values",
            x.nrows(),
            y.len()
        );

        let Some(x_mean) = x.mean_axis(Axis(0)) else {
            bail!("cannot compute column means");
        };
        let y_mean = y.sum() / y.len() as f64;
        let xc = &x - &x_mean;
        let yc = y.mapv(|v| v - y_mean);

        let mut gram = xc.t().dot(&xc);
        for i in 0..gram.nrows() {
            gram[(i, i)] += self.ridge;
        }
        let rhs = xc.t().dot(&yc);

        let w = solve_linear_system(gram, rhs)?;
        self.intercept = y_mean - x_mean.dot(&w);
        self.coefficients = Some(w);
        Ok(())
    }

    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64> {
        let predictions = self.predict(x)?;
        Ok(r_squared(y, predictions.view()))
    }

    fn name(&self) -> &str {
        "least_squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_recovers_exact_linear_relation() {
        // y = 2 * x0 - x1 + 3
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 2.0], [3.0, 1.0], [4.0, 5.0]];
        let y = x.map_axis(Axis(1), |r| 2.0 * r[0] - r[1] + 3.0);

        let mut model = LeastSquares::default();
        model.fit(x.view(), y.view()).unwrap();
        let w = model.coefficients().unwrap();
        assert!((w[0] - 2.0).abs() < 1e-9);
        assert!((w[1] + 1.0).abs() < 1e-9);
        assert!((model.intercept() - 3.0).abs() < 1e-9);
        assert!((model.score(x.view(), y.view()).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_singular_system_is_an_error() {
        // Second column duplicates the first.
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let y = array![1.0, 2.0, 3.0];
        let mut model = LeastSquares::default();
        assert!(model.fit(x.view(), y.view()).is_err());

        let mut ridge = LeastSquares::new(0.1);
        assert!(ridge.fit(x.view(), y.view()).is_ok());
    }

    #[test]
    fn test_r_squared_can_be_negative() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![3.0, 2.0, 1.0];
        assert!(r_squared(y_true.view(), y_pred.view()) < 0.0);
        assert_eq!(r_squared(array![2.0, 2.0].view(), array![2.0, 2.0].view()), 1.0);
    }

    #[test]
    fn test_predict_before_fit_errors() {
        let model = LeastSquares::default();
        assert!(model.predict(array![[1.0]].view()).is_err());
    }
}
