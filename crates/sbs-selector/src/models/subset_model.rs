use ndarray::{ArrayView1, ArrayView2};

/// The contract a model must satisfy to be driven by the selector.
///
/// `x` is always the caller's matrix restricted to the subset under
/// evaluation, so its column count changes from call to call. Implementations
/// must refit from scratch on every `fit`; nothing learnt for one subset may
/// leak into the next.
pub trait SubsetModel {
    /// Fit the model on the restricted feature matrix.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()>;

    /// Score the fitted model against `x`/`y`. Higher is better.
    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "model"
    }
}

impl<M: SubsetModel + ?Sized> SubsetModel for Box<M> {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()> {
        (**self).fit(x, y)
    }

    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64> {
        (**self).score(x, y)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: SubsetModel + ?Sized> SubsetModel for &mut M {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()> {
        (**self).fit(x, y)
    }

    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64> {
        (**self).score(x, y)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
