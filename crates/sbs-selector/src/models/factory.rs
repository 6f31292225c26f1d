use ndarray::{ArrayView1, ArrayView2};

use crate::config::{ModelConfig, ModelType};
use crate::models::least_squares::LeastSquares;
use crate::models::nearest_centroid::NearestCentroid;
use crate::models::subset_model::SubsetModel;

/// A built-in model selected at runtime.
///
/// An enum rather than a boxed trait object so it stays `Clone` and can be
/// handed to the parallel selector, which clones one model per candidate.
#[derive(Debug, Clone)]
pub enum BuiltinModel {
    NearestCentroid(NearestCentroid),
    LeastSquares(LeastSquares),
}

/// Build a built-in model from a `ModelConfig`.
pub fn build_model(params: ModelConfig) -> BuiltinModel {
    match params.model_type {
        ModelType::NearestCentroid => BuiltinModel::NearestCentroid(NearestCentroid::new()),
        ModelType::LeastSquares { ridge } => BuiltinModel::LeastSquares(LeastSquares::new(ridge)),
    }
}

impl SubsetModel for BuiltinModel {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<()> {
        match self {
            BuiltinModel::NearestCentroid(m) => m.fit(x, y),
            BuiltinModel::LeastSquares(m) => m.fit(x, y),
        }
    }

    fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> anyhow::Result<f64> {
        match self {
            BuiltinModel::NearestCentroid(m) => m.score(x, y),
            BuiltinModel::LeastSquares(m) => m.score(x, y),
        }
    }

    fn name(&self) -> &str {
        match self {
            BuiltinModel::NearestCentroid(m) => m.name(),
            BuiltinModel::LeastSquares(m) => m.name(),
        }
    }
}
