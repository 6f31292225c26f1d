pub mod least_squares;
pub mod nearest_centroid;

pub mod factory;
pub mod subset_model;

pub use factory::{build_model, BuiltinModel};
pub use least_squares::LeastSquares;
pub use nearest_centroid::NearestCentroid;
pub use subset_model::SubsetModel;
