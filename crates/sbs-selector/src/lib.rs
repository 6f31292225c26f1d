//! sbs-selector: model-agnostic sequential backward feature selection.
//!
//! The selector greedily removes one feature per level, keeping the removal
//! that leaves the best-scoring subset, until a configured floor is reached.
//! Models plug in through the [`SubsetModel`] trait and are scored either by
//! k-fold cross-validation or by fitting and scoring on the same rows.
//!
//! A couple of small built-in models (nearest centroid, least squares) are
//! provided so the selector can be used without writing a model first.
pub mod config;
pub mod cross_validation;
pub mod dataset;
pub mod error;
pub mod feature_selection;
pub mod feature_set;
pub mod models;
pub mod result;
pub mod scorer;

pub use config::{ModelConfig, ModelType, ScoringMode, SelectorConfig};
pub use cross_validation::{Evaluator, KFold};
pub use dataset::Dataset;
pub use error::{ErrorKind, SelectionError};
pub use feature_selection::{select_backward, SequentialBackwardSelector};
pub use feature_set::FeatureSet;
pub use models::{build_model, BuiltinModel, LeastSquares, NearestCentroid, SubsetModel};
pub use result::{ScoreRecord, SelectionResult};
pub use scorer::Scorer;
