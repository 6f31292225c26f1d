//! Feature selection.
//!
//! This module contains wrapper-style selection routines that search over
//! feature subsets by repeatedly fitting and scoring a model.
pub mod backward;

pub use backward::{select_backward, SequentialBackwardSelector};
