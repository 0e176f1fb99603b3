#![forbid(unsafe_code)]

mod error;

pub mod estimator;
pub mod grid;
pub mod stats;
pub mod union_find;

pub use error::{Error, Result};
pub use estimator::{run_trial, PercolationStats, TrialRecord};
pub use grid::{PercolationGrid, Site};
pub use union_find::{UnionFind, WeightedQuickUnion};
