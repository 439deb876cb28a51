//! Data matrix statistics module
//!
//! This module builds the N x D data matrix from decoded rasters and provides
//! column statistics and standardization.

mod builder;
pub mod types;

pub use builder::{build_data_matrix, column_stats, standardize};
pub use types::{ColumnStats, DegenerateColumnPolicy};
