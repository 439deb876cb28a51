//! Projection and reconstruction module
//!
//! This module selects the sample image, projects it onto leading principal
//! components and produces the per-rank reconstruction sequence.

mod reconstruct;
mod sample;

pub use reconstruct::{mean_squared_error, reconstruct_at, reconstruction_sweep};
pub use sample::{center_row, select_centered_sample};
