use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::face_pipeline::stats::types::ColumnStats;

/// Centers one data matrix row against the dataset column mean.
///
/// The standard deviation is deliberately not applied here: the
/// reconstruction path is mean-only, asymmetric to the mean-and-std
/// standardization the component basis was computed from.
pub fn center_row(matrix: &DMatrix<f64>, index: usize, stats: &ColumnStats) -> DVector<f64> {
    matrix.row(index).transpose() - &stats.mean
}

/// Picks one dataset row uniformly at random and centers it.
///
/// The RNG is injected so runs can be made reproducible with a seeded
/// generator.
pub fn select_centered_sample<R: Rng>(
    rng: &mut R,
    matrix: &DMatrix<f64>,
    stats: &ColumnStats,
) -> (usize, DVector<f64>) {
    let index = rng.gen_range(0..matrix.nrows());
    (index, center_row(matrix, index, stats))
}
