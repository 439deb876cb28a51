use nalgebra::{DMatrix, DVector};
use tracing::{debug, info};

use crate::face_pipeline::common::error::{PipelineError, Result};

/// Principal component basis obtained from the SVD of the standardized
/// data matrix.
#[derive(Debug, Clone)]
pub struct PcaBasis {
    /// Left singular vectors, N x r
    pub u: DMatrix<f64>,
    /// Singular values, non-negative and descending, length r = min(N, D)
    pub singular_values: DVector<f64>,
    /// Component matrix, r x D; row i is the i-th principal direction in
    /// pixel space, ordered by descending explained variance
    pub components: DMatrix<f64>,
}

impl PcaBasis {
    /// Number of principal directions available for reconstruction.
    pub fn rank(&self) -> usize {
        self.components.nrows()
    }
}

/// Computes the economy SVD of the standardized matrix.
///
/// The input is guarded for non-finite values first: a NaN or infinity here
/// would silently corrupt the decomposition and every downstream
/// reconstruction. nalgebra's SVD of a real matrix is real-valued, so no
/// complex-artifact normalization is needed beyond this check.
pub fn compute_basis(standardized: &DMatrix<f64>) -> Result<PcaBasis> {
    if let Some((row, col)) = find_non_finite(standardized) {
        return Err(PipelineError::NonFiniteData { row, col });
    }

    info!(
        "Computing SVD of {}x{} standardized matrix",
        standardized.nrows(),
        standardized.ncols()
    );

    let svd = standardized.clone().svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| PipelineError::SvdError("left singular vectors not computed".to_string()))?;
    let components = svd
        .v_t
        .ok_or_else(|| PipelineError::SvdError("right singular vectors not computed".to_string()))?;

    debug!("SVD complete, rank {}", components.nrows());

    Ok(PcaBasis {
        u,
        singular_values: svd.singular_values,
        components,
    })
}

fn find_non_finite(matrix: &DMatrix<f64>) -> Option<(usize, usize)> {
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            if !matrix[(i, j)].is_finite() {
                return Some((i, j));
            }
        }
    }
    None
}
