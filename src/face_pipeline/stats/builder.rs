use nalgebra::DMatrix;
use tracing::{debug, warn};

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::dataset::types::GrayRaster;
use crate::face_pipeline::stats::types::{ColumnStats, DegenerateColumnPolicy};

/// Stacks flattened rasters into an N x D data matrix, one image per row.
pub fn build_data_matrix(rasters: &[GrayRaster]) -> Result<DMatrix<f64>> {
    let first = rasters
        .first()
        .ok_or_else(|| PipelineError::EmptyDataset("no rasters to stack".to_string()))?;
    let d = first.len();

    for raster in rasters {
        if raster.len() != d {
            return Err(PipelineError::InvalidDimensions(raster.width, raster.height));
        }
    }

    let matrix = DMatrix::from_row_iterator(
        rasters.len(),
        d,
        rasters.iter().flat_map(|r| r.flatten()),
    );

    debug!("Built {}x{} data matrix", matrix.nrows(), matrix.ncols());
    Ok(matrix)
}

/// Computes the per-column mean and population standard deviation of the
/// data matrix.
pub fn column_stats(matrix: &DMatrix<f64>) -> ColumnStats {
    let mean = matrix.row_mean().transpose();
    let std = matrix.row_variance().transpose().map(f64::sqrt);
    ColumnStats { mean, std }
}

/// Standardizes the data matrix as `(x - mean) / std` per column.
///
/// Zero-variance columns are resolved by the given policy: `CenterOnly`
/// leaves them centered (all zeros), `Fail` aborts the run.
pub fn standardize(
    matrix: &DMatrix<f64>,
    stats: &ColumnStats,
    policy: DegenerateColumnPolicy,
) -> Result<DMatrix<f64>> {
    let mut degenerate = 0usize;
    let mut standardized = DMatrix::zeros(matrix.nrows(), matrix.ncols());

    for j in 0..matrix.ncols() {
        let mean = stats.mean[j];
        let std = stats.std[j];

        if std == 0.0 {
            if policy == DegenerateColumnPolicy::Fail {
                return Err(PipelineError::DegenerateColumn(j));
            }
            degenerate += 1;
            for i in 0..matrix.nrows() {
                standardized[(i, j)] = matrix[(i, j)] - mean;
            }
            continue;
        }

        for i in 0..matrix.nrows() {
            standardized[(i, j)] = (matrix[(i, j)] - mean) / std;
        }
    }

    if degenerate > 0 {
        warn!("{} zero-variance columns left centered-only", degenerate);
    }

    Ok(standardized)
}
