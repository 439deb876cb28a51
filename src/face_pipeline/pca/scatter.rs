use std::path::Path;

use nalgebra::DMatrix;
use tracing::info;

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::pca::engine::PcaBasis;

/// Projects the standardized matrix onto the top two components, yielding
/// one (pc1, pc2) score pair per image for external scatter plotting.
///
/// Returns `None` when fewer than two components are available.
pub fn scores_2d(standardized: &DMatrix<f64>, basis: &PcaBasis) -> Option<DMatrix<f64>> {
    if basis.rank() < 2 {
        return None;
    }
    let w = basis.components.rows(0, 2);
    Some(standardized * w.transpose())
}

/// Writes the N x 2 score matrix as a `pc1,pc2` CSV file.
pub fn write_scores_csv(path: &Path, scores: &DMatrix<f64>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| PipelineError::ScatterWriteError(e.to_string()))?;

    writer
        .write_record(["pc1", "pc2"])
        .map_err(|e| PipelineError::ScatterWriteError(e.to_string()))?;

    for i in 0..scores.nrows() {
        writer
            .write_record(&[scores[(i, 0)].to_string(), scores[(i, 1)].to_string()])
            .map_err(|e| PipelineError::ScatterWriteError(e.to_string()))?;
    }

    writer.flush()?;
    info!("Wrote {} score rows to {}", scores.nrows(), path.display());
    Ok(())
}
