use nalgebra::DVector;
use tracing::debug;

use crate::face_pipeline::pca::PcaBasis;

/// Projects a centered sample onto the top-k components and reconstructs an
/// approximation in pixel space. The dataset mean is not added back here.
pub fn reconstruct_at(sample: &DVector<f64>, basis: &PcaBasis, k: usize) -> DVector<f64> {
    assert!(k >= 1 && k <= basis.rank(), "rank {} out of range", k);

    let w = basis.components.rows(0, k);
    let coefficients = w * sample;
    w.transpose() * coefficients
}

/// Sweeps the truncation rank from 1 to full rank, adding the dataset mean
/// back to each reconstruction.
///
/// The sweep accumulates one component's contribution per step, so frame k
/// equals `reconstruct_at(sample, basis, k) + mean`.
pub fn reconstruction_sweep(
    sample: &DVector<f64>,
    basis: &PcaBasis,
    mean: &DVector<f64>,
) -> Vec<DVector<f64>> {
    let rank = basis.rank();
    let mut accumulated = DVector::zeros(sample.len());
    let mut frames = Vec::with_capacity(rank);

    for k in 0..rank {
        let component = basis.components.row(k).transpose();
        let coefficient = component.dot(sample);
        accumulated += component * coefficient;
        frames.push(&accumulated + mean);
    }

    debug!("Reconstructed {} frames", frames.len());
    frames
}

/// Mean squared difference between two equal-length vectors.
pub fn mean_squared_error(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    (a - b).map(|v| v * v).sum() / a.len() as f64
}
