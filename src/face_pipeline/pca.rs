//! PCA engine module
//!
//! This module computes the singular value decomposition of the standardized
//! data matrix and exposes the principal component basis, plus the 2-D score
//! export used for external scatter plotting.

mod engine;
mod scatter;

pub use engine::{PcaBasis, compute_basis};
pub use scatter::{scores_2d, write_scores_csv};
