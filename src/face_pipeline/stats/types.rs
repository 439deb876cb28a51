//! Column statistics types

use nalgebra::DVector;

/// Per-column statistics of the data matrix.
///
/// Computed exactly once per dataset; every later stage reuses the same
/// vectors, since they define the basis the SVD is computed against.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    /// Per-column mean, length D
    pub mean: DVector<f64>,
    /// Per-column population standard deviation (divisor N), length D
    pub std: DVector<f64>,
}

/// Policy for pixel columns whose standard deviation is zero.
///
/// Dividing such a column during standardization would inject non-finite
/// values into the SVD input, so the case must be handled explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateColumnPolicy {
    /// Leave the column centered-only; its standardized values are all zero
    CenterOnly,
    /// Abort the run, naming the offending column
    Fail,
}
