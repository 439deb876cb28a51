use nalgebra::DVector;

use crate::face_pipeline::common::error::{PipelineError, Result};

/// How reconstructed intensities are cast down to 8-bit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelCast {
    /// Truncate toward zero, then reduce modulo 256. Out-of-range values
    /// wrap, matching an unsigned-integer cast of the reconstruction
    /// vector; this can produce visible artifacts at low ranks.
    Wrap,
    /// Truncate toward zero and saturate into [0, 255].
    Clamp,
}

impl PixelCast {
    pub fn apply(self, value: f64) -> u8 {
        match self {
            PixelCast::Wrap => (value.trunc() as i64).rem_euclid(256) as u8,
            PixelCast::Clamp => value.clamp(0.0, 255.0) as u8,
        }
    }
}

/// A single RGB24 video frame.
#[derive(Debug, Clone)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triplets, `width * height * 3` bytes
    pub data: Vec<u8>,
}

/// Reshapes a reconstructed pixel vector into a `width` x `height` raster
/// and duplicates the single channel into RGB for the video encoder.
pub fn render_frame(
    vector: &DVector<f64>,
    width: u32,
    height: u32,
    cast: PixelCast,
) -> Result<RgbFrame> {
    let expected = (width * height) as usize;
    if vector.len() != expected {
        return Err(PipelineError::InvalidDimensions(width, height));
    }

    let mut data = Vec::with_capacity(expected * 3);
    for &value in vector.iter() {
        let p = cast.apply(value);
        data.extend_from_slice(&[p, p, p]);
    }

    Ok(RgbFrame { width, height, data })
}
