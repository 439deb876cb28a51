//! Image decoder implementation using the image library.
//!
//! This module provides support for decoding common image formats (GIF, PNG,
//! JPEG, BMP, etc.) using the image library. It handles decoding, resizing to
//! the fixed analysis dimensions and conversion to single-channel luma.

use image::imageops::FilterType;
use tracing::debug;

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::dataset::decoder::ImageDecoder;
use crate::face_pipeline::dataset::types::GrayRaster;

/// Image decoder that uses the image library for decoding.
///
/// This decoder supports any format that the image library can decode,
/// including the GIF files of the Yale faces dataset.
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    /// Decodes image bytes into a fixed-size grayscale raster.
    ///
    /// This method:
    /// 1. Decodes the file using the image library
    /// 2. Resizes to exactly `width` x `height` with the Triangle filter,
    ///    which is deterministic across platforms
    /// 3. Converts to single-channel 8-bit luma, row-major
    fn decode(&self, data: &[u8], width: u32, height: u32) -> Result<GrayRaster> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded image: {}x{}, resizing to {}x{}",
            decoded.width(),
            decoded.height(),
            width,
            height
        );

        let resized = decoded.resize_exact(width, height, FilterType::Triangle);
        let gray = resized.to_luma8();

        Ok(GrayRaster {
            width,
            height,
            pixels: gray.into_raw(),
        })
    }
}
