//! Reconstruction run configuration

use std::path::PathBuf;

use crate::face_pipeline::stats::types::DegenerateColumnPolicy;
use crate::face_pipeline::video::{PixelCast, VideoConfig};

/// Configuration for a reconstruction run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Width every image is resized to before analysis
    pub width: u32,
    /// Height every image is resized to before analysis
    pub height: u32,
    /// Output video settings
    pub video: VideoConfig,
    /// How zero-variance pixel columns are handled during standardization
    pub degenerate_columns: DegenerateColumnPolicy,
    /// How reconstructed intensities are cast to 8-bit pixels
    pub pixel_cast: PixelCast,
    /// Seed for sample selection; None draws from OS entropy
    pub sample_seed: Option<u64>,
    /// Optional CSV destination for the 2-D projection scores
    pub scatter_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            video: VideoConfig::default(),
            degenerate_columns: DegenerateColumnPolicy::CenterOnly,
            pixel_cast: PixelCast::Wrap,
            sample_seed: None,
            scatter_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Pixel count of one analysis raster.
    pub fn dimension(&self) -> usize {
        (self.width * self.height) as usize
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<f64>,
    jpeg_quality: Option<u8>,
    degenerate_columns: Option<DegenerateColumnPolicy>,
    pixel_cast: Option<PixelCast>,
    sample_seed: Option<Option<u64>>,
    scatter_path: Option<Option<PathBuf>>,
}

impl PipelineConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn degenerate_columns(mut self, policy: DegenerateColumnPolicy) -> Self {
        self.degenerate_columns = Some(policy);
        self
    }

    pub fn pixel_cast(mut self, cast: PixelCast) -> Self {
        self.pixel_cast = Some(cast);
        self
    }

    pub fn sample_seed(mut self, seed: Option<u64>) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    pub fn scatter_path(mut self, path: Option<PathBuf>) -> Self {
        self.scatter_path = Some(path);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            video: VideoConfig {
                fps: self.fps.unwrap_or(default.video.fps),
                jpeg_quality: self.jpeg_quality.unwrap_or(default.video.jpeg_quality),
            },
            degenerate_columns: self
                .degenerate_columns
                .unwrap_or(default.degenerate_columns),
            pixel_cast: self.pixel_cast.unwrap_or(default.pixel_cast),
            sample_seed: self.sample_seed.unwrap_or(default.sample_seed),
            scatter_path: self.scatter_path.unwrap_or(default.scatter_path),
        }
    }
}
