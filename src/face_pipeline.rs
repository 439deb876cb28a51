//! PCA face reconstruction pipeline module
//!
//! This module provides a structured approach to PCA-based face reconstruction,
//! with separate modules for dataset loading, matrix statistics, the SVD engine,
//! projection, frame rendering and video writing.

pub mod common;
pub mod dataset;
pub mod stats;
pub mod pca;
pub mod projection;
pub mod video;
pub mod reconstruction;

pub use common::{
    PipelineError,
    Result,
};

pub use dataset::{
    GrayRaster,
    ImageDecoder,
    ImageCrateDecoder,
};

pub use stats::{
    ColumnStats,
    DegenerateColumnPolicy,
};

pub use pca::PcaBasis;

pub use video::{
    AviMjpegWriter,
    PixelCast,
    RgbFrame,
    VideoConfig,
    VideoWriter,
};

pub use reconstruction::{
    PipelineConfig,
    PipelineConfigBuilder,
    ReconstructionPipeline,
    RunSummary,
};
