//! Video output module
//!
//! This module renders reconstructed pixel vectors into RGB frames and writes
//! them as a Motion JPEG AVI video.

mod avi_mjpeg;
mod frame;
mod writer;
pub mod types;

pub use avi_mjpeg::AviMjpegWriter;
pub use frame::{PixelCast, RgbFrame, render_frame};
pub use types::VideoConfig;
pub use writer::VideoWriter;
