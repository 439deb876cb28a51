//! Face dataset loading module
//!
//! This module provides directory enumeration and format-agnostic image decoding
//! for building the face dataset.

mod decoder;
mod image_decoder;
mod loader;
pub mod types;

pub use decoder::ImageDecoder;
pub use image_decoder::ImageCrateDecoder;
pub use loader::{EXCLUDED_FILE_NAME, list_image_files, load_dataset};
pub use types::GrayRaster;
