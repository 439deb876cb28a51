use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::dataset::decoder::ImageDecoder;
use crate::face_pipeline::dataset::types::GrayRaster;

/// Housekeeping entry excluded from every directory listing by name equality.
pub const EXCLUDED_FILE_NAME: &str = ".DS_Store";

/// Enumerates the image files of a dataset directory.
///
/// Directory order is platform-dependent, so entries are sorted by path to
/// keep row order stable across runs.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name() == EXCLUDED_FILE_NAME {
            continue;
        }
        files.push(entry.path());
    }

    files.sort();
    Ok(files)
}

/// Loads every image of a dataset directory as a fixed-size grayscale raster.
///
/// A file that cannot be decoded aborts the load; the pipeline never runs on
/// a partial dataset.
pub fn load_dataset<D: ImageDecoder>(
    decoder: &D,
    dir: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<GrayRaster>> {
    let files = list_image_files(dir)?;
    info!("Found {} image files in {}", files.len(), dir.display());

    let mut rasters = Vec::with_capacity(files.len());
    for path in &files {
        let data = fs::read(path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        let raster = decoder.decode(&data, width, height).map_err(|e| match e {
            PipelineError::DecodeError(msg) => {
                PipelineError::DecodeError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        rasters.push(raster);
    }

    if rasters.is_empty() {
        return Err(PipelineError::EmptyDataset(dir.display().to_string()));
    }

    Ok(rasters)
}
