use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

use crate::face_pipeline::{
    common::error::{PipelineError, Result},
    dataset::{ImageCrateDecoder, ImageDecoder, load_dataset},
    pca,
    projection,
    reconstruction::config::PipelineConfig,
    stats,
    video::{AviMjpegWriter, VideoWriter, render_frame},
};

/// Outcome of a completed reconstruction run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of images loaded into the data matrix
    pub image_count: usize,
    /// Number of principal components, min(N, D)
    pub rank: usize,
    /// Row index of the randomly selected sample
    pub sample_index: usize,
    /// Number of frames written to the video, one per truncation rank
    pub frame_count: usize,
}

pub struct ReconstructionPipeline<D: ImageDecoder, W: VideoWriter> {
    decoder: D,
    writer: W,
    config: PipelineConfig,
}

impl ReconstructionPipeline<ImageCrateDecoder, AviMjpegWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            decoder: ImageCrateDecoder,
            writer: AviMjpegWriter,
            config,
        }
    }
}

impl<D: ImageDecoder, W: VideoWriter> ReconstructionPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: PipelineConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    /// Runs the full pipeline: load the dataset, standardize, decompose,
    /// reconstruct the sample at every truncation rank and encode the video.
    #[instrument(skip(self, input_dir, output_path))]
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_path: Q,
    ) -> Result<RunSummary> {
        let input_dir = input_dir.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_dir.display(),
            output = %output_path.display(),
            "Starting reconstruction run"
        );

        let rasters = {
            let _span = tracing::info_span!("load_dataset").entered();
            load_dataset(&self.decoder, input_dir, self.config.width, self.config.height)?
        };

        let (matrix, column_stats, standardized) = {
            let _span = tracing::info_span!("build_matrix", images = rasters.len()).entered();
            let matrix = stats::build_data_matrix(&rasters)?;
            let column_stats = stats::column_stats(&matrix);
            let standardized =
                stats::standardize(&matrix, &column_stats, self.config.degenerate_columns)?;
            (matrix, column_stats, standardized)
        };

        let basis = {
            let _span = tracing::info_span!(
                "svd",
                rows = standardized.nrows(),
                cols = standardized.ncols()
            )
            .entered();
            pca::compute_basis(&standardized)?
        };

        if let Some(path) = &self.config.scatter_path {
            if let Some(scores) = pca::scores_2d(&standardized, &basis) {
                let _span = tracing::info_span!("scatter_export").entered();
                pca::write_scores_csv(path, &scores)?;
            }
        }

        let mut rng = match self.config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (sample_index, sample) =
            projection::select_centered_sample(&mut rng, &matrix, &column_stats);
        info!(sample_index, "Selected sample image");

        let frames = {
            let _span = tracing::info_span!("reconstruct", rank = basis.rank()).entered();
            projection::reconstruction_sweep(&sample, &basis, &column_stats.mean)
                .iter()
                .map(|vector| {
                    render_frame(
                        vector,
                        self.config.width,
                        self.config.height,
                        self.config.pixel_cast,
                    )
                })
                .collect::<Result<Vec<_>>>()?
        };

        {
            let _span = tracing::info_span!("encode_video", frames = frames.len()).entered();
            let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                PipelineError::VideoWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            self.writer
                .write_video(&frames, &mut output_file, &self.config.video)?;
        }

        info!(
            images = matrix.nrows(),
            rank = basis.rank(),
            frames = frames.len(),
            "Reconstruction video complete"
        );

        Ok(RunSummary {
            image_count: matrix.nrows(),
            rank: basis.rank(),
            sample_index,
            frame_count: frames.len(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
