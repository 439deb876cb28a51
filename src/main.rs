use anyhow::Result;
use face_recon_rs::face_pipeline::{PipelineConfig, ReconstructionPipeline};
use face_recon_rs::logger;

use tracing::{error, info};

fn main() -> Result<()> {
    logger::init();

    info!("Starting face_recon...");

    let config = PipelineConfig::builder()
        .scatter_path(Some("scores.csv".into()))
        .build();
    let pipeline = ReconstructionPipeline::new(config);

    info!("PCA reconstruction pipeline initialized");
    info!(
        "Frame size: {}x{}",
        pipeline.config().width,
        pipeline.config().height
    );
    info!("Frame rate: {} fps", pipeline.config().video.fps);

    match pipeline.run("yalefaces", "reconstruction.avi") {
        Ok(summary) => {
            info!(
                "Reconstruction successful: {} images, rank {}, sample {}, {} frames",
                summary.image_count, summary.rank, summary.sample_index, summary.frame_count
            );
            Ok(())
        }
        Err(e) => {
            error!("Reconstruction failed: {}", e);
            Err(e.into())
        }
    }
}
