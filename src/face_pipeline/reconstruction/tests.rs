use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::dataset::{EXCLUDED_FILE_NAME, GrayRaster, ImageDecoder};
use crate::face_pipeline::reconstruction::config::PipelineConfig;
use crate::face_pipeline::reconstruction::pipeline::ReconstructionPipeline;
use crate::face_pipeline::stats::DegenerateColumnPolicy;
use crate::face_pipeline::video::{PixelCast, RgbFrame, VideoConfig, VideoWriter};

struct MockDecoder {
    should_fail: bool,
}

impl ImageDecoder for MockDecoder {
    fn decode(&self, data: &[u8], width: u32, height: u32) -> Result<GrayRaster> {
        if self.should_fail {
            return Err(PipelineError::DecodeError("Mock decode error".to_string()));
        }
        let seed = data.first().copied().unwrap_or(0);
        let pixels = (0..width * height).map(|j| seed.wrapping_add(j as u8)).collect();
        Ok(GrayRaster { width, height, pixels })
    }
}

struct MockWriter {
    should_fail: bool,
    written_frames: Arc<Mutex<Vec<RgbFrame>>>,
}

impl VideoWriter for MockWriter {
    fn write_video(
        &self,
        frames: &[RgbFrame],
        output: &mut dyn Write,
        _config: &VideoConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::VideoWriteError("Mock encode error".to_string()));
        }
        self.written_frames.lock().unwrap().extend_from_slice(frames);
        output.write_all(b"mock video")?;
        Ok(())
    }
}

fn dataset_dir(file_count: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..file_count {
        let name = format!("subject{:02}.gif", i + 1);
        fs::write(dir.path().join(name), [(i as u8 + 1) * 10]).unwrap();
    }
    fs::write(dir.path().join(EXCLUDED_FILE_NAME), b"junk").unwrap();
    dir
}

fn test_config() -> PipelineConfig {
    PipelineConfig::builder()
        .width(2)
        .height(2)
        .sample_seed(Some(7))
        .build()
}

#[test]
fn test_config_builder() {
    let config = PipelineConfig::builder()
        .width(8)
        .height(8)
        .fps(25.0)
        .jpeg_quality(75)
        .degenerate_columns(DegenerateColumnPolicy::Fail)
        .pixel_cast(PixelCast::Clamp)
        .sample_seed(Some(1))
        .build();

    assert_eq!(config.width, 8);
    assert_eq!(config.height, 8);
    assert_eq!(config.dimension(), 64);
    assert!((config.video.fps - 25.0).abs() < 1e-12);
    assert_eq!(config.video.jpeg_quality, 75);
    assert_eq!(config.degenerate_columns, DegenerateColumnPolicy::Fail);
    assert_eq!(config.pixel_cast, PixelCast::Clamp);
    assert_eq!(config.sample_seed, Some(1));
    assert!(config.scatter_path.is_none());
}

#[test]
fn test_successful_run_frame_count_is_min_n_d() {
    let dir = dataset_dir(4);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("reconstruction.avi");

    let written = Arc::new(Mutex::new(Vec::new()));
    let pipeline = ReconstructionPipeline::with_custom(
        MockDecoder { should_fail: false },
        MockWriter {
            should_fail: false,
            written_frames: written.clone(),
        },
        test_config(),
    );

    let summary = pipeline.run(dir.path(), &output).unwrap();

    // 4 images of 2x2 pixels: min(N, D) = min(4, 4)
    assert_eq!(summary.image_count, 4);
    assert_eq!(summary.rank, 4);
    assert_eq!(summary.frame_count, 4);
    assert!(summary.sample_index < 4);
    assert_eq!(written.lock().unwrap().len(), 4);
    assert!(output.exists());
}

#[test]
fn test_seeded_runs_select_same_sample() {
    let dir = dataset_dir(4);
    let out_dir = tempfile::tempdir().unwrap();

    let run = |name: &str| {
        let pipeline = ReconstructionPipeline::with_custom(
            MockDecoder { should_fail: false },
            MockWriter {
                should_fail: false,
                written_frames: Arc::new(Mutex::new(Vec::new())),
            },
            test_config(),
        );
        pipeline.run(dir.path(), out_dir.path().join(name)).unwrap()
    };

    assert_eq!(run("a.avi").sample_index, run("b.avi").sample_index);
}

#[test]
fn test_decoder_failure_aborts_run() {
    let dir = dataset_dir(4);
    let out_dir = tempfile::tempdir().unwrap();

    let pipeline = ReconstructionPipeline::with_custom(
        MockDecoder { should_fail: true },
        MockWriter {
            should_fail: false,
            written_frames: Arc::new(Mutex::new(Vec::new())),
        },
        test_config(),
    );

    let result = pipeline.run(dir.path(), out_dir.path().join("out.avi"));

    assert!(matches!(result, Err(PipelineError::DecodeError(_))));
}

#[test]
fn test_writer_failure_surfaces() {
    let dir = dataset_dir(4);
    let out_dir = tempfile::tempdir().unwrap();

    let pipeline = ReconstructionPipeline::with_custom(
        MockDecoder { should_fail: false },
        MockWriter {
            should_fail: true,
            written_frames: Arc::new(Mutex::new(Vec::new())),
        },
        test_config(),
    );

    let result = pipeline.run(dir.path(), out_dir.path().join("out.avi"));

    assert!(matches!(result, Err(PipelineError::VideoWriteError(_))));
}

#[test]
fn test_empty_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let pipeline = ReconstructionPipeline::with_custom(
        MockDecoder { should_fail: false },
        MockWriter {
            should_fail: false,
            written_frames: Arc::new(Mutex::new(Vec::new())),
        },
        test_config(),
    );

    let result = pipeline.run(dir.path(), out_dir.path().join("out.avi"));

    assert!(matches!(result, Err(PipelineError::EmptyDataset(_))));
}

#[test]
fn test_scatter_export_written_when_configured() {
    let dir = dataset_dir(4);
    let out_dir = tempfile::tempdir().unwrap();
    let scatter = out_dir.path().join("scores.csv");

    let config = PipelineConfig::builder()
        .width(2)
        .height(2)
        .sample_seed(Some(7))
        .scatter_path(Some(scatter.clone()))
        .build();
    let pipeline = ReconstructionPipeline::with_custom(
        MockDecoder { should_fail: false },
        MockWriter {
            should_fail: false,
            written_frames: Arc::new(Mutex::new(Vec::new())),
        },
        config,
    );

    pipeline.run(dir.path(), out_dir.path().join("out.avi")).unwrap();

    let contents = fs::read_to_string(&scatter).unwrap();
    assert_eq!(contents.lines().count(), 5);
}
