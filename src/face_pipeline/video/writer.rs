use std::io::Write;

use crate::face_pipeline::common::error::Result;
use crate::face_pipeline::video::frame::RgbFrame;
use crate::face_pipeline::video::types::VideoConfig;

pub trait VideoWriter {
    fn write_video(
        &self,
        frames: &[RgbFrame],
        output: &mut dyn Write,
        config: &VideoConfig,
    ) -> Result<()>;
}
