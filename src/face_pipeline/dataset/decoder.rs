use crate::face_pipeline::common::error::Result;
use crate::face_pipeline::dataset::types::GrayRaster;

pub trait ImageDecoder {
    fn decode(&self, data: &[u8], width: u32, height: u32) -> Result<GrayRaster>;
}
