//! Video output configuration types

/// Configuration for the output video
#[derive(Debug, Clone)]
pub struct VideoConfig {
    /// Frame rate of the output container
    pub fps: f64,
    /// JPEG quality used for each frame, 1-100
    pub jpeg_quality: u8,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: 200.0,
            jpeg_quality: 90,
        }
    }
}
