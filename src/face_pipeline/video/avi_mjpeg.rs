//! Motion JPEG AVI writer.
//!
//! Each frame is compressed as a baseline JPEG with the image library and the
//! frames are wrapped in a RIFF AVI container (`MJPG` fourcc) assembled in a
//! single pass, so a failed run never leaves a half-written container behind.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::face_pipeline::common::error::{PipelineError, Result};
use crate::face_pipeline::video::frame::RgbFrame;
use crate::face_pipeline::video::types::VideoConfig;
use crate::face_pipeline::video::writer::VideoWriter;

pub struct AviMjpegWriter;

const AVIF_HASINDEX: u32 = 0x0000_0010;
const AVIIF_KEYFRAME: u32 = 0x0000_0010;

/// Stream timebase denominator; frame rate is stored as rate/scale.
const STREAM_SCALE: u32 = 1_000;

impl VideoWriter for AviMjpegWriter {
    fn write_video(
        &self,
        frames: &[RgbFrame],
        output: &mut dyn Write,
        config: &VideoConfig,
    ) -> Result<()> {
        let first = frames.first().ok_or_else(|| {
            PipelineError::VideoWriteError("no frames to encode".to_string())
        })?;
        let (width, height) = (first.width, first.height);

        debug!(
            "Encoding {} MJPG frames at {}x{}, {} fps",
            frames.len(),
            width,
            height,
            config.fps
        );

        let mut chunks = Vec::with_capacity(frames.len());
        for frame in frames {
            if frame.width != width || frame.height != height {
                return Err(PipelineError::InvalidDimensions(frame.width, frame.height));
            }
            chunks.push(encode_jpeg(frame, config.jpeg_quality)?);
        }

        let container = assemble_container(&chunks, width, height, config.fps);
        output.write_all(&container)?;

        debug!("AVI container complete, {} bytes", container.len());
        Ok(())
    }
}

fn encode_jpeg(frame: &RgbFrame, quality: u8) -> Result<Vec<u8>> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    encoder
        .write_image(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| PipelineError::VideoWriteError(e.to_string()))?;
    Ok(jpeg)
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// RIFF chunk: fourcc, little-endian size, payload, padded to even length.
fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len() + 1);
    out.extend_from_slice(tag);
    put_u32(&mut out, payload.len() as u32);
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// RIFF list: `LIST`, size, list type fourcc, payload.
fn list(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut inner = Vec::with_capacity(4 + payload.len());
    inner.extend_from_slice(kind);
    inner.extend_from_slice(payload);
    chunk(b"LIST", &inner)
}

fn assemble_container(jpeg_chunks: &[Vec<u8>], width: u32, height: u32, fps: f64) -> Vec<u8> {
    let frame_count = jpeg_chunks.len() as u32;
    let max_chunk = jpeg_chunks.iter().map(Vec::len).max().unwrap_or(0) as u32;
    let total_bytes: usize = jpeg_chunks.iter().map(Vec::len).sum();
    let rate = (fps * STREAM_SCALE as f64).round() as u32;

    let mut avih = Vec::with_capacity(56);
    put_u32(&mut avih, (1_000_000.0 / fps).round() as u32);
    put_u32(&mut avih, (total_bytes as f64 * fps / frame_count.max(1) as f64) as u32);
    put_u32(&mut avih, 0); // padding granularity
    put_u32(&mut avih, AVIF_HASINDEX);
    put_u32(&mut avih, frame_count);
    put_u32(&mut avih, 0); // initial frames
    put_u32(&mut avih, 1); // streams
    put_u32(&mut avih, max_chunk + 8);
    put_u32(&mut avih, width);
    put_u32(&mut avih, height);
    for _ in 0..4 {
        put_u32(&mut avih, 0); // reserved
    }

    let mut strh = Vec::with_capacity(56);
    strh.extend_from_slice(b"vids");
    strh.extend_from_slice(b"MJPG");
    put_u32(&mut strh, 0); // flags
    put_u16(&mut strh, 0); // priority
    put_u16(&mut strh, 0); // language
    put_u32(&mut strh, 0); // initial frames
    put_u32(&mut strh, STREAM_SCALE);
    put_u32(&mut strh, rate);
    put_u32(&mut strh, 0); // start
    put_u32(&mut strh, frame_count);
    put_u32(&mut strh, max_chunk + 8);
    put_u32(&mut strh, 0); // quality
    put_u32(&mut strh, 0); // sample size
    put_u16(&mut strh, 0); // rcFrame left
    put_u16(&mut strh, 0); // rcFrame top
    put_u16(&mut strh, width as u16);
    put_u16(&mut strh, height as u16);

    // BITMAPINFOHEADER
    let mut strf = Vec::with_capacity(40);
    put_u32(&mut strf, 40);
    put_u32(&mut strf, width);
    put_u32(&mut strf, height);
    put_u16(&mut strf, 1); // planes
    put_u16(&mut strf, 24); // bits per pixel
    strf.extend_from_slice(b"MJPG");
    put_u32(&mut strf, width * height * 3);
    for _ in 0..4 {
        put_u32(&mut strf, 0); // pels per meter, colors used/important
    }

    let mut strl = chunk(b"strh", &strh);
    strl.extend_from_slice(&chunk(b"strf", &strf));

    let mut hdrl = chunk(b"avih", &avih);
    hdrl.extend_from_slice(&list(b"strl", &strl));

    // movi payload and its idx1 index; chunk offsets are relative to the
    // position of the `movi` fourcc, so the first chunk sits at offset 4.
    let mut movi = Vec::with_capacity(total_bytes + jpeg_chunks.len() * 9);
    let mut idx1 = Vec::with_capacity(jpeg_chunks.len() * 16);
    for jpeg in jpeg_chunks {
        idx1.extend_from_slice(b"00dc");
        put_u32(&mut idx1, AVIIF_KEYFRAME);
        put_u32(&mut idx1, movi.len() as u32 + 4);
        put_u32(&mut idx1, jpeg.len() as u32);
        movi.extend_from_slice(&chunk(b"00dc", jpeg));
    }

    let mut riff = Vec::with_capacity(4 + hdrl.len() + movi.len() + idx1.len() + 32);
    riff.extend_from_slice(b"AVI ");
    riff.extend_from_slice(&list(b"hdrl", &hdrl));
    riff.extend_from_slice(&list(b"movi", &movi));
    riff.extend_from_slice(&chunk(b"idx1", &idx1));

    chunk(b"RIFF", &riff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face_pipeline::video::frame::{PixelCast, render_frame};
    use nalgebra::DVector;

    fn read_u32(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    fn find(buf: &[u8], tag: &[u8; 4]) -> Option<usize> {
        buf.windows(4).position(|w| w == tag)
    }

    fn gray_frames(count: usize) -> Vec<RgbFrame> {
        (0..count)
            .map(|i| {
                let vector = DVector::from_element(4, (i * 40) as f64);
                render_frame(&vector, 2, 2, PixelCast::Wrap).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_container_header_well_formed() {
        let frames = gray_frames(3);
        let mut buf = Vec::new();
        AviMjpegWriter
            .write_video(&frames, &mut buf, &VideoConfig::default())
            .unwrap();

        assert_eq!(&buf[0..4], b"RIFF");
        assert_eq!(read_u32(&buf, 4) as usize, buf.len() - 8);
        assert_eq!(&buf[8..12], b"AVI ");
        assert_eq!(&buf[12..16], b"LIST");
        assert_eq!(&buf[20..24], b"hdrl");
        assert_eq!(&buf[24..28], b"avih");
        assert_eq!(read_u32(&buf, 28), 56);
    }

    #[test]
    fn test_frame_count_recorded_in_headers() {
        let frames = gray_frames(3);
        let mut buf = Vec::new();
        AviMjpegWriter
            .write_video(&frames, &mut buf, &VideoConfig::default())
            .unwrap();

        // dwTotalFrames, fifth field of the avih payload
        assert_eq!(read_u32(&buf, 32 + 16), 3);

        // dwLength of the video stream header
        let strh = find(&buf, b"strh").unwrap();
        assert_eq!(&buf[strh + 8..strh + 12], b"vids");
        assert_eq!(&buf[strh + 12..strh + 16], b"MJPG");
        assert_eq!(read_u32(&buf, strh + 8 + 32), 3);
    }

    #[test]
    fn test_index_matches_frames() {
        let frames = gray_frames(5);
        let mut buf = Vec::new();
        AviMjpegWriter
            .write_video(&frames, &mut buf, &VideoConfig::default())
            .unwrap();

        let idx1 = find(&buf, b"idx1").unwrap();
        assert_eq!(read_u32(&buf, idx1 + 4), 5 * 16);
        assert_eq!(&buf[idx1 + 8..idx1 + 12], b"00dc");
        assert!(find(&buf, b"movi").is_some());
    }

    #[test]
    fn test_frame_rate_stored_as_rate_over_scale() {
        let frames = gray_frames(2);
        let config = VideoConfig {
            fps: 200.0,
            ..VideoConfig::default()
        };
        let mut buf = Vec::new();
        AviMjpegWriter.write_video(&frames, &mut buf, &config).unwrap();

        let strh = find(&buf, b"strh").unwrap();
        let scale = read_u32(&buf, strh + 8 + 20);
        let rate = read_u32(&buf, strh + 8 + 24);
        assert!((rate as f64 / scale as f64 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_empty_frame_list() {
        let mut buf = Vec::new();
        let result = AviMjpegWriter.write_video(&[], &mut buf, &VideoConfig::default());

        assert!(matches!(result, Err(PipelineError::VideoWriteError(_))));
    }

    #[test]
    fn test_rejects_mismatched_frame_sizes() {
        let mut frames = gray_frames(2);
        frames.push(RgbFrame {
            width: 3,
            height: 3,
            data: vec![0; 27],
        });

        let mut buf = Vec::new();
        let result = AviMjpegWriter.write_video(&frames, &mut buf, &VideoConfig::default());

        assert!(matches!(result, Err(PipelineError::InvalidDimensions(3, 3))));
    }
}
