//! Still-frame extraction.
//!
//! Stills are sampled at `D * i / (N + 1)` for `i = 1..=N`, so the first and
//! last instants of the video are never captured. Captures are sequential: a
//! source exposes a single decode position.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use crate::config::StudioConfig;
use crate::error::{StudioError, StudioResult};
use crate::state::Frame;

/// An encoded still image held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct StillImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl StillImage {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            media_type: "image/jpeg".to_string(),
            bytes,
        }
    }

    /// Inline URL for `img`/`background-image` in the webview.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, BASE64.encode(&self.bytes))
    }
}

/// Anything that can be positioned and rasterized one picture at a time.
pub trait FrameSource {
    /// Move the decode position to `time_seconds` and wait for it, giving up
    /// after `timeout`.
    fn seek(&mut self, time_seconds: f64, timeout: Duration) -> StudioResult<()>;

    /// Rasterize the picture at the current position into a `width x height`
    /// buffer.
    fn rasterize(&mut self, width: u32, height: u32) -> StudioResult<RgbaImage>;
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractionSettings {
    pub count: usize,
    pub seek_timeout: Duration,
    pub settle_delay: Duration,
    pub dimensions: (u32, u32),
    pub jpeg_quality: u8,
}

impl ExtractionSettings {
    /// Settings for a video whose native size is `dimensions`.
    pub fn from_config(config: &StudioConfig, dimensions: (u32, u32)) -> Self {
        Self {
            count: config.frame_count,
            seek_timeout: config.seek_timeout(),
            settle_delay: config.settle_delay(),
            dimensions,
            jpeg_quality: config.jpeg_quality,
        }
    }
}

/// Interior sample points for a video of `duration_seconds`.
pub fn sample_timestamps(duration_seconds: f64, count: usize) -> Vec<f64> {
    if count == 0 || !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Vec::new();
    }
    let slots = (count + 1) as f64;
    (1..=count)
        .map(|i| duration_seconds * i as f64 / slots)
        .collect()
}

/// Capture every sample point in order. Any failure aborts the whole batch;
/// the caller either gets all `count` frames or an error.
pub fn extract_frames<S: FrameSource + ?Sized>(
    source: &mut S,
    duration_seconds: f64,
    settings: &ExtractionSettings,
) -> StudioResult<Vec<Frame>> {
    let timestamps = sample_timestamps(duration_seconds, settings.count);
    if timestamps.is_empty() {
        return Err(StudioError::Capture(format!(
            "cannot sample a video of duration {:.2}s",
            duration_seconds
        )));
    }

    let (width, height) = settings.dimensions;
    let mut frames = Vec::with_capacity(timestamps.len());
    for (index, time_seconds) in timestamps.into_iter().enumerate() {
        source.seek(time_seconds, settings.seek_timeout)?;
        if !settings.settle_delay.is_zero() {
            std::thread::sleep(settings.settle_delay);
        }
        let picture = source.rasterize(width, height)?;
        let still = encode_jpeg(picture, settings.jpeg_quality)?;
        tracing::debug!(index, time_seconds, bytes = still.bytes.len(), "captured frame");
        frames.push(Frame::new(index, still, time_seconds));
    }

    Ok(frames)
}

pub fn encode_jpeg(picture: RgbaImage, quality: u8) -> StudioResult<StillImage> {
    let rgb = DynamicImage::ImageRgba8(picture).to_rgb8();
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;
    Ok(StillImage::jpeg(bytes))
}
