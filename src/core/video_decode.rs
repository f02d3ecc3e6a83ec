use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use ffmpeg_next as ffmpeg;
use image::RgbaImage;

use crate::core::frame_extract::FrameSource;
use crate::core::media::VideoMetadata;
use crate::error::{StudioError, StudioResult};

const AV_TIME_BASE: i64 = 1_000_000;

enum DecodeRequest {
    Seek {
        time_seconds: f64,
        respond_to: mpsc::Sender<StudioResult<()>>,
    },
    Rasterize {
        width: u32,
        height: u32,
        respond_to: mpsc::Sender<StudioResult<RgbaImage>>,
    },
}

/// A dedicated thread owning one FFmpeg decoder for one file.
///
/// Requests are served in order, so a rasterize always sees the picture left
/// by the last completed seek.
pub struct VideoDecodeWorker {
    sender: mpsc::Sender<DecodeRequest>,
}

impl VideoDecodeWorker {
    /// Open `path` and wait up to `timeout` for its stream metadata.
    pub fn open(path: &Path, timeout: Duration) -> StudioResult<(Self, VideoMetadata)> {
        let (sender, receiver) = mpsc::channel::<DecodeRequest>();
        let (ready_tx, ready_rx) = mpsc::channel::<StudioResult<VideoMetadata>>();
        let source = path.to_path_buf();

        thread::Builder::new()
            .name("video-decode".to_string())
            .spawn(move || {
                let _ = ffmpeg::init();
                let mut decoder = match VideoDecoder::open(&source) {
                    Ok(decoder) => {
                        let _ = ready_tx.send(Ok(decoder.metadata()));
                        decoder
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                for request in receiver {
                    match request {
                        DecodeRequest::Seek {
                            time_seconds,
                            respond_to,
                        } => {
                            let _ = respond_to.send(decoder.seek_to(time_seconds));
                        }
                        DecodeRequest::Rasterize {
                            width,
                            height,
                            respond_to,
                        } => {
                            let _ = respond_to.send(decoder.rasterize(width, height));
                        }
                    }
                }
            })?;

        let metadata = match ready_rx.recv_timeout(timeout) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => return Err(StudioError::MetadataTimedOut),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(StudioError::MediaOpen("decoder thread exited".to_string()))
            }
        };

        Ok((Self { sender }, metadata))
    }

    fn closed() -> StudioError {
        StudioError::Capture("decoder thread is gone".to_string())
    }
}

impl FrameSource for VideoDecodeWorker {
    fn seek(&mut self, time_seconds: f64, timeout: Duration) -> StudioResult<()> {
        let (respond_to, response) = mpsc::channel();
        self.sender
            .send(DecodeRequest::Seek {
                time_seconds,
                respond_to,
            })
            .map_err(|_| Self::closed())?;

        match response.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(StudioError::SeekTimedOut {
                seconds: time_seconds,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(Self::closed()),
        }
    }

    fn rasterize(&mut self, width: u32, height: u32) -> StudioResult<RgbaImage> {
        let (respond_to, response) = mpsc::channel();
        self.sender
            .send(DecodeRequest::Rasterize {
                width,
                height,
                respond_to,
            })
            .map_err(|_| Self::closed())?;
        response.recv().map_err(|_| Self::closed())?
    }
}

struct VideoDecoder {
    input: ffmpeg::format::context::Input,
    stream_index: usize,
    decoder: ffmpeg::decoder::Video,
    time_base: ffmpeg::Rational,
    duration_seconds: f64,
    current: Option<ffmpeg::util::frame::Video>,
    scaler: Option<(ScalerKey, ffmpeg::software::scaling::Context)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScalerKey {
    format: ffmpeg::util::format::Pixel,
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
}

impl VideoDecoder {
    fn open(path: &Path) -> StudioResult<Self> {
        let input = ffmpeg::format::input(path)?;
        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or(ffmpeg::Error::StreamNotFound)?;
        let stream_index = stream.index();
        let time_base = stream.time_base();
        let stream_duration = stream.duration();

        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video()?;

        let container_duration = input.duration();
        let duration_seconds = if container_duration > 0 {
            container_duration as f64 / AV_TIME_BASE as f64
        } else {
            pts_to_seconds(stream_duration, time_base)
        };

        Ok(Self {
            input,
            stream_index,
            decoder,
            time_base,
            duration_seconds,
            current: None,
            scaler: None,
        })
    }

    fn metadata(&self) -> VideoMetadata {
        let width = self.decoder.width();
        let height = self.decoder.height();
        VideoMetadata {
            duration_seconds: self.duration_seconds,
            width: (width > 0).then_some(width),
            height: (height > 0).then_some(height),
        }
    }

    /// Decode forward from the nearest keyframe until the first picture at or
    /// past `time_seconds`. Near the end of the stream the last decodable
    /// picture is used instead.
    fn seek_to(&mut self, time_seconds: f64) -> StudioResult<()> {
        let target_ts = (time_seconds.max(0.0) * AV_TIME_BASE as f64).round() as i64;
        self.input.seek(target_ts, ..)?;
        self.decoder.flush();

        let target_pts = seconds_to_pts(time_seconds.max(0.0), self.time_base);
        let mut last: Option<ffmpeg::util::frame::Video> = None;

        for (stream, packet) in self.input.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }

            let mut decoded = ffmpeg::util::frame::Video::empty();
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let reached = decoded
                    .timestamp()
                    .or(decoded.pts())
                    .map(|pts| pts >= target_pts)
                    .unwrap_or(true);
                if reached {
                    self.current = Some(decoded);
                    return Ok(());
                }
                last = Some(decoded.clone());
            }
        }

        let _ = self.decoder.send_eof();
        let mut decoded = ffmpeg::util::frame::Video::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            last = Some(decoded.clone());
        }

        match last {
            Some(frame) => {
                self.current = Some(frame);
                Ok(())
            }
            None => Err(StudioError::Capture(format!(
                "no picture decoded near {:.2}s",
                time_seconds
            ))),
        }
    }

    fn rasterize(&mut self, width: u32, height: u32) -> StudioResult<RgbaImage> {
        let frame = self
            .current
            .as_ref()
            .ok_or_else(|| StudioError::Capture("no picture at the current position".to_string()))?;

        let key = ScalerKey {
            format: frame.format(),
            src_width: frame.width(),
            src_height: frame.height(),
            dst_width: width.max(1),
            dst_height: height.max(1),
        };
        let needs_scaler = self
            .scaler
            .as_ref()
            .map(|(existing, _)| *existing != key)
            .unwrap_or(true);
        if needs_scaler {
            let context = ffmpeg::software::scaling::Context::get(
                key.format,
                key.src_width,
                key.src_height,
                ffmpeg::util::format::Pixel::RGBA,
                key.dst_width,
                key.dst_height,
                ffmpeg::software::scaling::Flags::BILINEAR,
            )?;
            self.scaler = Some((key, context));
        }

        let Some((_, scaler)) = self.scaler.as_mut() else {
            return Err(StudioError::Capture("scaler unavailable".to_string()));
        };
        let mut rgba_frame = ffmpeg::util::frame::Video::empty();
        scaler
            .run(frame, &mut rgba_frame)
            .map_err(|err| StudioError::Capture(err.to_string()))?;

        frame_to_rgba(&rgba_frame)
            .ok_or_else(|| StudioError::Capture("unexpected pixel layout".to_string()))
    }
}

fn seconds_to_pts(time_seconds: f64, time_base: ffmpeg::Rational) -> i64 {
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    if numerator <= 0.0 || denominator <= 0.0 {
        return 0;
    }

    (time_seconds * denominator / numerator).round() as i64
}

fn pts_to_seconds(pts: i64, time_base: ffmpeg::Rational) -> f64 {
    if pts <= 0 {
        return 0.0;
    }
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    if numerator <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }
    pts as f64 * numerator / denominator
}

fn frame_to_rgba(frame: &ffmpeg::util::frame::Video) -> Option<RgbaImage> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    if width == 0 || height == 0 {
        return None;
    }

    let stride = frame.stride(0);
    let row_bytes = width * 4;
    if stride < row_bytes {
        return None;
    }

    let data = frame.data(0);
    let mut buffer = vec![0_u8; row_bytes * height];

    for y in 0..height {
        let src_offset = y * stride;
        let dst_offset = y * row_bytes;
        let src_slice = data.get(src_offset..src_offset + row_bytes)?;
        buffer[dst_offset..dst_offset + row_bytes].copy_from_slice(src_slice);
    }

    RgbaImage::from_vec(width as u32, height as u32, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pts_conversions() {
        let time_base = ffmpeg::Rational::new(1, 90_000);
        assert_eq!(seconds_to_pts(2.0, time_base), 180_000);
        assert!((pts_to_seconds(180_000, time_base) - 2.0).abs() < 1e-9);
        assert_eq!(pts_to_seconds(-5, time_base), 0.0);
        assert_eq!(seconds_to_pts(1.0, ffmpeg::Rational::new(0, 1)), 0);
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let path = std::env::temp_dir().join(format!("missing-{}.mp4", uuid::Uuid::new_v4()));
        let result = VideoDecodeWorker::open(&path, Duration::from_secs(5));
        assert!(matches!(result, Err(StudioError::MediaOpen(_))));
    }
}
