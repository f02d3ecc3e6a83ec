//! Mocked generation: the eased progress curve and the canned chat results.
//!
//! Nothing here looks at user input. Results are fixed placeholder stills or
//! a fixed demo clip.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::config::{ChatResultKind, StudioConfig};
use crate::core::frame_extract::{encode_jpeg, FrameSource, StillImage};
use crate::core::paths::resolve_resource_path;
use crate::core::video_decode::VideoDecodeWorker;
use crate::error::StudioResult;
use crate::state::{Candidate, CandidateKind, CannedResult};

const BACKGROUND: [u8; 3] = [0x1a, 0x1a, 0x1a];
const VARIATION_ACCENTS: [[u8; 3]; 4] = [
    [0x34, 0xD3, 0x99],
    [0x10, 0xB9, 0x81],
    [0x05, 0x96, 0x69],
    [0x04, 0x78, 0x57],
];

/// Ease-in quadratic progress over `total`. Exactly 1.0 once `elapsed >= total`.
pub fn eased_progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() || elapsed >= total {
        return 1.0;
    }
    let t = elapsed.as_secs_f64() / total.as_secs_f64();
    (t * t).clamp(0.0, 1.0)
}

/// Build the configured canned result. Blocking: may open the demo clip.
pub fn canned_result(config: &StudioConfig) -> StudioResult<CannedResult> {
    match config.chat_result {
        ChatResultKind::Images => variation_stills(config.fallback_dimensions(), config.jpeg_quality),
        ChatResultKind::Video => Ok(video_result(config)),
    }
}

/// Four placeholder variations: a dark card with an accent band.
pub fn variation_stills(dimensions: (u32, u32), quality: u8) -> StudioResult<CannedResult> {
    let mut candidates = Vec::with_capacity(VARIATION_ACCENTS.len());
    for (index, accent) in VARIATION_ACCENTS.iter().enumerate() {
        let label = format!("Variation {}", index + 1);
        candidates.push(Candidate {
            thumbnail: placeholder_still(dimensions, *accent, quality)?,
            source_path: PathBuf::from(format!("variations/variation-{}.jpg", index + 1)),
            kind: CandidateKind::Image,
            label,
        });
    }
    Ok(CannedResult { candidates })
}

fn video_result(config: &StudioConfig) -> CannedResult {
    let clip_path = resolve_resource_path(&config.demo_clip_path);
    let thumbnail = match clip_poster(&clip_path, config) {
        Ok(still) => still,
        Err(err) => {
            tracing::warn!(path = %clip_path.display(), "demo clip poster unavailable: {}", err);
            match placeholder_still(config.fallback_dimensions(), VARIATION_ACCENTS[0], config.jpeg_quality) {
                Ok(still) => still,
                Err(_) => StillImage::jpeg(Vec::new()),
            }
        }
    };
    CannedResult {
        candidates: vec![Candidate {
            label: "Generated clip".to_string(),
            kind: CandidateKind::Video,
            source_path: clip_path,
            thumbnail,
        }],
    }
}

/// Middle picture of the demo clip.
fn clip_poster(path: &Path, config: &StudioConfig) -> StudioResult<StillImage> {
    let (mut worker, metadata) = VideoDecodeWorker::open(path, config.metadata_timeout())?;
    let (width, height) = metadata.capture_dimensions(config.fallback_dimensions());
    worker.seek(metadata.duration_seconds / 2.0, config.seek_timeout())?;
    let picture = worker.rasterize(width, height)?;
    encode_jpeg(picture, config.jpeg_quality)
}

fn placeholder_still(dimensions: (u32, u32), accent: [u8; 3], quality: u8) -> StudioResult<StillImage> {
    let (width, height) = (dimensions.0.max(8), dimensions.1.max(8));
    let mut canvas = RgbaImage::from_pixel(
        width,
        height,
        Rgba([BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255]),
    );
    let accent = Rgba([accent[0], accent[1], accent[2], 255]);
    let band_height = (height / 6).max(1);
    let band_top = (height / 2).saturating_sub(band_height / 2);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, band_top as i32).of_size(width, band_height),
        accent,
    );
    let border = (width / 80).clamp(1, height / 2);
    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(width, border), accent);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, height.saturating_sub(border) as i32).of_size(width, border),
        accent,
    );
    encode_jpeg(canvas, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eased_progress_endpoints() {
        let total = Duration::from_millis(3000);
        assert_eq!(eased_progress(Duration::ZERO, total), 0.0);
        assert_eq!(eased_progress(total, total), 1.0);
        assert_eq!(eased_progress(Duration::from_secs(10), total), 1.0);
        assert_eq!(eased_progress(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_eased_progress_accelerates() {
        let total = Duration::from_millis(3000);
        let mut last = 0.0;
        let mut last_step = 0.0;
        for ms in (30..3000).step_by(30) {
            let elapsed = Duration::from_millis(ms);
            let progress = eased_progress(elapsed, total);
            let linear = ms as f64 / 3000.0;
            assert!(progress < linear);
            assert!(progress >= last);
            let step = progress - last;
            assert!(step >= last_step - 1e-12);
            last_step = step;
            last = progress;
        }
    }

    #[test]
    fn test_variation_stills_are_fixed() {
        let result = variation_stills((64, 36), 80).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.get(0).unwrap().label, "Variation 1");
        assert!(result.candidates.iter().all(|c| !c.is_video()));
        assert!(result.candidates.iter().all(|c| c.thumbnail.bytes.starts_with(&[0xFF, 0xD8])));

        let again = variation_stills((64, 36), 80).unwrap();
        assert_eq!(result, again);
    }

    #[test]
    fn test_wide_short_stills_keep_border_inside_canvas() {
        let result = variation_stills((2000, 8), 80).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.candidates.iter().all(|c| c.thumbnail.bytes.starts_with(&[0xFF, 0xD8])));
    }

    #[test]
    fn test_missing_demo_clip_still_yields_video_candidate() {
        let config = StudioConfig {
            chat_result: ChatResultKind::Video,
            demo_clip_path: std::env::temp_dir().join(format!("missing-{}.mp4", uuid::Uuid::new_v4())),
            fallback_width: 32,
            fallback_height: 18,
            ..StudioConfig::default()
        };
        let result = canned_result(&config).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.get(0).unwrap().is_video());
        assert!(!result.get(0).unwrap().thumbnail.bytes.is_empty());
    }
}
