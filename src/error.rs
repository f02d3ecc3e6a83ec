//! Error types shared by the media pipeline, handoff, and configuration layers.

use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Invalid file: expected {expected}, got {found}")]
    InvalidMediaType { expected: &'static str, found: String },

    #[error("Could not open video: {0}")]
    MediaOpen(String),

    #[error("Timed out reading video metadata")]
    MetadataTimedOut,

    #[error("Timed out seeking to {seconds:.2}s")]
    SeekTimedOut { seconds: f64 },

    #[error("Frame capture failed: {0}")]
    Capture(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Session handoff failed: {0}")]
    Handoff(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ffmpeg_next::Error> for StudioError {
    fn from(err: ffmpeg_next::Error) -> Self {
        StudioError::MediaOpen(err.to_string())
    }
}

impl From<image::ImageError> for StudioError {
    fn from(err: image::ImageError) -> Self {
        StudioError::Encode(err.to_string())
    }
}
