//! Media files as the pages see them: a path, a display name, and a declared
//! media type. Validation looks at the declared type only.

use std::path::{Path, PathBuf};

use crate::error::{StudioError, StudioResult};

/// A file supplied by the native picker or by drag-and-drop.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: String,
}

impl MediaFile {
    /// Build from a path, guessing the media type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = display_name(&path);
        let media_type = guess_media_type(&path);
        Self {
            path,
            file_name,
            media_type,
        }
    }

    /// Build from a dropped file. A declared type from the webview wins over
    /// the extension guess; an empty declaration counts as absent.
    pub fn with_declared_type(
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        declared: Option<String>,
    ) -> Self {
        let path = path.into();
        let media_type = declared
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| guess_media_type(&path));
        Self {
            path,
            file_name: file_name.into(),
            media_type,
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }

    pub fn require_video(self) -> StudioResult<Self> {
        if self.is_video() {
            Ok(self)
        } else {
            Err(StudioError::InvalidMediaType {
                expected: "video/*",
                found: self.media_type,
            })
        }
    }
}

/// Drop rule for image slots: only the first file counts, and only if it is
/// an image. Anything else yields `None`.
pub fn first_dropped_image(files: Vec<MediaFile>) -> Option<MediaFile> {
    files.into_iter().next().filter(MediaFile::is_image)
}

/// Drop rule for the player: the first file, which must be a video.
pub fn first_dropped_video(files: Vec<MediaFile>) -> Option<StudioResult<MediaFile>> {
    files.into_iter().next().map(MediaFile::require_video)
}

pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// File extension to use when materializing a payload of `media_type`.
pub fn extension_for_media_type(media_type: &str) -> &'static str {
    match media_type {
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        "video/x-matroska" => "mkv",
        "video/x-msvideo" => "avi",
        _ => mime_guess::get_mime_extensions_str(media_type)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Stream facts needed by extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub duration_seconds: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl VideoMetadata {
    /// Native pixel size, or `fallback` when the stream did not report one.
    pub fn capture_dimensions(&self, fallback: (u32, u32)) -> (u32, u32) {
        match (self.width, self.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => (width, height),
            _ => fallback,
        }
    }
}

/// A video that opened successfully and is bound to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedVideo {
    pub id: uuid::Uuid,
    pub file: MediaFile,
    pub metadata: VideoMetadata,
}

impl LoadedVideo {
    pub fn new(file: MediaFile, metadata: VideoMetadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            file,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_from_extension() {
        assert!(MediaFile::from_path("tour/front.jpg").is_image());
        assert!(MediaFile::from_path("tour/walkthrough.mp4").is_video());
        assert!(!MediaFile::from_path("notes.txt").is_video());
    }

    #[test]
    fn test_declared_type_wins() {
        let file = MediaFile::with_declared_type("upload.bin", "upload.bin", Some("image/png".into()));
        assert!(file.is_image());
        let file = MediaFile::with_declared_type("pool.webp", "pool.webp", Some("".into()));
        assert!(file.is_image());
    }

    #[test]
    fn test_only_first_dropped_image_counts() {
        let files = vec![
            MediaFile::from_path("a.txt"),
            MediaFile::from_path("b.png"),
        ];
        assert!(first_dropped_image(files).is_none());

        let files = vec![MediaFile::from_path("b.png"), MediaFile::from_path("c.png")];
        assert_eq!(first_dropped_image(files).unwrap().file_name, "b.png");
    }

    #[test]
    fn test_require_video_rejects_images() {
        let err = MediaFile::from_path("front.jpg").require_video().unwrap_err();
        assert!(matches!(err, StudioError::InvalidMediaType { .. }));
        assert!(first_dropped_video(Vec::new()).is_none());
    }

    #[test]
    fn test_capture_dimensions_fallback() {
        let meta = VideoMetadata { duration_seconds: 10.0, width: None, height: Some(720) };
        assert_eq!(meta.capture_dimensions((640, 360)), (640, 360));
        let meta = VideoMetadata { duration_seconds: 10.0, width: Some(1920), height: Some(1080) };
        assert_eq!(meta.capture_dimensions((640, 360)), (1920, 1080));
    }

    #[test]
    fn test_extension_for_media_type() {
        assert_eq!(extension_for_media_type("video/mp4"), "mp4");
        assert_eq!(extension_for_media_type("video/webm"), "webm");
    }
}
