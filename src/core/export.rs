//! Fixed download artifacts.
//!
//! Neither download is computed from session content: the upload page hands
//! out a fixed promo video and the editor exports a fixed edited video. When
//! the configured file is missing, a small mock payload is written instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StudioConfig;
use crate::core::paths::resolve_resource_path;
use crate::error::StudioResult;

pub const PROMO_FILE_NAME: &str = "luxury-property-video.mp4";
pub const EDITED_FILE_NAME: &str = "edited-luxury-property-video.mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub default_file_name: &'static str,
    pub source: PathBuf,
    pub mock_payload: &'static [u8],
}

impl Artifact {
    pub fn promo_video(config: &StudioConfig) -> Self {
        Self {
            default_file_name: PROMO_FILE_NAME,
            source: resolve_resource_path(&config.output_video_path),
            mock_payload: b"Mock Video File",
        }
    }

    pub fn edited_video(config: &StudioConfig) -> Self {
        Self {
            default_file_name: EDITED_FILE_NAME,
            source: resolve_resource_path(&config.export_artifact_path),
            mock_payload: b"Mock Edited Video File",
        }
    }

    pub fn write_to(&self, destination: &Path) -> StudioResult<()> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if self.source.is_file() {
            fs::copy(&self.source, destination)?;
        } else {
            fs::write(destination, self.mock_payload)?;
        }
        Ok(())
    }

    /// Ask for a destination with a native save dialog and write there.
    pub fn save_with_dialog(&self) -> SaveOutcome {
        let Some(destination) = rfd::FileDialog::new()
            .set_title("Save Video")
            .set_file_name(self.default_file_name)
            .add_filter("Video", &["mp4"])
            .save_file()
        else {
            return SaveOutcome::Cancelled;
        };

        match self.write_to(&destination) {
            Ok(()) => {
                tracing::info!(path = %destination.display(), "saved {}", self.default_file_name);
                SaveOutcome::Saved(destination)
            }
            Err(err) => {
                tracing::error!("failed to save {}: {}", self.default_file_name, err);
                SaveOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("promo-export-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_source_writes_mock_payload() {
        let dir = temp_dir();
        let artifact = Artifact {
            default_file_name: PROMO_FILE_NAME,
            source: dir.join("does-not-exist.mp4"),
            mock_payload: b"Mock Video File",
        };
        let destination = dir.join("out").join(PROMO_FILE_NAME);
        artifact.write_to(&destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"Mock Video File");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_existing_source_is_copied() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("combined.mp4");
        fs::write(&source, b"real bytes").unwrap();
        let artifact = Artifact {
            default_file_name: EDITED_FILE_NAME,
            source,
            mock_payload: b"Mock Edited Video File",
        };
        let destination = dir.join(EDITED_FILE_NAME);
        artifact.write_to(&destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"real bytes");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_names_are_fixed() {
        let config = StudioConfig::default();
        assert_eq!(Artifact::promo_video(&config).default_file_name, "luxury-property-video.mp4");
        assert_eq!(
            Artifact::edited_video(&config).default_file_name,
            "edited-luxury-property-video.mp4"
        );
    }
}
