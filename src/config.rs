//! Studio configuration loaded from `studio.json`.
//!
//! Every field has a default, so a missing or partial file is fine. The file
//! location can be overridden with `PROMO_STUDIO_CONFIG`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::paths::resolve_resource_path;
use crate::error::{StudioError, StudioResult};

pub const CONFIG_ENV_VAR: &str = "PROMO_STUDIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "studio.json";

/// What the mocked assistant answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatResultKind {
    /// Four placeholder stills.
    Images,
    /// The configured demo clip.
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub frame_count: usize,
    pub seek_timeout_ms: u64,
    pub metadata_timeout_ms: u64,
    pub settle_delay_ms: u64,
    pub fallback_width: u32,
    pub fallback_height: u32,
    pub jpeg_quality: u8,
    pub generation_duration_ms: u64,
    pub generation_tick_ms: u64,
    pub completion_reveal_delay_ms: u64,
    pub chat_response_delay_ms: u64,
    pub export_delay_ms: u64,
    pub notification_ttl_ms: u64,
    pub chat_result: ChatResultKind,
    pub demo_clip_path: PathBuf,
    pub combined_output_path: Option<PathBuf>,
    pub output_video_path: PathBuf,
    pub export_artifact_path: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            frame_count: 6,
            seek_timeout_ms: 5_000,
            metadata_timeout_ms: 10_000,
            settle_delay_ms: 50,
            fallback_width: 640,
            fallback_height: 360,
            jpeg_quality: 85,
            generation_duration_ms: 3_000,
            generation_tick_ms: 30,
            completion_reveal_delay_ms: 500,
            chat_response_delay_ms: 2_000,
            export_delay_ms: 1_500,
            notification_ttl_ms: 3_000,
            chat_result: ChatResultKind::Images,
            demo_clip_path: PathBuf::from("assets/demo/variation.mp4"),
            combined_output_path: Some(PathBuf::from("assets/demo/combined.mp4")),
            output_video_path: PathBuf::from("assets/demo/luxury-property-video.mp4"),
            export_artifact_path: PathBuf::from("assets/demo/edited-luxury-property-video.mp4"),
        }
    }
}

impl StudioConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> StudioResult<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let config: Self = serde_json::from_str(&json)
            .map_err(|err| StudioError::Config(format!("{}: {}", path.display(), err)))?;
        Ok(config.normalized())
    }

    /// Resolve the config location from the environment and load it,
    /// falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let path = std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| resolve_resource_path(Path::new(DEFAULT_CONFIG_FILE)));
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded studio config");
                config
            }
            Err(err) => {
                tracing::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    /// Clamp values that would make the pipeline misbehave.
    fn normalized(mut self) -> Self {
        self.frame_count = self.frame_count.max(1);
        self.generation_tick_ms = self.generation_tick_ms.max(1);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.fallback_width = self.fallback_width.max(1);
        self.fallback_height = self.fallback_height.max(1);
        self
    }

    pub fn seek_timeout(&self) -> Duration {
        Duration::from_millis(self.seek_timeout_ms)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn generation_duration(&self) -> Duration {
        Duration::from_millis(self.generation_duration_ms)
    }

    pub fn generation_tick(&self) -> Duration {
        Duration::from_millis(self.generation_tick_ms)
    }

    pub fn completion_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.completion_reveal_delay_ms)
    }

    pub fn chat_response_delay(&self) -> Duration {
        Duration::from_millis(self.chat_response_delay_ms)
    }

    pub fn export_delay(&self) -> Duration {
        Duration::from_millis(self.export_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn fallback_dimensions(&self) -> (u32, u32) {
        (self.fallback_width, self.fallback_height)
    }

    /// Combined output path, resolved against the resource roots.
    pub fn combined_output(&self) -> Option<PathBuf> {
        self.combined_output_path
            .as_deref()
            .map(resolve_resource_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("promo-studio-missing-config.json");
        let _ = fs::remove_file(&path);
        let config = StudioConfig::load(&path).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.frame_count, 6);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = std::env::temp_dir().join(format!("promo-studio-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{ "frame_count": 0, "chat_result": "video", "jpeg_quality": 250 }"#).unwrap();
        let config = StudioConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.frame_count, 1);
        assert_eq!(config.chat_result, ChatResultKind::Video);
        assert_eq!(config.jpeg_quality, 100);
        assert_eq!(config.chat_response_delay_ms, 2_000);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("promo-studio-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "{ not json").unwrap();
        let result = StudioConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StudioError::Config(_))));
    }
}
