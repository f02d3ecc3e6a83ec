//! Session-scoped handoff between the upload page and the editor page.
//!
//! The store is a string-valued key/value map living as long as the app
//! window. The only key in use holds a versioned JSON envelope.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::core::media::{extension_for_media_type, MediaFile};
use crate::error::{StudioError, StudioResult};
use crate::state::UploadSlot;

pub const HANDOFF_KEY: &str = "handoff.v1";
pub const HANDOFF_VERSION: u32 = 1;

/// A video carried over as a data URL, loaded once by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStash {
    pub data_url: String,
    pub media_type: String,
    pub file_name: String,
}

impl VideoStash {
    pub fn from_bytes(bytes: &[u8], media_type: &str, file_name: &str) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", media_type, BASE64.encode(bytes)),
            media_type: media_type.to_string(),
            file_name: file_name.to_string(),
        }
    }

    pub fn from_file(path: &Path, media_type: &str) -> StudioResult<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "handoff".to_string());
        Ok(Self::from_bytes(&bytes, media_type, &file_name))
    }

    /// Payload bytes of the data URL.
    pub fn decode(&self) -> StudioResult<Vec<u8>> {
        let rest = self
            .data_url
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::Handoff("payload is not a data URL".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::Handoff("data URL has no payload".to_string()))?;
        if !header.ends_with(";base64") {
            return Err(StudioError::Handoff("data URL is not base64 encoded".to_string()));
        }
        BASE64
            .decode(payload)
            .map_err(|err| StudioError::Handoff(err.to_string()))
    }

    /// Write the payload into `dir` and describe it as a loadable file.
    /// Earlier handoffs in `dir` are removed first, so it holds one video.
    pub fn materialize(&self, dir: &Path) -> StudioResult<MediaFile> {
        let bytes = self.decode()?;
        fs::create_dir_all(dir)?;
        clear_previous_handoffs(dir)?;
        let stem = Path::new(&self.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "handoff".to_string());
        let path = dir.join(format!(
            "{}-{}.{}",
            stem,
            uuid::Uuid::new_v4(),
            extension_for_media_type(&self.media_type)
        ));
        fs::write(&path, bytes)?;
        Ok(MediaFile::with_declared_type(
            path,
            self.file_name.clone(),
            Some(self.media_type.clone()),
        ))
    }
}

fn clear_previous_handoffs(dir: &Path) -> StudioResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), "could not remove old handoff: {}", err);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffEnvelope {
    pub version: u32,
    pub video_generated: bool,
    pub uploaded_slots: Vec<UploadSlot>,
    #[serde(default)]
    pub video: Option<VideoStash>,
}

impl HandoffEnvelope {
    pub fn generated(uploaded_slots: Vec<UploadSlot>, video: Option<VideoStash>) -> Self {
        Self {
            version: HANDOFF_VERSION,
            video_generated: true,
            uploaded_slots,
            video,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Current envelope. Malformed or foreign-version entries read as absent.
    pub fn read_envelope(&self) -> Option<HandoffEnvelope> {
        let json = self.get(HANDOFF_KEY)?;
        match serde_json::from_str::<HandoffEnvelope>(json) {
            Ok(envelope) if envelope.version == HANDOFF_VERSION => Some(envelope),
            Ok(envelope) => {
                tracing::warn!(version = envelope.version, "ignoring handoff envelope");
                None
            }
            Err(err) => {
                tracing::warn!("malformed handoff envelope: {}", err);
                None
            }
        }
    }

    pub fn write_envelope(&mut self, envelope: &HandoffEnvelope) -> StudioResult<()> {
        let json = serde_json::to_string(envelope)
            .map_err(|err| StudioError::Handoff(err.to_string()))?;
        self.set(HANDOFF_KEY, json);
        Ok(())
    }

    /// Remove and return the stashed video. The rest of the envelope stays.
    pub fn take_video_stash(&mut self) -> Option<VideoStash> {
        let mut envelope = self.read_envelope()?;
        let stash = envelope.video.take()?;
        if let Err(err) = self.write_envelope(&envelope) {
            tracing::warn!("could not rewrite handoff envelope: {}", err);
            self.remove(HANDOFF_KEY);
        }
        Some(stash)
    }
}
