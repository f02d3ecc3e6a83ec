//! Editor page state: extracted frames, selection, chat, and applied edits.
//!
//! Every user action goes through [`EditorSessionState::handle`], which
//! mutates the state and returns the side effects to run.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::export::SaveOutcome;
use crate::core::frame_extract::StillImage;
use crate::core::media::{LoadedVideo, MediaFile};
use crate::state::{CannedResult, ChatTurn, Notice};
use crate::utils::format_timestamp;

/// One still captured from the loaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: usize,
    pub image_data: StillImage,
    pub timestamp_label: String,
    pub timestamp_seconds: f64,
    pub edited: bool,
    pub has_video_clip: bool,
}

impl Frame {
    pub fn new(id: usize, image_data: StillImage, timestamp_seconds: f64) -> Self {
        Self {
            id,
            image_data,
            timestamp_label: format_timestamp(timestamp_seconds),
            timestamp_seconds,
            edited: false,
            has_video_clip: false,
        }
    }
}

/// Log entry for a generated clip queued at a frame position.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedClip {
    pub clip_path: PathBuf,
    pub frame_index: usize,
    pub timestamp_label: String,
    pub inserted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// A file was picked or dropped for the player.
    LoadRequested(MediaFile),
    VideoLoaded(LoadedVideo),
    VideoLoadFailed(String),
    ChangeVideo,
    FramesExtracted {
        video_id: Uuid,
        frames: Vec<Frame>,
    },
    ExtractionFailed {
        video_id: Uuid,
        error: String,
    },
    SelectFrame(usize),
    SelectPreviousFrame,
    SelectNextFrame,
    PickFrameHint,
    SendMessage(String),
    CandidatesReady {
        request_id: u64,
        result: CannedResult,
    },
    CandidatesFailed {
        request_id: u64,
        error: String,
    },
    SelectCandidate {
        request_id: u64,
        index: usize,
    },
    ApplyToFrame {
        at: DateTime<Utc>,
    },
    ExportVideo,
    ExportFinished(SaveOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEffect {
    Notify(Notice),
    /// Probe metadata for a file that passed the media type check.
    ProbeVideo(MediaFile),
    ExtractFrames(LoadedVideo),
    /// Produce the canned result for `request_id` after the simulated delay.
    GenerateCandidates { request_id: u64 },
    /// Save the export artifact after the simulated delay.
    BeginExport,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorSessionState {
    pub frames: Vec<Frame>,
    pub selected_frame_index: Option<usize>,
    pub pending_variation: Option<usize>,
    pub candidates: Option<(u64, CannedResult)>,
    pub inserted_clips: Vec<InsertedClip>,
    pub loaded_video: Option<LoadedVideo>,
    pub transcript: Vec<ChatTurn>,
    pub awaiting_response: bool,
    pub extracting: bool,
    pub exporting: bool,
    pub preview_override: Option<PathBuf>,
    pub combined_output: Option<PathBuf>,
    request_seq: u64,
}

impl EditorSessionState {
    /// `combined_output` is what the player switches to once a generated
    /// clip has been applied.
    pub fn new(combined_output: Option<PathBuf>) -> Self {
        Self {
            combined_output,
            ..Self::default()
        }
    }

    pub fn selected_frame(&self) -> Option<&Frame> {
        self.selected_frame_index.and_then(|index| self.frames.get(index))
    }

    pub fn input_enabled(&self) -> bool {
        self.selected_frame().is_some() && !self.awaiting_response
    }

    pub fn can_apply(&self) -> bool {
        self.selected_frame().is_some() && self.armed_candidate().is_some()
    }

    /// Path the player should show: the combined output once swapped in,
    /// the loaded video otherwise.
    pub fn player_source(&self) -> Option<PathBuf> {
        self.preview_override
            .clone()
            .or_else(|| self.loaded_video.as_ref().map(|video| video.file.path.clone()))
    }

    pub fn current_request(&self) -> Option<u64> {
        self.candidates.as_ref().map(|(request_id, _)| *request_id)
    }

    fn armed_candidate(&self) -> Option<&crate::state::Candidate> {
        let (_, result) = self.candidates.as_ref()?;
        result.get(self.pending_variation?)
    }

    fn next_request_id(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    pub fn handle(&mut self, action: EditorAction) -> Vec<EditorEffect> {
        match action {
            EditorAction::LoadRequested(file) => match file.require_video() {
                Ok(file) => {
                    tracing::info!(file = %file.file_name, "loading video");
                    vec![EditorEffect::ProbeVideo(file)]
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    vec![EditorEffect::Notify(Notice::error("Please select a valid video file"))]
                }
            },
            EditorAction::VideoLoaded(video) => {
                self.discard_chat();
                self.transcript = match self.selected_frame_index {
                    Some(frame_index) => vec![ChatTurn::FrameIndicator { frame_index }],
                    None => Vec::new(),
                };
                self.preview_override = None;
                self.extracting = true;
                self.loaded_video = Some(video.clone());
                vec![
                    EditorEffect::Notify(Notice::info(format!("Loaded {}", video.file.file_name))),
                    EditorEffect::ExtractFrames(video),
                ]
            }
            EditorAction::VideoLoadFailed(error) => {
                tracing::warn!("video failed to load: {}", error);
                vec![EditorEffect::Notify(Notice::error(format!(
                    "Error loading video: {}",
                    error
                )))]
            }
            EditorAction::ChangeVideo => {
                self.loaded_video = None;
                self.frames.clear();
                self.selected_frame_index = None;
                self.extracting = false;
                self.preview_override = None;
                self.discard_chat();
                self.transcript.clear();
                Vec::new()
            }
            EditorAction::FramesExtracted { video_id, frames } => {
                if !self.is_current_video(video_id) {
                    return Vec::new();
                }
                self.extracting = false;
                let count = frames.len();
                self.frames = frames;
                if self
                    .selected_frame_index
                    .map(|index| index >= self.frames.len())
                    .unwrap_or(false)
                {
                    self.selected_frame_index = None;
                    self.discard_chat();
                    self.transcript.clear();
                }
                tracing::info!(count, "frames extracted");
                vec![EditorEffect::Notify(Notice::success(format!(
                    "Extracted {} frames",
                    count
                )))]
            }
            EditorAction::ExtractionFailed { video_id, error } => {
                if !self.is_current_video(video_id) {
                    return Vec::new();
                }
                self.extracting = false;
                tracing::warn!("frame extraction failed: {}", error);
                vec![EditorEffect::Notify(Notice::error(format!(
                    "Error extracting frames: {}",
                    error
                )))]
            }
            EditorAction::SelectFrame(index) => self.select_frame(index),
            EditorAction::SelectPreviousFrame => match self.selected_frame_index {
                Some(index) if index > 0 => self.select_frame(index - 1),
                None if !self.frames.is_empty() => self.select_frame(0),
                _ => Vec::new(),
            },
            EditorAction::SelectNextFrame => match self.selected_frame_index {
                Some(index) => self.select_frame(index + 1),
                None => self.select_frame(0),
            },
            EditorAction::PickFrameHint => {
                if self.selected_frame_index.is_some() {
                    vec![EditorEffect::Notify(Notice::info(
                        "Select a different frame from the grid below",
                    ))]
                } else {
                    Vec::new()
                }
            }
            EditorAction::SendMessage(text) => {
                let text = text.trim();
                if text.is_empty() || !self.input_enabled() {
                    return Vec::new();
                }
                let request_id = self.next_request_id();
                self.transcript.push(ChatTurn::User {
                    text: text.to_string(),
                });
                self.transcript.push(ChatTurn::Loading);
                self.awaiting_response = true;
                vec![EditorEffect::GenerateCandidates { request_id }]
            }
            EditorAction::CandidatesReady { request_id, result } => {
                if !self.is_awaiting(request_id) {
                    return Vec::new();
                }
                self.finish_loading();
                self.transcript.push(ChatTurn::Assistant {
                    request_id,
                    text: "Here are a few options based on your request:".to_string(),
                    result: result.clone(),
                });
                self.candidates = Some((request_id, result));
                self.pending_variation = None;
                Vec::new()
            }
            EditorAction::CandidatesFailed { request_id, error } => {
                if !self.is_awaiting(request_id) {
                    return Vec::new();
                }
                self.finish_loading();
                self.transcript.push(ChatTurn::Note {
                    text: "Generation failed, please try again.".to_string(),
                });
                vec![EditorEffect::Notify(Notice::error(error))]
            }
            EditorAction::SelectCandidate { request_id, index } => {
                let in_range = match &self.candidates {
                    Some((current, result)) => *current == request_id && index < result.len(),
                    None => false,
                };
                if in_range {
                    self.pending_variation = Some(index);
                }
                Vec::new()
            }
            EditorAction::ApplyToFrame { at } => self.apply_to_frame(at),
            EditorAction::ExportVideo => {
                if self.exporting {
                    return Vec::new();
                }
                self.exporting = true;
                vec![
                    EditorEffect::Notify(Notice::info("Exporting video... (Mock export)")),
                    EditorEffect::BeginExport,
                ]
            }
            EditorAction::ExportFinished(outcome) => {
                self.exporting = false;
                match outcome {
                    SaveOutcome::Saved(_) => {
                        vec![EditorEffect::Notify(Notice::success("Video exported successfully!"))]
                    }
                    SaveOutcome::Cancelled => Vec::new(),
                    SaveOutcome::Failed(reason) => vec![EditorEffect::Notify(Notice::error(
                        format!("Export failed: {}", reason),
                    ))],
                }
            }
        }
    }

    fn select_frame(&mut self, index: usize) -> Vec<EditorEffect> {
        if index >= self.frames.len() {
            return Vec::new();
        }
        self.selected_frame_index = Some(index);
        self.discard_chat();
        self.transcript = vec![ChatTurn::FrameIndicator { frame_index: index }];
        vec![EditorEffect::Notify(Notice::info(format!(
            "Frame {} selected",
            index + 1
        )))]
    }

    fn apply_to_frame(&mut self, at: DateTime<Utc>) -> Vec<EditorEffect> {
        let Some(frame_index) = self.selected_frame_index.filter(|i| *i < self.frames.len()) else {
            return Vec::new();
        };
        let Some(candidate) = self.armed_candidate().cloned() else {
            return vec![EditorEffect::Notify(Notice::info(
                "No variation ready to apply yet",
            ))];
        };

        let frame = &mut self.frames[frame_index];
        frame.image_data = candidate.thumbnail.clone();
        frame.edited = true;
        if candidate.is_video() {
            frame.has_video_clip = true;
        }
        let timestamp_label = frame.timestamp_label.clone();

        self.inserted_clips.push(InsertedClip {
            clip_path: candidate.source_path.clone(),
            frame_index,
            timestamp_label,
            inserted_at: at,
        });
        if candidate.is_video() {
            if let Some(combined) = self.combined_output.clone() {
                self.preview_override = Some(combined);
            }
        }
        self.pending_variation = None;
        tracing::info!(
            frame_index,
            clip = %candidate.source_path.display(),
            inserted = self.inserted_clips.len(),
            "applied candidate"
        );

        vec![EditorEffect::Notify(Notice::success("Frame updated successfully!"))]
    }

    fn is_current_video(&self, video_id: Uuid) -> bool {
        self.loaded_video
            .as_ref()
            .map(|video| video.id == video_id)
            .unwrap_or(false)
    }

    fn is_awaiting(&self, request_id: u64) -> bool {
        self.awaiting_response && request_id == self.request_seq
    }

    fn finish_loading(&mut self) {
        self.transcript.retain(|turn| *turn != ChatTurn::Loading);
        self.awaiting_response = false;
    }

    /// Drop any in-flight request and offered candidates. A response that
    /// arrives afterwards no longer matches `request_seq` and is ignored.
    fn discard_chat(&mut self) {
        self.request_seq += 1;
        self.awaiting_response = false;
        self.candidates = None;
        self.pending_variation = None;
    }
}
