//! Upload page state: three image slots and the mocked generation run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::core::export::SaveOutcome;
use crate::core::generation::eased_progress;
use crate::core::media::{first_dropped_image, MediaFile};
use crate::state::Notice;

pub const SLOT_COUNT: usize = 3;

/// Identifier of an image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    Exterior,
    Interior,
    Amenities,
}

impl UploadSlot {
    pub const ALL: [UploadSlot; SLOT_COUNT] = [
        UploadSlot::Exterior,
        UploadSlot::Interior,
        UploadSlot::Amenities,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UploadSlot::Exterior => "Exterior",
            UploadSlot::Interior => "Interior",
            UploadSlot::Amenities => "Amenities",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            UploadSlot::Exterior => "Facade, garden, or drone shot",
            UploadSlot::Interior => "Living room, kitchen, or suite",
            UploadSlot::Amenities => "Pool, gym, or rooftop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Waiting for images.
    Collecting,
    /// Progress animation running.
    Generating,
    /// Animation reached 100%; completion panel not shown yet.
    Finished,
    /// Completion panel with download and edit actions.
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction {
    AttachFile {
        slot: UploadSlot,
        file: Option<MediaFile>,
    },
    DropFiles {
        slot: UploadSlot,
        files: Vec<MediaFile>,
    },
    PulseEnded,
    StartGeneration,
    GenerationTick {
        elapsed: Duration,
        total: Duration,
    },
    RevealCompletion,
    Download,
    DownloadFinished(SaveOutcome),
    GoToEditor,
    /// Re-enter the completed state after coming back from the editor.
    Restore {
        slots: Vec<UploadSlot>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEffect {
    Notify(Notice),
    /// Highlight the generate button for a moment.
    PulseGenerateButton,
    /// Schedule the next animation tick.
    ContinueGeneration { elapsed: Duration },
    /// Schedule the completion panel.
    ScheduleCompletionReveal,
    SaveDownload,
    NavigateToEditor { slots: Vec<UploadSlot> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadSessionState {
    pub uploaded_slots: BTreeSet<UploadSlot>,
    pub slot_file_names: BTreeMap<UploadSlot, String>,
    pub is_generating: bool,
    pub generation_progress: f64,
    pub phase: UploadPhase,
    pub pulse_generate: bool,
}

impl Default for UploadSessionState {
    fn default() -> Self {
        Self {
            uploaded_slots: BTreeSet::new(),
            slot_file_names: BTreeMap::new(),
            is_generating: false,
            generation_progress: 0.0,
            phase: UploadPhase::Collecting,
            pulse_generate: false,
        }
    }
}

impl UploadSessionState {
    /// Fraction of slots filled, in [0, 1].
    pub fn progress_fraction(&self) -> f64 {
        (self.uploaded_slots.len() as f64 / SLOT_COUNT as f64).clamp(0.0, 1.0)
    }

    /// Percentage shown in the progress bar: slot progress while collecting,
    /// animation progress afterwards.
    pub fn progress_percent(&self) -> u32 {
        let fraction = match self.phase {
            UploadPhase::Collecting => self.progress_fraction(),
            _ => self.generation_progress,
        };
        (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn can_generate(&self) -> bool {
        self.uploaded_slots.len() == SLOT_COUNT && !self.is_generating
    }

    pub fn file_name(&self, slot: UploadSlot) -> Option<&str> {
        self.slot_file_names.get(&slot).map(String::as_str)
    }

    pub fn button_label(&self) -> &'static str {
        match self.phase {
            UploadPhase::Collecting => "Generate Video",
            UploadPhase::Generating => "Generating...",
            UploadPhase::Finished | UploadPhase::Complete => "Generation Complete!",
        }
    }

    pub fn handle(&mut self, action: UploadAction) -> Vec<UploadEffect> {
        match action {
            UploadAction::AttachFile { slot, file } => match file {
                Some(file) => self.attach(slot, file),
                None => Vec::new(),
            },
            UploadAction::DropFiles { slot, files } => match first_dropped_image(files) {
                Some(file) => self.attach(slot, file),
                None => Vec::new(),
            },
            UploadAction::PulseEnded => {
                self.pulse_generate = false;
                Vec::new()
            }
            UploadAction::StartGeneration => {
                if !self.can_generate() || self.phase != UploadPhase::Collecting {
                    return Vec::new();
                }
                tracing::info!("starting mock generation");
                self.is_generating = true;
                self.generation_progress = 0.0;
                self.phase = UploadPhase::Generating;
                vec![UploadEffect::ContinueGeneration {
                    elapsed: Duration::ZERO,
                }]
            }
            UploadAction::GenerationTick { elapsed, total } => {
                if self.phase != UploadPhase::Generating {
                    return Vec::new();
                }
                let progress = eased_progress(elapsed, total);
                self.generation_progress = self.generation_progress.max(progress);
                if progress >= 1.0 {
                    self.generation_progress = 1.0;
                    self.phase = UploadPhase::Finished;
                    tracing::info!("mock generation finished");
                    vec![UploadEffect::ScheduleCompletionReveal]
                } else {
                    vec![UploadEffect::ContinueGeneration { elapsed }]
                }
            }
            UploadAction::RevealCompletion => {
                if self.phase == UploadPhase::Finished {
                    self.phase = UploadPhase::Complete;
                }
                Vec::new()
            }
            UploadAction::Download => {
                if self.phase != UploadPhase::Complete {
                    return Vec::new();
                }
                vec![
                    UploadEffect::Notify(Notice::info("Video download started! (Mock download)")),
                    UploadEffect::SaveDownload,
                ]
            }
            UploadAction::DownloadFinished(outcome) => match outcome {
                SaveOutcome::Saved(_) | SaveOutcome::Cancelled => Vec::new(),
                SaveOutcome::Failed(reason) => {
                    vec![UploadEffect::Notify(Notice::error(format!("Download failed: {}", reason)))]
                }
            },
            UploadAction::GoToEditor => {
                if self.phase != UploadPhase::Complete {
                    return Vec::new();
                }
                vec![UploadEffect::NavigateToEditor {
                    slots: self.uploaded_slots.iter().copied().collect(),
                }]
            }
            UploadAction::Restore { slots } => {
                for slot in slots {
                    self.uploaded_slots.insert(slot);
                    self.slot_file_names
                        .entry(slot)
                        .or_insert_with(|| "image.jpg".to_string());
                }
                self.is_generating = true;
                self.generation_progress = 1.0;
                self.phase = UploadPhase::Complete;
                Vec::new()
            }
        }
    }

    fn attach(&mut self, slot: UploadSlot, file: MediaFile) -> Vec<UploadEffect> {
        if self.phase != UploadPhase::Collecting {
            return Vec::new();
        }
        let was_ready = self.uploaded_slots.len() == SLOT_COUNT;
        self.slot_file_names.insert(slot, file.file_name);
        self.uploaded_slots.insert(slot);
        tracing::debug!(?slot, filled = self.uploaded_slots.len(), "image attached");

        if !was_ready && self.uploaded_slots.len() == SLOT_COUNT {
            self.pulse_generate = true;
            vec![UploadEffect::PulseGenerateButton]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> Option<MediaFile> {
        Some(MediaFile::from_path(name))
    }

    fn filled(slots: &[UploadSlot]) -> UploadSessionState {
        let mut state = UploadSessionState::default();
        for slot in slots {
            state.handle(UploadAction::AttachFile {
                slot: *slot,
                file: image("photo.jpg"),
            });
        }
        state
    }

    #[test]
    fn test_absent_file_is_ignored() {
        let mut state = UploadSessionState::default();
        let effects = state.handle(UploadAction::AttachFile {
            slot: UploadSlot::Exterior,
            file: None,
        });
        assert!(effects.is_empty());
        assert!(state.uploaded_slots.is_empty());
    }

    #[test]
    fn test_progress_is_monotonic_and_reaches_one_at_three() {
        let mut state = UploadSessionState::default();
        let mut last = state.progress_fraction();
        for (index, slot) in UploadSlot::ALL.iter().enumerate() {
            state.handle(UploadAction::AttachFile {
                slot: *slot,
                file: image("photo.jpg"),
            });
            let now = state.progress_fraction();
            assert!(now >= last);
            if index < 2 {
                assert!(now < 1.0);
            }
            last = now;
        }
        assert_eq!(state.progress_fraction(), 1.0);

        // Re-attaching a slot does not overshoot.
        state.handle(UploadAction::AttachFile {
            slot: UploadSlot::Exterior,
            file: image("other.jpg"),
        });
        assert_eq!(state.progress_fraction(), 1.0);
        assert_eq!(state.file_name(UploadSlot::Exterior), Some("other.jpg"));
    }

    #[test]
    fn test_two_slots_keep_generate_disabled() {
        let mut state = filled(&[UploadSlot::Exterior, UploadSlot::Interior]);
        assert!(!state.can_generate());
        assert_eq!(state.progress_percent(), 67);
        assert!(state.handle(UploadAction::StartGeneration).is_empty());
        assert_eq!(state.phase, UploadPhase::Collecting);

        let effects = state.handle(UploadAction::AttachFile {
            slot: UploadSlot::Amenities,
            file: image("pool.png"),
        });
        assert_eq!(effects, vec![UploadEffect::PulseGenerateButton]);
        assert!(state.can_generate());
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn test_drop_uses_first_file_only_when_image() {
        let mut state = UploadSessionState::default();
        state.handle(UploadAction::DropFiles {
            slot: UploadSlot::Interior,
            files: vec![MediaFile::from_path("notes.txt"), MediaFile::from_path("a.png")],
        });
        assert!(state.uploaded_slots.is_empty());

        state.handle(UploadAction::DropFiles {
            slot: UploadSlot::Interior,
            files: vec![MediaFile::from_path("kitchen.webp"), MediaFile::from_path("a.png")],
        });
        assert_eq!(state.file_name(UploadSlot::Interior), Some("kitchen.webp"));
    }

    #[test]
    fn test_generation_is_not_reentrant() {
        let mut state = filled(&UploadSlot::ALL);
        let effects = state.handle(UploadAction::StartGeneration);
        assert_eq!(
            effects,
            vec![UploadEffect::ContinueGeneration { elapsed: Duration::ZERO }]
        );
        assert!(state.is_generating);
        assert!(state.handle(UploadAction::StartGeneration).is_empty());
    }

    #[test]
    fn test_generation_ticks_to_completion() {
        let mut state = filled(&UploadSlot::ALL);
        state.handle(UploadAction::StartGeneration);
        let total = Duration::from_millis(3000);

        let effects = state.handle(UploadAction::GenerationTick {
            elapsed: Duration::from_millis(1500),
            total,
        });
        assert_eq!(
            effects,
            vec![UploadEffect::ContinueGeneration { elapsed: Duration::from_millis(1500) }]
        );
        assert_eq!(state.progress_percent(), 25);

        let effects = state.handle(UploadAction::GenerationTick { elapsed: total, total });
        assert_eq!(effects, vec![UploadEffect::ScheduleCompletionReveal]);
        assert_eq!(state.phase, UploadPhase::Finished);
        assert_eq!(state.button_label(), "Generation Complete!");

        state.handle(UploadAction::RevealCompletion);
        assert_eq!(state.phase, UploadPhase::Complete);
    }

    #[test]
    fn test_go_to_editor_requires_completion() {
        let mut state = filled(&UploadSlot::ALL);
        assert!(state.handle(UploadAction::GoToEditor).is_empty());
        assert!(state.handle(UploadAction::Download).is_empty());

        state.handle(UploadAction::Restore {
            slots: UploadSlot::ALL.to_vec(),
        });
        let effects = state.handle(UploadAction::GoToEditor);
        assert_eq!(
            effects,
            vec![UploadEffect::NavigateToEditor { slots: UploadSlot::ALL.to_vec() }]
        );
    }

    #[test]
    fn test_restore_marks_slots_with_placeholder_names() {
        let mut state = UploadSessionState::default();
        state.handle(UploadAction::Restore {
            slots: vec![UploadSlot::Exterior, UploadSlot::Amenities],
        });
        assert_eq!(state.phase, UploadPhase::Complete);
        assert_eq!(state.file_name(UploadSlot::Exterior), Some("image.jpg"));
        assert!(state.file_name(UploadSlot::Interior).is_none());
        assert!(!state.can_generate());
    }

    #[test]
    fn test_failed_download_notifies() {
        let mut state = UploadSessionState::default();
        let effects = state.handle(UploadAction::DownloadFinished(SaveOutcome::Failed("disk full".into())));
        assert!(matches!(effects.as_slice(), [UploadEffect::Notify(notice)] if notice.message.contains("disk full")));
        assert!(state
            .handle(UploadAction::DownloadFinished(SaveOutcome::Cancelled))
            .is_empty());
    }
}
