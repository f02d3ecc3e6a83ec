use std::path::PathBuf;
use std::time::Duration;

use crate::config::StudioConfig;
use crate::controllers::StateCell;
use crate::core::export::SaveOutcome;
use crate::core::media::{guess_media_type, MediaFile};
use crate::core::paths::resolve_resource_path;
use crate::core::scheduler::Scheduler;
use crate::state::{
    HandoffEnvelope, Notice, UploadAction, UploadEffect, UploadSessionState, UploadSlot,
    VideoStash,
};

pub const PULSE_DURATION: Duration = Duration::from_secs(2);

/// What the upload page needs from its surroundings.
pub trait UploadHost: Clone + 'static {
    fn notify(&self, notice: Notice);
    /// Ask for a destination and write the promo video there.
    fn save_download(&self) -> SaveOutcome;
    /// Store the handoff and switch to the editor page.
    fn open_editor(&self, envelope: HandoffEnvelope);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadTimings {
    pub generation: Duration,
    pub tick: Duration,
    pub reveal_delay: Duration,
}

impl UploadTimings {
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            generation: config.generation_duration(),
            tick: config.generation_tick().max(Duration::from_millis(1)),
            reveal_delay: config.completion_reveal_delay(),
        }
    }
}

#[derive(Clone)]
pub struct UploadController<C, S, H> {
    state: C,
    scheduler: S,
    host: H,
    timings: UploadTimings,
    output_video: PathBuf,
}

impl<C, S, H> UploadController<C, S, H>
where
    C: StateCell<UploadSessionState>,
    S: Scheduler + Clone + 'static,
    H: UploadHost,
{
    pub fn new(state: C, scheduler: S, host: H, config: &StudioConfig) -> Self {
        Self {
            state,
            scheduler,
            host,
            timings: UploadTimings::from_config(config),
            output_video: resolve_resource_path(&config.output_video_path),
        }
    }

    pub fn attach_file(&self, slot: UploadSlot, file: Option<MediaFile>) {
        self.dispatch(UploadAction::AttachFile { slot, file });
    }

    pub fn drop_files(&self, slot: UploadSlot, files: Vec<MediaFile>) {
        self.dispatch(UploadAction::DropFiles { slot, files });
    }

    pub fn start_generation(&self) {
        self.dispatch(UploadAction::StartGeneration);
    }

    pub fn download(&self) {
        self.dispatch(UploadAction::Download);
    }

    pub fn go_to_editor(&self) {
        self.dispatch(UploadAction::GoToEditor);
    }

    /// Jump straight to the completion panel when a previous visit already
    /// generated the video.
    pub fn restore_from(&self, envelope: Option<HandoffEnvelope>) {
        if let Some(envelope) = envelope.filter(|envelope| envelope.video_generated) {
            tracing::info!(slots = envelope.uploaded_slots.len(), "restoring completed upload session");
            self.dispatch(UploadAction::Restore {
                slots: envelope.uploaded_slots,
            });
        }
    }

    pub fn dispatch(&self, action: UploadAction) {
        let effects = self.state.update(|state| state.handle(action));
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: UploadEffect) {
        match effect {
            UploadEffect::Notify(notice) => self.host.notify(notice),
            UploadEffect::PulseGenerateButton => {
                self.dispatch_after(PULSE_DURATION, UploadAction::PulseEnded)
            }
            UploadEffect::ContinueGeneration { elapsed } => {
                let UploadTimings { generation, tick, .. } = self.timings;
                let next = (elapsed + tick).min(generation);
                self.dispatch_after(
                    tick,
                    UploadAction::GenerationTick {
                        elapsed: next,
                        total: generation,
                    },
                );
            }
            UploadEffect::ScheduleCompletionReveal => {
                self.dispatch_after(self.timings.reveal_delay, UploadAction::RevealCompletion)
            }
            UploadEffect::SaveDownload => {
                let outcome = self.host.save_download();
                self.dispatch(UploadAction::DownloadFinished(outcome));
            }
            UploadEffect::NavigateToEditor { slots } => {
                let envelope = HandoffEnvelope::generated(slots, self.stash_output_video());
                self.host.open_editor(envelope);
            }
        }
    }

    fn stash_output_video(&self) -> Option<VideoStash> {
        if !self.output_video.is_file() {
            return None;
        }
        let media_type = guess_media_type(&self.output_video);
        match VideoStash::from_file(&self.output_video, &media_type) {
            Ok(stash) => Some(stash),
            Err(err) => {
                tracing::warn!(path = %self.output_video.display(), "could not stash output video: {}", err);
                None
            }
        }
    }

    fn dispatch_after(&self, delay: Duration, action: UploadAction) {
        let controller = self.clone();
        self.scheduler
            .schedule_after(delay, Box::new(move || controller.dispatch(action)));
    }
}
