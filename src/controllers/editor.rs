use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::config::StudioConfig;
use crate::controllers::StateCell;
use crate::core::export::SaveOutcome;
use crate::core::media::{first_dropped_video, LoadedVideo, MediaFile};
use crate::core::scheduler::Scheduler;
use crate::error::StudioResult;
use crate::hotkeys::HotkeyAction;
use crate::state::{
    CannedResult, EditorAction, EditorEffect, EditorSessionState, Frame, Notice, VideoStash,
};

pub type Completion<T> = Box<dyn FnOnce(StudioResult<T>) + 'static>;

/// What the editor page needs from its surroundings. The media calls are
/// asynchronous and report back through `done`.
pub trait EditorHost: Clone + 'static {
    fn notify(&self, notice: Notice);
    fn probe_video(&self, file: MediaFile, done: Completion<LoadedVideo>);
    fn extract_frames(&self, video: LoadedVideo, done: Completion<Vec<Frame>>);
    fn generate_candidates(&self, done: Completion<CannedResult>);
    /// Ask for a destination and write the edited video there.
    fn save_export(&self) -> SaveOutcome;
    /// Pick a video with a native dialog.
    fn pick_video(&self) -> Option<MediaFile>;
}

#[derive(Clone)]
pub struct EditorController<C, S, H> {
    state: C,
    scheduler: S,
    host: H,
    chat_delay: Duration,
    export_delay: Duration,
}

impl<C, S, H> EditorController<C, S, H>
where
    C: StateCell<EditorSessionState>,
    S: Scheduler + Clone + 'static,
    H: EditorHost,
{
    pub fn new(state: C, scheduler: S, host: H, config: &StudioConfig) -> Self {
        Self {
            state,
            scheduler,
            host,
            chat_delay: config.chat_response_delay(),
            export_delay: config.export_delay(),
        }
    }

    pub fn load_video(&self, file: MediaFile) {
        self.dispatch(EditorAction::LoadRequested(file));
    }

    pub fn open_video(&self) {
        if let Some(file) = self.host.pick_video() {
            self.load_video(file);
        }
    }

    pub fn drop_files(&self, files: Vec<MediaFile>) {
        match first_dropped_video(files) {
            Some(Ok(file)) => self.load_video(file),
            Some(Err(err)) => {
                tracing::debug!("rejected drop: {}", err);
                self.host.notify(Notice::error("Please drop a valid video file"));
            }
            None => {}
        }
    }

    /// Load a video handed over from the upload page.
    pub fn load_stash(&self, stash: Option<VideoStash>, cache_dir: &Path) {
        let Some(stash) = stash else {
            return;
        };
        match stash.materialize(cache_dir) {
            Ok(file) => {
                tracing::info!(file = %file.file_name, "loading handed-over video");
                self.load_video(file);
            }
            Err(err) => {
                tracing::warn!("handoff video unusable: {}", err);
                self.host
                    .notify(Notice::error(format!("Could not load the generated video: {}", err)));
            }
        }
    }

    pub fn change_video(&self) {
        self.dispatch(EditorAction::ChangeVideo);
    }

    pub fn select_frame(&self, index: usize) {
        self.dispatch(EditorAction::SelectFrame(index));
    }

    pub fn pick_frame_hint(&self) {
        self.dispatch(EditorAction::PickFrameHint);
    }

    pub fn send_message(&self, text: String) {
        self.dispatch(EditorAction::SendMessage(text));
    }

    pub fn select_candidate(&self, request_id: u64, index: usize) {
        self.dispatch(EditorAction::SelectCandidate { request_id, index });
    }

    pub fn apply_to_frame(&self) {
        self.dispatch(EditorAction::ApplyToFrame { at: Utc::now() });
    }

    pub fn export_video(&self) {
        self.dispatch(EditorAction::ExportVideo);
    }

    /// Global shortcuts. `SendMessage` is handled by the chat input itself.
    pub fn handle_hotkey(&self, action: HotkeyAction) {
        match action {
            HotkeyAction::ExportVideo => self.export_video(),
            HotkeyAction::OpenVideo => self.open_video(),
            HotkeyAction::SelectPreviousFrame => self.dispatch(EditorAction::SelectPreviousFrame),
            HotkeyAction::SelectNextFrame => self.dispatch(EditorAction::SelectNextFrame),
            HotkeyAction::SendMessage => {}
        }
    }

    pub fn dispatch(&self, action: EditorAction) {
        let effects = self.state.update(|state| state.handle(action));
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: EditorEffect) {
        match effect {
            EditorEffect::Notify(notice) => self.host.notify(notice),
            EditorEffect::ProbeVideo(file) => {
                let controller = self.clone();
                self.host.probe_video(
                    file,
                    Box::new(move |result| match result {
                        Ok(video) => controller.dispatch(EditorAction::VideoLoaded(video)),
                        Err(err) => controller.dispatch(EditorAction::VideoLoadFailed(err.to_string())),
                    }),
                );
            }
            EditorEffect::ExtractFrames(video) => {
                let video_id = video.id;
                let controller = self.clone();
                self.host.extract_frames(
                    video,
                    Box::new(move |result| match result {
                        Ok(frames) => controller.dispatch(EditorAction::FramesExtracted { video_id, frames }),
                        Err(err) => controller.dispatch(EditorAction::ExtractionFailed {
                            video_id,
                            error: err.to_string(),
                        }),
                    }),
                );
            }
            EditorEffect::GenerateCandidates { request_id } => {
                let controller = self.clone();
                self.scheduler.schedule_after(
                    self.chat_delay,
                    Box::new(move || {
                        let reply = controller.clone();
                        controller.host.generate_candidates(Box::new(move |result| match result {
                            Ok(result) => reply.dispatch(EditorAction::CandidatesReady { request_id, result }),
                            Err(err) => reply.dispatch(EditorAction::CandidatesFailed {
                                request_id,
                                error: err.to_string(),
                            }),
                        }));
                    }),
                );
            }
            EditorEffect::BeginExport => {
                let controller = self.clone();
                self.scheduler.schedule_after(
                    self.export_delay,
                    Box::new(move || {
                        let outcome = controller.host.save_export();
                        controller.dispatch(EditorAction::ExportFinished(outcome));
                    }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame_extract::{sample_timestamps, StillImage};
    use crate::core::media::VideoMetadata;
    use crate::core::scheduler::ManualScheduler;
    use crate::error::StudioError;
    use crate::state::{Candidate, CandidateKind, ChatTurn, NoticeLevel};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct Recorded {
        notices: Vec<Notice>,
        duration: f64,
        fail_extraction: bool,
        /// Hold extraction results until released, to simulate a slow capture.
        held_extraction: Option<Box<dyn FnOnce()>>,
        hold_extraction: bool,
        exports: usize,
    }

    #[derive(Clone)]
    struct FakeHost(Rc<RefCell<Recorded>>);

    impl FakeHost {
        fn new(duration: f64) -> Self {
            Self(Rc::new(RefCell::new(Recorded {
                notices: Vec::new(),
                duration,
                fail_extraction: false,
                held_extraction: None,
                hold_extraction: false,
                exports: 0,
            })))
        }

        fn messages(&self) -> Vec<String> {
            self.0.borrow().notices.iter().map(|n| n.message.clone()).collect()
        }

        fn release_extraction(&self) {
            let held = self.0.borrow_mut().held_extraction.take();
            if let Some(release) = held {
                release();
            }
        }
    }

    impl EditorHost for FakeHost {
        fn notify(&self, notice: Notice) {
            self.0.borrow_mut().notices.push(notice);
        }

        fn probe_video(&self, file: MediaFile, done: Completion<LoadedVideo>) {
            let duration = self.0.borrow().duration;
            if file.file_name.contains("corrupt") {
                done(Err(StudioError::MediaOpen("invalid data found".into())));
                return;
            }
            done(Ok(LoadedVideo::new(
                file,
                VideoMetadata {
                    duration_seconds: duration,
                    width: None,
                    height: None,
                },
            )));
        }

        fn extract_frames(&self, video: LoadedVideo, done: Completion<Vec<Frame>>) {
            let (fail, hold) = {
                let recorded = self.0.borrow();
                (recorded.fail_extraction, recorded.hold_extraction)
            };
            let result = if fail {
                Err(StudioError::SeekTimedOut { seconds: 12.86 })
            } else {
                Ok(sample_timestamps(video.metadata.duration_seconds, 6)
                    .into_iter()
                    .enumerate()
                    .map(|(index, t)| Frame::new(index, StillImage::jpeg(vec![index as u8]), t))
                    .collect())
            };
            if hold {
                self.0.borrow_mut().held_extraction = Some(Box::new(move || done(result)));
            } else {
                done(result);
            }
        }

        fn generate_candidates(&self, done: Completion<CannedResult>) {
            done(Ok(CannedResult {
                candidates: vec![Candidate {
                    label: "Generated clip".into(),
                    kind: CandidateKind::Video,
                    source_path: PathBuf::from("assets/demo/variation.mp4"),
                    thumbnail: StillImage::jpeg(vec![42]),
                }],
            }))
        }

        fn save_export(&self) -> SaveOutcome {
            self.0.borrow_mut().exports += 1;
            SaveOutcome::Saved(PathBuf::from("edited-luxury-property-video.mp4"))
        }

        fn pick_video(&self) -> Option<MediaFile> {
            Some(MediaFile::from_path("picked.mp4"))
        }
    }

    type State = Rc<RefCell<EditorSessionState>>;

    fn setup(duration: f64) -> (EditorController<State, ManualScheduler, FakeHost>, State, ManualScheduler, FakeHost) {
        let config = StudioConfig::default();
        let state = Rc::new(RefCell::new(EditorSessionState::new(config.combined_output())));
        let scheduler = ManualScheduler::new();
        let host = FakeHost::new(duration);
        let controller = EditorController::new(state.clone(), scheduler.clone(), host.clone(), &config);
        (controller, state, scheduler, host)
    }

    #[test]
    fn test_load_extracts_six_frames() {
        let (controller, state, _, host) = setup(90.0);
        controller.load_video(MediaFile::from_path("tour.mp4"));
        let state = state.borrow();
        assert!(state.loaded_video.is_some());
        assert_eq!(state.frames.len(), 6);
        assert_eq!(state.frames[0].timestamp_label, "00:12");
        assert!(host.messages().contains(&"Extracted 6 frames".to_string()));
    }

    #[test]
    fn test_probe_failure_notifies() {
        let (controller, state, _, host) = setup(90.0);
        controller.load_video(MediaFile::from_path("corrupt.mp4"));
        assert!(state.borrow().loaded_video.is_none());
        let notices = host.0.borrow().notices.clone();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_dropped_image_is_rejected() {
        let (controller, state, _, host) = setup(90.0);
        controller.drop_files(vec![MediaFile::from_path("front.jpg"), MediaFile::from_path("tour.mp4")]);
        assert!(state.borrow().loaded_video.is_none());
        assert_eq!(host.messages(), vec!["Please drop a valid video file".to_string()]);
    }

    #[test]
    fn test_extraction_failure_keeps_frames() {
        let (controller, state, _, host) = setup(90.0);
        controller.load_video(MediaFile::from_path("tour.mp4"));
        let before = state.borrow().frames.clone();

        host.0.borrow_mut().fail_extraction = true;
        controller.load_video(MediaFile::from_path("second.mp4"));
        assert_eq!(state.borrow().frames, before);
        assert!(host.messages().iter().any(|m| m.starts_with("Error extracting frames")));
    }

    #[test]
    fn test_extraction_finishing_after_change_is_dropped() {
        let (controller, state, _, host) = setup(90.0);
        host.0.borrow_mut().hold_extraction = true;
        controller.load_video(MediaFile::from_path("tour.mp4"));
        controller.change_video();
        host.release_extraction();
        assert!(state.borrow().frames.is_empty());
        assert!(state.borrow().loaded_video.is_none());
    }

    #[test]
    fn test_chat_reply_arrives_after_delay() {
        let (controller, state, scheduler, _) = setup(90.0);
        controller.load_video(MediaFile::from_path("tour.mp4"));
        controller.select_frame(1);
        controller.send_message("add a sunset".into());
        assert!(state.borrow().transcript.contains(&ChatTurn::Loading));

        scheduler.advance(Duration::from_millis(1999));
        assert!(state.borrow().candidates.is_none());
        scheduler.advance(Duration::from_millis(1));
        let request_id = state.borrow().current_request().unwrap();
        assert!(!state.borrow().transcript.contains(&ChatTurn::Loading));
        assert!(state.borrow().input_enabled());

        controller.select_candidate(request_id, 0);
        controller.apply_to_frame();
        let state = state.borrow();
        assert!(state.frames[1].edited);
        assert!(state.frames[1].has_video_clip);
        assert_eq!(state.inserted_clips.len(), 1);
        assert!(state.preview_override.is_some());
    }

    #[test]
    fn test_reply_after_change_video_is_dropped() {
        let (controller, state, scheduler, _) = setup(90.0);
        controller.load_video(MediaFile::from_path("tour.mp4"));
        controller.select_frame(0);
        controller.send_message("twilight".into());
        controller.change_video();
        scheduler.advance(Duration::from_secs(3));
        let state = state.borrow();
        assert!(state.candidates.is_none());
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_export_waits_then_saves() {
        let (controller, _, scheduler, host) = setup(90.0);
        controller.handle_hotkey(HotkeyAction::ExportVideo);
        assert_eq!(host.messages(), vec!["Exporting video... (Mock export)".to_string()]);
        scheduler.advance(Duration::from_millis(1499));
        assert_eq!(host.0.borrow().exports, 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(host.0.borrow().exports, 1);
        assert!(host.messages().contains(&"Video exported successfully!".to_string()));
    }

    #[test]
    fn test_arrow_hotkeys_walk_frames() {
        let (controller, state, _, _) = setup(90.0);
        controller.handle_hotkey(HotkeyAction::OpenVideo);
        controller.handle_hotkey(HotkeyAction::SelectNextFrame);
        controller.handle_hotkey(HotkeyAction::SelectNextFrame);
        assert_eq!(state.borrow().selected_frame_index, Some(1));
        controller.handle_hotkey(HotkeyAction::SelectPreviousFrame);
        assert_eq!(state.borrow().selected_frame_index, Some(0));
    }

    #[test]
    fn test_stash_is_materialized_and_loaded() {
        let (controller, state, _, _) = setup(30.0);
        let dir = std::env::temp_dir().join(format!("promo-handoff-{}", uuid::Uuid::new_v4()));
        let stash = VideoStash::from_bytes(b"fake mp4", "video/mp4", "luxury-property-video.mp4");
        controller.load_stash(Some(stash), &dir);
        let file = state.borrow().loaded_video.as_ref().unwrap().file.clone();
        assert!(file.path.starts_with(&dir));
        assert_eq!(std::fs::read(&file.path).unwrap(), b"fake mp4");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_stash_notifies() {
        let (controller, state, _, host) = setup(30.0);
        let stash = VideoStash {
            data_url: "not a data url".into(),
            media_type: "video/mp4".into(),
            file_name: "x.mp4".into(),
        };
        controller.load_stash(Some(stash), &std::env::temp_dir());
        assert!(state.borrow().loaded_video.is_none());
        assert_eq!(host.0.borrow().notices[0].level, NoticeLevel::Error);
    }
}
