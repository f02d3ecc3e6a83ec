use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::common::DropZone;
use crate::components::editor::{ChatPanel, FrameGrid, VideoPanel};
use crate::components::notifications::Notifier;
use crate::config::StudioConfig;
use crate::constants::*;
use crate::controllers::{Completion, EditorController, EditorHost};
use crate::core::export::{Artifact, SaveOutcome};
use crate::core::frame_extract::{extract_frames, ExtractionSettings};
use crate::core::generation::canned_result;
use crate::core::media::{LoadedVideo, MediaFile};
use crate::core::paths::handoff_dir;
use crate::core::scheduler::TaskScheduler;
use crate::core::video_decode::VideoDecodeWorker;
use crate::error::StudioError;
use crate::hotkeys::{handle_hotkey, HotkeyContext, HotkeyResult};
use crate::state::{CannedResult, EditorSessionState, Frame, Notice, SessionStore};

#[derive(Clone)]
struct DesktopEditorHost {
    notifier: Notifier,
    config: Rc<StudioConfig>,
    artifact: Artifact,
}

impl EditorHost for DesktopEditorHost {
    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn probe_video(&self, file: MediaFile, done: Completion<LoadedVideo>) {
        let timeout = self.config.metadata_timeout();
        spawn(async move {
            let path = file.path.clone();
            let probed = tokio::task::spawn_blocking(move || {
                VideoDecodeWorker::open(&path, timeout).map(|(_, metadata)| metadata)
            })
            .await
            .unwrap_or_else(|err| Err(StudioError::MediaOpen(err.to_string())));
            done(probed.map(|metadata| LoadedVideo::new(file, metadata)));
        });
    }

    fn extract_frames(&self, video: LoadedVideo, done: Completion<Vec<Frame>>) {
        let config = (*self.config).clone();
        spawn(async move {
            let dimensions = video.metadata.capture_dimensions(config.fallback_dimensions());
            let settings = ExtractionSettings::from_config(&config, dimensions);
            let duration = video.metadata.duration_seconds;
            let path = video.file.path.clone();
            tracing::info!(
                file = %video.file.file_name,
                duration,
                count = settings.count,
                "extracting frames"
            );
            let extracted = tokio::task::spawn_blocking(move || {
                let (mut worker, _) = VideoDecodeWorker::open(&path, config.metadata_timeout())?;
                extract_frames(&mut worker, duration, &settings)
            })
            .await
            .unwrap_or_else(|err| Err(StudioError::Capture(err.to_string())));
            done(extracted);
        });
    }

    fn generate_candidates(&self, done: Completion<CannedResult>) {
        let config = (*self.config).clone();
        spawn(async move {
            let result = tokio::task::spawn_blocking(move || canned_result(&config))
                .await
                .unwrap_or_else(|err| Err(StudioError::Encode(err.to_string())));
            done(result);
        });
    }

    fn save_export(&self) -> SaveOutcome {
        self.artifact.save_with_dialog()
    }

    fn pick_video(&self) -> Option<MediaFile> {
        rfd::FileDialog::new()
            .set_title("Open Video")
            .add_filter("Video", &["mp4", "mov", "webm", "mkv", "avi"])
            .pick_file()
            .map(MediaFile::from_path)
    }
}

type DesktopEditorController = EditorController<Signal<EditorSessionState>, TaskScheduler, DesktopEditorHost>;

#[component]
pub fn EditorPage(config: Rc<StudioConfig>, session: Signal<SessionStore>, notifier: Notifier) -> Element {
    let state = use_signal(|| EditorSessionState::new(config.combined_output()));
    let controller: DesktopEditorController = use_hook(|| {
        let host = DesktopEditorHost {
            notifier,
            config: config.clone(),
            artifact: Artifact::edited_video(&config),
        };
        EditorController::new(state, TaskScheduler, host, &config)
    });

    // Pick up the video handed over by the upload page, once.
    let handoff = controller.clone();
    use_effect(move || {
        let mut session = session;
        let stash = session.with_mut(|store| store.take_video_stash());
        handoff.load_stash(stash, &handoff_dir());
    });

    let snapshot = state.read().clone();
    let has_frames = !snapshot.frames.is_empty();

    let hotkeys = controller.clone();
    let on_keydown = move |e: KeyboardEvent| {
        let context = HotkeyContext {
            input_focused: false,
            chat_focused: false,
            has_frames,
        };
        let modifiers = e.modifiers();
        match handle_hotkey(
            &e.key(),
            modifiers.shift(),
            modifiers.ctrl(),
            modifiers.alt(),
            modifiers.meta(),
            &context,
        ) {
            HotkeyResult::Action(action) => {
                e.prevent_default();
                hotkeys.handle_hotkey(action);
            }
            HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
        }
    };

    let Some(video) = snapshot.loaded_video.clone() else {
        let pick = controller.clone();
        let drop = controller.clone();
        return rsx! {
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; background-color: {BG_BASE}; outline: none;",
                tabindex: "0",
                onkeydown: on_keydown,
                div {
                    style: "width: 480px;",
                    DropZone {
                        title: "Upload a video to edit".to_string(),
                        hint: "MP4, MOV or WebM. Click to browse or drop a file here.".to_string(),
                        filled: false,
                        disabled: false,
                        on_pick: move |_| pick.open_video(),
                        on_drop: move |files: Vec<MediaFile>| drop.drop_files(files),
                    }
                }
            }
        };
    };

    let change = controller.clone();
    let export = controller.clone();
    let select = controller.clone();
    let send = controller.clone();
    let choose = controller.clone();
    let apply = controller.clone();
    let hint = controller.clone();

    rsx! {
        div {
            style: "flex: 1; display: flex; min-height: 0; background-color: {BG_BASE}; outline: none;",
            tabindex: "0",
            onkeydown: on_keydown,
            div {
                style: "flex: 1; display: flex; flex-direction: column; gap: 16px; padding: 20px; overflow-y: auto; min-width: 0;",
                VideoPanel {
                    source: snapshot.player_source(),
                    file_name: video.file.file_name.clone(),
                    exporting: snapshot.exporting,
                    on_change: move |_| change.change_video(),
                    on_export: move |_| export.export_video(),
                }
                FrameGrid {
                    frames: snapshot.frames.clone(),
                    selected: snapshot.selected_frame_index,
                    extracting: snapshot.extracting,
                    on_select: move |index: usize| select.select_frame(index),
                }
            }
            ChatPanel {
                state,
                on_send: move |text: String| send.send_message(text),
                on_select_candidate: move |(request_id, index): (u64, usize)| choose.select_candidate(request_id, index),
                on_apply: move |_| apply.apply_to_frame(),
                on_pick_frame: move |_| hint.pick_frame_hint(),
            }
        }
    }
}
