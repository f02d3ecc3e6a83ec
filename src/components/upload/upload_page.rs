use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::common::DropZone;
use crate::components::notifications::Notifier;
use crate::components::upload::CompletionPanel;
use crate::config::StudioConfig;
use crate::constants::*;
use crate::controllers::{UploadController, UploadHost};
use crate::core::export::{Artifact, SaveOutcome};
use crate::core::media::MediaFile;
use crate::core::scheduler::TaskScheduler;
use crate::state::{HandoffEnvelope, Notice, SessionStore, UploadPhase, UploadSessionState, UploadSlot};

#[derive(Clone)]
struct DesktopUploadHost {
    notifier: Notifier,
    session: Signal<SessionStore>,
    artifact: Artifact,
    on_open_editor: EventHandler<()>,
}

impl UploadHost for DesktopUploadHost {
    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn save_download(&self) -> SaveOutcome {
        self.artifact.save_with_dialog()
    }

    fn open_editor(&self, envelope: HandoffEnvelope) {
        let mut session = self.session;
        if let Err(err) = session.write().write_envelope(&envelope) {
            tracing::error!("failed to write handoff: {}", err);
            self.notifier.notify(Notice::error(err.to_string()));
            return;
        }
        tracing::info!(
            slots = envelope.uploaded_slots.len(),
            with_video = envelope.video.is_some(),
            "handing off to editor"
        );
        self.on_open_editor.call(());
    }
}

type DesktopUploadController = UploadController<Signal<UploadSessionState>, TaskScheduler, DesktopUploadHost>;

fn pick_image() -> Option<MediaFile> {
    rfd::FileDialog::new()
        .set_title("Choose Image")
        .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif", "bmp"])
        .pick_file()
        .map(MediaFile::from_path)
}

#[component]
pub fn UploadPage(
    config: Rc<StudioConfig>,
    session: Signal<SessionStore>,
    notifier: Notifier,
    on_open_editor: EventHandler<()>,
) -> Element {
    let state = use_signal(UploadSessionState::default);
    let controller: DesktopUploadController = use_hook(|| {
        let host = DesktopUploadHost {
            notifier,
            session,
            artifact: Artifact::promo_video(&config),
            on_open_editor,
        };
        UploadController::new(state, TaskScheduler, host, &config)
    });

    // Coming back from the editor restores the finished session.
    let restore = controller.clone();
    use_effect(move || {
        let envelope = session.peek().read_envelope();
        restore.restore_from(envelope);
    });

    let snapshot = state.read().clone();
    let percent = snapshot.progress_percent();
    let locked = snapshot.phase != UploadPhase::Collecting;
    let can_generate = snapshot.can_generate();
    let button_label = snapshot.button_label();
    let generate_bg = if can_generate || snapshot.phase != UploadPhase::Collecting {
        ACCENT
    } else {
        BG_HOVER
    };
    let generate_glow = if snapshot.pulse_generate {
        format!("0 0 0 4px {ACCENT_SOFT}, 0 0 24px {ACCENT}")
    } else {
        "none".to_string()
    };
    let progress_caption = match snapshot.phase {
        UploadPhase::Collecting => format!("{} of 3 images uploaded", snapshot.uploaded_slots.len()),
        _ => "Rendering your property video".to_string(),
    };
    let start = controller.clone();
    let completion = controller.clone();
    let completion_edit = controller.clone();

    rsx! {
        div {
            style: "
                flex: 1; overflow-y: auto; display: flex; justify-content: center;
                background-color: {BG_BASE}; padding: 40px 24px;
            ",
            div {
                style: "width: 100%; max-width: 880px; display: flex; flex-direction: column; gap: 28px;",
                div {
                    style: "display: flex; flex-direction: column; gap: 6px;",
                    h1 { style: "margin: 0; font-size: 24px; color: {TEXT_PRIMARY};", "Create a luxury property video" }
                    p {
                        style: "margin: 0; font-size: 13px; color: {TEXT_MUTED};",
                        "Upload one image for each part of the property, then generate your promo reel."
                    }
                }

                div {
                    style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px;",
                    for slot in UploadSlot::ALL {
                        {
                            let file_name = snapshot.file_name(slot).map(str::to_string);
                            let pick = controller.clone();
                            let drop = controller.clone();
                            rsx! {
                                DropZone {
                                    key: "{slot:?}",
                                    title: slot.title().to_string(),
                                    hint: slot.hint().to_string(),
                                    filled: file_name.is_some(),
                                    disabled: locked,
                                    on_pick: move |_| pick.attach_file(slot, pick_image()),
                                    on_drop: move |files: Vec<MediaFile>| drop.drop_files(slot, files),
                                    {match file_name {
                                        Some(name) => rsx! {
                                            span { style: "font-size: 11px; color: {ACCENT_BRIGHT};", "✓ {name}" }
                                        },
                                        None => rsx! {
                                            span { style: "font-size: 11px; color: {TEXT_DIM};", "Click or drop an image" }
                                        },
                                    }}
                                }
                            }
                        }
                    }
                }

                div {
                    style: "display: flex; flex-direction: column; gap: 8px;",
                    div {
                        style: "display: flex; justify-content: space-between; font-size: 12px; color: {TEXT_SECONDARY};",
                        span { "{progress_caption}" }
                        span { "{percent}%" }
                    }
                    div {
                        style: "height: 6px; border-radius: 3px; background-color: {BG_HOVER}; overflow: hidden;",
                        div {
                            style: "height: 100%; width: {percent}%; background-color: {ACCENT};",
                        }
                    }
                }

                if snapshot.phase == UploadPhase::Complete {
                    CompletionPanel {
                        on_download: move |_| completion.download(),
                        on_edit: move |_| completion_edit.go_to_editor(),
                    }
                } else {
                    button {
                        style: "
                            align-self: center; min-width: 220px; padding: 12px 24px;
                            border: none; border-radius: 8px; font-size: 14px; font-weight: 600;
                            background-color: {generate_bg}; color: {TEXT_PRIMARY};
                            box-shadow: {generate_glow}; transition: box-shadow 0.3s;
                            cursor: pointer;
                        ",
                        disabled: !can_generate,
                        onclick: move |_| start.start_generation(),
                        "{button_label}"
                    }
                }
            }
        }
    }
}
