use dioxus::prelude::*;

use crate::constants::*;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{CannedResult, ChatTurn, EditorSessionState};

#[component]
pub fn ChatPanel(
    state: Signal<EditorSessionState>,
    on_send: EventHandler<String>,
    on_select_candidate: EventHandler<(u64, usize)>,
    on_apply: EventHandler<()>,
    on_pick_frame: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(String::new);
    let session = state.read();
    let input_enabled = session.input_enabled();
    let current_request = session.current_request();
    let armed = session.pending_variation;
    let apply_opacity = if session.can_apply() { 1.0 } else { 0.5 };
    let placeholder = if input_enabled {
        "Describe how to change this frame..."
    } else {
        "Select a frame first"
    };

    let mut submit = move || {
        let text = draft();
        if !text.trim().is_empty() && input_enabled {
            on_send.call(text);
            draft.set(String::new());
        }
    };

    let on_keydown = move |e: KeyboardEvent| {
        let context = HotkeyContext {
            input_focused: true,
            chat_focused: true,
            has_frames: true,
        };
        let modifiers = e.modifiers();
        let result = handle_hotkey(
            &e.key(),
            modifiers.shift(),
            modifiers.ctrl(),
            modifiers.alt(),
            modifiers.meta(),
            &context,
        );
        e.stop_propagation();
        if result == HotkeyResult::Action(HotkeyAction::SendMessage) {
            e.prevent_default();
            submit();
        }
    };

    rsx! {
        div {
            style: "
                width: {CHAT_PANEL_WIDTH}px; flex-shrink: 0; display: flex; flex-direction: column;
                background-color: {BG_SURFACE}; border-left: 1px solid {BORDER_DEFAULT};
            ",
            div {
                style: "padding: 14px 16px; border-bottom: 1px solid {BORDER_DEFAULT}; font-size: 13px; font-weight: 600; color: {TEXT_PRIMARY};",
                "AI Frame Editor"
            }
            div {
                style: "flex: 1; overflow-y: auto; padding: 16px; display: flex; flex-direction: column; gap: 12px;",
                if session.transcript.is_empty() {
                    div {
                        style: "margin: auto; text-align: center; font-size: 12px; color: {TEXT_DIM}; max-width: 220px;",
                        "Select a frame from the grid to start editing it with AI"
                    }
                }
                for (turn_index, turn) in session.transcript.iter().enumerate() {
                    {match turn {
                        ChatTurn::FrameIndicator { frame_index } => {
                            let frame = session.frames.get(*frame_index);
                            let src = frame.map(|frame| frame.image_data.to_data_url()).unwrap_or_default();
                            let label = frame.map(|frame| frame.timestamp_label.clone()).unwrap_or_default();
                            let number = frame_index + 1;
                            rsx! {
                                div {
                                    key: "{turn_index}",
                                    style: "display: flex; gap: 10px; align-items: center; padding: 10px; border-radius: 8px; background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};",
                                    img { src: "{src}", style: "width: 72px; aspect-ratio: 16 / 9; object-fit: cover; border-radius: 4px;" }
                                    div {
                                        style: "display: flex; flex-direction: column; gap: 2px; flex: 1;",
                                        span { style: "font-size: 12px; color: {TEXT_PRIMARY};", "Editing Frame {number}" }
                                        span { style: "font-size: 11px; color: {TEXT_MUTED};", "{label}" }
                                    }
                                    button {
                                        style: "background: transparent; border: none; color: {ACCENT_BRIGHT}; font-size: 11px; cursor: pointer;",
                                        onclick: move |_| on_pick_frame.call(()),
                                        "Pick another frame"
                                    }
                                }
                            }
                        }
                        ChatTurn::User { text } => rsx! {
                            div {
                                key: "{turn_index}",
                                style: "align-self: flex-end; max-width: 80%; padding: 8px 12px; border-radius: 10px 10px 2px 10px; background-color: {ACCENT_DEEP}; color: {TEXT_PRIMARY}; font-size: 12px;",
                                "{text}"
                            }
                        },
                        ChatTurn::Loading => rsx! {
                            div {
                                key: "{turn_index}",
                                style: "align-self: flex-start; font-size: 12px; color: {TEXT_MUTED}; font-style: italic;",
                                "Generating variations..."
                            }
                        },
                        ChatTurn::Note { text } => rsx! {
                            div {
                                key: "{turn_index}",
                                style: "align-self: flex-start; font-size: 12px; color: {TEXT_SECONDARY};",
                                "{text}"
                            }
                        },
                        ChatTurn::Assistant { request_id, text, result } => {
                            let live = current_request == Some(*request_id);
                            let armed_here = if live { armed } else { None };
                            rsx! {
                                div {
                                    key: "{turn_index}",
                                    style: "display: flex; flex-direction: column; gap: 10px; align-self: stretch;",
                                    span { style: "font-size: 12px; color: {TEXT_SECONDARY};", "{text}" }
                                    if !result.is_empty() {
                                        CandidateCards {
                                            request_id: *request_id,
                                            result: result.clone(),
                                            armed: armed_here,
                                            enabled: live,
                                            on_select: on_select_candidate,
                                        }
                                    }
                                    if live {
                                        button {
                                            style: "
                                                padding: 8px 14px; border-radius: 6px; border: none;
                                                background-color: {ACCENT}; color: {TEXT_PRIMARY};
                                                font-size: 12px; font-weight: 600; cursor: pointer;
                                                opacity: {apply_opacity};
                                            ",
                                            onclick: move |_| on_apply.call(()),
                                            "Apply to Frame"
                                        }
                                    }
                                }
                            }
                        }
                    }}
                }
            }
            div {
                style: "padding: 12px 16px; border-top: 1px solid {BORDER_DEFAULT}; display: flex; gap: 8px; align-items: flex-end;",
                textarea {
                    style: "
                        flex: 1; resize: none; height: 56px; box-sizing: border-box;
                        padding: 8px 10px; border-radius: 6px; font-size: 12px; font-family: inherit;
                        background-color: {BG_ELEVATED}; color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_STRONG}; outline: none; user-select: text;
                    ",
                    placeholder: placeholder,
                    disabled: !input_enabled,
                    value: "{draft}",
                    oninput: move |e| draft.set(e.value()),
                    onkeydown: on_keydown,
                }
                button {
                    style: "
                        padding: 8px 14px; border-radius: 6px; border: none; cursor: pointer;
                        background-color: {ACCENT}; color: {TEXT_PRIMARY}; font-size: 12px; font-weight: 600;
                    ",
                    disabled: !input_enabled,
                    onclick: move |_| submit(),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn CandidateCards(
    request_id: u64,
    result: CannedResult,
    armed: Option<usize>,
    enabled: bool,
    on_select: EventHandler<(u64, usize)>,
) -> Element {
    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(2, 1fr); gap: 8px;",
            for (index, candidate) in result.candidates.iter().enumerate() {
                {
                    let src = candidate.thumbnail.to_data_url();
                    let border = if armed == Some(index) { ACCENT_BRIGHT } else { BORDER_DEFAULT };
                    let cursor = if enabled { "pointer" } else { "default" };
                    let is_video = candidate.is_video();
                    rsx! {
                        div {
                            key: "{index}",
                            style: "position: relative; border: 2px solid {border}; border-radius: 6px; overflow: hidden; cursor: {cursor}; background-color: {BG_ELEVATED};",
                            onclick: move |_| {
                                if enabled {
                                    on_select.call((request_id, index));
                                }
                            },
                            img { src: "{src}", style: "display: block; width: 100%; aspect-ratio: 16 / 9; object-fit: cover;" }
                            if is_video {
                                span {
                                    style: "position: absolute; top: 4px; right: 4px; font-size: 10px; padding: 1px 6px; border-radius: 999px; background-color: {ACCENT_CLIP}; color: {TEXT_PRIMARY};",
                                    "▶ Clip"
                                }
                            }
                            div { style: "padding: 4px 6px; font-size: 11px; color: {TEXT_SECONDARY};", "{candidate.label}" }
                        }
                    }
                }
            }
        }
    }
}
