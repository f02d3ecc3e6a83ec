use dioxus::prelude::*;

use crate::constants::*;
use crate::state::Frame;

#[component]
pub fn FrameGrid(
    frames: Vec<Frame>,
    selected: Option<usize>,
    extracting: bool,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",
            div {
                style: "display: flex; align-items: baseline; justify-content: space-between;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_PRIMARY};", "Frames" }
                if extracting {
                    span { style: "font-size: 11px; color: {TEXT_MUTED};", "Extracting frames..." }
                } else {
                    span { style: "font-size: 11px; color: {TEXT_DIM};", "Select a frame to edit it" }
                }
            }
            if frames.is_empty() && !extracting {
                div {
                    style: "padding: 24px; text-align: center; font-size: 12px; color: {TEXT_DIM}; border: 1px dashed {BORDER_DEFAULT}; border-radius: 8px;",
                    "No frames extracted yet"
                }
            }
            div {
                style: "display: grid; grid-template-columns: repeat({FRAME_GRID_COLUMNS}, 1fr); gap: 12px;",
                for (index, frame) in frames.iter().enumerate() {
                    FrameTile {
                        key: "{frame.id}",
                        frame: frame.clone(),
                        index,
                        selected: selected == Some(index),
                        on_select,
                    }
                }
            }
        }
    }
}

#[component]
fn FrameTile(frame: Frame, index: usize, selected: bool, on_select: EventHandler<usize>) -> Element {
    let src = frame.image_data.to_data_url();
    let number = index + 1;
    let border = if selected { ACCENT } else { BORDER_DEFAULT };
    let shadow = if selected { format!("0 0 0 2px {ACCENT_SOFT}") } else { "none".to_string() };

    rsx! {
        div {
            style: "
                position: relative; cursor: pointer; overflow: hidden;
                border-radius: 8px; border: 2px solid {border}; box-shadow: {shadow};
                background-color: {BG_SURFACE};
            ",
            onclick: move |_| on_select.call(index),
            img {
                src: "{src}",
                style: "display: block; width: 100%; aspect-ratio: 16 / 9; object-fit: cover;",
            }
            div {
                style: "display: flex; align-items: center; justify-content: space-between; padding: 6px 8px;",
                span { style: "font-size: 11px; color: {TEXT_SECONDARY};", "Frame {number}" }
                span { style: "font-size: 11px; color: {TEXT_MUTED}; font-variant-numeric: tabular-nums;", "{frame.timestamp_label}" }
            }
            if frame.edited || frame.has_video_clip {
                div {
                    style: "position: absolute; top: 6px; left: 6px; display: flex; gap: 4px;",
                    if frame.edited {
                        span {
                            style: "font-size: 10px; padding: 2px 6px; border-radius: 999px; background-color: {ACCENT}; color: {TEXT_PRIMARY};",
                            "Edited"
                        }
                    }
                    if frame.has_video_clip {
                        span {
                            style: "font-size: 10px; padding: 2px 6px; border-radius: 999px; background-color: {ACCENT_CLIP}; color: {TEXT_PRIMARY};",
                            "Clip"
                        }
                    }
                }
            }
        }
    }
}
