use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn CompletionPanel(on_download: EventHandler<MouseEvent>, on_edit: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; align-items: center; gap: 16px;
                padding: 28px; border-radius: 12px;
                background-color: {BG_ELEVATED}; border: 1px solid {ACCENT_DEEP};
            ",
            span { style: "font-size: 28px; color: {ACCENT_BRIGHT};", "✓" }
            h2 { style: "margin: 0; font-size: 18px; color: {TEXT_PRIMARY};", "Your video is ready" }
            p {
                style: "margin: 0; font-size: 12px; color: {TEXT_MUTED}; text-align: center;",
                "Download the promo reel as is, or open it in the editor to refine individual frames."
            }
            div {
                style: "display: flex; gap: 12px;",
                button {
                    style: "
                        padding: 10px 20px; border-radius: 8px; border: none; cursor: pointer;
                        background-color: {ACCENT}; color: {TEXT_PRIMARY}; font-size: 13px; font-weight: 600;
                    ",
                    onclick: move |e| on_download.call(e),
                    "Download Video"
                }
                button {
                    style: "
                        padding: 10px 20px; border-radius: 8px; cursor: pointer;
                        background-color: transparent; color: {TEXT_PRIMARY};
                        border: 1px solid {BORDER_STRONG}; font-size: 13px;
                    ",
                    onclick: move |e| on_edit.call(e),
                    "Edit Frames"
                }
            }
        }
    }
}
