use dioxus::prelude::*;
use std::path::PathBuf;

use crate::constants::*;
use crate::utils::get_local_file_url;

#[component]
pub fn VideoPanel(
    source: Option<PathBuf>,
    file_name: String,
    exporting: bool,
    on_change: EventHandler<MouseEvent>,
    on_export: EventHandler<MouseEvent>,
) -> Element {
    let url = source.as_deref().map(get_local_file_url);
    let export_label = if exporting { "Exporting..." } else { "Export Video" };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 12px; padding: 16px;
                background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT}; border-radius: 12px;
            ",
            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 12px;",
                span {
                    style: "font-size: 13px; color: {TEXT_SECONDARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{file_name}"
                }
                div {
                    style: "display: flex; gap: 8px;",
                    button {
                        style: "
                            padding: 6px 14px; border-radius: 6px; cursor: pointer;
                            background-color: transparent; color: {TEXT_PRIMARY};
                            border: 1px solid {BORDER_STRONG}; font-size: 12px;
                        ",
                        onclick: move |e| on_change.call(e),
                        "Change Video"
                    }
                    button {
                        style: "
                            padding: 6px 14px; border-radius: 6px; border: none; cursor: pointer;
                            background-color: {ACCENT}; color: {TEXT_PRIMARY}; font-size: 12px; font-weight: 600;
                        ",
                        disabled: exporting,
                        onclick: move |e| on_export.call(e),
                        "{export_label}"
                    }
                }
            }
            if let Some(url) = url {
                video {
                    // Keyed on the source so swapping in the combined output reloads the player.
                    key: "{url}",
                    src: "{url}",
                    controls: true,
                    style: "width: 100%; max-height: 420px; border-radius: 8px; background-color: {BG_DEEPEST};",
                }
            }
        }
    }
}
