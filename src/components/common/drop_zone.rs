use dioxus::prelude::*;
use dioxus::html::HasFileData;

use crate::constants::*;
use crate::core::media::MediaFile;

/// Files carried by a drop event, with the type the webview declared.
pub fn dropped_media(evt: &DragEvent) -> Vec<MediaFile> {
    evt.files()
        .into_iter()
        .map(|file| MediaFile::with_declared_type(file.path(), file.name(), file.content_type()))
        .collect()
}

/// Dashed drop target. Clicking it runs `on_pick`; dropping files runs `on_drop`.
#[component]
pub fn DropZone(
    title: String,
    hint: String,
    filled: bool,
    disabled: bool,
    on_pick: EventHandler<()>,
    on_drop: EventHandler<Vec<MediaFile>>,
    children: Element,
) -> Element {
    let mut hovering = use_signal(|| false);
    let border = if hovering() {
        ACCENT_BRIGHT
    } else if filled {
        ACCENT
    } else {
        BORDER_STRONG
    };
    let background = if hovering() || filled { ACCENT_SOFT } else { BG_ELEVATED };
    let cursor = if disabled { "default" } else { "pointer" };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; align-items: center; justify-content: center;
                gap: 8px; padding: 20px; min-height: 160px; box-sizing: border-box;
                border: 2px dashed {border}; border-radius: 12px;
                background-color: {background}; cursor: {cursor};
                transition: border-color 0.15s, background-color 0.15s;
            ",
            onclick: move |_| {
                if !disabled {
                    on_pick.call(());
                }
            },
            ondragover: move |e| {
                e.prevent_default();
                if !disabled {
                    hovering.set(true);
                }
            },
            ondragleave: move |_| hovering.set(false),
            ondrop: move |e| {
                e.prevent_default();
                hovering.set(false);
                if !disabled {
                    on_drop.call(dropped_media(&e));
                }
            },
            span { style: "font-size: 14px; font-weight: 600; color: {TEXT_PRIMARY};", "{title}" }
            span { style: "font-size: 11px; color: {TEXT_MUTED}; text-align: center;", "{hint}" }
            {children}
        }
    }
}
