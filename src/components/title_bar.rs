use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(
    page_title: String,
    show_back: bool,
    on_back: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: {TITLE_BAR_HEIGHT}px; padding: 0 16px; flex-shrink: 0;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Promo Reel Studio" }
                if show_back {
                    button {
                        class: "collapse-btn",
                        style: "
                            background: transparent; border: none; color: {TEXT_PRIMARY};
                            font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                        ",
                        onclick: move |e| on_back.call(e),
                        "← Back"
                    }
                }
            }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "{page_title}" }
            div { style: "min-width: 120px;" }
        }
    }
}
