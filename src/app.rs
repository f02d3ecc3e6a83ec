//! Root application component
//!
//! Owns the state shared by both pages: the session handoff store, the toast
//! queue, and which page is showing. Each page builds its own state when it
//! mounts and drops it when navigated away from.

use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::editor::EditorPage;
use crate::components::notifications::{Notifier, Toasts};
use crate::components::upload::UploadPage;
use crate::components::TitleBar;
use crate::config::StudioConfig;
use crate::constants::*;
use crate::state::{NotificationQueue, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Upload,
    Editor,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Upload => "Upload",
            Page::Editor => "Frame Editor",
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| Rc::new(StudioConfig::load_or_default()));
    let mut page = use_signal(|| Page::Upload);
    let session = use_signal(SessionStore::default);
    let notifications = use_signal(NotificationQueue::default);
    let notifier = Notifier {
        queue: notifications,
        ttl: config.notification_ttl(),
    };
    let current = page();
    let page_title = current.title().to_string();

    rsx! {
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.6; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            button:disabled {{ opacity: 0.45; cursor: default !important; }}
            "#
        }

        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
            ",
            TitleBar {
                page_title,
                show_back: current == Page::Editor,
                on_back: move |_| {
                    tracing::info!("returning to upload page");
                    page.set(Page::Upload);
                },
            }
            {match current {
                Page::Upload => rsx! {
                    UploadPage {
                        config: config.clone(),
                        session,
                        notifier,
                        on_open_editor: move |_| {
                            tracing::info!("opening editor page");
                            page.set(Page::Editor);
                        },
                    }
                },
                Page::Editor => rsx! {
                    EditorPage {
                        config: config.clone(),
                        session,
                        notifier,
                    }
                },
            }}
            Toasts { queue: notifications }
        }
    }
}
