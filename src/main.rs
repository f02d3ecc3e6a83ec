//! Promo Reel Studio
//!
//! Desktop demo that turns three property photos into a (mock) promo reel and
//! lets the user touch up individual frames through a mocked AI chat.

mod app;
mod components;
mod config;
mod constants;
mod controllers;
mod core;
mod error;
mod hotkeys;
mod state;
mod utils;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Promo Reel Studio");

    // Configure the window
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Promo Reel Studio")
                .with_inner_size(LogicalSize::new(1280.0, 820.0))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    // Launch the Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
