//! UI components grouped by page.
pub mod common;
pub mod editor;
pub mod notifications;
pub mod upload;

mod title_bar;

pub use title_bar::TitleBar;
