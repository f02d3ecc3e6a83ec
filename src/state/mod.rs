//! State management module
//!
//! Plain data and pure transitions for both pages:
//! - Upload: image slots and the mocked generation run
//! - Editor: frames, selection, chat, and applied edits
//! - Chat: transcript turns and canned candidates
//! - Handoff: session storage shared between the pages
//! - Notifications: toast queue

mod chat;
mod editor;
mod handoff;
mod notifications;
mod upload;

pub use chat::*;
pub use editor::*;
pub use handoff::*;
pub use notifications::*;
pub use upload::*;
