//! Hotkey system
//!
//! Centralized hotkey management for the editor page.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines which hotkeys are active based on page state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions
//!
//! # Adding New Hotkeys
//!
//! 1. Add a variant to `HotkeyAction`
//! 2. Add the key binding in `handle_hotkey()`
//! 3. Handle the action in `EditorController::handle_hotkey`

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Submit the chat input.
    SendMessage,
    /// Start the mock export.
    ExportVideo,
    /// Open a video with the native picker.
    OpenVideo,
    SelectPreviousFrame,
    SelectNextFrame,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether an input field has focus (suppresses global hotkeys)
    pub input_focused: bool,
    /// Whether the focused input is the chat box
    pub chat_focused: bool,
    /// Whether any frames are available to walk through
    pub has_frames: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// # Arguments
/// * `key` - The key that was pressed
/// * `modifiers` - Modifier keys held (shift, ctrl, alt, meta)
/// * `context` - Current page context
pub fn handle_hotkey(
    key: &Key,
    shift: bool,
    ctrl: bool,
    _alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    // Enter submits the chat box; Shift+Enter is left to the textarea.
    if context.chat_focused && *key == Key::Enter && !shift {
        return HotkeyResult::Action(HotkeyAction::SendMessage);
    }

    if context.input_focused || context.chat_focused {
        return HotkeyResult::Suppressed;
    }

    match key {
        Key::Character(c) if (ctrl || meta) && c.eq_ignore_ascii_case("e") => {
            return HotkeyResult::Action(HotkeyAction::ExportVideo);
        }
        Key::Character(c) if (ctrl || meta) && c.eq_ignore_ascii_case("o") => {
            return HotkeyResult::Action(HotkeyAction::OpenVideo);
        }
        _ => {}
    }

    if context.has_frames {
        match key {
            Key::ArrowLeft => return HotkeyResult::Action(HotkeyAction::SelectPreviousFrame),
            Key::ArrowRight => return HotkeyResult::Action(HotkeyAction::SelectNextFrame),
            _ => {}
        }
    }

    HotkeyResult::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_e_exports() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("e".to_string()), false, true, false, false, &ctx);
        assert_eq!(result, HotkeyResult::Action(HotkeyAction::ExportVideo));
        let result = handle_hotkey(&Key::Character("E".to_string()), false, false, false, true, &ctx);
        assert_eq!(result, HotkeyResult::Action(HotkeyAction::ExportVideo));
    }

    #[test]
    fn test_ctrl_o_opens_video() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("o".to_string()), false, true, false, false, &ctx);
        assert_eq!(result, HotkeyResult::Action(HotkeyAction::OpenVideo));
    }

    #[test]
    fn test_plain_letters_do_nothing() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&Key::Character("e".to_string()), false, false, false, false, &ctx);
        assert_eq!(result, HotkeyResult::NoMatch);
    }

    #[test]
    fn test_arrows_need_frames() {
        let ctx = HotkeyContext::default();
        assert_eq!(
            handle_hotkey(&Key::ArrowLeft, false, false, false, false, &ctx),
            HotkeyResult::NoMatch
        );
        let ctx = HotkeyContext {
            has_frames: true,
            ..Default::default()
        };
        assert_eq!(
            handle_hotkey(&Key::ArrowLeft, false, false, false, false, &ctx),
            HotkeyResult::Action(HotkeyAction::SelectPreviousFrame)
        );
        assert_eq!(
            handle_hotkey(&Key::ArrowRight, false, false, false, false, &ctx),
            HotkeyResult::Action(HotkeyAction::SelectNextFrame)
        );
    }

    #[test]
    fn test_enter_in_chat_sends() {
        let ctx = HotkeyContext {
            input_focused: true,
            chat_focused: true,
            has_frames: true,
        };
        assert_eq!(
            handle_hotkey(&Key::Enter, false, false, false, false, &ctx),
            HotkeyResult::Action(HotkeyAction::SendMessage)
        );
        assert_eq!(
            handle_hotkey(&Key::Enter, true, false, false, false, &ctx),
            HotkeyResult::Suppressed
        );
    }

    #[test]
    fn test_suppressed_when_input_focused() {
        let ctx = HotkeyContext {
            input_focused: true,
            has_frames: true,
            ..Default::default()
        };
        let result = handle_hotkey(&Key::ArrowRight, false, false, false, false, &ctx);
        assert_eq!(result, HotkeyResult::Suppressed);
        let result = handle_hotkey(&Key::Character("e".to_string()), false, true, false, false, &ctx);
        assert_eq!(result, HotkeyResult::Suppressed);
    }
}
