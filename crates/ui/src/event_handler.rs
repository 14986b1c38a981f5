use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result;

use crate::state::AppState;

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    /// Handle a keyboard event; editing keys mutate the draft in place,
    /// everything else maps to a [KeyAction] applied by the app.
    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            KeyCode::Enter => {
                if !state.input.buffer.trim().is_empty() {
                    return Some(KeyAction::SendMessage);
                }
            }
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Self::handle_control_key(c);
            }
            KeyCode::Char('j') if state.input.is_empty() => return Some(KeyAction::SelectNextContact),
            KeyCode::Char('k') if state.input.is_empty() => return Some(KeyAction::SelectPrevContact),
            KeyCode::Char('g') if state.input.is_empty() => return Some(KeyAction::ScrollToTop),
            KeyCode::Char('G') if state.input.is_empty() => return Some(KeyAction::ScrollToBottom),
            KeyCode::Char(c) => state.input.insert_char(c),
            KeyCode::Backspace => state.input.backspace(),
            KeyCode::Delete => state.input.delete(),
            KeyCode::Left => state.input.move_left(),
            KeyCode::Right => state.input.move_right(),
            KeyCode::Home => state.input.move_home(),
            KeyCode::End => state.input.move_end(),
            KeyCode::Up => return Some(KeyAction::ScrollUp),
            KeyCode::Down => return Some(KeyAction::ScrollDown),
            KeyCode::PageUp => return Some(KeyAction::PageUp),
            KeyCode::PageDown => return Some(KeyAction::PageDown),
            KeyCode::Esc => {
                if !state.input.is_empty() {
                    state.input.clear();
                } else if state.overlay_visible || state.profile_visible {
                    return Some(KeyAction::DismissPanels);
                } else {
                    return Some(KeyAction::Quit);
                }
            }
            _ => (),
        }

        None
    }

    fn handle_control_key(c: char) -> Option<KeyAction> {
        match c {
            'c' | 'q' => Some(KeyAction::Quit),
            'e' => Some(KeyAction::EndChat),
            'b' => Some(KeyAction::ToggleContacts),
            'p' => Some(KeyAction::ToggleProfile),
            'o' => Some(KeyAction::ToggleOverlay),
            'u' => Some(KeyAction::PageUp),
            'd' => Some(KeyAction::PageDown),
            _ => None,
        }
    }
}

/// Actions that can be triggered by key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append the current draft to the transcript
    SendMessage,
    /// End the chat: clear transcript and draft
    EndChat,
    /// Exit the application
    Quit,
    /// Toggle the contacts sidebar (left)
    ToggleContacts,
    /// Toggle the profile panel (right)
    ToggleProfile,
    /// Toggle the compact-screen contacts overlay
    ToggleOverlay,
    /// Close every panel at once
    DismissPanels,
    /// Select the next contact for the profile panel
    SelectNextContact,
    /// Select the previous contact for the profile panel
    SelectPrevContact,
    /// Scroll chat up by one line
    ScrollUp,
    /// Scroll chat down by one line
    ScrollDown,
    /// Page up in the chat
    PageUp,
    /// Page down in the chat
    PageDown,
    /// Jump to the oldest message
    ScrollToTop,
    /// Jump to the most recent message
    ScrollToBottom,
}
