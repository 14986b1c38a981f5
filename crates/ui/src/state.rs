use chrono::Local;
use parley_core::{ContactProfile, MessageGroup, TranscriptSession};

use crate::chat_view::ChatView;

/// State for the draft composer
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current draft buffer
    pub buffer: String,
    /// Cursor position (byte index; drafts are edited at char boundaries)
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 && !self.buffer.is_empty() {
            let prev = previous_boundary(&self.buffer, self.cursor);
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = previous_boundary(&self.buffer, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = next_boundary(&self.buffer, self.cursor);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn previous_boundary(s: &str, index: usize) -> usize {
    let mut i = index - 1;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(s: &str, index: usize) -> usize {
    let mut i = index + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Top-level application state for the transcript viewer
///
/// Everything the shell owns lives here and is passed explicitly into
/// rendering; there is no ambient store. Message groups are derived fresh
/// from the session on every draw.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Draft composer state
    pub input: InputState,
    /// The loaded transcript plus local mutations
    pub session: TranscriptSession,
    /// Contact directory for the sidebar and profile panel
    pub contacts: Vec<ContactProfile>,
    /// Index into `contacts` shown in the profile panel
    pub selected_contact: usize,
    /// Left contacts sidebar visibility
    pub contacts_visible: bool,
    /// Right profile panel visibility
    pub profile_visible: bool,
    /// Compact-screen contacts overlay visibility
    pub overlay_visible: bool,
    /// Chat scroll state
    pub chat: ChatView,
    /// strftime pattern for bubble timestamps
    pub time_format: String,
    /// Set when the user quits
    pub should_exit: bool,
}

impl AppState {
    pub fn new(session: TranscriptSession, contacts: Vec<ContactProfile>, time_format: impl Into<String>) -> Self {
        Self {
            input: InputState::new(),
            session,
            contacts,
            selected_contact: 0,
            contacts_visible: true,
            profile_visible: false,
            overlay_visible: false,
            chat: ChatView::new(),
            time_format: time_format.into(),
            should_exit: false,
        }
    }

    /// Derive the speaker-grouped view of the current transcript
    pub fn groups(&self) -> Vec<MessageGroup> {
        self.session.groups(&self.time_format)
    }

    /// Append the current draft to the transcript.
    ///
    /// No-op when the draft is empty after trimming. On success the draft
    /// clears and the chat view snaps to the bottom.
    pub fn send_draft(&mut self) -> bool {
        let sent_at = Local::now().fixed_offset();
        if self.session.append_draft(&self.input.buffer, sent_at) {
            self.input.clear();
            self.chat.scroll_to_bottom();
            true
        } else {
            false
        }
    }

    /// End the chat: clear the transcript and the draft
    pub fn end_chat(&mut self) {
        self.session.clear();
        self.input.clear();
        self.chat.scroll_to_bottom();
    }

    pub fn toggle_contacts(&mut self) {
        self.contacts_visible = !self.contacts_visible;
    }

    pub fn toggle_profile(&mut self) {
        self.profile_visible = !self.profile_visible;
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay_visible = !self.overlay_visible;
    }

    /// Close every panel at once (the overlay-dismiss gesture)
    pub fn dismiss_panels(&mut self) {
        self.contacts_visible = false;
        self.profile_visible = false;
        self.overlay_visible = false;
    }

    /// Check whether any panel is open
    pub fn any_panel_open(&self) -> bool {
        self.contacts_visible || self.profile_visible || self.overlay_visible
    }

    /// Select the next contact for the profile panel
    pub fn select_next_contact(&mut self) {
        if !self.contacts.is_empty() {
            self.selected_contact = (self.selected_contact + 1) % self.contacts.len();
        }
    }

    /// Select the previous contact for the profile panel
    pub fn select_prev_contact(&mut self) {
        if !self.contacts.is_empty() {
            self.selected_contact = self.selected_contact.checked_sub(1).unwrap_or(self.contacts.len() - 1);
        }
    }

    /// Currently selected contact, if any
    pub fn selected_contact(&self) -> Option<&ContactProfile> {
        self.contacts.get(self.selected_contact)
    }

    /// Display name for a participant id, falling back to the raw id
    pub fn display_name<'a>(&'a self, participant_id: &'a str) -> &'a str {
        self.contacts
            .iter()
            .find(|c| c.id == participant_id)
            .map(|c| c.display_name.as_str())
            .unwrap_or(participant_id)
    }
}
