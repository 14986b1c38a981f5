use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{state::AppState, theme::Theme};

/// Contacts sidebar listing the transcript participants
///
/// The selected row feeds the profile panel on the right.
pub struct ContactsSidebar<'a> {
    state: &'a AppState,
}

impl<'a> ContactsSidebar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the sidebar to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled("Contacts", Style::default().fg(Theme::BLUE).bold()))
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(Theme::panel());

        let lines = contact_rows(self.state);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Build one row per contact; shared with the compact-screen overlay
pub(crate) fn contact_rows(state: &AppState) -> Vec<Line<'static>> {
    if state.contacts.is_empty() {
        return vec![Line::from(Span::styled("No participants", Theme::muted()))];
    }

    state
        .contacts
        .iter()
        .enumerate()
        .map(|(index, contact)| {
            let selected = index == state.selected_contact;
            let marker = if selected { "> " } else { "  " };
            let row_style = if selected { Theme::active() } else { Theme::panel() };

            Line::from(vec![
                Span::styled(marker.to_string(), row_style),
                Span::styled(
                    contact.display_name.clone(),
                    row_style.fg(Theme::role_color(contact.role)),
                ),
                Span::styled(format!("  {}", contact.role.as_str()), row_style.fg(Theme::MUTED)),
            ])
        })
        .collect()
}
