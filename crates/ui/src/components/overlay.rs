use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::contacts::contact_rows;
use crate::{layout::TuiLayout, state::AppState, theme::Theme};

/// Centered contacts popup for compact terminals
///
/// Stands in for the sidebar when the layout has no room for side
/// panels; drawn above the chat and dismissed with Esc.
pub struct ContactsOverlay<'a> {
    state: &'a AppState,
}

impl<'a> ContactsOverlay<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the overlay centered in the full frame area
    pub fn render(&self, frame: &mut Frame<'_>, full_area: Rect) {
        let area = TuiLayout::overlay_rect(full_area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Span::styled("Contacts", Style::default().fg(Theme::BLUE).bold()))
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(Theme::panel());

        let mut lines = contact_rows(self.state);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("[j/k] select  [Esc] close", Theme::muted())));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
