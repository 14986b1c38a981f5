use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{state::AppState, theme::Theme};

/// Right-side panel showing the selected contact's profile
pub struct ProfilePanel<'a> {
    state: &'a AppState,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the profile panel to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Span::styled("Profile", Style::default().fg(Theme::BLUE).bold()))
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(Theme::panel());

        let paragraph = Paragraph::new(self.lines()).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(contact) = self.state.selected_contact() else {
            return vec![Line::from(Span::styled("No contact selected", Theme::muted()))];
        };

        let message_count = contact.message_count(self.state.session.events());
        let mut lines = vec![
            Line::from(Span::styled(
                contact.display_name.clone(),
                Style::default().fg(Theme::role_color(contact.role)).bold(),
            )),
            Line::from(vec![
                Span::styled("role: ".to_string(), Theme::muted()),
                Span::styled(contact.role.as_str().to_string(), Theme::panel()),
            ]),
            Line::from(vec![
                Span::styled("messages: ".to_string(), Theme::muted()),
                Span::styled(message_count.to_string(), Theme::panel()),
            ]),
        ];

        if !contact.about.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(contact.about.clone(), Theme::panel())));
        }

        lines
    }
}
