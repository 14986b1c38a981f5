use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{state::AppState, theme::Theme};

/// Single-line header: conversation title on the left, transcript
/// summary on the right
pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the header to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Block::default().style(Theme::panel()), area);

        let title = self.title();
        let left = Paragraph::new(Line::from(vec![
            Span::styled(" parley ", Style::default().fg(Theme::BLUE).bold().bg(Theme::PANEL_BG)),
            Span::styled(title, Style::default().fg(Theme::FG).bg(Theme::PANEL_BG)),
        ]));
        frame.render_widget(left, area);

        let summary = self.summary();
        let right = Paragraph::new(Line::from(Span::styled(
            summary,
            Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(right, area);
    }

    fn title(&self) -> String {
        if self.state.contacts.is_empty() {
            return "recorded conversation".to_string();
        }

        let names: Vec<&str> = self.state.contacts.iter().map(|c| c.display_name.as_str()).collect();
        names.join(" / ")
    }

    fn summary(&self) -> String {
        let count = self.state.session.len();
        match count {
            0 => "no messages ".to_string(),
            1 => "1 message ".to_string(),
            n => format!("{} messages ", n),
        }
    }
}
