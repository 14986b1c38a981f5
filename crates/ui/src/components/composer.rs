use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{state::AppState, theme::Theme};

const PLACEHOLDER: &str = "Type your message";

/// Draft composer at the bottom of the screen
///
/// - Row 1: horizontal rule
/// - Row 2: input card with accent bar and cursor
/// - Row 3: keyboard hints
pub struct Composer<'a> {
    state: &'a AppState,
}

impl<'a> Composer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the composer to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(Theme::BORDER),
            ))),
            rows[0],
        );

        self.render_input_card(frame, rows[1]);
        self.render_hints(frame, rows[2]);
    }

    /// Input card with accent bar and a block cursor
    fn render_input_card(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.width < 8 {
            return;
        }

        frame.render_widget(Block::default().style(Theme::panel()), area);

        let accent_width = 2;
        let accent_area = Rect { x: area.x, y: area.y, width: accent_width, height: area.height };
        frame.render_widget(Block::default().style(Style::default().bg(Theme::BLUE)), accent_area);

        let input_area = Rect {
            x: area.x + accent_width + 1,
            y: area.y,
            width: area.width.saturating_sub(accent_width + 2),
            height: 1,
        };

        let mut spans = Vec::new();
        if self.state.input.is_empty() {
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG)));
            spans.push(Span::styled("█", Style::default().fg(Theme::FG).bg(Theme::PANEL_BG)));
        } else {
            let cursor = self.state.input.cursor.min(self.state.input.buffer.len());
            let before_cursor = &self.state.input.buffer[..cursor];
            let after_cursor = &self.state.input.buffer[cursor..];

            if !before_cursor.is_empty() {
                spans.push(Span::styled(before_cursor.to_string(), Theme::panel()));
            }
            spans.push(Span::styled("█", Style::default().fg(Theme::FG).bg(Theme::PANEL_BG)));
            if !after_cursor.is_empty() {
                spans.push(Span::styled(after_cursor.to_string(), Theme::panel()));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

        let column = self.cursor_column();
        let indicator = Paragraph::new(Span::styled(
            format!("1:{} ", column),
            Style::default().fg(Theme::MUTED).bg(Theme::PANEL_BG),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(indicator, input_area);
    }

    /// Display column of the cursor, in terminal cells
    fn cursor_column(&self) -> usize {
        let cursor = self.state.input.cursor.min(self.state.input.buffer.len());
        self.state.input.buffer[..cursor].width() + 1
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let hints = [
            ("[Enter]", "send"),
            ("[Ctrl+E]", "end chat"),
            ("[Ctrl+B]", "contacts"),
            ("[Ctrl+P]", "profile"),
            ("[Esc]", "quit"),
        ];

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Theme::BLUE)));
            spans.push(Span::styled(format!(" {}", label), Style::default().fg(Theme::MUTED)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
