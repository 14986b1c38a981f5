use parley_core::Participant;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{state::AppState, theme::Theme};

/// Chat area rendering the grouped transcript as bubbles
///
/// Each message group draws as one visual block: a speaker header, the
/// wrapped message texts on the panel background, and a timestamp line
/// per message. Groups from the local participant align right, everyone
/// else aligns left.
pub struct ChatArea<'a> {
    state: &'a AppState,
}

impl<'a> ChatArea<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render the chat window, honoring the current scroll offset
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Block::default().style(Theme::base()), area);

        let groups = self.state.groups();
        if groups.is_empty() {
            self.render_empty_state(frame, area);
            return;
        }

        let lines = self.lines(area.width);
        let total = lines.len();
        let viewport = area.height as usize;

        let offset = self.state.chat.offset().min(total.saturating_sub(viewport));
        let end = total - offset;
        let start = end.saturating_sub(viewport);

        let window: Vec<Line<'static>> = lines[start..end].to_vec();
        frame.render_widget(Paragraph::new(window), area);
    }

    /// Number of display lines the transcript occupies at the given width
    pub fn line_count(&self, width: u16) -> usize {
        if self.state.session.is_empty() {
            return 0;
        }
        self.lines(width).len()
    }

    /// Build every display line for the grouped transcript
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let bubble_width = Self::bubble_width(width);
        let local_participant = self.state.session.local_participant().to_string();
        let mut lines: Vec<Line<'static>> = Vec::new();

        for group in self.state.groups() {
            let role = Participant::classify(&group.sender_id);
            let align_right = group.sender_id == local_participant;
            let name = self.state.display_name(&group.sender_id).to_string();

            lines.push(Self::aligned(
                Line::from(Span::styled(name, Style::default().fg(Theme::role_color(role)).bold())),
                align_right,
            ));

            for message in &group.messages {
                for wrapped in textwrap::wrap(&message.text, bubble_width) {
                    lines.push(Self::aligned(
                        Line::from(Span::styled(format!(" {} ", wrapped), Theme::panel())),
                        align_right,
                    ));
                }
                lines.push(Self::aligned(
                    Line::from(Span::styled(message.display_time.clone(), Theme::muted())),
                    align_right,
                ));
            }

            lines.push(Line::default());
        }

        lines
    }

    fn aligned(line: Line<'static>, right: bool) -> Line<'static> {
        if right { line.right_aligned() } else { line.left_aligned() }
    }

    /// Bubbles take roughly three quarters of the chat column
    fn bubble_width(width: u16) -> usize {
        ((width as usize).saturating_sub(4) * 3 / 4).max(12)
    }

    fn render_empty_state(&self, frame: &mut Frame<'_>, area: Rect) {
        if area.height == 0 {
            return;
        }

        let hint_area = Rect { x: area.x, y: area.y + area.height / 2, width: area.width, height: 1 };
        let hint = Paragraph::new(Line::from(Span::styled(
            "No messages in this conversation",
            Theme::muted(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }
}
