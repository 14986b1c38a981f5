use parley_core::Participant;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

/// Polar-night color theme for the parley TUI
///
/// A muted blue-gray dark palette; bubbles sit on the panel background
/// and speakers are told apart by role accent colors.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background (fills terminal)
    pub const BG: Color = Color::Rgb(34, 38, 48);

    /// Foreground: primary text
    pub const FG: Color = Color::Rgb(214, 219, 230);

    /// Secondary background (panels, bubbles, input)
    pub const PANEL_BG: Color = Color::Rgb(44, 50, 63);

    /// Hover/active states: selection rows
    pub const ACTIVE: Color = Color::Rgb(58, 66, 84);

    /// Primary accent: blue
    pub const BLUE: Color = Color::Rgb(126, 160, 196);

    /// Agent accent: cyan
    pub const CYAN: Color = Color::Rgb(134, 190, 205);

    /// Customer accent: green
    pub const GREEN: Color = Color::Rgb(166, 192, 142);

    /// System/other accent: yellow
    pub const YELLOW: Color = Color::Rgb(229, 199, 134);

    /// Errors and destructive hints: red
    pub const RED: Color = Color::Rgb(219, 125, 125);

    /// Muted text: timestamps, hints
    pub const MUTED: Color = Color::Rgb(112, 120, 140);

    /// Border color
    pub const BORDER: Color = Color::Rgb(64, 72, 92);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Primary accent style
    pub fn primary() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG)
    }

    /// Muted style (timestamps, hints)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    /// Panel style (bubbles, sidebars, input card)
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Active (selected) style
    pub fn active() -> Style {
        Style::default().fg(Self::FG).bg(Self::ACTIVE)
    }

    /// Accent color for a participant role
    pub fn role_color(role: Participant) -> Color {
        match role {
            Participant::Agent => Self::CYAN,
            Participant::Customer => Self::GREEN,
            Participant::System => Self::YELLOW,
        }
    }

    /// Get span with role styling
    pub fn role_span(name: &str, role: Participant) -> Span<'_> {
        Span::styled(name, Style::default().fg(Self::role_color(role)))
    }
}
