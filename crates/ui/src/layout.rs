use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout breakpoints for responsive TUI
///
/// Based on terminal width, we render different layouts:
/// - >= 100 cols: Full layout, side panels available
/// - 80-99 cols: Medium layout, side panels hidden
/// - < 80 cols: Compact layout, the contacts overlay replaces the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full layout with side panels (>= 100 columns)
    Full,
    /// Medium layout without side panels (80-99 columns)
    Medium,
    /// Compact layout (<= 79 columns)
    Compact,
}

impl From<u16> for LayoutMode {
    fn from(width: u16) -> Self {
        match width {
            w if w >= 100 => Self::Full,
            w if w >= 80 => Self::Medium,
            _ => Self::Compact,
        }
    }
}

impl LayoutMode {
    /// Check if side panels can be shown
    pub fn has_side_panels(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Calculated layout for the TUI
#[derive(Debug, Clone)]
pub struct TuiLayout {
    /// Layout mode based on terminal width
    pub mode: LayoutMode,
    /// Header area (1 line)
    pub header: Rect,
    /// Chat bubble area
    pub chat: Rect,
    /// Contacts sidebar (left, only in Full mode)
    pub contacts: Option<Rect>,
    /// Contact profile panel (right, only in Full mode)
    pub profile: Option<Rect>,
    /// Composer area (3 lines: rule, input, hints)
    pub composer: Rect,
}

const CONTACTS_WIDTH: u16 = 24;
const PROFILE_WIDTH: u16 = 30;

impl TuiLayout {
    /// Calculate layout based on terminal size and panel visibility flags
    pub fn calculate(area: Rect, contacts_visible: bool, profile_visible: bool) -> Self {
        let mode = LayoutMode::from(area.width);
        let show_contacts = contacts_visible && mode.has_side_panels();
        let show_profile = profile_visible && mode.has_side_panels();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let header = chunks[0];
        let main = chunks[1];
        let composer = chunks[2];

        let mut constraints = Vec::new();
        if show_contacts {
            constraints.push(Constraint::Length(CONTACTS_WIDTH));
        }
        constraints.push(Constraint::Min(0));
        if show_profile {
            constraints.push(Constraint::Length(PROFILE_WIDTH));
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(main);

        let (contacts, chat, profile) = match (show_contacts, show_profile) {
            (true, true) => (Some(columns[0]), columns[1], Some(columns[2])),
            (true, false) => (Some(columns[0]), columns[1], None),
            (false, true) => (None, columns[0], Some(columns[1])),
            (false, false) => (None, columns[0], None),
        };

        Self { mode, header, chat, contacts, profile, composer }
    }

    /// Centered popup rect for the compact-screen contacts overlay
    pub fn overlay_rect(area: Rect) -> Rect {
        let width = (area.width * 3 / 4).clamp(20, 60).min(area.width);
        let height = (area.height * 2 / 3).clamp(6, 20).min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect { x, y, width, height }
    }
}
