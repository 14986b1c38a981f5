use crossterm::event::Event;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Result, Stdout};
use std::{panic, time::Duration};

use crate::components::{ChatArea, Composer, ContactsOverlay, ContactsSidebar, Header, ProfilePanel};
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::TuiLayout;
use crate::state::AppState;

const PAGE_LINES: usize = 10;

/// Main TUI application
///
/// Owns the state and drives the poll-render loop.
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a mutable reference to the application state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Run the TUI until the user quits
    pub async fn run(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let backend = CrosstermBackend::new(std::io::stdout());
            if let Ok(mut terminal) = Terminal::new(backend) {
                let _ = terminal.show_cursor();
            }
            let _ = crossterm::terminal::disable_raw_mode();
            let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        terminal.clear()?;
        self.draw(&mut terminal)?;

        while !self.state.should_exit {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if let Some(event) = EventHandler::read()? {
                self.handle_event(event);
                self.draw(&mut terminal)?;
            }
        }

        terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && let Some(action) = EventHandler::handle_key_event(key, &mut self.state)
        {
            self.apply_action(action);
        }
    }

    /// Apply a key action to the state
    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::SendMessage => {
                if self.state.send_draft() {
                    tracing::info!(events = self.state.session.len(), "draft sent");
                }
            }
            KeyAction::EndChat => {
                self.state.end_chat();
                tracing::info!("chat ended, transcript cleared");
            }
            KeyAction::Quit => self.state.should_exit = true,
            KeyAction::ToggleContacts => self.state.toggle_contacts(),
            KeyAction::ToggleProfile => self.state.toggle_profile(),
            KeyAction::ToggleOverlay => self.state.toggle_overlay(),
            KeyAction::DismissPanels => self.state.dismiss_panels(),
            KeyAction::SelectNextContact => self.state.select_next_contact(),
            KeyAction::SelectPrevContact => self.state.select_prev_contact(),
            KeyAction::ScrollUp => self.state.chat.scroll_up(1),
            KeyAction::ScrollDown => self.state.chat.scroll_down(1),
            KeyAction::PageUp => self.state.chat.scroll_up(PAGE_LINES),
            KeyAction::PageDown => self.state.chat.scroll_down(PAGE_LINES),
            KeyAction::ScrollToTop => self.state.chat.scroll_to_top(),
            KeyAction::ScrollToBottom => self.state.chat.scroll_to_bottom(),
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let layout = TuiLayout::calculate(area, self.state.contacts_visible, self.state.profile_visible);

        // Clamp the scroll offset against the wrapped extent for this width
        // so the transcript-changed snap and g/G jumps land correctly.
        let total_lines = ChatArea::new(&self.state).line_count(layout.chat.width);
        let viewport = layout.chat.height as usize;
        self.state.chat.clamp(total_lines.saturating_sub(viewport));

        terminal.draw(|frame| {
            Header::new(&self.state).render(frame, layout.header);
            ChatArea::new(&self.state).render(frame, layout.chat);

            if let Some(contacts_area) = layout.contacts {
                ContactsSidebar::new(&self.state).render(frame, contacts_area);
            }
            if let Some(profile_area) = layout.profile {
                ProfilePanel::new(&self.state).render(frame, profile_area);
            }

            Composer::new(&self.state).render(frame, layout.composer);

            if self.state.overlay_visible {
                ContactsOverlay::new(&self.state).render(frame, area);
            }
        })?;

        Ok(())
    }
}
