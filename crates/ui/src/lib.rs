pub mod app;
pub mod chat_view;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod state;
pub mod theme;

pub use app::App;
pub use chat_view::ChatView;
pub use event_handler::{EventHandler, KeyAction};
pub use state::{AppState, InputState};
pub use theme::Theme;
