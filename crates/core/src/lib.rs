pub mod config;
pub mod contacts;
pub mod error;
pub mod fixture;
pub mod group;
pub mod logging;
pub mod transcript;

pub use config::{Config, ConfigError, ContactEntry, FileLoggingSettings, LoggingSettings};
pub use contacts::ContactProfile;
pub use error::{Error, FixtureError, Result};
pub use fixture::ContactExport;
pub use group::{DisplayMessage, MessageGroup, display_time, group_events};
pub use logging::{LogFormat, init_logging};
pub use transcript::{Participant, TranscriptEvent, TranscriptSession};
