use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for parley-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the parley transcript viewer
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture decoding errors
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised while decoding a contact export fixture
///
/// The metadata payload is a JSON string containing a JSON string
/// containing the transcription document, so decoding happens in
/// stages and each stage reports its own failure.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file does not exist
    #[error("fixture not found: {0}")]
    NotFound(PathBuf),

    /// The outer export object is not valid JSON
    #[error("malformed fixture: outer document: {0}")]
    OuterDocument(String),

    /// Stage one: the metadata field is not a JSON-encoded string
    #[error("malformed fixture: metadata envelope: {0}")]
    MetadataEnvelope(String),

    /// Stage two: the decoded metadata is not a transcription document
    #[error("malformed fixture: metadata payload: {0}")]
    MetadataPayload(String),

    /// The metadata document carries no transcription array
    #[error("malformed fixture: metadata has no transcription array")]
    MissingTranscription,

    /// The session start timestamp is not RFC 3339
    #[error("malformed fixture: invalid start_date_time: {0}")]
    InvalidStartTime(String),

    /// A recorded event carries a negative offset
    #[error("malformed fixture: event {index} has negative offset {millis}ms")]
    NegativeOffset { index: usize, millis: i64 },
}
