//! Contact export fixture loading and decoding.
//!
//! A contact recording export is an outer JSON object whose `metadata`
//! field is a JSON-encoded string that decodes to *another* JSON-encoded
//! string holding the transcription document. Decoding is an explicit
//! two-stage step with a typed error per layer, so a malformed export
//! fails loudly at load time instead of surfacing as a raw parse panic
//! deep inside rendering.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::Path;

use crate::error::{FixtureError, Result};
use crate::transcript::{TranscriptEvent, TranscriptSession};

/// Outer object of a contact recording export
#[derive(Debug, Clone, Deserialize)]
pub struct ContactExport {
    /// Doubly JSON-encoded transcription document
    pub metadata: String,
    /// Session start timestamp, RFC 3339
    pub start_date_time: String,
}

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    transcription: Option<Vec<RawTranscriptItem>>,
}

/// One transcription item as recorded in the export.
/// Exports carry more fields (sentiment, ids); only these are consumed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTranscriptItem {
    participant_id: String,
    content: String,
    begin_offset_millis: Option<i64>,
}

impl ContactExport {
    /// Read and parse the outer export object from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FixtureError::NotFound(path.to_path_buf()).into());
        }

        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "read contact export");
        Self::from_json(&raw)
    }

    /// Parse the outer export object from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| FixtureError::OuterDocument(e.to_string()).into())
    }

    /// Parse the session start timestamp
    pub fn start(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.start_date_time)
            .map_err(|_| FixtureError::InvalidStartTime(self.start_date_time.clone()).into())
    }

    /// Decode the metadata envelope into a validated event list.
    ///
    /// Stage one decodes the `metadata` field as a JSON string; stage two
    /// decodes that string as the transcription document. Negative offsets
    /// are rejected; an empty transcription array is valid.
    pub fn decode(&self) -> Result<(DateTime<FixedOffset>, Vec<TranscriptEvent>)> {
        let start = self.start()?;

        let envelope: String =
            serde_json::from_str(&self.metadata).map_err(|e| FixtureError::MetadataEnvelope(e.to_string()))?;
        let document: MetadataDocument =
            serde_json::from_str(&envelope).map_err(|e| FixtureError::MetadataPayload(e.to_string()))?;
        let items = document.transcription.ok_or(FixtureError::MissingTranscription)?;

        let mut events = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if let Some(millis) = item.begin_offset_millis
                && millis < 0
            {
                return Err(FixtureError::NegativeOffset { index, millis }.into());
            }

            events.push(TranscriptEvent {
                participant_id: item.participant_id,
                content: item.content,
                begin_offset_millis: item.begin_offset_millis,
                sent_at: None,
            });
        }

        tracing::info!(events = events.len(), start = %start, "decoded contact transcript");
        Ok((start, events))
    }

    /// Decode straight into a viewing session
    pub fn into_session(self, local_participant: &str) -> Result<TranscriptSession> {
        let (start, events) = self.decode()?;
        Ok(TranscriptSession::new(start, events, local_participant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    const START: &str = "2024-03-18T14:02:11-05:00";

    /// Build an export whose metadata wraps `document` in the double
    /// encoding the recording pipeline produces.
    fn export_json(start: &str, document: &str) -> String {
        let envelope = serde_json::to_string(document).unwrap();
        serde_json::json!({ "start_date_time": start, "metadata": envelope }).to_string()
    }

    fn sample_document() -> &'static str {
        r#"{"transcription":[
            {"ParticipantId":"AGENT","Content":"Hi, how can I help?","BeginOffsetMillis":0},
            {"ParticipantId":"CUSTOMER","Content":"My order is late.","BeginOffsetMillis":5250},
            {"ParticipantId":"CUSTOMER","Content":"Order 4411.","BeginOffsetMillis":9100}
        ]}"#
    }

    #[test]
    fn test_decode_well_formed_export() {
        let raw = export_json(START, sample_document());
        let export = ContactExport::from_json(&raw).unwrap();
        let (start, events) = export.decode().unwrap();

        assert_eq!(start, DateTime::parse_from_rfc3339(START).unwrap());
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].participant_id, "AGENT");
        assert_eq!(events[0].content, "Hi, how can I help?");
        assert_eq!(events[0].begin_offset_millis, Some(0));
        assert_eq!(events[2].begin_offset_millis, Some(9100));
        assert!(events.iter().all(|e| e.sent_at.is_none()));
    }

    #[test]
    fn test_extra_fields_in_items_are_ignored() {
        let document = r#"{"transcription":[
            {"Id":"abc-1","ParticipantId":"AGENT","Content":"Hi","BeginOffsetMillis":0,"Sentiment":"NEUTRAL"}
        ],"version":"1.1.0"}"#;
        let export = ContactExport::from_json(&export_json(START, document)).unwrap();
        let (_, events) = export.decode().unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_empty_transcription_is_valid() {
        let export = ContactExport::from_json(&export_json(START, r#"{"transcription":[]}"#)).unwrap();
        let (_, events) = export.decode().unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_malformed_outer_document() {
        let err = ContactExport::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::OuterDocument(_))));
    }

    #[test]
    fn test_malformed_metadata_envelope() {
        // metadata holds an object, not a JSON-encoded string
        let raw = serde_json::json!({ "start_date_time": START, "metadata": "{}" }).to_string();
        let export = ContactExport::from_json(&raw).unwrap();
        let err = export.decode().unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::MetadataEnvelope(_))));
    }

    #[test]
    fn test_malformed_metadata_payload() {
        let export = ContactExport::from_json(&export_json(START, "not a document")).unwrap();
        let err = export.decode().unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::MetadataPayload(_))));
    }

    #[test]
    fn test_missing_transcription_array() {
        let export = ContactExport::from_json(&export_json(START, r#"{"version":"1.1.0"}"#)).unwrap();
        let err = export.decode().unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::MissingTranscription)));
    }

    #[test]
    fn test_invalid_start_time() {
        let export = ContactExport::from_json(&export_json("last tuesday", sample_document())).unwrap();
        let err = export.decode().unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::InvalidStartTime(_))));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let document = r#"{"transcription":[
            {"ParticipantId":"AGENT","Content":"Hi","BeginOffsetMillis":0},
            {"ParticipantId":"CUSTOMER","Content":"Hello","BeginOffsetMillis":-40}
        ]}"#;
        let export = ContactExport::from_json(&export_json(START, document)).unwrap();
        let err = export.decode().unwrap_err();
        assert!(matches!(
            err,
            Error::Fixture(FixtureError::NegativeOffset { index: 1, millis: -40 })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", export_json(START, sample_document())).unwrap();

        let export = ContactExport::from_file(file.path()).unwrap();
        let (_, events) = export.decode().unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_from_file_not_found() {
        let err = ContactExport::from_file(Path::new("/nonexistent/contact.json")).unwrap_err();
        assert!(matches!(err, Error::Fixture(FixtureError::NotFound(_))));
    }

    #[test]
    fn test_into_session() {
        let export = ContactExport::from_json(&export_json(START, sample_document())).unwrap();
        let session = export.into_session("CUSTOMER").unwrap();

        assert_eq!(session.len(), 3);
        assert_eq!(session.local_participant(), "CUSTOMER");
        assert_eq!(session.groups("%H:%M").len(), 2);
    }
}
