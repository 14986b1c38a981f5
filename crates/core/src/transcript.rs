use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::group::{self, MessageGroup};

/// Participant roles recorded in a contact export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Participant {
    /// The contact-center agent (rendered on the left)
    Agent,
    /// The customer; locally drafted messages are attributed here (default)
    #[default]
    Customer,
    /// Any other participant id (bots, supervisors, system prompts)
    System,
}

impl Participant {
    pub const VALUES: &[Participant] = &[Participant::Agent, Participant::Customer, Participant::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::Agent => "agent",
            Participant::Customer => "customer",
            Participant::System => "system",
        }
    }

    /// Classify a recorded participant id.
    ///
    /// Contact exports use upper-case ids ("AGENT", "CUSTOMER"); anything
    /// unrecognized is treated as a system participant rather than rejected.
    pub fn classify(participant_id: &str) -> Self {
        match participant_id.to_uppercase().as_str() {
            "AGENT" => Participant::Agent,
            "CUSTOMER" => Participant::Customer,
            _ => Participant::System,
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Participant {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "agent" => Ok(Participant::Agent),
            "customer" => Ok(Participant::Customer),
            "system" => Ok(Participant::System),
            _ => Err(crate::Error::Other(format!("unknown participant role: {}", s))),
        }
    }
}

/// One utterance from a contact transcript
///
/// Recorded events carry `begin_offset_millis` from the session start;
/// locally drafted events carry no offset and record `sent_at` wall-clock
/// time instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Speaker id as recorded in the export (e.g. "AGENT", "CUSTOMER")
    pub participant_id: String,
    /// Utterance text
    pub content: String,
    /// Milliseconds from the session start; absent for local drafts
    pub begin_offset_millis: Option<i64>,
    /// Wall-clock send time for local drafts; absent for recorded events
    pub sent_at: Option<DateTime<FixedOffset>>,
}

impl TranscriptEvent {
    /// Build an event decoded from a recording
    pub fn recorded(participant_id: impl Into<String>, content: impl Into<String>, begin_offset_millis: i64) -> Self {
        Self {
            participant_id: participant_id.into(),
            content: content.into(),
            begin_offset_millis: Some(begin_offset_millis),
            sent_at: None,
        }
    }

    /// Build a locally drafted event stamped with its send time
    pub fn drafted(
        participant_id: impl Into<String>,
        content: impl Into<String>,
        sent_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            content: content.into(),
            begin_offset_millis: None,
            sent_at: Some(sent_at),
        }
    }

    /// Role of the speaker
    pub fn role(&self) -> Participant {
        Participant::classify(&self.participant_id)
    }
}

/// A loaded transcript plus the local mutations the viewer allows
///
/// The event list is chronological (index order) and only ever changes in
/// two ways: a locally drafted message is appended, or the whole list is
/// truncated to empty when the chat is ended. Message groups are derived
/// fresh from the current list; they are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSession {
    start: DateTime<FixedOffset>,
    events: Vec<TranscriptEvent>,
    local_participant: String,
}

impl TranscriptSession {
    pub fn new(
        start: DateTime<FixedOffset>,
        events: Vec<TranscriptEvent>,
        local_participant: impl Into<String>,
    ) -> Self {
        Self { start, events, local_participant: local_participant.into() }
    }

    /// Session start timestamp (the zero point for recorded offsets)
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Current event list in chronological order
    pub fn events(&self) -> &[TranscriptEvent] {
        &self.events
    }

    /// Participant id used for locally drafted messages
    pub fn local_participant(&self) -> &str {
        &self.local_participant
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Last event, if any
    pub fn last(&self) -> Option<&TranscriptEvent> {
        self.events.last()
    }

    /// Append a locally drafted message.
    ///
    /// The draft is trimmed first; a draft that is empty after trimming is
    /// a no-op and returns false. The caller supplies the send time so the
    /// operation stays deterministic under test.
    pub fn append_draft(&mut self, draft: &str, sent_at: DateTime<FixedOffset>) -> bool {
        let text = draft.trim();
        if text.is_empty() {
            return false;
        }

        let participant = self.local_participant.clone();
        self.events.push(TranscriptEvent::drafted(participant, text, sent_at));
        tracing::debug!(events = self.events.len(), "draft appended to transcript");
        true
    }

    /// End the chat: truncate the transcript to empty
    pub fn clear(&mut self) {
        self.events.clear();
        tracing::debug!("transcript cleared");
    }

    /// Derive the speaker-grouped view of the current transcript
    pub fn groups(&self, time_format: &str) -> Vec<MessageGroup> {
        group::group_events(&self.events, self.start, time_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-18T14:02:11-05:00").unwrap()
    }

    fn sample_session() -> TranscriptSession {
        let events = vec![
            TranscriptEvent::recorded("AGENT", "Hello, how can I help?", 0),
            TranscriptEvent::recorded("CUSTOMER", "My order never arrived.", 4200),
        ];
        TranscriptSession::new(start(), events, "CUSTOMER")
    }

    #[test]
    fn test_participant_classify() {
        assert_eq!(Participant::classify("AGENT"), Participant::Agent);
        assert_eq!(Participant::classify("agent"), Participant::Agent);
        assert_eq!(Participant::classify("CUSTOMER"), Participant::Customer);
        assert_eq!(Participant::classify("SUPERVISOR"), Participant::System);
        assert_eq!(Participant::classify(""), Participant::System);
    }

    #[test]
    fn test_participant_as_str() {
        assert_eq!(Participant::Agent.as_str(), "agent");
        assert_eq!(Participant::Customer.as_str(), "customer");
        assert_eq!(Participant::System.as_str(), "system");
    }

    #[test]
    fn test_participant_from_str() {
        assert_eq!("agent".parse::<Participant>().unwrap(), Participant::Agent);
        assert_eq!("Customer".parse::<Participant>().unwrap(), Participant::Customer);
        assert!("moderator".parse::<Participant>().is_err());
    }

    #[test]
    fn test_event_role() {
        assert_eq!(TranscriptEvent::recorded("AGENT", "hi", 0).role(), Participant::Agent);
        assert_eq!(
            TranscriptEvent::drafted("CUSTOMER", "hi", start()).role(),
            Participant::Customer
        );
    }

    #[test]
    fn test_session_accessors() {
        let session = sample_session();
        assert_eq!(session.len(), 2);
        assert!(!session.is_empty());
        assert_eq!(session.local_participant(), "CUSTOMER");
        assert_eq!(session.last().unwrap().participant_id, "CUSTOMER");
    }

    #[test]
    fn test_append_draft() {
        let mut session = sample_session();
        assert!(session.append_draft("Could you check again?", start()));
        assert_eq!(session.len(), 3);

        let last = session.last().unwrap();
        assert_eq!(last.participant_id, "CUSTOMER");
        assert_eq!(last.content, "Could you check again?");
        assert!(last.begin_offset_millis.is_none());
        assert!(last.sent_at.is_some());
    }

    #[test]
    fn test_append_draft_trims_whitespace() {
        let mut session = sample_session();
        assert!(session.append_draft("  padded  ", start()));
        assert_eq!(session.last().unwrap().content, "padded");
    }

    #[test]
    fn test_append_empty_draft_is_noop() {
        let mut session = sample_session();
        assert!(!session.append_draft("", start()));
        assert!(!session.append_draft("   \t  ", start()));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut session = sample_session();
        session.clear();
        assert!(session.is_empty());
        assert!(session.groups("%H:%M").is_empty());
    }

    #[test]
    fn test_groups_derived_fresh() {
        let mut session = sample_session();
        assert_eq!(session.groups("%H:%M").len(), 2);

        session.append_draft("Still waiting.", start());
        assert_eq!(session.groups("%H:%M").len(), 2);
    }
}
