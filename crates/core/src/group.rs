//! Speaker grouping for transcript display.
//!
//! A transcript renders as a sequence of visual blocks, one per maximal
//! run of consecutive events from the same speaker. Grouping is a pure
//! transformation over the ordered event list: concatenating the groups'
//! messages always reproduces the original order, and no two adjacent
//! groups share a sender.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use crate::transcript::TranscriptEvent;

/// Placeholder shown when an event has neither an offset nor a send time.
/// Unreachable through [`crate::TranscriptSession`], which stamps drafts.
const MISSING_TIME: &str = "--:--";

/// One message ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    /// Utterance text
    pub text: String,
    /// Formatted timestamp derived from the session start
    pub display_time: String,
}

/// A maximal run of consecutive messages from one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageGroup {
    /// Speaker id shared by every message in the group
    pub sender_id: String,
    /// Messages in original transcript order
    pub messages: Vec<DisplayMessage>,
}

impl MessageGroup {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Group an ordered event list into maximal same-speaker runs.
///
/// An empty input yields an empty vec; callers render an empty state
/// instead of treating that as an error. `time_format` is a strftime
/// pattern applied in the session's recorded UTC offset.
pub fn group_events(
    events: &[TranscriptEvent],
    start: DateTime<FixedOffset>,
    time_format: &str,
) -> Vec<MessageGroup> {
    let mut groups: Vec<MessageGroup> = Vec::new();

    for event in events {
        let message = DisplayMessage {
            text: event.content.clone(),
            display_time: display_time(event, start, time_format),
        };

        match groups.last_mut() {
            Some(group) if group.sender_id == event.participant_id => group.messages.push(message),
            _ => groups.push(MessageGroup { sender_id: event.participant_id.clone(), messages: vec![message] }),
        }
    }

    groups
}

/// Derive the display time for one event.
///
/// Recorded events resolve to `start + offset`; drafts resolve to their
/// `sent_at` wall-clock, shifted into the session's UTC offset so the
/// column reads uniformly.
pub fn display_time(event: &TranscriptEvent, start: DateTime<FixedOffset>, time_format: &str) -> String {
    if let Some(millis) = event.begin_offset_millis {
        return (start + Duration::milliseconds(millis)).format(time_format).to_string();
    }

    match event.sent_at {
        Some(sent_at) => sent_at.with_timezone(start.offset()).format(time_format).to_string(),
        None => MISSING_TIME.to_string(),
    }
}
