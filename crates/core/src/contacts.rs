use serde::Serialize;
use std::collections::HashMap;

use crate::transcript::{Participant, TranscriptEvent};

/// Profile shown for one transcript participant
///
/// Derived from the participants present in a transcript, in order of
/// first appearance, optionally enriched with configured display names
/// and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactProfile {
    /// Participant id as recorded in the export
    pub id: String,
    /// Human-readable name for panels and bubble headers
    pub display_name: String,
    /// Classified role
    pub role: Participant,
    /// Free-form note shown in the profile panel
    pub about: String,
}

impl ContactProfile {
    /// Derive the contact directory for a transcript.
    ///
    /// `names` and `abouts` map participant ids to configured overrides;
    /// participants without an override get a role-based default name.
    pub fn directory(
        events: &[TranscriptEvent],
        names: &HashMap<String, String>,
        abouts: &HashMap<String, String>,
    ) -> Vec<ContactProfile> {
        let mut directory: Vec<ContactProfile> = Vec::new();

        for event in events {
            if directory.iter().any(|c| c.id == event.participant_id) {
                continue;
            }

            let role = event.role();
            let display_name = names
                .get(&event.participant_id)
                .cloned()
                .unwrap_or_else(|| default_name(role, &event.participant_id));
            let about = abouts.get(&event.participant_id).cloned().unwrap_or_default();

            directory.push(ContactProfile { id: event.participant_id.clone(), display_name, role, about });
        }

        directory
    }

    /// Number of messages this contact contributed to the transcript
    pub fn message_count(&self, events: &[TranscriptEvent]) -> usize {
        events.iter().filter(|e| e.participant_id == self.id).count()
    }
}

fn default_name(role: Participant, id: &str) -> String {
    match role {
        Participant::Agent => "Agent".to_string(),
        Participant::Customer => "Customer".to_string(),
        Participant::System => id.to_string(),
    }
}
