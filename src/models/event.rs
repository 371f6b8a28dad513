//! Event: one edition of a named competition.

use crate::models::game::MatchId;
use crate::models::organization::OrganizationId;
use serde::{Deserialize, Serialize};

/// Composite key `"{name} {edition}"`.
pub type EventId = String;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub edition: String,
    pub organizer: OrganizationId,
    /// Matches in the order they were first seen in the log.
    pub matches: Vec<MatchId>,
}

impl Event {
    pub fn event_id(name: &str, edition: &str) -> EventId {
        format!("{} {}", name, edition)
    }

    pub fn new(name: impl Into<String>, edition: impl Into<String>, organizer: OrganizationId) -> Self {
        let name = name.into();
        let edition = edition.into();
        Self {
            id: Self::event_id(&name, &edition),
            name,
            edition,
            organizer,
            matches: Vec::new(),
        }
    }
}
