//! Organization and its ordered keyword patterns.

use crate::models::event::EventId;
use serde::{Deserialize, Serialize};

/// Unique identifier for an organization (seeded id, or the raw location string).
pub type OrganizationId = String;

/// Prefix that turns a keyword into an exclusion.
pub const EXCLUSION_MARKER: char = '!';

/// One keyword pattern. Stored in its textual form (`"Arena"`, `"!OldArena"`)
/// so seed files and the persisted model read the same.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Keyword {
    /// Substring that attributes the search text to this organization.
    Include(String),
    /// Substring that vetoes this organization when present.
    Exclude(String),
}

impl Keyword {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(EXCLUSION_MARKER) {
            Some(rest) => Keyword::Exclude(rest.to_string()),
            None => Keyword::Include(raw.to_string()),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Keyword::Include(p) | Keyword::Exclude(p) => p,
        }
    }

    pub fn is_exclusion(&self) -> bool {
        matches!(self, Keyword::Exclude(_))
    }

    /// Substring test. An empty pattern never matches.
    pub fn found_in(&self, text: &str) -> bool {
        let p = self.pattern();
        !p.is_empty() && text.contains(p)
    }
}

impl From<String> for Keyword {
    fn from(raw: String) -> Self {
        Keyword::parse(&raw)
    }
}

impl From<Keyword> for String {
    fn from(k: Keyword) -> Self {
        match k {
            Keyword::Include(p) => p,
            Keyword::Exclude(p) => format!("{}{}", EXCLUSION_MARKER, p),
        }
    }
}

/// An organizer of events, recognized by its keywords.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// Declaration order is match priority.
    pub keywords: Vec<Keyword>,
    /// Events attributed to this organization, in registration order.
    #[serde(default)]
    pub events: Vec<EventId>,
}

impl Organization {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        keywords: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keywords: keywords.into_iter().map(|k| Keyword::parse(k.as_ref())).collect(),
            events: Vec::new(),
        }
    }

    /// Organization created for an unrecognized location: the location is its id, name and sole keyword.
    pub fn from_location(location: &str) -> Self {
        Self {
            id: location.to_string(),
            name: location.to_string(),
            keywords: vec![Keyword::Include(location.to_string())],
            events: Vec::new(),
        }
    }
}
