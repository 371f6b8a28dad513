//! IntakeState (the entity maps of one run), IntakeError, and Diagnostics.

use crate::models::event::{Event, EventId};
use crate::models::game::{Match, MatchId, UnresolvedReason};
use crate::models::organization::{Organization, OrganizationId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors raised while reconstructing the match history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum IntakeError {
    /// A field failed to parse, or the record has the wrong number of fields.
    InvalidRecord { line: u64, reason: String },
    /// A match number does not group into one row or a well-formed triple.
    MalformedMatch { match_id: MatchId, reason: String },
    /// The three pairwise game totals of a three-player match disagree.
    DataInconsistency { match_id: MatchId, totals: [u32; 3] },
    /// Pairwise results admit no total order.
    AmbiguousStandings { match_id: MatchId, reason: UnresolvedReason },
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::InvalidRecord { line, reason } => {
                write!(f, "Invalid record on line {}: {}", line, reason)
            }
            IntakeError::MalformedMatch { match_id, reason } => {
                write!(f, "Malformed match {}: {}", match_id, reason)
            }
            IntakeError::DataInconsistency { match_id, totals } => write!(
                f,
                "Match {} has inconsistent pairwise totals {:?}",
                match_id, totals
            ),
            IntakeError::AmbiguousStandings { match_id, reason } => {
                write!(f, "Match {} has no standing: {}", match_id, reason)
            }
        }
    }
}

impl std::error::Error for IntakeError {}

/// Report produced alongside the entity maps.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub total_matches: usize,
    pub three_player_matches: usize,
    pub swept_matches: usize,
    pub invalid_records: Vec<IntakeError>,
    pub malformed_matches: Vec<IntakeError>,
    pub inconsistent_matches: Vec<IntakeError>,
    pub ambiguous_matches: Vec<IntakeError>,
}

impl Diagnostics {
    /// File an isolated failure under its category.
    pub fn record(&mut self, err: IntakeError) {
        log::warn!("{}", err);
        match err {
            IntakeError::InvalidRecord { .. } => self.invalid_records.push(err),
            IntakeError::MalformedMatch { .. } => self.malformed_matches.push(err),
            IntakeError::DataInconsistency { .. } => self.inconsistent_matches.push(err),
            IntakeError::AmbiguousStandings { .. } => self.ambiguous_matches.push(err),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.invalid_records.is_empty()
            && self.malformed_matches.is_empty()
            && self.inconsistent_matches.is_empty()
            && self.ambiguous_matches.is_empty()
    }

    pub fn malformed_ids(&self) -> Vec<&str> {
        Self::ids(&self.malformed_matches)
    }

    pub fn ambiguous_ids(&self) -> Vec<&str> {
        Self::ids(&self.ambiguous_matches)
    }

    pub fn inconsistent_ids(&self) -> Vec<&str> {
        Self::ids(&self.inconsistent_matches)
    }

    fn ids(errors: &[IntakeError]) -> Vec<&str> {
        errors
            .iter()
            .filter_map(|e| match e {
                IntakeError::MalformedMatch { match_id, .. }
                | IntakeError::DataInconsistency { match_id, .. }
                | IntakeError::AmbiguousStandings { match_id, .. } => Some(match_id.as_str()),
                IntakeError::InvalidRecord { .. } => None,
            })
            .collect()
    }
}

/// Entity maps for one run. Created fresh at run start and handed to the caller at the end.
/// Collections keep insertion order; lookups go through the id indexes.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IntakeState {
    pub organizations: Vec<Organization>,
    pub events: Vec<Event>,
    pub matches: Vec<Match>,
    #[serde(skip)]
    organization_index: HashMap<OrganizationId, usize>,
    #[serde(skip)]
    event_index: HashMap<EventId, usize>,
    #[serde(skip)]
    match_index: HashMap<MatchId, usize>,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run with seed organizations, classified in the given order.
    pub fn with_organizations(organizations: Vec<Organization>) -> Self {
        let mut state = Self::new();
        for org in organizations {
            state.insert_organization(org);
        }
        state
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organization_index.get(id).map(|&i| &self.organizations[i])
    }

    pub fn organization_mut(&mut self, id: &str) -> Option<&mut Organization> {
        match self.organization_index.get(id) {
            Some(&i) => Some(&mut self.organizations[i]),
            None => None,
        }
    }

    /// Add an organization; an existing id keeps the first registration.
    pub fn insert_organization(&mut self, org: Organization) -> OrganizationId {
        let id = org.id.clone();
        if !self.organization_index.contains_key(&id) {
            self.organization_index.insert(id.clone(), self.organizations.len());
            self.organizations.push(org);
        }
        id
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.event_index.get(id).map(|&i| &self.events[i])
    }

    pub fn event_mut(&mut self, id: &str) -> Option<&mut Event> {
        match self.event_index.get(id) {
            Some(&i) => Some(&mut self.events[i]),
            None => None,
        }
    }

    pub(crate) fn event_position(&self, id: &str) -> Option<usize> {
        self.event_index.get(id).copied()
    }

    pub(crate) fn insert_event(&mut self, event: Event) -> usize {
        let index = self.events.len();
        self.event_index.insert(event.id.clone(), index);
        self.events.push(event);
        index
    }

    pub fn match_by_id(&self, id: &str) -> Option<&Match> {
        self.match_index.get(id).map(|&i| &self.matches[i])
    }

    /// Store a match and append it to its event. Returns false if the id is already taken.
    pub fn insert_match(&mut self, m: Match) -> bool {
        if self.match_index.contains_key(&m.id) {
            return false;
        }
        if let Some(event) = self.event_mut(&m.event) {
            event.matches.push(m.id.clone());
        }
        self.match_index.insert(m.id.clone(), self.matches.len());
        self.matches.push(m);
        true
    }

    pub fn matches_of_event(&self, event_id: &str) -> Vec<&Match> {
        self.event(event_id)
            .map(|e| e.matches.iter().filter_map(|id| self.match_by_id(id)).collect())
            .unwrap_or_default()
    }
}
