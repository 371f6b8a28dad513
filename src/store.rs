//! Interface of the downstream record store, and an in-memory implementation.
//!
//! Creates are upserts keyed by natural id (organization id, event id, match number), so
//! persisting the same run twice leaves the store unchanged. Elo snapshots are written by
//! the rating service and only looked up here.

use crate::models::{
    Event, EventId, Game, IntakeState, Match, MatchId, Organization, OrganizationId, PlayerName,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rating change of one player in one match, under one rating version.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EloSnapshot {
    pub version: String,
    pub match_id: MatchId,
    pub player: PlayerName,
    pub rating_before: f64,
    pub rating_after: f64,
}

impl EloSnapshot {
    pub fn delta(&self) -> f64 {
        self.rating_after - self.rating_before
    }
}

pub trait RecordStore {
    fn upsert_organization(&mut self, org: &Organization);
    fn upsert_event(&mut self, event: &Event);
    fn upsert_match(&mut self, m: &Match);
    fn upsert_elo_snapshot(&mut self, snapshot: EloSnapshot);

    fn organization(&self, id: &str) -> Option<Organization>;
    fn event(&self, id: &str) -> Option<Event>;
    fn match_by_id(&self, id: &str) -> Option<Match>;

    fn events_of(&self, organization_id: &str) -> Vec<Event>;
    fn matches_of_event(&self, event_id: &str) -> Vec<Match>;
    fn games_of_match(&self, match_id: &str) -> Vec<Game>;
    fn event_of_match(&self, match_id: &str) -> Option<Event>;
    fn elo_changes(&self, version: &str, match_id: &str) -> Vec<EloSnapshot>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    organizations: HashMap<OrganizationId, Organization>,
    events: HashMap<EventId, Event>,
    matches: HashMap<MatchId, Match>,
    elo: HashMap<(String, MatchId), Vec<EloSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

impl RecordStore for MemoryStore {
    fn upsert_organization(&mut self, org: &Organization) {
        self.organizations.insert(org.id.clone(), org.clone());
    }

    fn upsert_event(&mut self, event: &Event) {
        self.events.insert(event.id.clone(), event.clone());
    }

    fn upsert_match(&mut self, m: &Match) {
        self.matches.insert(m.id.clone(), m.clone());
    }

    fn upsert_elo_snapshot(&mut self, snapshot: EloSnapshot) {
        let rows = self
            .elo
            .entry((snapshot.version.clone(), snapshot.match_id.clone()))
            .or_default();
        match rows.iter_mut().find(|s| s.player == snapshot.player) {
            Some(existing) => *existing = snapshot,
            None => rows.push(snapshot),
        }
    }

    fn organization(&self, id: &str) -> Option<Organization> {
        self.organizations.get(id).cloned()
    }

    fn event(&self, id: &str) -> Option<Event> {
        self.events.get(id).cloned()
    }

    fn match_by_id(&self, id: &str) -> Option<Match> {
        self.matches.get(id).cloned()
    }

    fn events_of(&self, organization_id: &str) -> Vec<Event> {
        self.organizations
            .get(organization_id)
            .map(|org| {
                org.events
                    .iter()
                    .filter_map(|id| self.events.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn matches_of_event(&self, event_id: &str) -> Vec<Match> {
        self.events
            .get(event_id)
            .map(|e| {
                e.matches
                    .iter()
                    .filter_map(|id| self.matches.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn games_of_match(&self, match_id: &str) -> Vec<Game> {
        self.matches
            .get(match_id)
            .map(|m| m.games.clone())
            .unwrap_or_default()
    }

    fn event_of_match(&self, match_id: &str) -> Option<Event> {
        let m = self.matches.get(match_id)?;
        self.events.get(&m.event).cloned()
    }

    fn elo_changes(&self, version: &str, match_id: &str) -> Vec<EloSnapshot> {
        self.elo
            .get(&(version.to_string(), match_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

impl IntakeState {
    /// Write every entity of the run to `store`, parents before children.
    pub fn persist<S: RecordStore>(&self, store: &mut S) {
        for org in &self.organizations {
            store.upsert_organization(org);
        }
        for event in &self.events {
            store.upsert_event(event);
        }
        for m in &self.matches {
            store.upsert_match(m);
        }
        log::info!(
            "Persisted {} organizations, {} events, {} matches",
            self.organizations.len(),
            self.events.len(),
            self.matches.len()
        );
    }
}
