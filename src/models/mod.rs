//! Data structures for the reconstructed match history: organizations, events, matches, run state.

mod event;
mod game;
mod organization;
mod state;

pub use event::{Event, EventId};
pub use game::{
    Game, Match, MatchId, PairwiseTally, PlayerName, PlayerResult, Standing, ThreePlayerSummary,
    UnresolvedReason,
};
pub use organization::{Keyword, Organization, OrganizationId, EXCLUSION_MARKER};
pub use state::{Diagnostics, IntakeError, IntakeState};
