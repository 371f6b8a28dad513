//! Match history intake: rebuilds events, organizations, matches and games from a
//! pipe-delimited match log, inferring standings of three-player matches.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{ConfigError, IntakeConfig};
pub use logic::{
    classify, expand_games, expand_match, get_or_create_event, group_records, infer_standing,
    order_from_comparisons, parse_records, process_group, resolve, resolve_match, run,
    run_with_state, Classification, IntakeOutput, MatchRecord, ParsedLog, RecordGroup, Seat,
    MAX_GAMES_PER_ROW,
};
pub use models::{
    Diagnostics, Event, EventId, Game, IntakeError, IntakeState, Keyword, Match, MatchId,
    Organization, OrganizationId, PairwiseTally, PlayerName, PlayerResult, Standing,
    ThreePlayerSummary, UnresolvedReason,
};
pub use store::{EloSnapshot, MemoryStore, RecordStore};
