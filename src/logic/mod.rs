//! Reconstruction logic: parsing, organization/event resolution, match expansion and inference.

mod classifier;
mod parser;
mod pipeline;
mod registry;
mod three_player;
mod two_player;

pub use classifier::{classify, resolve, Classification};
pub use parser::{
    group_records, parse_records, MatchRecord, ParsedLog, RecordGroup, DEFAULT_DELIMITER,
    FIELD_COUNT, MAX_GAMES_PER_ROW,
};
pub use pipeline::{process_group, run, run_with_state, IntakeOutput};
pub use registry::get_or_create_event;
pub use three_player::{canonical_tallies, infer_standing, order_from_comparisons, resolve_match, Seat};
pub use two_player::{expand_games, expand_match};
