//! Two-player matches: expand an aggregate score into individual games.

use crate::logic::parser::{invalid, MatchRecord};
use crate::models::{Game, IntakeError, Match, PlayerResult};

/// Expand a final score into `p1_wins + p2_wins` games, winner rank 1 and loser rank 2.
///
/// Games are grouped by winner: all of player 1's wins first, then player 2's. The log
/// only keeps the final score, so this is not the order the games were played in.
pub fn expand_games(p1: &str, p1_wins: u32, p2: &str, p2_wins: u32) -> Vec<Game> {
    let p1_won = head_to_head(p1, p2, true);
    let p2_won = head_to_head(p1, p2, false);
    std::iter::repeat(p1_won)
        .take(p1_wins as usize)
        .chain(std::iter::repeat(p2_won).take(p2_wins as usize))
        .collect()
}

/// Results listed in column order (player 1 then player 2) whoever won.
fn head_to_head(p1: &str, p2: &str, p1_won: bool) -> Game {
    let (r1, r2) = if p1_won { (1, 2) } else { (2, 1) };
    Game {
        results: vec![
            PlayerResult { player: p1.to_string(), rank: r1 },
            PlayerResult { player: p2.to_string(), rank: r2 },
        ],
    }
}

/// Build the match for a single-row group. A row with no games, or more than
/// `MAX_GAMES_PER_ROW`, is an `InvalidRecord`.
pub fn expand_match(record: &MatchRecord) -> Result<Match, IntakeError> {
    if record.game_total()? == 0 {
        return Err(invalid(record.line, "score 0-0 records no games"));
    }
    Ok(Match {
        id: record.match_id.clone(),
        event: record.event_id(),
        competitive: record.competitive,
        timestamp: record.timestamp,
        players: vec![record.p1_name.clone(), record.p2_name.clone()],
        games: expand_games(
            &record.p1_name,
            record.p1_score,
            &record.p2_name,
            record.p2_score,
        ),
        three_player: None,
    })
}
