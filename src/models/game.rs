//! Match, Game, PlayerResult, and the inferred standing of three-player matches.

use crate::models::event::EventId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Match number from the source log.
pub type MatchId = String;

/// Player identifier (the name as written in the log).
pub type PlayerName = String;

/// One participant's placing in a game. Rank 1 is the winner.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player: PlayerName,
    pub rank: u8,
}

/// A single game: one result per participant, ranks a permutation of 1..=n.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub results: Vec<PlayerResult>,
}

impl Game {
    pub fn winner(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.rank == 1)
            .map(|r| r.player.as_str())
    }

    pub fn rank_of(&self, player: &str) -> Option<u8> {
        self.results.iter().find(|r| r.player == player).map(|r| r.rank)
    }
}

/// Head-to-head tally between two players across a whole match, names in lexicographic order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairwiseTally {
    pub low: PlayerName,
    pub high: PlayerName,
    /// Games `low` won against `high`.
    pub low_wins: u32,
    /// Games `high` won against `low`.
    pub high_wins: u32,
}

impl PairwiseTally {
    /// Canonicalize a row's pair: names sorted, scores following their names.
    pub fn canonical(p1: &str, p1_wins: u32, p2: &str, p2_wins: u32) -> Self {
        if p1 <= p2 {
            Self { low: p1.to_string(), high: p2.to_string(), low_wins: p1_wins, high_wins: p2_wins }
        } else {
            Self { low: p2.to_string(), high: p1.to_string(), low_wins: p2_wins, high_wins: p1_wins }
        }
    }

    /// Any zero side marks a sweep.
    pub fn is_sweep(&self) -> bool {
        self.low_wins == 0 || self.high_wins == 0
    }

    /// Wins of `player` over the other member of the pair.
    pub fn wins_of(&self, player: &str) -> Option<u32> {
        if self.low == player {
            Some(self.low_wins)
        } else if self.high == player {
            Some(self.high_wins)
        } else {
            None
        }
    }
}

/// Why a three-player match has no inferred order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// Pairwise majorities form a cycle (A>B, B>C, C>A or the reverse).
    Cyclic,
    /// Two players split their head-to-head games evenly.
    TiedPair { low: PlayerName, high: PlayerName },
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::Cyclic => write!(f, "pairwise results are cyclic"),
            UnresolvedReason::TiedPair { low, high } => {
                write!(f, "{} and {} are tied head-to-head", low, high)
            }
        }
    }
}

/// Representative finishing order of a three-player match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// 1st, 2nd, 3rd.
    Resolved([PlayerName; 3]),
    Unresolved(UnresolvedReason),
}

impl Standing {
    pub fn order(&self) -> Option<&[PlayerName; 3]> {
        match self {
            Standing::Resolved(order) => Some(order),
            Standing::Unresolved(_) => None,
        }
    }
}

/// Aggregate data of a three-player match. Per-game placings are not materialized:
/// the tallies do not say which game each head-to-head win came from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThreePlayerSummary {
    pub tallies: Vec<PairwiseTally>,
    /// Games played, taken from the first row's pair.
    pub game_count: u32,
    pub swept: bool,
    pub standing: Standing,
}

/// A match between two or three players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub event: EventId,
    pub competitive: bool,
    pub timestamp: NaiveDateTime,
    pub players: Vec<PlayerName>,
    /// Individual games. Empty for three-player matches (see `three_player`).
    pub games: Vec<Game>,
    pub three_player: Option<ThreePlayerSummary>,
}

impl Match {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Games won by `player`, counted from rank-1 results.
    pub fn wins_of(&self, player: &str) -> usize {
        self.games
            .iter()
            .filter(|g| g.winner() == Some(player))
            .count()
    }
}
