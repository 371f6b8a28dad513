//! Three-player matches: infer a finishing order from three pairwise tallies.
//!
//! The log stores a three-player match as three head-to-head rows (A-B, A-C, B-C), each
//! counting how often one player finished ahead of the other over the whole match. The
//! majority of each pair gives three comparisons; when they are transitive they determine
//! a single order, which is recorded as the match's representative standing. Cyclic
//! comparisons and tied pairs have no such order and are reported instead of guessed.
//!
//! Which game each head-to-head win came from is not recoverable from the tallies, so no
//! per-game placings are produced. Sweeps (a pair with a zero side) are flagged.

use crate::logic::parser::MatchRecord;
use crate::models::{
    IntakeError, Match, MatchId, PairwiseTally, PlayerName, Standing, ThreePlayerSummary,
    UnresolvedReason,
};
use std::collections::BTreeMap;

/// Canonical position of a player; seats follow lexicographic name order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Seat {
    A,
    B,
    C,
}

/// Total order from the three pairwise comparisons, best first.
/// `None` for the two cyclic combinations (A>B, B>C, C>A and its reverse).
pub fn order_from_comparisons(a_beats_b: bool, a_beats_c: bool, b_beats_c: bool) -> Option<[Seat; 3]> {
    use Seat::*;
    match (a_beats_b, a_beats_c, b_beats_c) {
        (true, true, true) => Some([A, B, C]),
        (true, true, false) => Some([A, C, B]),
        (true, false, false) => Some([C, A, B]),
        (false, true, true) => Some([B, A, C]),
        (false, false, true) => Some([B, C, A]),
        (false, false, false) => Some([C, B, A]),
        (true, false, true) | (false, true, false) => None,
    }
}

/// Canonical pairwise tallies of a triple, in row order, plus the three players sorted.
///
/// The rows must name exactly three distinct players, each in exactly two rows.
pub fn canonical_tallies(
    rows: &[MatchRecord; 3],
) -> Result<([PlayerName; 3], Vec<PairwiseTally>), IntakeError> {
    let match_id = &rows[0].match_id;
    let malformed = |reason: String| IntakeError::MalformedMatch {
        match_id: match_id.clone(),
        reason,
    };

    let tallies: Vec<PairwiseTally> = rows
        .iter()
        .map(|r| PairwiseTally::canonical(&r.p1_name, r.p1_score, &r.p2_name, r.p2_score))
        .collect();

    let mut appearances: BTreeMap<&str, usize> = BTreeMap::new();
    for t in &tallies {
        if t.low == t.high {
            return Err(malformed(format!("{} is paired with themselves", t.low)));
        }
        *appearances.entry(t.low.as_str()).or_default() += 1;
        *appearances.entry(t.high.as_str()).or_default() += 1;
    }
    if appearances.len() != 3 {
        return Err(malformed(format!(
            "rows name {} distinct players, expected 3",
            appearances.len()
        )));
    }
    if let Some((name, n)) = appearances.iter().find(|&(_, &n)| n != 2) {
        return Err(malformed(format!("{} appears in {} pairs, expected 2", name, n)));
    }

    let names: Vec<PlayerName> = appearances.keys().map(|n| n.to_string()).collect();
    let players = [names[0].clone(), names[1].clone(), names[2].clone()];
    Ok((players, tallies))
}

fn tally_between<'a>(tallies: &'a [PairwiseTally], low: &str, high: &str) -> Option<&'a PairwiseTally> {
    tallies.iter().find(|t| t.low == low && t.high == high)
}

/// Infer the finishing order of a well-formed triple.
///
/// `players` must be sorted and `tallies` canonical (see `canonical_tallies`).
pub fn infer_standing(
    match_id: &str,
    players: &[PlayerName; 3],
    tallies: &[PairwiseTally],
) -> Result<[PlayerName; 3], IntakeError> {
    let ambiguous = |reason: UnresolvedReason| IntakeError::AmbiguousStandings {
        match_id: match_id.to_string(),
        reason,
    };
    let [a, b, c] = players;

    let mut beats = [false; 3];
    for (slot, (low, high)) in [(a, b), (a, c), (b, c)].into_iter().enumerate() {
        let t = tally_between(tallies, low, high).ok_or_else(|| IntakeError::MalformedMatch {
            match_id: match_id.to_string(),
            reason: format!("no tally between {} and {}", low, high),
        })?;
        if t.low_wins == t.high_wins {
            return Err(ambiguous(UnresolvedReason::TiedPair {
                low: t.low.clone(),
                high: t.high.clone(),
            }));
        }
        beats[slot] = t.low_wins > t.high_wins;
    }

    let order = order_from_comparisons(beats[0], beats[1], beats[2])
        .ok_or_else(|| ambiguous(UnresolvedReason::Cyclic))?;
    Ok(order.map(|seat| match seat {
        Seat::A => a.clone(),
        Seat::B => b.clone(),
        Seat::C => c.clone(),
    }))
}

/// Build the match for a three-row group.
///
/// A malformed triple, a row with no games, or a row whose scores fail
/// `MatchRecord::game_total` is an error and yields no match. Otherwise the match is
/// returned with any non-fatal findings: `DataInconsistency` when the pairwise totals disagree
/// (the first row's total is used) and `AmbiguousStandings` when no order exists.
pub fn resolve_match(rows: &[MatchRecord; 3]) -> Result<(Match, Vec<IntakeError>), IntakeError> {
    let lead = &rows[0];
    let match_id: MatchId = lead.match_id.clone();
    let (players, tallies) = canonical_tallies(rows)?;
    let mut issues = Vec::new();

    let totals = rows
        .iter()
        .map(MatchRecord::game_total)
        .collect::<Result<Vec<u32>, IntakeError>>()?;
    if let Some(row) = rows.iter().zip(&totals).find(|&(_, &t)| t == 0).map(|(r, _)| r) {
        return Err(IntakeError::MalformedMatch {
            match_id,
            reason: format!("{} vs {} records no games", row.p1_name, row.p2_name),
        });
    }
    let game_count = totals[0];
    if totals.iter().any(|&t| t != game_count) {
        issues.push(IntakeError::DataInconsistency {
            match_id: match_id.clone(),
            totals: [totals[0], totals[1], totals[2]],
        });
    }

    let standing = match infer_standing(&match_id, &players, &tallies) {
        Ok(order) => {
            log::debug!("Match {} standing {:?}", match_id, order);
            Standing::Resolved(order)
        }
        Err(IntakeError::AmbiguousStandings { match_id, reason }) => {
            let standing = Standing::Unresolved(reason.clone());
            issues.push(IntakeError::AmbiguousStandings { match_id, reason });
            standing
        }
        Err(e) => return Err(e),
    };

    let swept = tallies.iter().any(PairwiseTally::is_sweep);
    let m = Match {
        id: match_id,
        event: lead.event_id(),
        competitive: lead.competitive,
        timestamp: lead.timestamp,
        players: players.to_vec(),
        games: Vec::new(),
        three_player: Some(ThreePlayerSummary {
            tallies,
            game_count,
            swept,
            standing,
        }),
    };
    Ok((m, issues))
}
