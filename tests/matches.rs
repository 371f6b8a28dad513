//! Integration tests for two-player expansion and three-player standing inference.

use match_history_intake::{
    expand_games, expand_match, order_from_comparisons, resolve_match, IntakeError, MatchRecord,
    Seat, Standing, UnresolvedReason,
};

fn record(match_id: &str, p1: &str, s1: u32, s2: u32, p2: &str) -> MatchRecord {
    MatchRecord {
        line: 2,
        match_id: match_id.to_string(),
        p1_name: p1.to_string(),
        p1_score: s1,
        p2_score: s2,
        p2_name: p2.to_string(),
        best_of: String::new(),
        declared_players: "3".to_string(),
        event_name: "Cup".to_string(),
        event_edition: "2024".to_string(),
        timestamp: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        round: String::new(),
        location: "Arena".to_string(),
        competitive: true,
    }
}

/// Ann/Ben/Cal triple where each pair is 3-1 for the side the flag names.
fn triple(ann_beats_ben: bool, ann_beats_cal: bool, ben_beats_cal: bool) -> [MatchRecord; 3] {
    let score = |first_wins: bool| if first_wins { (3, 1) } else { (1, 3) };
    let (ab1, ab2) = score(ann_beats_ben);
    let (ac1, ac2) = score(ann_beats_cal);
    let (bc1, bc2) = score(ben_beats_cal);
    [
        record("m", "Ann", ab1, ab2, "Ben"),
        record("m", "Ann", ac1, ac2, "Cal"),
        record("m", "Ben", bc1, bc2, "Cal"),
    ]
}

fn standing_of(rows: &[MatchRecord; 3]) -> Standing {
    let (m, _) = resolve_match(rows).unwrap();
    m.three_player.unwrap().standing
}

#[test]
fn two_player_game_count_and_wins_match_the_score() {
    for (s1, s2) in [(3, 1), (0, 2), (5, 0), (4, 4)] {
        let games = expand_games("Alice", s1, "Bob", s2);
        assert_eq!(games.len(), (s1 + s2) as usize);
        let alice = games.iter().filter(|g| g.winner() == Some("Alice")).count();
        let bob = games.iter().filter(|g| g.winner() == Some("Bob")).count();
        assert_eq!(alice, s1 as usize);
        assert_eq!(bob, s2 as usize);
    }
}

#[test]
fn two_player_games_are_grouped_by_winner() {
    let games = expand_games("Alice", 2, "Bob", 1);
    let winners: Vec<_> = games.iter().map(|g| g.winner().unwrap()).collect();
    assert_eq!(winners, vec!["Alice", "Alice", "Bob"]);
    for g in &games {
        assert_eq!(g.results.len(), 2);
        assert_eq!(g.results[0].player, "Alice");
        let mut ranks: Vec<u8> = g.results.iter().map(|r| r.rank).collect();
        ranks.sort();
        assert_eq!(ranks, vec![1, 2]);
    }
    assert_eq!(games[2].rank_of("Alice"), Some(2));
}

#[test]
fn comparison_table_covers_all_eight_cases() {
    use Seat::*;
    let cases = [
        ((true, true, true), Some([A, B, C])),
        ((true, true, false), Some([A, C, B])),
        ((true, false, false), Some([C, A, B])),
        ((true, false, true), None),
        ((false, true, true), Some([B, A, C])),
        ((false, true, false), None),
        ((false, false, true), Some([B, C, A])),
        ((false, false, false), Some([C, B, A])),
    ];
    for ((ab, ac, bc), expected) in cases {
        assert_eq!(order_from_comparisons(ab, ac, bc), expected, "{} {} {}", ab, ac, bc);
    }
}

#[test]
fn standings_follow_pairwise_majorities() {
    let names = |a: &str, b: &str, c: &str| {
        Standing::Resolved([a.to_string(), b.to_string(), c.to_string()])
    };
    assert_eq!(standing_of(&triple(true, true, true)), names("Ann", "Ben", "Cal"));
    assert_eq!(standing_of(&triple(true, true, false)), names("Ann", "Cal", "Ben"));
    assert_eq!(standing_of(&triple(true, false, false)), names("Cal", "Ann", "Ben"));
    assert_eq!(standing_of(&triple(false, true, true)), names("Ben", "Ann", "Cal"));
    assert_eq!(standing_of(&triple(false, false, true)), names("Ben", "Cal", "Ann"));
    assert_eq!(standing_of(&triple(false, false, false)), names("Cal", "Ben", "Ann"));
}

#[test]
fn cyclic_majorities_are_ambiguous() {
    for rows in [triple(true, false, true), triple(false, true, false)] {
        let (m, issues) = resolve_match(&rows).unwrap();
        assert_eq!(
            m.three_player.unwrap().standing,
            Standing::Unresolved(UnresolvedReason::Cyclic)
        );
        assert!(matches!(
            issues.as_slice(),
            [IntakeError::AmbiguousStandings { reason: UnresolvedReason::Cyclic, .. }]
        ));
    }
}

#[test]
fn column_order_does_not_change_the_result() {
    let rows = [
        record("m", "Ben", 1, 3, "Ann"),
        record("m", "Cal", 1, 3, "Ann"),
        record("m", "Cal", 1, 3, "Ben"),
    ];
    assert_eq!(standing_of(&rows), standing_of(&triple(true, true, true)));
}

#[test]
fn three_player_match_summary() {
    let rows = [
        record("m", "Ann", 4, 0, "Ben"),
        record("m", "Ann", 3, 1, "Cal"),
        record("m", "Ben", 1, 3, "Cal"),
    ];
    let (m, issues) = resolve_match(&rows).unwrap();
    assert!(issues.is_empty());
    assert_eq!(m.players, vec!["Ann", "Ben", "Cal"]);
    assert_eq!(m.event, "Cup 2024");
    assert!(m.games.is_empty());
    let summary = m.three_player.unwrap();
    assert_eq!(summary.game_count, 4);
    assert!(summary.swept);
    assert_eq!(summary.tallies.len(), 3);
    assert_eq!(summary.tallies[2].low, "Ben");
    assert_eq!(summary.tallies[2].wins_of("Cal"), Some(3));
}

#[test]
fn disagreeing_totals_are_flagged_but_resolved() {
    let rows = [
        record("m", "Ann", 3, 1, "Ben"),
        record("m", "Ann", 2, 1, "Cal"),
        record("m", "Ben", 3, 1, "Cal"),
    ];
    let (m, issues) = resolve_match(&rows).unwrap();
    assert_eq!(
        issues,
        vec![IntakeError::DataInconsistency {
            match_id: "m".to_string(),
            totals: [4, 3, 4],
        }]
    );
    let summary = m.three_player.unwrap();
    assert_eq!(summary.game_count, 4);
    assert!(summary.standing.order().is_some());
}

#[test]
fn tied_pair_is_ambiguous() {
    let rows = [
        record("m", "Ann", 2, 2, "Ben"),
        record("m", "Ann", 3, 1, "Cal"),
        record("m", "Ben", 3, 1, "Cal"),
    ];
    let (m, issues) = resolve_match(&rows).unwrap();
    let reason = UnresolvedReason::TiedPair {
        low: "Ann".to_string(),
        high: "Ben".to_string(),
    };
    assert_eq!(m.three_player.unwrap().standing, Standing::Unresolved(reason));
    assert_eq!(issues.len(), 1);
}

#[test]
fn four_players_in_a_triple_is_malformed() {
    let rows = [
        record("m", "Ann", 3, 1, "Ben"),
        record("m", "Ann", 3, 1, "Cal"),
        record("m", "Ben", 3, 1, "Dan"),
    ];
    assert!(matches!(
        resolve_match(&rows),
        Err(IntakeError::MalformedMatch { .. })
    ));
}

#[test]
fn repeated_pair_is_malformed() {
    let rows = [
        record("m", "Ann", 3, 1, "Ben"),
        record("m", "Ben", 1, 3, "Ann"),
        record("m", "Ann", 3, 1, "Cal"),
    ];
    assert!(matches!(
        resolve_match(&rows),
        Err(IntakeError::MalformedMatch { .. })
    ));
}

#[test]
fn self_pairing_is_malformed() {
    let rows = [
        record("m", "Ann", 1, 1, "Ann"),
        record("m", "Ann", 3, 1, "Cal"),
        record("m", "Ben", 3, 1, "Cal"),
    ];
    assert!(matches!(
        resolve_match(&rows),
        Err(IntakeError::MalformedMatch { .. })
    ));
}

#[test]
fn two_player_match_from_record() {
    let m = expand_match(&record("1", "Alice", 3, 1, "Bob")).unwrap();
    assert_eq!(m.games.len(), 4);
    assert_eq!(m.wins_of("Alice"), 3);
    assert_eq!(m.players, vec!["Alice", "Bob"]);
}

#[test]
fn scoreless_two_player_match_is_rejected() {
    assert!(matches!(
        expand_match(&record("1", "Alice", 0, 0, "Bob")),
        Err(IntakeError::InvalidRecord { line: 2, .. })
    ));
}

#[test]
fn huge_scores_are_rejected_without_panicking() {
    assert!(matches!(
        expand_match(&record("1", "Alice", u32::MAX, 1, "Bob")),
        Err(IntakeError::InvalidRecord { .. })
    ));

    let rows = [
        record("m", "Ann", u32::MAX, 1, "Ben"),
        record("m", "Ann", 3, 1, "Cal"),
        record("m", "Ben", 3, 1, "Cal"),
    ];
    assert!(matches!(
        resolve_match(&rows),
        Err(IntakeError::InvalidRecord { .. })
    ));
}

#[test]
fn scoreless_pair_makes_a_triple_malformed() {
    let rows = [
        record("m", "Ann", 3, 1, "Ben"),
        record("m", "Ann", 0, 0, "Cal"),
        record("m", "Ben", 3, 1, "Cal"),
    ];
    assert!(matches!(
        resolve_match(&rows),
        Err(IntakeError::MalformedMatch { .. })
    ));
}
