//! Pipeline driver: parse, group, register events, reconstruct matches, report.

use crate::logic::parser::{self, RecordGroup};
use crate::logic::registry::get_or_create_event;
use crate::logic::{three_player, two_player};
use crate::models::{Diagnostics, IntakeState};
use serde::Serialize;

/// Result of one run: the entity maps and the diagnostics report.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IntakeOutput {
    pub state: IntakeState,
    pub diagnostics: Diagnostics,
}

/// Run the whole pipeline over `input` with no seed organizations.
pub fn run(input: &str, delimiter: u8) -> IntakeOutput {
    run_with_state(IntakeState::new(), input, delimiter)
}

/// Run the pipeline on top of `state` (typically seeded with organizations).
///
/// Failures are isolated per record or per match and end up in the diagnostics; the run
/// always completes.
pub fn run_with_state(state: IntakeState, input: &str, delimiter: u8) -> IntakeOutput {
    let mut out = IntakeOutput {
        state,
        diagnostics: Diagnostics::default(),
    };

    let parsed = parser::parse_records(input, delimiter);
    for err in parsed.errors {
        out.diagnostics.record(err);
    }

    for group in parser::group_records(parsed.records) {
        match group {
            Ok(group) => process_group(&mut out, &group),
            Err(e) => out.diagnostics.record(e),
        }
    }

    let d = &out.diagnostics;
    log::info!(
        "Total matches: {}, 3 player matches: {}, swept matches: {}",
        d.total_matches,
        d.three_player_matches,
        d.swept_matches
    );
    if !d.is_clean() {
        log::info!(
            "Rejected records: {}, malformed: {}, inconsistent: {}, ambiguous: {}",
            d.invalid_records.len(),
            d.malformed_matches.len(),
            d.inconsistent_matches.len(),
            d.ambiguous_matches.len()
        );
    }
    out
}

/// Reconstruct the group's match and register its event.
///
/// Events exist only for groups that produce a match: a group rejected here, like one
/// rejected by grouping, leaves no trace besides its diagnostic. A match number already
/// in the state is logged and skipped.
pub fn process_group(out: &mut IntakeOutput, group: &RecordGroup) {
    let built = match group {
        RecordGroup::TwoPlayer(record) => two_player::expand_match(record).map(|m| (m, Vec::new())),
        RecordGroup::ThreePlayer(rows) => three_player::resolve_match(rows),
    };
    let (m, issues) = match built {
        Ok(built) => built,
        Err(e) => {
            out.diagnostics.record(e);
            return;
        }
    };
    if out.state.match_by_id(&m.id).is_some() {
        log::warn!("Match {} already recorded, skipping", m.id);
        return;
    }
    for issue in issues {
        out.diagnostics.record(issue);
    }

    let lead = group.lead();
    get_or_create_event(
        &mut out.state,
        &lead.event_name,
        &lead.event_edition,
        &lead.location,
    );

    let swept = m.three_player.as_ref().map(|s| s.swept);
    out.state.insert_match(m);
    out.diagnostics.total_matches += 1;
    if let Some(swept) = swept {
        out.diagnostics.three_player_matches += 1;
        if swept {
            out.diagnostics.swept_matches += 1;
        }
    }
}
