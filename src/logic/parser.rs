//! Record parsing: delimited text into validated rows, rows grouped by match number.

use crate::models::{Event, EventId, IntakeError, MatchId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

/// Fields per record.
pub const FIELD_COUNT: usize = 13;

/// Default field delimiter of the match history export.
pub const DEFAULT_DELIMITER: u8 = b'|';

/// Most games a single row may account for.
pub const MAX_GAMES_PER_ROW: u32 = 1000;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// One validated row of the match history.
///
/// Field order: match number, player 1 name, player 1 score, player 2 score,
/// player 2 name, best-of, player count, event name, edition, timestamp,
/// round, location, match type.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchRecord {
    /// Line in the source text (the header is line 1).
    pub line: u64,
    pub match_id: MatchId,
    pub p1_name: String,
    pub p1_score: u32,
    pub p2_score: u32,
    pub p2_name: String,
    /// Carried but not interpreted.
    pub best_of: String,
    /// Carried but not interpreted; arity comes from grouping.
    pub declared_players: String,
    pub event_name: String,
    pub event_edition: String,
    pub timestamp: NaiveDateTime,
    /// Carried but not interpreted.
    pub round: String,
    pub location: String,
    pub competitive: bool,
}

impl MatchRecord {
    /// Validate one raw record.
    pub fn from_fields(line: u64, fields: &StringRecord) -> Result<Self, IntakeError> {
        if fields.len() != FIELD_COUNT {
            return Err(invalid(
                line,
                format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            ));
        }
        let field = |i: usize| fields.get(i).unwrap_or_default().to_string();

        let match_id = field(0);
        if match_id.is_empty() {
            return Err(invalid(line, "empty match number"));
        }
        let p1_name = field(1);
        let p2_name = field(4);
        if p1_name.is_empty() || p2_name.is_empty() {
            return Err(invalid(line, "empty player name"));
        }

        let record = Self {
            line,
            match_id,
            p1_score: parse_score(line, "player 1 score", &field(2))?,
            p2_score: parse_score(line, "player 2 score", &field(3))?,
            p1_name,
            p2_name,
            best_of: field(5),
            declared_players: field(6),
            event_name: field(7),
            event_edition: field(8),
            timestamp: parse_timestamp(&field(9))
                .ok_or_else(|| invalid(line, format!("unparsable timestamp {:?}", field(9))))?,
            round: field(10),
            location: field(11),
            competitive: is_competitive(&field(12)),
        };
        record.game_total()?;
        Ok(record)
    }

    /// Games this row accounts for. Fails when the scores overflow or exceed `MAX_GAMES_PER_ROW`.
    pub fn game_total(&self) -> Result<u32, IntakeError> {
        match self.p1_score.checked_add(self.p2_score) {
            Some(total) if total <= MAX_GAMES_PER_ROW => Ok(total),
            _ => Err(invalid(
                self.line,
                format!(
                    "score {}-{} exceeds {} games",
                    self.p1_score, self.p2_score, MAX_GAMES_PER_ROW
                ),
            )),
        }
    }

    pub fn event_id(&self) -> EventId {
        Event::event_id(&self.event_name, &self.event_edition)
    }
}

pub(crate) fn invalid(line: u64, reason: impl Into<String>) -> IntakeError {
    IntakeError::InvalidRecord {
        line,
        reason: reason.into(),
    }
}

fn parse_score(line: u64, what: &str, raw: &str) -> Result<u32, IntakeError> {
    raw.parse::<u32>()
        .map_err(|_| invalid(line, format!("{} {:?} is not a non-negative integer", what, raw)))
}

/// Parse the ISO-like timestamps found in the log. Date-only values become midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `C` or `Competitive` (any case) marks a competitive match; anything else is friendly.
pub fn is_competitive(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("c") || flag.eq_ignore_ascii_case("competitive")
}

/// Maps byte offsets to 1-based line numbers. The csv reader's own line count is not
/// reliable with `\r\n` terminators.
struct LineIndex {
    starts: Vec<u64>,
}

impl LineIndex {
    fn new(input: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(i, _)| i as u64 + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, byte: u64) -> u64 {
        self.starts.partition_point(|&start| start <= byte) as u64
    }
}

/// Parsed rows plus the rows that failed validation.
#[derive(Clone, Debug, Default)]
pub struct ParsedLog {
    pub records: Vec<MatchRecord>,
    pub errors: Vec<IntakeError>,
}

/// Split raw text into validated records. The first line is a header and is discarded.
/// Blank lines are skipped; a bad row is reported and does not stop the scan.
pub fn parse_records(input: &str, delimiter: u8) -> ParsedLog {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let lines = LineIndex::new(input);
    let mut parsed = ParsedLog::default();
    for result in reader.records() {
        match result {
            Ok(fields) => {
                let line = fields
                    .position()
                    .map(|p| lines.line_of(p.byte()))
                    .unwrap_or_default();
                match MatchRecord::from_fields(line, &fields) {
                    Ok(record) => parsed.records.push(record),
                    Err(e) => parsed.errors.push(e),
                }
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| lines.line_of(p.byte()))
                    .unwrap_or_default();
                parsed.errors.push(invalid(line, e.to_string()));
            }
        }
    }
    log::debug!(
        "Parsed {} records ({} rejected)",
        parsed.records.len(),
        parsed.errors.len()
    );
    parsed
}

/// Rows of one match number.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordGroup {
    /// One row: a head-to-head match.
    TwoPlayer(MatchRecord),
    /// Three rows: the pairwise tallies of a three-player match.
    ThreePlayer([MatchRecord; 3]),
}

impl RecordGroup {
    pub fn match_id(&self) -> &str {
        &self.lead().match_id
    }

    /// First row seen for this match; event and timestamp come from it.
    pub fn lead(&self) -> &MatchRecord {
        match self {
            RecordGroup::TwoPlayer(r) => r,
            RecordGroup::ThreePlayer(rows) => &rows[0],
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            RecordGroup::TwoPlayer(_) => 2,
            RecordGroup::ThreePlayer(_) => 3,
        }
    }
}

/// Group rows by match number in a single left-to-right scan, keeping first-seen order.
/// A match number must occur exactly once or exactly three times; any other count is a
/// `MalformedMatch`.
pub fn group_records(records: Vec<MatchRecord>) -> Vec<Result<RecordGroup, IntakeError>> {
    let mut order: Vec<Vec<MatchRecord>> = Vec::new();
    let mut index: HashMap<MatchId, usize> = HashMap::new();

    for record in records {
        match index.get(&record.match_id) {
            Some(&i) => order[i].push(record),
            None => {
                index.insert(record.match_id.clone(), order.len());
                order.push(vec![record]);
            }
        }
    }

    order
        .into_iter()
        .map(|mut rows| match rows.len() {
            1 => Ok(RecordGroup::TwoPlayer(rows.remove(0))),
            3 => <[MatchRecord; 3]>::try_from(rows)
                .map(RecordGroup::ThreePlayer)
                .map_err(|rows| malformed_count(&rows)),
            _ => Err(malformed_count(&rows)),
        })
        .collect()
}

fn malformed_count(rows: &[MatchRecord]) -> IntakeError {
    IntakeError::MalformedMatch {
        match_id: rows.first().map(|r| r.match_id.clone()).unwrap_or_default(),
        reason: format!("appears {} times, expected 1 or 3", rows.len()),
    }
}
