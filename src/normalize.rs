use std::collections::HashSet;

use chrono::NaiveDate;

use crate::record::{StandingRecord, parse_cell};
use crate::table::RawStandingsTable;

/// Long-form row produced from one parseable cell of the raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    /// Rank slot the team occupied on this date, 1-based.
    pub rank: u32,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub games_played: u32,
    /// `wins / games_played`; NaN when no games have been played yet.
    pub win_fraction: f64,
}

/// Flatten a raw standings-by-date table into deduplicated long-form rows.
///
/// Rows are visited in the source's chronological order and cells in rank
/// order, so the output is ascending by date and, within a date, by rank.
/// Blank or malformed cells are skipped: an empty slot means the team had
/// not reached that rank yet, not that the table is broken.
///
/// Sources snapshot standings more often than games are played, so a team
/// reappears with an unchanged record on later dates. Only the first row
/// per `(team, games_played)` is kept; the later repeats carry no new
/// information and would flatten the plotted series.
pub fn normalize_table(table: &RawStandingsTable) -> Vec<NormalizedRow> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    let mut rows = Vec::new();

    for date_row in &table.rows {
        for (slot, cell) in date_row.cells.iter().enumerate() {
            let Some(text) = cell.as_deref() else {
                continue;
            };
            let Some(record) = parse_cell(text) else {
                continue;
            };
            if !seen.insert((record.team.clone(), record.games_played())) {
                continue;
            }
            rows.push(to_row(date_row.date, slot as u32 + 1, &record));
        }
    }

    rows
}

fn to_row(date: NaiveDate, rank: u32, record: &StandingRecord) -> NormalizedRow {
    NormalizedRow {
        date,
        rank,
        team: record.team.clone(),
        wins: record.wins,
        losses: record.losses,
        games_played: record.games_played(),
        win_fraction: record.win_fraction(),
    }
}
