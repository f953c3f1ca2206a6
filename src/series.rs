use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::normalize::NormalizedRow;

/// One team's win-fraction series, aligned on the table's shared date axis.
/// `values[i]` pairs with `dates[i]` of the owning table; `None` marks dates
/// where the team has no (deduplicated) snapshot.
#[derive(Debug, Clone)]
pub struct TeamColumn {
    pub team: String,
    pub final_rank: u32,
    pub values: Vec<Option<f64>>,
}

/// Win-fraction series per team, columns ordered by final-standing rank.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<TeamColumn>,
}

impl SeriesTable {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// Team codes in column order.
    pub fn team_order(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.team.as_str()).collect()
    }

    /// A team's `(date, win_fraction)` points in chronological order,
    /// with absent dates skipped.
    pub fn team_points(&self, column: &TeamColumn) -> Vec<(NaiveDate, f64)> {
        self.dates
            .iter()
            .zip(column.values.iter())
            .filter_map(|(date, value)| value.map(|v| (*date, v)))
            .collect()
    }
}

/// Final standings: the rows at the maximum games-played value anywhere in
/// the table, rank ascending with team-code tie-break. Comparing at max GP
/// rather than the last date keeps the ordering stable when teams reach
/// their final record on different real dates.
pub fn final_standings(rows: &[NormalizedRow]) -> Vec<&NormalizedRow> {
    let Some(max_gp) = rows.iter().map(|r| r.games_played).max() else {
        return Vec::new();
    };

    let mut finals: Vec<&NormalizedRow> =
        rows.iter().filter(|r| r.games_played == max_gp).collect();
    finals.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.team.cmp(&b.team)));

    // A team cannot hold two ranks in one snapshot in well-formed data, but
    // a malformed table must still yield one column per team.
    let mut seen: HashSet<&str> = HashSet::new();
    finals.retain(|r| seen.insert(r.team.as_str()));
    finals
}

/// Pivot normalized rows into one win-fraction series per team.
///
/// The team set and column order come from the final standings; teams that
/// dropped out of the table before the final snapshot are not plotted.
/// Series are not interpolated — a date with no snapshot for a team is a
/// gap, and a 0-games snapshot keeps its NaN value.
pub fn build_series(rows: &[NormalizedRow]) -> SeriesTable {
    let finals = final_standings(rows);
    if finals.is_empty() {
        return SeriesTable::default();
    }

    let mut dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    dates.sort_unstable();
    dates.dedup();

    let mut by_team: HashMap<&str, HashMap<NaiveDate, f64>> = HashMap::new();
    for row in rows {
        by_team
            .entry(row.team.as_str())
            .or_default()
            .insert(row.date, row.win_fraction);
    }

    let columns = finals
        .iter()
        .map(|f| {
            let team_rows = by_team.get(f.team.as_str());
            let values = dates
                .iter()
                .map(|d| team_rows.and_then(|m| m.get(d).copied()))
                .collect();
            TeamColumn {
                team: f.team.clone(),
                final_rank: f.rank,
                values,
            }
        })
        .collect();

    SeriesTable { dates, columns }
}
