use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::table::{DateRow, RawStandingsTable, is_month_label, parse_standings_date};

/// Load a saved standings-by-date export: one row per snapshot date, first
/// column the date, remaining columns the rank slots.
pub fn load_standings_csv(path: &Path) -> Result<RawStandingsTable> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_standings_csv(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_standings_csv(raw: &str) -> Result<RawStandingsTable> {
    let mut rows = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        let Some((label, slots)) = fields.split_first() else {
            continue;
        };
        // Exports saved from the web page keep its month separator rows.
        if label.trim().is_empty() || is_month_label(label) {
            continue;
        }
        let date = parse_standings_date(label)?;
        rows.push(DateRow {
            date,
            cells: slots
                .iter()
                .map(|cell| {
                    let text = cell.trim();
                    (!text.is_empty()).then(|| text.to_string())
                })
                .collect(),
        });
    }
    Ok(RawStandingsTable { rows })
}

// Dates like "Oct 16, 2018" arrive quoted; a csv dependency would be heavier
// than the three rules actually needed here.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_quoted_dates_and_blank_slots() {
        let raw = "\"Oct 16, 2018\",MIL (1-0),,TOR (0-1)\n\"Oct 17, 2018\",MIL (2-0),BOS (1-0),TOR (0-2)\n";
        let table = parse_standings_csv(raw).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0].date,
            NaiveDate::from_ymd_opt(2018, 10, 16).unwrap()
        );
        assert_eq!(table.rows[0].cells[0].as_deref(), Some("MIL (1-0)"));
        assert_eq!(table.rows[0].cells[1], None);
        assert_eq!(table.rows[0].cells[2].as_deref(), Some("TOR (0-1)"));
    }

    #[test]
    fn skips_month_separators_and_blank_lines() {
        let raw = "October\n\n\"Oct 16, 2018\",MIL (1-0)\n";
        let table = parse_standings_csv(raw).unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn bad_date_is_fatal() {
        assert!(parse_standings_csv("yesterday,MIL (1-0)\n").is_err());
    }

    #[test]
    fn splits_escaped_quotes() {
        assert_eq!(
            split_csv_line(r#""a ""b"", c",d"#),
            vec![r#"a "b", c"#.to_string(), "d".to_string()]
        );
    }
}
