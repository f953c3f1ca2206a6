use chrono::NaiveDate;

use crate::error::StandingsError;

/// One source row: a snapshot date plus up to N rank-slot cells. The cell at
/// index `i` holds the record of the team in place `i + 1` on that date, or
/// `None` where the source left the slot blank.
#[derive(Debug, Clone)]
pub struct DateRow {
    pub date: NaiveDate,
    pub cells: Vec<Option<String>>,
}

/// A raw standings-by-date table as delivered by a table source.
///
/// Sources must supply rows in ascending date order; normalization does not
/// re-sort and its output ordering is undefined for unsorted input.
#[derive(Debug, Clone, Default)]
pub struct RawStandingsTable {
    pub rows: Vec<DateRow>,
}

const DATE_FORMATS: [&str; 3] = ["%b %d, %Y", "%a, %b %d, %Y", "%Y-%m-%d"];

/// Parse a source row label into a date.
///
/// Accepts the spreadsheet-export form (`Oct 16, 2018`), the long scraped
/// form (`Tue, Oct 16, 2018`) and ISO dates. Failure here is fatal for the
/// table: a row that is neither a date nor a recognized separator means the
/// source is corrupt.
pub fn parse_standings_date(text: &str) -> Result<NaiveDate, StandingsError> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(StandingsError::DateParse {
        text: trimmed.to_string(),
    })
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Standings-by-date pages repeat a month-name separator row between months;
/// both table sources drop those rows before date parsing.
pub fn is_month_label(text: &str) -> bool {
    let trimmed = text.trim();
    MONTH_NAMES.iter().any(|m| m.eq_ignore_ascii_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_and_scraped_dates() {
        let expected = NaiveDate::from_ymd_opt(2018, 10, 16).unwrap();
        assert_eq!(parse_standings_date("Oct 16, 2018").unwrap(), expected);
        assert_eq!(parse_standings_date("Tue, Oct 16, 2018").unwrap(), expected);
        assert_eq!(parse_standings_date("2018-10-16").unwrap(), expected);
    }

    #[test]
    fn rejects_non_dates() {
        let err = parse_standings_date("Eastern Conference").unwrap_err();
        assert!(matches!(err, StandingsError::DateParse { .. }));
    }

    #[test]
    fn month_labels_are_recognized() {
        assert!(is_month_label("October"));
        assert!(is_month_label(" february "));
        assert!(!is_month_label("Oct 16, 2018"));
        assert!(!is_month_label(""));
    }
}
