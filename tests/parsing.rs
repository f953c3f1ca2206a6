use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use standings_progression::spreadsheet::parse_standings_csv;
use standings_progression::standings_fetch::parse_standings_html;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_csv_fixture() {
    let raw = read_fixture("2019_east_standings.csv");
    let table = parse_standings_csv(&raw).expect("fixture should parse");

    // 8 lines, one month separator.
    assert_eq!(table.rows.len(), 7);
    assert_eq!(table.rows[0].date, date(2018, 10, 16));
    assert_eq!(table.rows[6].date, date(2019, 4, 11));
    assert!(table.rows.iter().all(|r| r.cells.len() == 15));
}

#[test]
fn csv_blank_slots_are_absent() {
    let raw = read_fixture("2019_east_standings.csv");
    let table = parse_standings_csv(&raw).expect("fixture should parse");

    let opening = &table.rows[0];
    assert_eq!(opening.cells[0].as_deref(), Some("BOS (1-0)"));
    assert!(opening.cells[1..14].iter().all(|c| c.is_none()));
    assert_eq!(opening.cells[14].as_deref(), Some("PHI (0-1)"));
}

#[test]
fn parses_scraped_page_fixture() {
    let raw = read_fixture("standings_page.html");
    let table = parse_standings_html(&raw).expect("fixture should parse");

    // Header rows and the November separator are dropped.
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0].date, date(2018, 10, 16));
    assert_eq!(table.rows[1].date, date(2018, 10, 17));
    assert_eq!(table.rows[2].date, date(2018, 11, 15));

    assert_eq!(table.rows[0].cells[0].as_deref(), Some("BOS (1-0)"));
    assert_eq!(table.rows[0].cells[1], None);
    assert_eq!(table.rows[0].cells[2].as_deref(), Some("PHI (0-1)"));
    assert_eq!(table.rows[2].cells[0].as_deref(), Some("TOR (12-3)"));
}

#[test]
fn page_without_table_is_an_error() {
    assert!(parse_standings_html("<html><body>maintenance</body></html>").is_err());
}

#[test]
fn garbage_date_row_is_fatal() {
    let raw = "\"Oct 16, 2018\",BOS (1-0)\nnot a date,BOS (2-0)\n";
    assert!(parse_standings_csv(raw).is_err());
}
