use plotters::prelude::*;

use standings_progression::chart::{PlotConfig, build_chart, draw_chart};
use standings_progression::error::StandingsError;
use standings_progression::normalize::normalize_table;
use standings_progression::series::build_series;
use standings_progression::spreadsheet::parse_standings_csv;

fn series_from_csv(raw: &str) -> standings_progression::series::SeriesTable {
    let table = parse_standings_csv(raw).expect("csv should parse");
    build_series(&normalize_table(&table))
}

#[test]
fn unknown_team_code_fails_at_build() {
    let series = series_from_csv("\"Oct 16, 2018\",ZZZ (1-0),MIL (0-1)\n");
    let err = build_chart(&series, &PlotConfig::default()).unwrap_err();
    assert!(matches!(err, StandingsError::UnknownTeam { team } if team == "ZZZ"));
}

#[test]
fn empty_table_fails_at_build() {
    let series = series_from_csv("");
    let err = build_chart(&series, &PlotConfig::default()).unwrap_err();
    assert!(matches!(err, StandingsError::EmptyTable));
}

#[test]
fn draws_to_an_in_memory_bitmap() {
    let series = series_from_csv(
        "\"Oct 16, 2018\",MIL (1-0),BOS (0-1)\n\
         \"Nov 16, 2018\",MIL (10-5),BOS (7-8)\n\
         \"Dec 16, 2018\",MIL (20-10),BOS (14-16)\n",
    );
    let chart = build_chart(&series, &PlotConfig::default()).expect("chart should build");
    assert_eq!(chart.x_ticks.len(), 3);

    let (width, height) = (640u32, 480u32);
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&chart, &root).expect("drawing should succeed");
    }
    // The white fill alone proves the backend was written.
    assert!(buffer.iter().any(|b| *b != 0));
}

#[test]
fn renders_fresh_chart_per_call() {
    let series = series_from_csv(
        "\"Oct 16, 2018\",MIL (1-0),BOS (0-1)\n\
         \"Oct 20, 2018\",MIL (3-0),BOS (1-2)\n",
    );
    let first = build_chart(&series, &PlotConfig::default()).unwrap();
    let second = build_chart(&series, &PlotConfig::default()).unwrap();
    assert_eq!(first.lines.len(), second.lines.len());
    assert_eq!(first.x_range, second.x_range);
}
