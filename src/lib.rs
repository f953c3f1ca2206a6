//! Standings-progression charts from NBA standings-by-date tables.
//!
//! A raw table (scraped page or saved spreadsheet export) is normalized into
//! per-team win-fraction series and rendered as one styled line per team,
//! with colours and dash style assigned by final-standing rank.

pub mod chart;
pub mod error;
pub mod export;
pub mod http_cache;
pub mod http_client;
pub mod normalize;
pub mod progression;
pub mod record;
pub mod series;
pub mod spreadsheet;
pub mod standings_fetch;
pub mod table;
pub mod team_colours;

pub use chart::{PlotConfig, ProgressionChart};
pub use error::StandingsError;
pub use progression::{Group, progression_from_csv, save_chart, standings_progression};
