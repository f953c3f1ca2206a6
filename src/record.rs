use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// One team's record as published in a standings cell: `"MIL (60-22)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRecord {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
}

impl StandingRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Wins over games played to-date. NaN before the first game; callers
    /// must treat a non-finite value as "undefined", not as an error.
    pub fn win_fraction(&self) -> f64 {
        let gp = self.games_played();
        if gp == 0 {
            f64::NAN
        } else {
            f64::from(self.wins) / f64::from(gp)
        }
    }
}

impl fmt::Display for StandingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.team, self.wins, self.losses)
    }
}

static CELL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{3})\s\((\d+)-(\d+)\)").expect("valid cell pattern"));

/// Extract a standing record from one raw cell.
///
/// Returns `None` for blank or malformed text. The caller decides whether
/// that absence is expected (team not yet ranked at this slot) or a sign of
/// a corrupt source.
pub fn parse_cell(text: &str) -> Option<StandingRecord> {
    let caps = CELL_PATTERN.captures(text.trim())?;
    let team = caps.get(1)?.as_str().to_string();
    // The pattern only admits decimal digits; counts past u32 would mean a
    // corrupt source, treated like any other malformed cell.
    let wins = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let losses = caps.get(3)?.as_str().parse::<u32>().ok()?;
    Some(StandingRecord { team, wins, losses })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regular_cell() {
        let rec = parse_cell("MIL (60-22)").unwrap();
        assert_eq!(rec.team, "MIL");
        assert_eq!(rec.wins, 60);
        assert_eq!(rec.losses, 22);
        assert_eq!(rec.games_played(), 82);
    }

    #[test]
    fn parses_cell_with_surrounding_noise() {
        // Scraped cells sometimes keep an asterisk or whitespace around the
        // record; the pattern searches rather than anchors.
        let rec = parse_cell("  TOR (1-0)* ").unwrap();
        assert_eq!(rec.team, "TOR");
        assert_eq!(rec.wins, 1);
        assert_eq!(rec.losses, 0);
    }

    #[test]
    fn rejects_malformed_cells() {
        assert!(parse_cell("").is_none());
        assert!(parse_cell("MIL").is_none());
        assert!(parse_cell("MIL 60-22").is_none());
        assert!(parse_cell("MIL (60/22)").is_none());
        assert!(parse_cell("mil (60-22)").is_none());
        assert!(parse_cell("MILW (60-22)").is_none());
    }

    #[test]
    fn display_round_trips() {
        let rec = StandingRecord {
            team: "BOS".to_string(),
            wins: 49,
            losses: 33,
        };
        assert_eq!(parse_cell(&rec.to_string()).unwrap(), rec);
    }

    #[test]
    fn zero_games_win_fraction_is_nan() {
        let rec = parse_cell("CHI (0-0)").unwrap();
        assert_eq!(rec.games_played(), 0);
        assert!(rec.win_fraction().is_nan());
    }
}
