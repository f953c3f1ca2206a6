use std::collections::HashMap;

use once_cell::sync::Lazy;
use plotters::style::RGBColor;

/// Line, marker-face and marker-edge colours for one team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamColours {
    pub line: RGBColor,
    pub marker: RGBColor,
    pub edge: RGBColor,
}

const fn colours(line: (u8, u8, u8), marker: (u8, u8, u8), edge: (u8, u8, u8)) -> TeamColours {
    TeamColours {
        line: RGBColor(line.0, line.1, line.2),
        marker: RGBColor(marker.0, marker.1, marker.2),
        edge: RGBColor(edge.0, edge.1, edge.2),
    }
}

// Colours from https://teamcolorcodes.com/nba-team-color-codes/ — includes
// the historical franchises (CHA/CHH/NJN/NOH/NOK/SEA/VAN) so past seasons
// render too.
static CATALOG: [(&str, TeamColours); 37] = [
    ("ATL", colours((224, 58, 62), (193, 211, 47), (0, 0, 0))),
    ("BOS", colours((0, 122, 51), (186, 150, 83), (0, 0, 0))),
    ("BRK", colours((0, 0, 0), (255, 255, 255), (0, 0, 0))),
    ("CHI", colours((0, 0, 0), (206, 17, 65), (206, 17, 65))),
    ("CHO", colours((29, 17, 96), (0, 120, 140), (0, 0, 0))),
    ("CLE", colours((134, 0, 56), (253, 187, 48), (0, 0, 0))),
    ("DAL", colours((0, 83, 140), (0, 43, 94), (0, 0, 0))),
    ("DEN", colours((14, 34, 64), (254, 197, 36), (0, 0, 0))),
    ("DET", colours((29, 66, 186), (200, 16, 46), (0, 0, 0))),
    ("GSW", colours((255, 199, 44), (29, 66, 138), (29, 66, 138))),
    ("HOU", colours((206, 17, 65), (0, 0, 0), (0, 0, 0))),
    ("IND", colours((0, 45, 98), (253, 187, 48), (0, 0, 0))),
    ("LAC", colours((200, 16, 46), (255, 255, 255), (0, 0, 0))),
    ("LAL", colours((85, 37, 131), (253, 185, 39), (0, 0, 0))),
    ("MEM", colours((93, 118, 169), (18, 23, 63), (0, 0, 0))),
    ("MIA", colours((152, 0, 46), (249, 160, 27), (0, 0, 0))),
    ("MIL", colours((0, 71, 27), (238, 225, 198), (0, 0, 0))),
    ("MIN", colours((35, 97, 146), (12, 35, 64), (0, 0, 0))),
    ("NOP", colours((200, 16, 46), (12, 35, 64), (0, 0, 0))),
    ("NYK", colours((0, 107, 182), (245, 132, 38), (0, 0, 0))),
    ("OKC", colours((0, 122, 193), (239, 59, 36), (0, 0, 0))),
    ("ORL", colours((0, 119, 192), (196, 206, 212), (0, 0, 0))),
    ("PHI", colours((0, 107, 182), (237, 23, 76), (0, 0, 0))),
    ("PHO", colours((29, 17, 96), (229, 96, 32), (0, 0, 0))),
    ("POR", colours((0, 0, 0), (224, 58, 62), (0, 0, 0))),
    ("SAC", colours((90, 45, 129), (99, 114, 122), (0, 0, 0))),
    ("SAS", colours((0, 0, 0), (196, 206, 212), (0, 0, 0))),
    ("TOR", colours((206, 17, 65), (255, 255, 255), (0, 0, 0))),
    ("UTA", colours((0, 71, 27), (249, 160, 27), (0, 43, 92))),
    ("WAS", colours((227, 24, 55), (0, 43, 92), (0, 0, 0))),
    ("CHA", colours((0, 43, 92), (245, 132, 38), (0, 0, 0))),
    ("CHH", colours((0, 119, 139), (40, 0, 113), (0, 0, 0))),
    ("NJN", colours((119, 125, 132), (0, 42, 96), (0, 0, 0))),
    ("NOH", colours((0, 119, 139), (255, 199, 44), (0, 0, 0))),
    ("NOK", colours((200, 16, 46), (12, 35, 64), (0, 0, 0))),
    ("SEA", colours((0, 101, 58), (255, 194, 0), (0, 0, 0))),
    ("VAN", colours((0, 178, 169), (228, 60, 64), (0, 0, 0))),
];

static BY_CODE: Lazy<HashMap<&'static str, TeamColours>> =
    Lazy::new(|| CATALOG.iter().copied().collect());

/// Look up a team's colour triple. `None` means the code is not in the
/// catalog; the renderer treats that as fatal rather than picking a default.
pub fn team_colours(code: &str) -> Option<TeamColours> {
    BY_CODE.get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        let mil = team_colours("MIL").unwrap();
        assert_eq!(mil.line, RGBColor(0, 71, 27));
        assert_eq!(mil.marker, RGBColor(238, 225, 198));
        assert_eq!(mil.edge, RGBColor(0, 0, 0));
        assert!(team_colours("SEA").is_some());
    }

    #[test]
    fn unknown_codes_do_not_resolve() {
        assert!(team_colours("XXX").is_none());
        assert!(team_colours("mil").is_none());
    }

    #[test]
    fn catalog_covers_thirty_seven_franchises() {
        assert_eq!(CATALOG.len(), 37);
        let codes: std::collections::HashSet<_> = CATALOG.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), CATALOG.len());
    }
}
