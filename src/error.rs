use thiserror::Error;

/// Failures the core pipeline can surface to callers.
///
/// Malformed standing cells are not listed here: a cell that does not match
/// the standing pattern means "no data for that team/rank/date" and is
/// reported as `None` by the record parser.
#[derive(Debug, Error)]
pub enum StandingsError {
    /// A source row label could not be read as a calendar date.
    #[error("unparseable standings date: {text:?}")]
    DateParse { text: String },

    /// A team code in the data has no entry in the colour catalog.
    /// Assigning a default colour would mislead the viewer, so this is fatal.
    #[error("unknown team code: {team}")]
    UnknownTeam { team: String },

    /// No usable rows survived normalization.
    #[error("standings table contains no usable rows")]
    EmptyTable,
}
