//! Conversion error types.
//!
//! Every variant aborts the conversion of the containing input file; the
//! per-file loop in `main` catches them, logs them with context and moves
//! on to the next file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("data line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// A column that must be constant for a whole series changes mid-file.
    /// The `split` subcommand produces homogeneous series files.
    #[error("'{field}' changes within the file, split into homogeneous series first")]
    InconsistentSeries { field: &'static str },

    #[error("data line {line}: unknown {position} flag '{character}'")]
    UnknownFlag {
        line: usize,
        position: &'static str,
        character: char,
    },

    #[error("data line {line}: no flags, no data reported")]
    MissingDataInconsistency { line: usize },

    #[error("data line {line}: preliminary data, rejected")]
    PreliminaryData { line: usize },

    #[error("data line {line}: flag {flag} but value {value} reported")]
    FlagValueConflict { line: usize, flag: char, value: f64 },

    #[error("undefined station code '{0}', please add station to STATIONS")]
    UndefinedStation(String),

    #[error("undefined parameter '{0}', please add parameter to PARAMETERS")]
    UndefinedParameter(String),

    #[error("undefined analysis group / instrument '{group} / {instrument}', please add to ANALYTICAL")]
    UndefinedMethod { group: String, instrument: String },

    #[error("undefined contact '{name}' <{email}>, please add contact to SUBMITTERS")]
    UndefinedSubmitter { name: String, email: String },

    #[error("station '{site}', EBAS station '{station}': position is {distance_m:.0} m apart")]
    PositionMismatch {
        site: String,
        station: &'static str,
        distance_m: f64,
    },

    #[error("station '{site}', EBAS station '{station}': elevation is {difference_m:.0} m apart")]
    ElevationMismatch {
        site: String,
        station: &'static str,
        difference_m: f64,
    },
}
