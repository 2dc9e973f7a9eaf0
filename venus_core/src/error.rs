// venus_core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Why an incoming payload could not be turned into a `RobotRecord`.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("payload is not a JSON array")]
    NotAnArray,

    #[error("payload has {found} elements, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("payload does not match the record schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Failures inside the mapper. These abort the current update.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MappingError {
    #[error("position of robot {robot} overflowed applying delta ({dx}, {dy})")]
    CoordinateOverflow {
        robot: crate::types::RobotId,
        dx: i64,
        dy: i64,
    },
}

/// Failures writing or reading a persisted rock snapshot.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not (de)serialize rock snapshot: {0}")]
    Serde(#[from] serde_json::Error),
}
