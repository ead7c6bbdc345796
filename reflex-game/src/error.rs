use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot read player data at {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("player data at {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write player data to {path}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode player data")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("wait range is inverted: {min} ms > {max} ms")]
    InvertedWaitRange { min: u64, max: u64 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("name length limit {0} is outside 1..=20")]
    NameLength(usize),
}

/// Unexpected failure while processing a screen. Ends the session.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("no attempt in progress on the {0} screen")]
    MissingAttempt(&'static str),
    #[error("stimulus screen is active without a running reaction timer")]
    MissingTimer,
    #[error("finished attempt does not form a valid record")]
    InvalidRecord(#[from] reflex_core::RecordError),
    #[error("presentation failed: {0}")]
    Presentation(String),
}
