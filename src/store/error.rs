/// Error types for log ingestion and the journal
use thiserror::Error;

/// Reasons a single log line is rejected
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("a log must be a JSON object")]
    NotAnObject,

    #[error("a log is missing a timestamp")]
    MissingTimestamp,

    #[error("non-string timestamp")]
    NonStringTimestamp,

    #[error("invalid timestamp {raw:?}: {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Errors raised while opening, replaying or appending to the journal
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored line no longer parses; `line` is 1-based.
    #[error("{path}:{line}: {source}")]
    Replay {
        path: String,
        line: usize,
        #[source]
        source: LogError,
    },
}
