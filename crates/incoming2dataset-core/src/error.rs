//! Error types for the relocation engine

use thiserror::Error;

/// Object-store calls the engine performs, used as error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Copy,
    Delete,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Copy => "copy",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while relocating a date partition
#[derive(Debug, Error)]
pub enum RelocateError {
    /// `asof_date` did not parse as a calendar date
    #[error("invalid asof_date {value:?}: expected YYYY-MM-DD ({source})")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Invocation carried no event payload at all
    #[error("no event found: invocation payload was empty")]
    EmptyEvent,

    /// Event payload present but without a usable `asof_date` string
    #[error("event carries no asof_date field")]
    MissingDate,

    /// A list, copy, or delete call against the object store failed
    #[error("store {op} failed for {path:?}: {message}")]
    Store {
        op: StoreOp,
        path: String,
        message: String,
    },
}

impl RelocateError {
    /// Wrap a backend failure with the operation and path it hit.
    pub fn store(op: StoreOp, path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Store {
            op,
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for RelocateError
pub type Result<T> = std::result::Result<T, RelocateError>;
