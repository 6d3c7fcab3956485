//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a question file or the lookup document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected lookup document shape in {path}: {source}")]
    Lookup {
        path: PathBuf,
        #[source]
        source: LookupError,
    },
}

/// Structural problems in a parsed lookup document
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("'{0}' is missing or not an array")]
    MissingLiveItems(&'static str),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True when the input simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to read generated document: {0}")]
    ReadFailed(#[from] LoadError),
}

/// Errors raised when a statistics document breaks its counting invariants
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatsError {
    #[error("{path}: total {total} != active {active} + inactive {inactive}")]
    UnbalancedCounts {
        path: String,
        active: u64,
        inactive: u64,
        total: u64,
    },

    #[error("{path}: children sum to {children} but parent total is {parent}")]
    ChildSumMismatch {
        path: String,
        parent: u64,
        children: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = LoadError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());

        let err = LoadError::io(
            "locked.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_stats_error_message_names_node() {
        let err = StatsError::ChildSumMismatch {
            path: "by_program.SAT".to_string(),
            parent: 3,
            children: 2,
        };
        assert_eq!(
            err.to_string(),
            "by_program.SAT: children sum to 2 but parent total is 3"
        );
    }
}
