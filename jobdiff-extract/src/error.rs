//! Error types for jobdiff-extract.
//!
//! - `MarkerError` describes why a document's markers do not balance. It carries no path.
//! - `ExtractError` attaches the offending path and maps onto the user-facing [`ErrorKind`].

use camino::Utf8PathBuf;
use jobdiff_types::ErrorKind;
use thiserror::Error;

/// Marker imbalance found while scanning one document. Lines are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("`<dsl>` opened on line {line} is never closed")]
    UnclosedDsl { line: usize },

    #[error("`</dsl>` on line {line} has no matching `<dsl>`")]
    StrayDslClose { line: usize },

    #[error("second `<dsl>` region starts on line {line}")]
    DuplicateDsl { line: usize },

    #[error("`<command>` opened on line {line} is never closed")]
    UnclosedCommand { line: usize },

    #[error("`</command>` on line {line} has no matching `<command>`")]
    StrayCommandClose { line: usize },
}

impl MarkerError {
    pub fn line(&self) -> usize {
        match self {
            MarkerError::UnclosedDsl { line }
            | MarkerError::StrayDslClose { line }
            | MarkerError::DuplicateDsl { line }
            | MarkerError::UnclosedCommand { line }
            | MarkerError::StrayCommandClose { line } => *line,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{path}: not found")]
    NotFound { path: Utf8PathBuf },

    #[error("{path}: ambiguous markers: {reason}")]
    ParseAmbiguous {
        path: Utf8PathBuf,
        reason: MarkerError,
    },

    #[error("{path}: io error")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::NotFound { .. } => ErrorKind::NotFound,
            ExtractError::ParseAmbiguous { .. } => ErrorKind::ParseAmbiguous,
            ExtractError::Io { .. } => ErrorKind::Io,
        }
    }

    pub fn path(&self) -> &camino::Utf8Path {
        match self {
            ExtractError::NotFound { path }
            | ExtractError::ParseAmbiguous { path, .. }
            | ExtractError::Io { path, .. } => path,
        }
    }
}
