//! Shared types for the jobdiff workspace.
//!
//! # Design constraints
//! - `JobSet` keeps names in ordinal order; report ordering relies on it.
//! - The summary types are serialized to disk. Prefer adding optional fields over changing
//!   semantics.

pub mod diff;
pub mod job;
pub mod summary;

pub use diff::{
    BodyStyle, ChangeKind, JobChange, JobReport, ReportEntry, ReportSection, SectionCounts,
};
pub use job::{JobBody, JobSet};

/// Abstract failure categories surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input file or directory does not exist.
    NotFound,
    /// A document's markers are unbalanced or repeated.
    ParseAmbiguous,
    /// Reading or writing failed for another reason.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::ParseAmbiguous => "ParseAmbiguous",
            ErrorKind::Io => "IOError",
        })
    }
}

/// Schema identifiers.
pub mod schema {
    pub const JOBDIFF_SUMMARY_V1: &str = "jobdiff.summary.v1";
}
