//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use jobdiff_extract::ExtractError;
use jobdiff_types::JobSet;

/// Which job set to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Base,
    Diff,
}

impl Side {
    pub fn dir_name(self) -> &'static str {
        match self {
            Side::Base => crate::settings::BASE_DIR,
            Side::Diff => crate::settings::DIFF_DIR,
        }
    }
}

/// Source of job sets.
pub trait JobSource {
    fn load_side(&self, side: Side) -> Result<JobSet, ExtractError>;
}

/// File-system write operations.
pub trait WritePort {
    /// Fail if `path` cannot be written, without writing anything.
    fn check_writable(&self, path: &Utf8Path) -> std::io::Result<()>;

    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> std::io::Result<()>;
}
