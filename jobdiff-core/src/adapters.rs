//! Default port implementations.

use crate::pipeline::ToolError;
use crate::ports::{JobSource, Side, WritePort};
use crate::settings::ReportSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use jobdiff_extract::{ExtractError, LoadOptions};
use jobdiff_types::JobSet;
use tracing::debug;

/// Loads `<root>/base` and `<root>/diff` from the filesystem.
#[derive(Debug, Clone)]
pub struct FsJobSource {
    pub root: Utf8PathBuf,
    pub options: LoadOptions,
}

impl FsJobSource {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(root: Utf8PathBuf, options: LoadOptions) -> Self {
        Self { root, options }
    }

    /// Source rooted at `settings.config_root`, filtered by `settings.include`.
    pub fn from_settings(settings: &ReportSettings) -> Result<Self, ToolError> {
        let options = LoadOptions::with_include_patterns(&settings.include)
            .context("parse include patterns")?;
        Ok(Self::with_options(settings.config_root.clone(), options))
    }
}

impl JobSource for FsJobSource {
    fn load_side(&self, side: Side) -> Result<JobSet, ExtractError> {
        let dir = self.root.join(side.dir_name());
        debug!(dir = %dir, ?side, "loading job set");
        jobdiff_extract::load_job_set_with(&dir, &self.options)
    }
}

/// In-memory job sets for embedding and testing.
///
/// A side that was never supplied reports `NotFound`, like a missing directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobSource {
    base: Option<JobSet>,
    diff: Option<JobSet>,
}

impl InMemoryJobSource {
    pub fn new(base: Option<JobSet>, diff: Option<JobSet>) -> Self {
        Self { base, diff }
    }
}

impl JobSource for InMemoryJobSource {
    fn load_side(&self, side: Side) -> Result<JobSet, ExtractError> {
        let set = match side {
            Side::Base => self.base.as_ref(),
            Side::Diff => self.diff.as_ref(),
        };
        set.cloned().ok_or_else(|| ExtractError::NotFound {
            path: Utf8PathBuf::from(side.dir_name()),
        })
    }
}

/// Filesystem writes. Parent directories are not created.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn check_writable(&self, path: &Utf8Path) -> std::io::Result<()> {
        if path.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::IsADirectory,
                format!("{} is a directory", path),
            ));
        }
        let parent = match path.parent() {
            Some(p) if !p.as_str().is_empty() => p,
            _ => Utf8Path::new("."),
        };
        if !parent.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent),
            ));
        }
        Ok(())
    }

    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> std::io::Result<()> {
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdiff_types::ErrorKind;
    use tempfile::TempDir;

    fn utf8(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn fs_source_reads_side_subdirectory() {
        let temp = tempfile::tempdir().unwrap();
        let root = utf8(&temp);
        std::fs::create_dir_all(root.join("diff")).unwrap();
        std::fs::write(root.join("diff").join("a.xml"), "<command>make</command>").unwrap();

        let source = FsJobSource::new(root);
        let set = source.load_side(Side::Diff).unwrap();
        assert_eq!(set.regular_job("a.xml"), Some(&["make".to_string()][..]));

        let err = source.load_side(Side::Base).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn fs_source_applies_include_patterns() {
        let temp = tempfile::tempdir().unwrap();
        let root = utf8(&temp);
        std::fs::create_dir_all(root.join("base")).unwrap();
        std::fs::write(root.join("base").join("a.xml"), "<command>make</command>").unwrap();
        std::fs::write(root.join("base").join("README"), "<command>").unwrap();

        let options = LoadOptions::with_include_patterns(&["*.xml"]).unwrap();
        let source = FsJobSource::with_options(root, options);
        let set = source.load_side(Side::Base).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_settings_uses_root_and_include() {
        let temp = tempfile::tempdir().unwrap();
        let root = utf8(&temp);
        std::fs::create_dir_all(root.join("base")).unwrap();
        std::fs::write(root.join("base").join("a.xml"), "<command>make</command>").unwrap();
        std::fs::write(root.join("base").join("notes.txt"), "</command>").unwrap();

        let settings = ReportSettings {
            config_root: root,
            include: vec!["*.xml".to_string()],
            ..Default::default()
        };
        let source = FsJobSource::from_settings(&settings).unwrap();
        let set = source.load_side(Side::Base).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.regular_job("a.xml").is_some());
    }

    #[test]
    fn from_settings_rejects_bad_pattern() {
        let settings = ReportSettings {
            include: vec!["[oops".to_string()],
            ..Default::default()
        };
        let err = FsJobSource::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("include patterns"));
    }

    #[test]
    fn in_memory_source_missing_side_is_not_found() {
        let source = InMemoryJobSource::new(Some(JobSet::new()), None);
        assert!(source.load_side(Side::Base).is_ok());
        let err = source.load_side(Side::Diff).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), "diff");
    }

    #[test]
    fn fs_write_port_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let path = utf8(&temp).join("report.html");
        FsWritePort.write_file(&path, b"first").unwrap();
        FsWritePort.write_file(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn fs_write_port_checks_parent_directory() {
        let temp = tempfile::tempdir().unwrap();
        let root = utf8(&temp);
        assert!(FsWritePort.check_writable(&root.join("report.html")).is_ok());
        assert!(FsWritePort.check_writable(&root).is_err());

        let err = FsWritePort
            .check_writable(&root.join("missing").join("report.html"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!root.join("report.html").exists());
    }

    #[test]
    fn fs_write_port_does_not_create_parents() {
        let temp = tempfile::tempdir().unwrap();
        let path = utf8(&temp).join("missing").join("report.html");
        assert!(FsWritePort.write_file(&path, b"x").is_err());
        assert!(!utf8(&temp).join("missing").exists());
    }
}
