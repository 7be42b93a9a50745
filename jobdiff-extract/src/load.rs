use crate::error::ExtractError;
use crate::scan::extract_steps;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::Pattern;
use jobdiff_types::{JobBody, JobSet};
use tracing::{debug, warn};

/// Which files of a job directory are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// File-name patterns; empty means every file.
    pub include: Vec<Pattern>,
}

impl LoadOptions {
    pub fn with_include_patterns<S: AsRef<str>>(
        patterns: &[S],
    ) -> Result<Self, glob::PatternError> {
        let include = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { include })
    }

    fn includes(&self, file_name: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|p| p.matches(file_name))
    }
}

/// Read one document and extract its steps.
pub fn extract_steps_from_file(path: &Utf8Path) -> Result<JobBody, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path, "job config is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    extract_steps(&text).map_err(|reason| ExtractError::ParseAmbiguous {
        path: path.to_path_buf(),
        reason,
    })
}

pub fn load_job_set(dir: &Utf8Path) -> Result<JobSet, ExtractError> {
    load_job_set_with(dir, &LoadOptions::default())
}

/// Load every job document directly inside `dir`, keyed by file name.
///
/// Subdirectories are skipped. The first failing document aborts the load.
pub fn load_job_set_with(dir: &Utf8Path, opts: &LoadOptions) -> Result<JobSet, ExtractError> {
    if !dir.is_dir() {
        return Err(ExtractError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    debug!(dir = %dir, "scanning for job configs");

    let io_err = |source: std::io::Error| ExtractError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<Utf8PathBuf> = Vec::new();
    for entry in fs::read_dir(dir.as_std_path()).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        match Utf8PathBuf::from_path_buf(path) {
            Ok(path) => files.push(path),
            // No include pattern can match a name that is not UTF-8.
            Err(path) if !opts.include.is_empty() => {
                debug!(path = %path.display(), "skipping non-UTF-8 file name");
            }
            Err(path) => {
                let lossy = path.file_name().unwrap_or_default().to_string_lossy();
                return Err(ExtractError::Io {
                    path: dir.join(&*lossy),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file name is not valid UTF-8",
                    ),
                });
            }
        }
    }

    // Deterministic order matters: the first failure reported must not depend on readdir.
    files.sort();

    let mut set = JobSet::new();
    for path in files {
        let Some(name) = path.file_name() else {
            continue;
        };
        if !opts.includes(name) {
            debug!(path = %path, "skipping file not matched by include patterns");
            continue;
        }

        let body = extract_steps_from_file(&path)?;
        set.insert(name, body);
    }

    debug!(
        dir = %dir,
        flow = set.flow.len(),
        regular = set.regular.len(),
        "loaded job set"
    );
    Ok(set)
}
