//! Configuration file loading for jobdiff.
//!
//! Discovers and loads `jobdiff.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use jobdiff_types::BodyStyle;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "jobdiff.toml";

/// Top-level configuration from jobdiff.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobdiffConfig {
    pub compare: CompareConfig,
    pub jobs: JobsConfig,
    pub report: ReportConfig,
}

/// How baseline and diff values are compared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Treat values differing only in spaces as unchanged.
    pub ignore_whitespace: bool,

    /// Layout of changed job bodies.
    pub style: BodyStyle,
}

/// Which files count as job documents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// File-name glob patterns. Empty means every file.
    pub include: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title; the renderer's default when absent.
    pub title: Option<String>,
}

/// Discover the jobdiff.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a jobdiff.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<JobdiffConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<JobdiffConfig> {
    let config: JobdiffConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<JobdiffConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(JobdiffConfig::default()),
    }
}

/// Config file and CLI arguments combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub ignore_whitespace: bool,
    pub style: BodyStyle,
    /// Include patterns (from config file, extended by CLI).
    pub include: Vec<String>,
    pub title: Option<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: JobdiffConfig,
}

impl ConfigMerger {
    pub fn new(config: JobdiffConfig) -> Self {
        Self { config }
    }

    /// Merge with `report` command CLI arguments.
    ///
    /// Boolean flags OR with the file; `include` extends the file list;
    /// `style` and `title` replace the file values when given.
    pub fn merge_report_args(
        self,
        cli_ignore_whitespace: bool,
        cli_style: Option<BodyStyle>,
        cli_include: &[String],
        cli_title: Option<&str>,
    ) -> MergedConfig {
        let mut include = self.config.jobs.include;
        for pattern in cli_include {
            if !include.contains(pattern) {
                include.push(pattern.clone());
            }
        }

        MergedConfig {
            ignore_whitespace: cli_ignore_whitespace || self.config.compare.ignore_whitespace,
            style: cli_style.unwrap_or(self.config.compare.style),
            include,
            title: cli_title.map(str::to_string).or(self.config.report.title),
        }
    }
}
