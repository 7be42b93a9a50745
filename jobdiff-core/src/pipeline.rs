//! Report pipeline: load both sides, compare, render.
//!
//! Everything is computed in memory first. Nothing is written unless the whole run succeeded.

use crate::ports::{JobSource, Side, WritePort};
use crate::settings::{CompareMode, ReportSettings};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use jobdiff_domain::{DiffOptions, build_report};
use jobdiff_extract::ExtractError;
use jobdiff_render::{HtmlOptions, render_report_html};
use jobdiff_types::summary::{JobDiffSummary, RunInfo, ToolInfo};
use jobdiff_types::{ErrorKind, JobReport};
use tracing::{debug, info};

/// Error type for pipeline results.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Load(#[from] ExtractError),

    #[error("{path}: write failed")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::Load(e) => e.kind(),
            ToolError::Write { .. } | ToolError::Internal(_) => ErrorKind::Io,
        }
    }
}

/// Outcome of `run_report`.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: JobReport,
    pub html: String,
    pub summary: JobDiffSummary,
}

impl ReportOutcome {
    /// Whether any job was added, removed or changed.
    pub fn has_changes(&self) -> bool {
        self.report.has_changes()
    }
}

pub fn run_report(
    settings: &ReportSettings,
    source: &dyn JobSource,
    tool: ToolInfo,
) -> Result<ReportOutcome, ToolError> {
    let started_at = Utc::now();

    let (base, diff) = match settings.mode {
        CompareMode::Combined => (
            source.load_side(Side::Base)?,
            Some(source.load_side(Side::Diff)?),
        ),
        CompareMode::BaselineOnly => (source.load_side(Side::Base)?, None),
        CompareMode::DiffOnly => (source.load_side(Side::Diff)?, None),
    };
    debug!(
        mode = ?settings.mode,
        base_jobs = base.len(),
        diff_jobs = ?diff.as_ref().map(|d| d.len()),
        "loaded job sets"
    );

    let opts = DiffOptions {
        ignore_whitespace: settings.ignore_whitespace,
        style: settings.style,
    };
    let report = build_report(&base, diff.as_ref(), &opts);
    info!(
        flow = report.flow.len(),
        regular = report.regular.len(),
        changed = report.flow.counts.changed + report.regular.counts.changed,
        added = report.flow.counts.added + report.regular.counts.added,
        removed = report.flow.counts.removed + report.regular.counts.removed,
        "built job report"
    );

    let html = render_report_html(
        &report,
        &HtmlOptions {
            title: settings.title.clone(),
        },
    );

    let summary = JobDiffSummary::from_report(
        &report,
        settings.mode,
        settings.ignore_whitespace,
        tool,
        RunInfo {
            started_at: Some(started_at),
            ended_at: Some(Utc::now()),
        },
    );

    Ok(ReportOutcome {
        report,
        html,
        summary,
    })
}

/// Write the HTML report, and the JSON summary when `settings.summary_out` is set.
pub fn write_report_artifacts(
    outcome: &ReportOutcome,
    settings: &ReportSettings,
    writer: &dyn WritePort,
) -> Result<(), ToolError> {
    // Serialize before touching the filesystem.
    let summary_json = match &settings.summary_out {
        Some(path) => Some((
            path,
            serde_json::to_string_pretty(&outcome.summary).context("serialize summary")?,
        )),
        None => None,
    };

    // Check every target before writing any of them.
    let targets = std::iter::once(&settings.html_out).chain(settings.summary_out.as_ref());
    for path in targets {
        writer
            .check_writable(path)
            .map_err(|source| ToolError::Write {
                path: path.clone(),
                source,
            })?;
    }

    write(writer, &settings.html_out, outcome.html.as_bytes())?;
    info!("wrote report to {}", settings.html_out);

    if let Some((path, json)) = summary_json {
        write(writer, path, json.as_bytes())?;
        info!("wrote summary to {}", path);
    }
    Ok(())
}

fn write(writer: &dyn WritePort, path: &Utf8Path, bytes: &[u8]) -> Result<(), ToolError> {
    writer
        .write_file(path, bytes)
        .map_err(|source| ToolError::Write {
            path: path.to_path_buf(),
            source,
        })
}
