//! Machine-readable companion to the HTML report.

use crate::diff::{ChangeKind, JobReport, ReportSection, SectionCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which job directories a run reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Compare `base/` against `diff/`.
    #[default]
    Combined,
    /// Render `base/` alone.
    BaselineOnly,
    /// Render `diff/` alone.
    DiffOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Flow,
    Regular,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryJob {
    pub name: String,
    pub section: SectionKind,
    pub change: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDiffSummary {
    /// Always `jobdiff.summary.v1`.
    pub schema: String,
    pub tool: ToolInfo,
    #[serde(default)]
    pub run: RunInfo,
    pub mode: CompareMode,
    pub ignore_whitespace: bool,
    pub flow: SectionCounts,
    pub regular: SectionCounts,

    /// Rendered jobs, flow section first.
    #[serde(default)]
    pub jobs: Vec<SummaryJob>,
}

impl JobDiffSummary {
    pub fn from_report(
        report: &JobReport,
        mode: CompareMode,
        ignore_whitespace: bool,
        tool: ToolInfo,
        run: RunInfo,
    ) -> Self {
        let mut jobs = Vec::with_capacity(report.flow.len() + report.regular.len());
        collect_jobs(&report.flow, SectionKind::Flow, &mut jobs);
        collect_jobs(&report.regular, SectionKind::Regular, &mut jobs);

        Self {
            schema: crate::schema::JOBDIFF_SUMMARY_V1.to_string(),
            tool,
            run,
            mode,
            ignore_whitespace,
            flow: report.flow.counts,
            regular: report.regular.counts,
            jobs,
        }
    }
}

fn collect_jobs(section: &ReportSection, kind: SectionKind, out: &mut Vec<SummaryJob>) {
    out.extend(section.entries.iter().map(|e| SummaryJob {
        name: e.name.clone(),
        section: kind,
        change: e.change,
    }));
}
