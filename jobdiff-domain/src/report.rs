use crate::compare::{DiffOptions, compare_job_sets};
use jobdiff_types::{BodyStyle, ChangeKind, JobChange, JobReport, JobSet, ReportEntry};
use tracing::debug;

/// Rule printed between the `Base:` and `Diff:` blocks of a changed job.
pub const SEPARATOR: &str =
    "---------------------------------------------------------------------------";

pub fn changed_flow_body(base: &str, diff: &str, style: BodyStyle) -> String {
    match style {
        BodyStyle::BaseDiff => format!("Base:\n{base}\n{SEPARATOR}\n\nDiff:\n{diff}"),
        BodyStyle::Unified => unified_patch(base, diff),
    }
}

pub fn changed_steps_body(base: &[String], diff: &[String], style: BodyStyle) -> String {
    match style {
        BodyStyle::BaseDiff => {
            let mut lines: Vec<&str> = Vec::with_capacity(base.len() + diff.len() + 4);
            lines.push("Base:");
            lines.extend(base.iter().map(String::as_str));
            lines.extend([SEPARATOR, "", "Diff:"]);
            lines.extend(diff.iter().map(String::as_str));
            lines.join("\n")
        }
        BodyStyle::Unified => unified_patch(&base.join("\n"), &diff.join("\n")),
    }
}

fn unified_patch(base: &str, diff: &str) -> String {
    // Terminate both sides so diffy doesn't flag a missing final newline.
    let base = format!("{base}\n");
    let diff = format!("{diff}\n");
    diffy::create_patch(&base, &diff).to_string()
}

/// Build the report sections.
///
/// With a diff side, only added and changed jobs are kept. Without one, every job of
/// `base` is shown under its own name.
pub fn build_report(base: &JobSet, diff: Option<&JobSet>, opts: &DiffOptions) -> JobReport {
    let Some(diff) = diff else {
        return present_report(base);
    };

    let cmp = compare_job_sets(base, diff, opts);
    let mut report = JobReport::default();

    for (name, change) in cmp.flow {
        let body = match &change {
            JobChange::Added(dsl) => dsl.to_string(),
            JobChange::Changed { base, diff } => changed_flow_body(base, diff, opts.style),
            JobChange::Unchanged | JobChange::Removed(_) => String::new(),
        };
        debug!(job = name, change = ?change.kind(), "classified flow job");
        report.flow.push(ReportEntry {
            name: name.to_string(),
            change: change.kind(),
            body,
        });
    }

    for (name, change) in cmp.regular {
        let body = match &change {
            JobChange::Added(steps) => steps.join("\n"),
            JobChange::Changed { base, diff } => changed_steps_body(base, diff, opts.style),
            JobChange::Unchanged | JobChange::Removed(_) => String::new(),
        };
        debug!(job = name, change = ?change.kind(), "classified job");
        report.regular.push(ReportEntry {
            name: name.to_string(),
            change: change.kind(),
            body,
        });
    }

    report
}

fn present_report(set: &JobSet) -> JobReport {
    let mut report = JobReport::default();
    for (name, dsl) in &set.flow {
        report.flow.push(ReportEntry {
            name: name.clone(),
            change: ChangeKind::Present,
            body: dsl.clone(),
        });
    }
    for (name, steps) in &set.regular {
        report.regular.push(ReportEntry {
            name: name.clone(),
            change: ChangeKind::Present,
            body: steps.join("\n"),
        });
    }
    report
}
