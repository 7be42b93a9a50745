#![no_main]

//! Fuzz target for compare -> report -> HTML with structured job sets.

use jobdiff_domain::{DiffOptions, build_report};
use jobdiff_render::{HtmlOptions, render_report_html};
use jobdiff_types::{BodyStyle, JobSet};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct ReportInput {
    base: Vec<JobInput>,
    diff: Vec<JobInput>,
    ignore_whitespace: bool,
    unified: bool,
    baseline_only: bool,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum JobInput {
    Flow(u8, String),
    Steps(u8, Vec<String>),
}

fn job_set(jobs: Vec<JobInput>) -> JobSet {
    // Small name space so the two sides overlap often.
    let mut set = JobSet::new();
    for job in jobs {
        match job {
            JobInput::Flow(n, dsl) => set = set.with_flow(format!("job{}.xml", n % 8), dsl),
            JobInput::Steps(n, steps) => set = set.with_steps(format!("job{}.xml", n % 8), steps),
        }
    }
    set
}

fuzz_target!(|input: ReportInput| {
    let base = job_set(input.base);
    let diff = job_set(input.diff);
    let opts = DiffOptions {
        ignore_whitespace: input.ignore_whitespace,
        style: if input.unified {
            BodyStyle::Unified
        } else {
            BodyStyle::BaseDiff
        },
    };

    let report = if input.baseline_only {
        build_report(&base, None, &opts)
    } else {
        build_report(&base, Some(&diff), &opts)
    };

    for entry in report.flow.entries.iter().chain(&report.regular.entries) {
        assert!(entry.change.is_rendered());
    }
    if input.baseline_only {
        assert_eq!(report.flow.len() + report.regular.len(), base.len());
    }

    let html = render_report_html(&report, &HtmlOptions::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
});
