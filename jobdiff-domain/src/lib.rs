//! Job-set comparison.
//!
//! [`compare_job_sets`] classifies every job name of a baseline/diff pair;
//! [`build_report`] turns that classification into the entries the renderer shows.

mod compare;
mod report;

pub use compare::{Comparison, DiffOptions, classify, compare_job_sets, steps_match, texts_match};
pub use report::{SEPARATOR, build_report, changed_flow_body, changed_steps_body};
