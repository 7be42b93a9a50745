//! Embeddable core library for jobdiff.
//!
//! Provides a clap-free, I/O-abstracted entry point for building the job report.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`JobSource`](ports::JobSource): load the baseline or diff job set
//! - [`WritePort`](ports::WritePort): write report artifacts
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_report`](pipeline::run_report): load, compare and render
//! - [`write_report_artifacts`](pipeline::write_report_artifacts): persist the outcome

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use jobdiff_extract::{ExtractError, LoadOptions, MarkerError};
pub use jobdiff_types::{ErrorKind, JobReport, JobSet};
