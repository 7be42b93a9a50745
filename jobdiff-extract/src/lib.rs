//! Job-configuration ingestion.
//!
//! A job document is XML-like text. jobdiff does not parse it as XML; it only looks for the
//! `<dsl>` and `<command>` marker pairs and fails loudly when they do not balance.

mod error;
mod load;
mod scan;

pub use error::{ExtractError, MarkerError};
pub use load::{LoadOptions, extract_steps_from_file, load_job_set, load_job_set_with};
pub use scan::extract_steps;
