use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the extractor found in one job-configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum JobBody {
    /// Pipeline DSL script (the document had a `<dsl>` region).
    Flow(String),
    /// Ordered build steps, one per `<command>` region.
    Steps(Vec<String>),
}

/// One side (baseline or diff) of a comparison.
///
/// A name lives in at most one of the two maps; `insert` moves it if the
/// kind changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSet {
    pub flow: BTreeMap<String, String>,
    pub regular: BTreeMap<String, Vec<String>>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, body: JobBody) {
        let name = name.into();
        match body {
            JobBody::Flow(dsl) => {
                self.regular.remove(&name);
                self.flow.insert(name, dsl);
            }
            JobBody::Steps(steps) => {
                self.flow.remove(&name);
                self.regular.insert(name, steps);
            }
        }
    }

    pub fn with_flow(mut self, name: impl Into<String>, dsl: impl Into<String>) -> Self {
        self.insert(name, JobBody::Flow(dsl.into()));
        self
    }

    pub fn with_steps<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insert(
            name,
            JobBody::Steps(steps.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn flow_job(&self, name: &str) -> Option<&str> {
        self.flow.get(name).map(String::as_str)
    }

    pub fn regular_job(&self, name: &str) -> Option<&[String]> {
        self.regular.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.flow.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty() && self.regular.is_empty()
    }
}
