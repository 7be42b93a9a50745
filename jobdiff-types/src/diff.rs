use serde::{Deserialize, Serialize};

/// Outcome of comparing one job name across the baseline and diff sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobChange<T> {
    Unchanged,
    /// Only the diff side has the job.
    Added(T),
    /// Only the baseline side has the job.
    Removed(T),
    Changed { base: T, diff: T },
}

impl<T> JobChange<T> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            JobChange::Unchanged => ChangeKind::Unchanged,
            JobChange::Added(_) => ChangeKind::Added,
            JobChange::Removed(_) => ChangeKind::Removed,
            JobChange::Changed { .. } => ChangeKind::Changed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Single-side report; nothing was compared.
    Present,
    Unchanged,
    Added,
    Removed,
    Changed,
}

impl ChangeKind {
    /// Whether entries of this kind appear in the rendered report.
    pub fn is_rendered(self) -> bool {
        matches!(
            self,
            ChangeKind::Present | ChangeKind::Added | ChangeKind::Changed
        )
    }

    pub fn label_suffix(self) -> Option<&'static str> {
        match self {
            ChangeKind::Added => Some("New"),
            ChangeKind::Changed => Some("Diff"),
            _ => None,
        }
    }
}

/// How the body of a changed job is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyStyle {
    /// `Base:` block, separator rule, `Diff:` block.
    #[default]
    BaseDiff,
    /// Unified patch from base to diff.
    Unified,
}

/// One collapsible entry of the report: a job name plus the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub change: ChangeKind,
    pub body: String,
}

impl ReportEntry {
    /// Heading text, e.g. `a.xml (Diff)` or `c.xml (New)`.
    pub fn label(&self) -> String {
        match self.change.label_suffix() {
            Some(suffix) => format!("{} ({})", self.name, suffix),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    pub rendered: u64,
    pub added: u64,
    pub removed: u64,
    pub changed: u64,
    pub unchanged: u64,
}

impl SectionCounts {
    pub fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Present => {}
            ChangeKind::Unchanged => self.unchanged += 1,
            ChangeKind::Added => self.added += 1,
            ChangeKind::Removed => self.removed += 1,
            ChangeKind::Changed => self.changed += 1,
        }
        if kind.is_rendered() {
            self.rendered += 1;
        }
    }

    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.changed > 0
    }
}

/// Entries of one report section, in ordinal job-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub entries: Vec<ReportEntry>,
    pub counts: SectionCounts,
}

impl ReportSection {
    /// Record a classified job. Only rendered kinds keep their entry.
    pub fn push(&mut self, entry: ReportEntry) {
        self.counts.record(entry.change);
        if entry.change.is_rendered() {
            self.entries.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the renderer needs: the "Flow Jobs" and "Non Flow Jobs" sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub flow: ReportSection,
    pub regular: ReportSection,
}

impl JobReport {
    pub fn has_changes(&self) -> bool {
        self.flow.counts.has_changes() || self.regular.counts.has_changes()
    }
}
