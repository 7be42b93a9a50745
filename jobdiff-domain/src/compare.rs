use jobdiff_types::{BodyStyle, JobChange, JobSet};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Treat values that differ only in U+0020 spaces as unchanged.
    pub ignore_whitespace: bool,
    pub style: BodyStyle,
}

/// Classification of every job name of a baseline/diff pair, in ordinal name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison<'a> {
    pub flow: Vec<(&'a str, JobChange<&'a str>)>,
    pub regular: Vec<(&'a str, JobChange<&'a [String]>)>,
}

pub fn texts_match(base: &str, diff: &str, ignore_whitespace: bool) -> bool {
    base == diff || (ignore_whitespace && base.replace(' ', "") == diff.replace(' ', ""))
}

/// Positional comparison: same length, and every pair matches.
pub fn steps_match(base: &[String], diff: &[String], ignore_whitespace: bool) -> bool {
    base.len() == diff.len()
        && base
            .iter()
            .zip(diff)
            .all(|(b, d)| texts_match(b, d, ignore_whitespace))
}

/// Classify one job name from its (optional) value on each side.
pub fn classify<T: Copy>(
    base: Option<T>,
    diff: Option<T>,
    same: impl Fn(T, T) -> bool,
) -> Option<JobChange<T>> {
    match (base, diff) {
        (None, None) => None,
        (Some(base), None) => Some(JobChange::Removed(base)),
        (None, Some(diff)) => Some(JobChange::Added(diff)),
        (Some(base), Some(diff)) if same(base, diff) => Some(JobChange::Unchanged),
        (Some(base), Some(diff)) => Some(JobChange::Changed { base, diff }),
    }
}

pub fn compare_job_sets<'a>(
    base: &'a JobSet,
    diff: &'a JobSet,
    opts: &DiffOptions,
) -> Comparison<'a> {
    let ignore = opts.ignore_whitespace;

    let flow_names: BTreeSet<&str> = base
        .flow
        .keys()
        .chain(diff.flow.keys())
        .map(String::as_str)
        .collect();
    let flow = flow_names
        .into_iter()
        .filter_map(|name| {
            classify(base.flow_job(name), diff.flow_job(name), |b, d| {
                texts_match(b, d, ignore)
            })
            .map(|change| (name, change))
        })
        .collect();

    let regular_names: BTreeSet<&str> = base
        .regular
        .keys()
        .chain(diff.regular.keys())
        .map(String::as_str)
        .collect();
    let regular = regular_names
        .into_iter()
        .filter_map(|name| {
            classify(base.regular_job(name), diff.regular_job(name), |b, d| {
                steps_match(b, d, ignore)
            })
            .map(|change| (name, change))
        })
        .collect();

    Comparison { flow, regular }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn texts_match_respects_whitespace_flag() {
        assert!(texts_match("a b", "a b", false));
        assert!(!texts_match("a b", "ab", false));
        assert!(texts_match("a b", "ab", true));
        assert!(texts_match("  x  =  1", "x=1", true));
    }

    #[test]
    fn only_spaces_are_ignored() {
        assert!(!texts_match("a\tb", "ab", true));
        assert!(!texts_match("a\nb", "ab", true));
    }

    #[test]
    fn steps_match_is_positional() {
        let a = strings(&["echo 1", "echo 2"]);
        let swapped = strings(&["echo 2", "echo 1"]);
        let shorter = strings(&["echo 1"]);
        assert!(steps_match(&a, &a, false));
        assert!(!steps_match(&a, &swapped, false));
        assert!(!steps_match(&a, &shorter, true));
        assert!(steps_match(&[], &[], false));
    }

    #[test]
    fn classify_outcomes() {
        let eq = |a: &str, b: &str| a == b;
        assert_eq!(classify::<&str>(None, None, eq), None);
        assert_eq!(classify(Some("a"), None, eq), Some(JobChange::Removed("a")));
        assert_eq!(classify(None, Some("a"), eq), Some(JobChange::Added("a")));
        assert_eq!(classify(Some("a"), Some("a"), eq), Some(JobChange::Unchanged));
        assert_eq!(
            classify(Some("a"), Some("b"), eq),
            Some(JobChange::Changed {
                base: "a",
                diff: "b"
            })
        );
    }

    #[test]
    fn compare_covers_union_in_name_order() {
        let base = JobSet::new()
            .with_flow("b.xml", "node('win') { sh 'build' }")
            .with_flow("same.xml", "node {}")
            .with_steps("z.xml", ["make"])
            .with_steps("a.xml", ["echo 1", "echo 2"]);
        let diff = JobSet::new()
            .with_flow("c.xml", "node {}")
            .with_flow("same.xml", "node {}")
            .with_steps("a.xml", ["echo 1", "echo 3"])
            .with_steps("z.xml", ["make"]);

        let cmp = compare_job_sets(&base, &diff, &DiffOptions::default());

        let flow: Vec<_> = cmp.flow.iter().map(|(n, c)| (*n, c.kind())).collect();
        assert_eq!(
            flow,
            vec![
                ("b.xml", jobdiff_types::ChangeKind::Removed),
                ("c.xml", jobdiff_types::ChangeKind::Added),
                ("same.xml", jobdiff_types::ChangeKind::Unchanged),
            ]
        );

        let regular: Vec<_> = cmp.regular.iter().map(|(n, c)| (*n, c.kind())).collect();
        assert_eq!(
            regular,
            vec![
                ("a.xml", jobdiff_types::ChangeKind::Changed),
                ("z.xml", jobdiff_types::ChangeKind::Unchanged),
            ]
        );
    }

    #[test]
    fn kind_switch_is_removed_from_one_section_and_added_to_the_other() {
        let base = JobSet::new().with_flow("job.xml", "node {}");
        let diff = JobSet::new().with_steps("job.xml", ["make"]);

        let cmp = compare_job_sets(&base, &diff, &DiffOptions::default());
        assert_eq!(cmp.flow, vec![("job.xml", JobChange::Removed("node {}"))]);
        assert_eq!(cmp.regular.len(), 1);
        assert!(matches!(cmp.regular[0].1, JobChange::Added(_)));
    }
}
