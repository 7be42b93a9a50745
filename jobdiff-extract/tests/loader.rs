//! Integration tests for the job-set loader.

use camino::Utf8PathBuf;
use jobdiff_extract::{
    ExtractError, LoadOptions, MarkerError, extract_steps_from_file, load_job_set,
    load_job_set_with,
};
use jobdiff_types::{ErrorKind, JobBody};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn jobs_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("base")).unwrap()
}

fn write_job(dir: &Utf8PathBuf, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

fn shell_job(commands: &[&str]) -> String {
    let mut out = String::from("<?xml version='1.0' encoding='UTF-8'?>\n<project>\n  <builders>\n");
    for c in commands {
        out.push_str(&format!(
            "    <hudson.tasks.Shell>\n      <command>{}</command>\n    </hudson.tasks.Shell>\n",
            c
        ));
    }
    out.push_str("  </builders>\n</project>\n");
    out
}

fn flow_job(dsl: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\n<com.cloudbees.plugins.flow.BuildFlow>\n  <dsl>{}</dsl>\n</com.cloudbees.plugins.flow.BuildFlow>\n",
        dsl
    )
}

#[test]
fn test_missing_dir_is_not_found() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);

    let err = load_job_set(&dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.path(), dir.as_path());
}

#[test]
fn test_empty_dir() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    fs::create_dir_all(&dir).unwrap();

    let set = load_job_set(&dir).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_partitions_flow_and_regular_jobs() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "a.xml", &shell_job(&["echo 1", "echo 2"]));
    write_job(&dir, "b.xml", &flow_job("node('win') { sh 'build' }"));
    write_job(&dir, "empty.xml", "<project/>");

    let set = load_job_set(&dir).unwrap();

    assert_eq!(
        set.regular_job("a.xml"),
        Some(&["echo 1".to_string(), "echo 2".to_string()][..])
    );
    assert_eq!(set.flow_job("b.xml"), Some("node('win') { sh 'build' }"));
    assert_eq!(set.regular_job("empty.xml"), Some(&[][..]));
    assert_eq!(set.len(), 3);
}

#[test]
fn test_nested_directories_skipped() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "top.xml", &shell_job(&["make"]));
    write_job(&dir.join("nested"), "deep.xml", &shell_job(&["make"]));

    let set = load_job_set(&dir).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.regular_job("top.xml").is_some());
    assert!(set.regular_job("deep.xml").is_none());
}

#[test]
fn test_first_malformed_document_aborts() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "good.xml", &shell_job(&["make"]));
    write_job(&dir, "bad.xml", "<command>make\n");

    let err = load_job_set(&dir).unwrap_err();
    match err {
        ExtractError::ParseAmbiguous { path, reason } => {
            assert_eq!(path.file_name(), Some("bad.xml"));
            assert_eq!(reason, MarkerError::UnclosedCommand { line: 1 });
        }
        other => panic!("expected ParseAmbiguous, got {other:?}"),
    }
}

#[test]
fn test_include_patterns_filter_file_names() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "a.xml", &shell_job(&["make"]));
    write_job(&dir, "notes.txt", "<command>broken");

    let opts = LoadOptions::with_include_patterns(&["*.xml"]).unwrap();
    let set = load_job_set_with(&dir, &opts).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.regular_job("a.xml").is_some());
}

#[test]
fn test_invalid_include_pattern() {
    assert!(LoadOptions::with_include_patterns(&["[unclosed"]).is_err());
}

#[test]
fn test_extract_from_missing_file() {
    let temp = create_temp_dir();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("nope.xml")).unwrap();
    let err = extract_steps_from_file(&path).unwrap_err();
    assert!(matches!(err, ExtractError::NotFound { .. }));
}

#[test]
fn test_extract_from_directory_is_not_found() {
    let temp = create_temp_dir();
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let err = extract_steps_from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_non_utf8_document_is_decoded_lossily() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    fs::create_dir_all(&dir).unwrap();
    let mut bytes = b"<command>echo ".to_vec();
    bytes.push(0xff);
    bytes.extend_from_slice(b"</command>");
    fs::write(dir.join("latin1.xml"), bytes).unwrap();

    let body = extract_steps_from_file(&dir.join("latin1.xml")).unwrap();
    assert_eq!(body, JobBody::Steps(vec!["echo \u{fffd}".to_string()]));
}

#[cfg(target_os = "linux")]
fn write_non_utf8_name(dir: &Utf8PathBuf) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    fs::create_dir_all(dir).unwrap();
    let name = OsStr::from_bytes(b"job-\xff.xml");
    fs::write(dir.as_std_path().join(name), shell_job(&["make"])).unwrap();
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_is_io_error_naming_the_entry() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "a.xml", &shell_job(&["make"]));
    write_non_utf8_name(&dir);

    let err = load_job_set(&dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.path().file_name(), Some("job-\u{fffd}.xml"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_skipped_with_include_patterns() {
    let temp = create_temp_dir();
    let dir = jobs_path(&temp);
    write_job(&dir, "a.xml", &shell_job(&["make"]));
    write_non_utf8_name(&dir);

    let opts = LoadOptions::with_include_patterns(&["*.xml"]).unwrap();
    let set = load_job_set_with(&dir, &opts).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.regular_job("a.xml").is_some());
}
