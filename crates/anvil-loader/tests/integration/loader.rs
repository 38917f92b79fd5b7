use anvil_loader::{ComponentLoader, DecodeError, LoaderError, Separator};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const STATESTORE: &str = r#"apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: statestore
spec:
  type: state.redis
  version: v1
"#;

const MIXED: &str = r#"apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: pubsub
spec:
  type: pubsub.redis
---
apiVersion: dapr.io/v1alpha1
kind: Configuration
metadata:
  name: tracing
---
kind: Component
spec: [unterminated
---
kind: Component
metadata:
  name: secrets
spec:
  type: secretstores.local.file
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write component file");
}

fn names(loader: &ComponentLoader) -> Vec<String> {
    loader
        .load()
        .expect("load should succeed")
        .components
        .iter()
        .filter_map(|c| c.name().map(str::to_string))
        .collect()
}

#[test]
/// Verifies the end-to-end load of a directory.
///
/// This test:
/// 1. Writes two YAML files, one of them with a malformed document, plus a non-YAML file
/// 2. Loads the directory
/// 3. Checks that components come back in file name then document order
/// 4. Checks that the malformed document is reported once against its file
fn test_load_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "b-mixed.yaml", MIXED);
    write(dir.path(), "a-statestore.yml", STATESTORE);
    write(dir.path(), "README.md", STATESTORE);

    let report = ComponentLoader::new(dir.path()).load().expect("load should succeed");

    let names: Vec<_> = report.components.iter().filter_map(|c| c.name()).collect();
    assert_eq!(names, vec!["statestore", "pubsub", "secrets"]);

    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert!(diagnostic.file.ends_with("b-mixed.yaml"));
    assert_eq!(diagnostic.document, 3);
    assert!(matches!(diagnostic.error, DecodeError::Syntax(_)));

    assert!(report.unavailable.is_empty());
    assert!(!report.is_clean());
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "STATE.YAML", STATESTORE);

    assert_eq!(names(&ComponentLoader::new(dir.path())), vec!["statestore"]);
}

#[test]
fn test_subdirectories_are_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("nested.yaml");
    fs::create_dir(&nested).expect("Failed to create nested dir");
    write(&nested, "inner.yaml", STATESTORE);

    let report = ComponentLoader::new(dir.path()).load().expect("load should succeed");
    assert!(report.components.is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().expect("Failed to create temp dir");

    let report = ComponentLoader::new(dir.path()).load().expect("load should succeed");
    assert!(report.components.is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_missing_directory_fails_the_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("absent");

    match ComponentLoader::new(&missing).load() {
        Err(LoaderError::DirectoryUnavailable { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected DirectoryUnavailable, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_unavailable_not_fatal() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "a.yaml", STATESTORE);
    std::os::unix::fs::symlink(dir.path().join("gone.yaml"), dir.path().join("b.yaml"))
        .expect("Failed to create symlink");

    let report = ComponentLoader::new(dir.path()).load().expect("load should succeed");

    assert_eq!(report.components.len(), 1);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.unavailable.len(), 1);
    assert!(report.unavailable[0].path.ends_with("b.yaml"));
}

#[test]
fn test_read_buffer_size_does_not_change_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), "mixed.yaml", MIXED);

    let expected = names(&ComponentLoader::new(dir.path()));
    for size in [1, 2, 3, 7, 64] {
        let loader = ComponentLoader::new(dir.path()).with_read_buffer_size(size);
        assert_eq!(names(&loader), expected, "read size {}", size);
    }
}

#[test]
fn test_custom_separator() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "custom.yaml",
        "kind: Component\nmetadata:\n  name: one\n%%%\nkind: Component\nmetadata:\n  name: two\n",
    );

    let loader = ComponentLoader::new(dir.path())
        .with_separator(Separator::new(b"\n%%%".to_vec()).expect("valid separator"));
    assert_eq!(names(&loader), vec!["one", "two"]);
}

#[test]
fn test_crlf_line_endings() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "windows.yaml",
        "kind: Component\r\nmetadata:\r\n  name: one\r\n---\r\nkind: Component\r\nmetadata:\r\n  name: two\r\n",
    );

    assert_eq!(names(&ComponentLoader::new(dir.path())), vec!["one", "two"]);
}
