use super::*;
use std::fs;

#[test]
fn test_builder_new_is_empty() {
    let description = SandboxBuilder::new().build();
    assert_eq!(description.file_count(), 0);
    assert!(description.dependencies().is_none());
    assert!(description.entry().is_none());
    assert!(description.template().is_none());
}

#[test]
fn test_add_files_normalizes_paths() {
    let mut builder = SandboxBuilder::new();
    builder.add_file("index.js", "console.log(1)").unwrap();
    builder.add_file("/src/App.js", "export default 1").unwrap();

    let description = builder.build();
    assert_eq!(description.file_count(), 2);
    assert_eq!(description.file("/index.js"), Some("console.log(1)"));
    assert_eq!(description.file("/src/App.js"), Some("export default 1"));
    assert!(description.file("index.js").is_none());
}

#[test]
fn test_duplicate_after_normalization_rejected() {
    let mut builder = SandboxBuilder::new();
    builder.add_file("/index.js", "a").unwrap();
    let result = builder.add_file("index.js", "b");
    assert!(matches!(result, Err(SandboxError::DuplicatePath(path)) if path == "/index.js"));
}

#[test]
fn test_traversal_rejected() {
    let mut builder = SandboxBuilder::new();
    let result = builder.add_file("../secret.js", "x");
    assert!(matches!(result, Err(SandboxError::InvalidPath(_))));
}

#[test]
fn test_file_size_limit() {
    let mut builder = SandboxBuilder::new().max_file_size(4);
    assert!(builder.add_file("/a.js", "1234").is_ok());
    let result = builder.add_file("/b.js", "12345");
    assert!(matches!(
        result,
        Err(SandboxError::FileTooLarge { size: 5, max: 4 })
    ));
}

#[test]
fn test_hints_are_recorded() {
    let description = SandboxDescription::builder()
        .file("/index.js", "")
        .unwrap()
        .dependency("react", "^16.0.0")
        .dependency("react-dom", "^16.0.0")
        .entry("/index.js")
        .unwrap()
        .template("create-react-app")
        .build();

    let deps = description.dependencies().unwrap();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps["react"], "^16.0.0");
    assert_eq!(description.entry(), Some("/index.js"));
    assert_eq!(description.template(), Some("create-react-app"));
}

#[test]
fn test_entry_is_normalized_like_files() {
    let description = SandboxDescription::builder()
        .file("index.js", "")
        .unwrap()
        .entry("index.js")
        .unwrap()
        .build();

    assert_eq!(description.entry(), Some("/index.js"));
    assert!(description.file("/index.js").is_some());

    let description = SandboxDescription::builder()
        .entry("./src\\main.js")
        .unwrap()
        .build();
    assert_eq!(description.entry(), Some("/src/main.js"));
}

#[test]
fn test_entry_traversal_rejected() {
    let result = SandboxDescription::builder().entry("../index.js");
    assert!(matches!(result, Err(SandboxError::InvalidPath(_))));
}

#[test]
fn test_descriptions_are_values() {
    let first = SandboxDescription::builder()
        .file("/index.js", "1")
        .unwrap()
        .build();
    let copy = first.clone();
    let second = SandboxDescription::builder()
        .file("/index.js", "2")
        .unwrap()
        .build();

    assert_eq!(first, copy);
    assert_ne!(first, second);
}

#[test]
fn test_ingest_dir_skips_vendor_and_binary_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules/react")).unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::write(dir.path().join("src/index.js"), "render()").unwrap();
    fs::write(dir.path().join("node_modules/react/index.js"), "x").unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
    fs::write(dir.path().join("logo.png"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let description = SandboxBuilder::new()
        .ingest_dir(dir.path())
        .unwrap()
        .build();

    let paths: Vec<&str> = description.files().keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/package.json", "/src/index.js"]);
    assert_eq!(description.file("/src/index.js"), Some("render()"));
}

#[test]
fn test_ingest_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let result = SandboxBuilder::new().ingest_dir(&missing);
    assert!(matches!(result, Err(SandboxError::ReadFailed(_))));
}
