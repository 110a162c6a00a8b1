use crate::security::PathSanitizer;

#[test]
fn test_absolute_path_kept() {
    let result = PathSanitizer::sanitize("/src/index.js");
    assert_eq!(result.unwrap(), "/src/index.js");
}

#[test]
fn test_relative_path_made_absolute() {
    let result = PathSanitizer::sanitize("src/components/App.js");
    assert_eq!(result.unwrap(), "/src/components/App.js");
}

#[test]
fn test_hidden_files_allowed_by_default() {
    let result = PathSanitizer::sanitize(".babelrc");
    assert_eq!(result.unwrap(), "/.babelrc");
}

#[test]
fn test_hidden_files_rejected_when_disabled() {
    let result = PathSanitizer::sanitize_with_options("/.env", false);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Hidden files"));
}

#[test]
fn test_reject_parent_directory_traversal() {
    let result = PathSanitizer::sanitize("/src/../../etc/passwd");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Parent directory traversal")
    );
}

#[test]
fn test_backslashes_normalized() {
    let result = PathSanitizer::sanitize("src\\styles\\main.css");
    assert_eq!(result.unwrap(), "/src/styles/main.css");
}

#[test]
fn test_duplicate_separators_and_dots_collapsed() {
    let result = PathSanitizer::sanitize("//src/./utils//math.js");
    assert_eq!(result.unwrap(), "/src/utils/math.js");
}

#[test]
fn test_reject_empty_path() {
    let result = PathSanitizer::sanitize("");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Empty path"));
}

#[test]
fn test_reject_root_only() {
    let result = PathSanitizer::sanitize("/");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No valid components"));
}
