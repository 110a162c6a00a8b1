use crate::sandbox::SandboxError;

pub struct PathSanitizer;

impl PathSanitizer {
    /// Normalize a sandbox path to the absolute, slash-delimited form the
    /// bundler expects:
    /// - A leading slash is added when missing (`src/a.js` -> `/src/a.js`)
    /// - Backslashes are treated as separators
    /// - Empty and `.` segments are dropped
    /// - Parent traversal (`..`) is rejected
    ///
    /// Hidden files (starting with .) are allowed by default.
    pub fn sanitize(raw_path: &str) -> Result<String, SandboxError> {
        Self::sanitize_with_options(raw_path, true)
    }

    /// Sanitize with custom options
    pub fn sanitize_with_options(
        raw_path: &str,
        allow_hidden: bool,
    ) -> Result<String, SandboxError> {
        if raw_path.is_empty() {
            return Err(SandboxError::InvalidPath("Empty path".to_string()));
        }

        let mut components = Vec::new();

        for part in raw_path.split(['/', '\\']) {
            match part {
                "" | "." => continue,
                ".." => {
                    return Err(SandboxError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_path
                    )));
                }
                _ => {
                    if !allow_hidden && part.starts_with('.') {
                        return Err(SandboxError::InvalidPath(format!(
                            "Hidden files not allowed: {}",
                            raw_path
                        )));
                    }

                    components.push(part);
                }
            }
        }

        if components.is_empty() {
            return Err(SandboxError::InvalidPath(format!(
                "No valid components: {}",
                raw_path
            )));
        }

        Ok(format!("/{}", components.join("/")))
    }
}
