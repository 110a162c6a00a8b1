mod error;

#[cfg(test)]
mod tests;

pub use error::SandboxError;

use crate::security::PathSanitizer;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Path -> source text, ordered by path
pub type Files = BTreeMap<String, String>;

/// Package name -> version range
pub type Dependencies = BTreeMap<String, String>;

/// Directory names never ingested from disk
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Immutable description of a sandbox: the file tree plus the hints used to
/// normalize it before compilation.
///
/// Updates replace the whole description; nothing mutates one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxDescription {
    files: Files,
    dependencies: Option<Dependencies>,
    entry: Option<String>,
    template: Option<String>,
}

impl SandboxDescription {
    pub fn builder() -> SandboxBuilder {
        SandboxBuilder::new()
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    /// Get a file's source by its absolute path
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn dependencies(&self) -> Option<&Dependencies> {
        self.dependencies.as_ref()
    }

    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Explicit template override, if the caller chose one
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Mutable builder for constructing a sandbox description
pub struct SandboxBuilder {
    files: Files,
    dependencies: Option<Dependencies>,
    entry: Option<String>,
    template: Option<String>,
    max_file_size: u64,
}

impl SandboxBuilder {
    /// Create a new builder with default limits
    pub fn new() -> Self {
        Self {
            files: Files::new(),
            dependencies: None,
            entry: None,
            template: None,
            max_file_size: 5 * 1024 * 1024, // 5 MB per file
        }
    }

    /// Set maximum individual file size
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Add a file under its normalized absolute path
    pub fn add_file(&mut self, raw_path: &str, code: impl Into<String>) -> Result<(), SandboxError> {
        let path = PathSanitizer::sanitize(raw_path)?;
        let code = code.into();

        if code.len() as u64 > self.max_file_size {
            return Err(SandboxError::FileTooLarge {
                size: code.len() as u64,
                max: self.max_file_size,
            });
        }

        if self.files.contains_key(&path) {
            return Err(SandboxError::DuplicatePath(path));
        }

        self.files.insert(path, code);
        Ok(())
    }

    /// Chaining form of [`SandboxBuilder::add_file`]
    pub fn file(mut self, raw_path: &str, code: impl Into<String>) -> Result<Self, SandboxError> {
        self.add_file(raw_path, code)?;
        Ok(self)
    }

    /// Add one dependency hint
    pub fn dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies
            .get_or_insert_with(Dependencies::new)
            .insert(name.into(), range.into());
        self
    }

    /// Replace the dependency hints wholesale
    pub fn dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    /// Set the entry hint, normalized the same way as file paths
    pub fn entry(mut self, raw_path: &str) -> Result<Self, SandboxError> {
        self.entry = Some(PathSanitizer::sanitize(raw_path)?);
        Ok(self)
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Ingest every UTF-8 file below `root`, skipping `node_modules` and `.git`
    pub fn ingest_dir(mut self, root: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let root = root.as_ref();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|e| SandboxError::ReadFailed(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| SandboxError::ReadFailed(e.to_string()))?;

            let bytes = std::fs::read(entry.path()).map_err(|e| {
                SandboxError::ReadFailed(format!("{}: {}", entry.path().display(), e))
            })?;

            // Binary assets have no meaning to the bundler's module map
            let Ok(code) = String::from_utf8(bytes) else {
                debug!(path = %relative.display(), "skipping non UTF-8 file");
                continue;
            };

            self.add_file(&relative.to_string_lossy(), code)?;
        }

        Ok(self)
    }

    /// Build the immutable description
    pub fn build(self) -> SandboxDescription {
        SandboxDescription {
            files: self.files,
            dependencies: self.dependencies,
            entry: self.entry,
            template: self.template,
        }
    }
}

impl Default for SandboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
