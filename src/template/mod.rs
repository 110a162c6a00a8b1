mod registry;


pub use registry::TemplateRegistry;

use crate::manifest::{DEFAULT_ENTRY, Manifest};
use crate::protocol::ModuleSet;
use std::path::Path;

/// Template used when no rule matches
pub const DEFAULT_TEMPLATE: &str = "parcel";

/// What a rule looks for in a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// A package in `dependencies` or `devDependencies`
    Dependency(String),
    /// Any one of several packages
    AnyDependency(Vec<String>),
    /// A module with this file extension (without dot, case-insensitive)
    Extension(String),
    /// A module at this exact path
    File(String),
    /// At least this many entries in `dependencies`
    MinDependencies(usize),
}

impl Signature {
    pub fn dependency(name: impl Into<String>) -> Self {
        Self::Dependency(name.into())
    }

    pub fn extension(extension: impl Into<String>) -> Self {
        Self::Extension(extension.into().to_lowercase())
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::File(path.into())
    }

    pub fn matches(&self, manifest: &Manifest, modules: &ModuleSet) -> bool {
        match self {
            Self::Dependency(name) => manifest.has_dependency(name),
            Self::AnyDependency(names) => names.iter().any(|name| manifest.has_dependency(name)),
            Self::Extension(extension) => modules
                .keys()
                .any(|path| extension_of(path).as_deref() == Some(extension.as_str())),
            Self::File(path) => modules.contains_key(path),
            Self::MinDependencies(count) => manifest.dependencies.len() >= *count,
        }
    }
}

/// Maps a signature to the template it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRule {
    pub signature: Signature,
    pub template: String,
}

impl TemplateRule {
    pub fn new(signature: Signature, template: impl Into<String>) -> Self {
        Self {
            signature,
            template: template.into(),
        }
    }
}

/// Entry file a template expects when the project does not name one
pub fn default_entry(template: &str) -> &'static str {
    match template {
        "create-react-app" => "/src/index.js",
        "create-react-app-typescript" => "/src/index.tsx",
        "vue-cli" => "/src/main.js",
        "angular-cli" => "/src/main.ts",
        "reason" => "/src/index.re",
        _ => DEFAULT_ENTRY,
    }
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}
