//! Project manifest (`/package.json`) parsing and synthesis.
//!
//! A compile cycle always has exactly one active manifest: the user's own
//! `/package.json` when it parses, otherwise one synthesized from the
//! dependency and entry hints of the sandbox description.

mod error;


pub use error::ManifestParseError;

use crate::sandbox::{Dependencies, Files};
use serde_json::{Map, Value};
use tracing::warn;

/// Reserved path of the project manifest inside a file tree
pub const MANIFEST_PATH: &str = "/package.json";

/// Name given to synthesized manifests
pub const DEFAULT_PROJECT_NAME: &str = "sandpack-project";

/// Entry used when neither the caller nor the template provides one
pub const DEFAULT_ENTRY: &str = "/index.js";

/// The fields of a package.json the bridge cares about.
///
/// Any other top-level field, and any known field whose value has an
/// unexpected type, is kept in `extra` so a user manifest survives parsing
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,

    /// The `main` field
    pub entry: Option<String>,

    pub dependencies: Dependencies,

    /// The `devDependencies` field
    pub dev_dependencies: Dependencies,

    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Build a manifest from sandbox hints
    pub fn synthesized(
        dependencies: Option<&Dependencies>,
        entry: Option<&str>,
        default_entry: &str,
    ) -> Self {
        Self {
            name: Some(DEFAULT_PROJECT_NAME.to_string()),
            entry: Some(entry.unwrap_or(default_entry).to_string()),
            dependencies: dependencies.cloned().unwrap_or_default(),
            dev_dependencies: Dependencies::new(),
            extra: Map::new(),
        }
    }

    /// Parse the text of a package.json file.
    ///
    /// Only invalid JSON or a non-object document is an error. Fields of the
    /// wrong type are read leniently: a dependency map that is not an object
    /// counts as empty, and numeric versions are stringified.
    pub fn parse(code: &str) -> Result<Self, ManifestParseError> {
        let parse_error = |source: serde_json::Error| ManifestParseError {
            path: MANIFEST_PATH.to_string(),
            source,
        };

        let value: Value = serde_json::from_str(code).map_err(parse_error)?;
        let Value::Object(mut extra) = value else {
            return Err(parse_error(serde::de::Error::custom(
                "expected an object at the top level",
            )));
        };

        Ok(Self {
            name: take_string(&mut extra, "name"),
            entry: take_string(&mut extra, "main"),
            dependencies: take_dependencies(&mut extra, "dependencies"),
            dev_dependencies: take_dependencies(&mut extra, "devDependencies"),
            extra,
        })
    }

    /// Names from `dependencies` followed by `devDependencies`
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        if let Some(name) = &self.name {
            object.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(entry) = &self.entry {
            object.insert("main".to_string(), Value::String(entry.clone()));
        }
        if !self.dependencies.is_empty() || !object.contains_key("dependencies") {
            object.insert("dependencies".to_string(), dependency_object(&self.dependencies));
        }
        if !self.dev_dependencies.is_empty() {
            object.insert(
                "devDependencies".to_string(),
                dependency_object(&self.dev_dependencies),
            );
        }
        Value::Object(object)
    }

    /// Pretty-printed package.json text
    pub fn to_json(&self) -> String {
        format!("{:#}", self.to_value())
    }
}

/// Remove `key` when it holds a string; any other value stays in `object`
fn take_string(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(object.get(key), Some(Value::String(_))) {
        return None;
    }
    match object.remove(key) {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

/// Remove `key` when it holds an object and read its entries as versions
fn take_dependencies(object: &mut Map<String, Value>, key: &str) -> Dependencies {
    if !matches!(object.get(key), Some(Value::Object(_))) {
        return Dependencies::new();
    }
    let Some(Value::Object(entries)) = object.remove(key) else {
        return Dependencies::new();
    };

    entries
        .into_iter()
        .filter_map(|(name, range)| match range {
            Value::String(range) => Some((name, range)),
            Value::Number(range) => Some((name, range.to_string())),
            _ => None,
        })
        .collect()
}

fn dependency_object(dependencies: &Dependencies) -> Value {
    Value::Object(
        dependencies
            .iter()
            .map(|(name, range)| (name.clone(), Value::String(range.clone())))
            .collect(),
    )
}

/// Return `files` with a synthesized manifest at [`MANIFEST_PATH`] if, and
/// only if, the tree does not already carry one.
pub fn synthesize(
    files: &Files,
    dependencies: Option<&Dependencies>,
    entry: Option<&str>,
    default_entry: &str,
) -> Files {
    let mut files = files.clone();
    if !files.contains_key(MANIFEST_PATH) {
        let manifest = Manifest::synthesized(dependencies, entry, default_entry);
        files.insert(MANIFEST_PATH.to_string(), manifest.to_json());
    }
    files
}

/// Pick the manifest governing a compile cycle.
///
/// A manifest file that fails to parse is reported and replaced by a
/// synthesized one; it never blocks the compile.
pub fn active_manifest(
    files: &Files,
    dependencies: Option<&Dependencies>,
    entry: Option<&str>,
    default_entry: &str,
) -> Manifest {
    let Some(code) = files.get(MANIFEST_PATH) else {
        return Manifest::synthesized(dependencies, entry, default_entry);
    };

    match Manifest::parse(code) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(error = %err, "falling back to a synthesized manifest");
            Manifest::synthesized(dependencies, entry, default_entry)
        }
    }
}
