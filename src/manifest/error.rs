use thiserror::Error;

/// A manifest file exists but is not a usable package.json
#[derive(Error, Debug)]
#[error("Could not parse {path} file: {source}")]
pub struct ManifestParseError {
    pub path: String,
    #[source]
    pub source: serde_json::Error,
}
