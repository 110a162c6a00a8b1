//! Construction-time options for a preview bridge.
//!
//! Options can be built in code or loaded from TOML. Keys follow the
//! bundler's own naming:
//!
//! ```toml
//! bundlerURL = "http://localhost:3001"
//! width = "600px"
//! height = "400px"
//! skipEval = true
//! readyTimeoutMs = 10000
//! ```

mod error;


pub use error::ConfigError;

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable that switches the default bundler to a local one
pub const ENV_VAR: &str = "CODESANDBOX_ENV";

/// Bundler used when `CODESANDBOX_ENV=development`
pub const DEVELOPMENT_BUNDLER_URL: &str = "http://localhost:3001";

/// Version-pinned public bundler for this release
pub fn pinned_bundler_url() -> String {
    format!(
        "https://sandpack-{}.codesandbox.io",
        env!("CARGO_PKG_VERSION").replace('.', "-")
    )
}

/// Bundler URL used when the options do not name one
pub fn default_bundler_url() -> String {
    match std::env::var(ENV_VAR) {
        Ok(env) if env == "development" => DEVELOPMENT_BUNDLER_URL.to_string(),
        _ => pinned_bundler_url(),
    }
}

/// What the bridge does while the frame has not reported `initialized`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessPolicy {
    /// Wait indefinitely
    #[default]
    Wait,
    /// Report a timeout once this much time has passed since construction
    Deadline(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BridgeOptions {
    /// Location of the bundler
    #[serde(rename = "bundlerURL")]
    pub bundler_url: Option<String>,

    pub width: Option<String>,

    pub height: Option<String>,

    /// Skip the evaluation step after bundling
    pub skip_eval: bool,

    /// Milliseconds to wait for `initialized` before reporting a timeout
    pub ready_timeout_ms: Option<u64>,
}

impl BridgeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bundler_url(mut self, url: impl Into<String>) -> Self {
        self.bundler_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    #[must_use]
    pub fn with_skip_eval(mut self, skip_eval: bool) -> Self {
        self.skip_eval = skip_eval;
        self
    }

    #[must_use]
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Explicit bundler URL, or the default one
    pub fn bundler_url(&self) -> String {
        self.bundler_url.clone().unwrap_or_else(default_bundler_url)
    }

    pub fn readiness_policy(&self) -> ReadinessPolicy {
        match self.ready_timeout_ms {
            Some(ms) => ReadinessPolicy::Deadline(Duration::from_millis(ms)),
            None => ReadinessPolicy::Wait,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
