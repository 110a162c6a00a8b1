use crate::sandbox::Files;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version tag the bundler expects on compile commands
pub const PROTOCOL_VERSION: u32 = 3;

/// One module as it travels over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    pub path: String,
}

/// Path -> module, the `modules` field of a compile command
pub type ModuleSet = BTreeMap<String, Module>;

/// Convert a file tree into its wire form, one module per path
pub fn module_set(files: &Files) -> ModuleSet {
    files
        .iter()
        .map(|(path, code)| {
            (
                path.clone(),
                Module {
                    code: code.clone(),
                    path: path.clone(),
                },
            )
        })
        .collect()
}

/// Messages the frame sends to the host.
///
/// Only `initialized` drives the bridge; every other kind is kept as
/// `Ignored` so newer bundlers can add messages without breaking older hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Initialized,
    Ignored { kind: Option<String> },
}

impl InboundMessage {
    /// Classify a raw `{ type, ...payload }` message
    pub fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("initialized") => Self::Initialized,
            kind => Self::Ignored {
                kind: kind.map(str::to_string),
            },
        }
    }

    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Initialized => Some("initialized"),
            Self::Ignored { kind } => kind.as_deref(),
        }
    }
}

/// Body of a `compile` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileCommand {
    pub codesandbox: bool,
    pub version: u32,
    pub modules: ModuleSet,
    pub external_resources: Vec<String>,
    pub template: String,
    pub show_open_in_code_sandbox: bool,
    pub skip_eval: bool,
}

impl CompileCommand {
    pub fn new(modules: ModuleSet, template: impl Into<String>, skip_eval: bool) -> Self {
        Self {
            codesandbox: true,
            version: PROTOCOL_VERSION,
            modules,
            external_resources: Vec::new(),
            template: template.into(),
            show_open_in_code_sandbox: true,
            skip_eval,
        }
    }
}

/// Messages the host sends into the frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Compile(CompileCommand),
}

impl OutboundMessage {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
