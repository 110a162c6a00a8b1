// Public API exports
pub mod bridge;
pub mod config;
pub mod frame;
pub mod manifest;
pub mod protocol;
pub mod sandbox;
pub mod security;
pub mod template;

// Re-export main types for convenience
pub use sandbox::{Dependencies, Files, SandboxBuilder, SandboxDescription, SandboxError};
pub use security::PathSanitizer;

pub use manifest::{MANIFEST_PATH, Manifest, ManifestParseError};

pub use template::{DEFAULT_TEMPLATE, Signature, TemplateRegistry, TemplateRule};

pub use frame::{ElementId, Frame, FramePlan, Host, MemoryHost, MountError, MountTarget, WindowId};

pub use protocol::{
    CompileCommand, InboundMessage, MemoryTransport, MessageBus, Module, ModuleSet,
    OutboundMessage, Subscription, Transport,
};

pub use config::{BridgeOptions, ConfigError, ReadinessPolicy};

pub use bridge::{BridgeError, BridgeState, CompileRequest, PreviewBridge, Readiness, UpdateOutcome};
