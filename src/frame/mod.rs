//! Frame lifecycle: plan a sandboxed frame, then commit it onto a host.
//!
//! Planning is pure. Committing performs at most one element replacement on
//! the host, and only once the target and the new frame's window are both
//! resolved.

mod error;
mod host;


pub use error::MountError;
pub use host::{ElementId, Host, MemoryHost, WindowId};

use crate::config::BridgeOptions;
use tracing::debug;

/// Layout value used when the caller sets no width or height
pub const DEFAULT_SIZE: &str = "100%";

/// Where the frame goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    /// Replace the element matching this selector with a new frame
    Selector(String),
    /// Use an existing frame element as-is
    Frame(ElementId),
}

impl MountTarget {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }
}

impl From<&str> for MountTarget {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<ElementId> for MountTarget {
    fn from(frame: ElementId) -> Self {
        Self::Frame(frame)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub width: String,
    pub height: String,
}

impl FrameLayout {
    pub fn from_options(options: &BridgeOptions) -> Self {
        Self {
            width: options.width.clone().unwrap_or_else(|| DEFAULT_SIZE.to_string()),
            height: options.height.clone().unwrap_or_else(|| DEFAULT_SIZE.to_string()),
        }
    }

    /// Style properties applied to a newly created frame
    pub fn styles(&self) -> [(&'static str, &str); 4] {
        [
            ("border", "0"),
            ("width", &self.width),
            ("height", &self.height),
            ("overflow", "hidden"),
        ]
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE.to_string(),
            height: DEFAULT_SIZE.to_string(),
        }
    }
}

/// Everything needed to mount a frame, before touching a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    target: MountTarget,
    layout: FrameLayout,
    src: String,
}

impl FramePlan {
    pub fn new(target: impl Into<MountTarget>, options: &BridgeOptions) -> Self {
        Self {
            target: target.into(),
            layout: FrameLayout::from_options(options),
            src: options.bundler_url(),
        }
    }

    pub fn target(&self) -> &MountTarget {
        &self.target
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Bundler URL the frame will load
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Mount the frame on `host`
    pub fn commit<H: Host + ?Sized>(&self, host: &mut H) -> Result<Frame, MountError> {
        let (element, window, replaced) = match &self.target {
            MountTarget::Selector(selector) => {
                let placeholder = host.query_selector(selector).ok_or_else(|| {
                    MountError::NoElement {
                        selector: selector.clone(),
                    }
                })?;
                let parent = host.parent(placeholder).ok_or_else(|| MountError::NoParent {
                    selector: selector.clone(),
                })?;

                let frame = host.create_frame();
                let window = host
                    .content_window(frame)
                    .ok_or(MountError::NoContentWindow { element: frame })?;
                for (property, value) in self.layout.styles() {
                    host.set_style(frame, property, value);
                }
                host.replace_child(parent, frame, placeholder);
                (frame, window, Some(placeholder))
            }
            MountTarget::Frame(element) => {
                let element = *element;
                let window = host
                    .content_window(element)
                    .ok_or(MountError::NoContentWindow { element })?;
                (element, window, None)
            }
        };

        host.set_src(element, &self.src);

        debug!(?element, %window, src = %self.src, "frame mounted");

        Ok(Frame {
            element,
            window,
            src: self.src.clone(),
            replaced,
        })
    }
}

/// A mounted frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    element: ElementId,
    window: WindowId,
    src: String,
    replaced: Option<ElementId>,
}

impl Frame {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Placeholder element the frame took the place of, if any
    pub fn replaced(&self) -> Option<ElementId> {
        self.replaced
    }
}
