use super::ElementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    #[error("No element found for selector '{selector}'")]
    NoElement { selector: String },

    #[error("Element for selector '{selector}' does not have a parent")]
    NoParent { selector: String },

    #[error("Element {element:?} has no content window")]
    NoContentWindow { element: ElementId },
}
