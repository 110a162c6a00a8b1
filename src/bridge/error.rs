use crate::frame::MountError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("Failed to encode outbound message: {0}")]
    Encode(#[from] serde_json::Error),
}
