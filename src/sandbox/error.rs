use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("Failed to read sandbox source: {0}")]
    ReadFailed(String),

    #[error("Invalid path in sandbox: {0}")]
    InvalidPath(String),

    #[error("Duplicate path in sandbox: {0}")]
    DuplicatePath(String),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },
}
