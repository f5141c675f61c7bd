//! Runtime error types for NMACH
//!
//! Execution itself is infallible; these cover machine setup and the
//! observer hook that writes dumps.

use thiserror::Error;
use nmach_spec::{ConfigError, NmachError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] NmachError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
