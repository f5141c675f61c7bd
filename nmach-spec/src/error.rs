//! # Error Types for NMACH
//!
//! Address resolution and instruction execution cannot fail. Errors only come
//! from setting a machine up; output errors belong to the runtime.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NmachError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Memory image size mismatch: expected {expected} bytes, found {found} bytes")]
    ImageSizeMismatch { expected: usize, found: usize },
}
