//! # Machine Configuration
//!
//! Switches that change how an instruction is interpreted. The defaults give
//! the canonical machine: 1024 bytes of memory, per-operand absolute or
//! relative addressing, signed displacements, and saturating subtraction as
//! the only operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a displacement byte is widened to an address offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Displacement {
    /// Two's complement, -128..=127
    Signed,
    /// Zero-extended, 0..=255
    Unsigned,
}

impl Displacement {
    /// Widen a raw displacement byte
    #[inline]
    pub const fn widen(self, byte: u8) -> i64 {
        match self {
            Displacement::Signed => byte as i8 as i64,
            Displacement::Unsigned => byte as i64,
        }
    }
}

/// Instruction interpretation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    /// Memory size in bytes (must be non-zero)
    pub memory_size: usize,
    /// Honor the absolute-addressing opcode bits; when off, every operand is relative
    pub absolute_addressing: bool,
    /// Select the operation from the low opcode bits; when off, always saturating subtract
    pub decode_opcodes: bool,
    /// Interpretation of displacement bytes
    pub displacement: Displacement,
}

impl Config {
    pub const DEFAULT: Self = Self {
        memory_size: crate::DEFAULT_MEMORY_SIZE,
        absolute_addressing: true,
        decode_opcodes: false,
        displacement: Displacement::Signed,
    };

    /// Create a configuration for a given memory size with default switches
    pub const fn with_memory_size(memory_size: usize) -> Result<Self, ConfigError> {
        if memory_size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        Ok(Self {
            memory_size,
            ..Self::DEFAULT
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ memory: {} bytes, addressing: {}, opcodes: {}, displacement: {:?} }}",
            self.memory_size,
            if self.absolute_addressing { "absolute+relative" } else { "relative" },
            if self.decode_opcodes { "decoded" } else { "subs only" },
            self.displacement,
        )
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Memory size is zero
    EmptyMemory,
    /// Dump row width is zero
    RowWidthZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyMemory => write!(f, "Memory size must be at least 1 byte"),
            ConfigError::RowWidthZero => write!(f, "Dump row width must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
