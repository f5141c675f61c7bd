//! # NMACH Core Types
//!
//! Core types for a nondeterministic byte machine: a fixed-size circular
//! memory in which every byte address is valid, and a single four-byte
//! instruction format that can be entered at any address.
//!
//! ## Key Features
//! - Wraparound address resolution (floored modulo, total over all `i64`)
//! - Four-byte instructions: `[opcode][src1][src2][dest]`
//! - Per-operand absolute/relative addressing selected by opcode bits 7, 6, 5
//! - Operation table keyed on the low two opcode bits (saturating subtract
//!   unless opcode decoding is enabled)

pub mod address;
pub mod config;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operation;

pub use address::{offset, resolve, resolve_wide, Address, WideAddress};
pub use config::{Config, ConfigError, Displacement};
pub use error::NmachError;
pub use instruction::{Instruction, Operand};
pub use opcode::{AddressingMode, Opcode, Slot};
pub use operation::Operation;

/// Canonical memory size in bytes
pub const DEFAULT_MEMORY_SIZE: usize = 1024;

/// Bytes per instruction (opcode + three operand selectors)
pub const INSTRUCTION_LEN: usize = 4;

/// Exclusive upper bound of the entry addresses drawn by the driver
pub const ENTRY_RANGE: Address = 1 << 31;

/// Bytes per line of a memory dump
pub const DUMP_ROW_WIDTH: usize = 32;
