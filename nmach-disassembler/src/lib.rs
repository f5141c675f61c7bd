//! # NMACH Disassembler
//!
//! Show what the machine would do if it entered memory at a given address.
//!
//! Each listing line gives the entry address, the buffer index it folds to,
//! the four fetched bytes, the instruction as text, and the resolved
//! source and destination indices.
//!
//! ## Example
//!
//! ```rust
//! use nmach_disassembler::disassemble;
//! use nmach_runtime::Memory;
//! use nmach_spec::Config;
//!
//! let memory = Memory::from_bytes(vec![0x00, 1, 1, 2, 0, 0, 0, 0]).unwrap();
//! let config = Config::with_memory_size(8).unwrap();
//! let asm = disassemble(&memory, 0, 4, &config);
//! assert!(asm.contains("subs [rel+1], [rel+1] -> [rel+2]"));
//! ```

pub mod formatter;
pub mod disassembler;

pub use disassembler::{disassemble, disassemble_at};
pub use formatter::{format, format_bytes, format_operand};
