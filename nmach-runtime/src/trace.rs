//! # Execution Trace Types
//!
//! One [`StepRecord`] per executed instruction, collected when execution
//! tracing is enabled.

use nmach_spec::{Address, Instruction, Operation};
use serde::{Deserialize, Serialize};

/// A single executed instruction
///
/// Indices are buffer indices after resolution; `entry` is the raw entry
/// address as drawn by the driver. A record's position in the trace is its
/// step number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Raw entry address
    pub entry: Address,

    /// Instruction bytes as fetched
    pub instruction: Instruction,

    /// Operation applied
    pub operation: Operation,

    /// Resolved source-1 index and the value read there
    pub src1: usize,
    pub src1_value: u8,

    /// Resolved source-2 index and the value read there
    pub src2: usize,
    pub src2_value: u8,

    /// Resolved destination index
    pub dest: usize,

    /// Destination value before the write
    pub previous: u8,

    /// Value written
    pub written: u8,
}

impl StepRecord {
    /// Whether the write changed memory
    #[inline]
    pub fn mutated(&self) -> bool {
        self.previous != self.written
    }
}
