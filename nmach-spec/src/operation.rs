//! Operation table
//!
//! The machine has one active operation, saturating subtraction. The full
//! table below is reachable only when opcode decoding is switched on in
//! [`Config`](crate::Config); addressing never depends on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic performed on the two source bytes
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// dest = 0xFF - src1
    Complement = 0x00,
    /// dest = src1 & src2
    And = 0x01,
    /// dest = min(0xFF, src1 + src2)
    SaturatingAdd = 0x02,
    /// dest = max(0, src1 - src2)
    SaturatingSub = 0x03,
}

/// Dispatch table indexed by the low two opcode bits
pub const OPERATION_TABLE: [Operation; 4] = [
    Operation::Complement,
    Operation::And,
    Operation::SaturatingAdd,
    Operation::SaturatingSub,
];

impl Operation {
    /// The operation every instruction performs when opcodes are not decoded
    pub const DEFAULT: Self = Operation::SaturatingSub;

    /// Look up the operation for the low opcode bits (higher bits ignored)
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        OPERATION_TABLE[(bits & 0x03) as usize]
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Compute the destination byte. Operands are unsigned bytes.
    #[inline]
    pub fn apply(self, src1: u8, src2: u8) -> u8 {
        match self {
            Operation::Complement => 0xFF - src1,
            Operation::And => src1 & src2,
            Operation::SaturatingAdd => src1.saturating_add(src2),
            Operation::SaturatingSub => src1.saturating_sub(src2),
        }
    }

    /// Whether the result depends on the second source
    #[inline]
    pub const fn uses_src2(self) -> bool {
        !matches!(self, Operation::Complement)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Complement => "not",
            Operation::And => "and",
            Operation::SaturatingAdd => "adds",
            Operation::SaturatingSub => "subs",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
