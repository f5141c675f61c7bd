//! # Opcode Byte Layout
//!
//! ```text
//!   bit  7      6      5      4..2       1..0
//!      [src1] [src2] [dest] [reserved] [operation]
//! ```
//!
//! A set mode bit selects absolute addressing for that operand, a clear bit
//! selects addressing relative to the entry address. The low two bits select
//! an entry of the operation table when opcode decoding is enabled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an operand's displacement byte is turned into an address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingMode {
    /// Displacement measured from the entry address
    Relative,
    /// Displacement measured from the start of memory
    Absolute,
}

/// Operand slot within a four-byte instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Source1,
    Source2,
    Destination,
}

impl Slot {
    /// All operand slots in instruction order
    pub const ALL: [Slot; 3] = [Slot::Source1, Slot::Source2, Slot::Destination];

    /// Byte offset of the slot's displacement relative to the entry address
    #[inline]
    pub const fn byte_offset(self) -> i64 {
        match self {
            Slot::Source1 => 1,
            Slot::Source2 => 2,
            Slot::Destination => 3,
        }
    }

    /// Opcode bit selecting absolute addressing for this slot
    #[inline]
    pub const fn mode_flag(self) -> u8 {
        match self {
            Slot::Source1 => Opcode::SRC1_ABSOLUTE,
            Slot::Source2 => Opcode::SRC2_ABSOLUTE,
            Slot::Destination => Opcode::DEST_ABSOLUTE,
        }
    }
}

/// Raw opcode byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode(pub u8);

impl Opcode {
    /// Source-1 absolute addressing flag
    pub const SRC1_ABSOLUTE: u8 = 0x80;
    /// Source-2 absolute addressing flag
    pub const SRC2_ABSOLUTE: u8 = 0x40;
    /// Destination absolute addressing flag
    pub const DEST_ABSOLUTE: u8 = 0x20;
    /// Bits selecting the operation
    pub const OPERATION_MASK: u8 = 0x03;

    #[inline]
    pub const fn new(value: u8) -> Self {
        Opcode(value)
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self.0
    }

    /// Addressing mode encoded for `slot`
    #[inline]
    pub const fn mode(self, slot: Slot) -> AddressingMode {
        if self.0 & slot.mode_flag() != 0 {
            AddressingMode::Absolute
        } else {
            AddressingMode::Relative
        }
    }

    /// Low bits used as an index into the operation table
    #[inline]
    pub const fn operation_bits(self) -> u8 {
        self.0 & Self::OPERATION_MASK
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
