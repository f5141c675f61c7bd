//! NMACH Instruction Layout
//!
//! An instruction is four consecutive logical bytes:
//!
//! ```text
//!   entry+0   entry+1   entry+2   entry+3
//!   [opcode]  [src1]    [src2]    [dest]
//! ```
//!
//! Nothing is ever materialized in memory as "code": the same bytes are data
//! for instructions entered elsewhere.

use crate::address::{offset, resolve_wide, Address, WideAddress};
use crate::config::Config;
use crate::opcode::{AddressingMode, Opcode, Slot};
use crate::operation::Operation;
use serde::{Deserialize, Serialize};

/// Decoded instruction bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub src1: u8,
    pub src2: u8,
    pub dest: u8,
}

/// A single operand selector after applying the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    pub mode: AddressingMode,
    pub displacement: i64,
}

impl Operand {
    /// Logical address named by this operand for an instruction entered at `entry`
    #[inline]
    pub fn address(&self, entry: Address) -> WideAddress {
        match self.mode {
            AddressingMode::Absolute => self.displacement as WideAddress,
            AddressingMode::Relative => offset(entry, self.displacement),
        }
    }

    /// Buffer index named by this operand
    #[inline]
    pub fn resolve(&self, len: usize, entry: Address) -> usize {
        resolve_wide(len, self.address(entry))
    }
}

impl Instruction {
    pub const fn new(opcode: u8, src1: u8, src2: u8, dest: u8) -> Self {
        Self {
            opcode: Opcode(opcode),
            src1,
            src2,
            dest,
        }
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.opcode.0, self.src1, self.src2, self.dest]
    }

    /// Raw displacement byte stored in `slot`
    #[inline]
    pub const fn selector(&self, slot: Slot) -> u8 {
        match slot {
            Slot::Source1 => self.src1,
            Slot::Source2 => self.src2,
            Slot::Destination => self.dest,
        }
    }

    /// Addressing mode for `slot`, forced to relative when absolute addressing is disabled
    #[inline]
    pub fn mode(&self, slot: Slot, config: &Config) -> AddressingMode {
        if config.absolute_addressing {
            self.opcode.mode(slot)
        } else {
            AddressingMode::Relative
        }
    }

    pub fn operand(&self, slot: Slot, config: &Config) -> Operand {
        Operand {
            mode: self.mode(slot, config),
            displacement: config.displacement.widen(self.selector(slot)),
        }
    }

    pub fn operation(&self, config: &Config) -> Operation {
        if config.decode_opcodes {
            Operation::from_bits(self.opcode.operation_bits())
        } else {
            Operation::DEFAULT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Displacement;

    #[test]
    fn test_bytes_layout() {
        let instr = Instruction::from_bytes([0xA0, 1, 2, 3]);
        assert_eq!(instr.opcode, Opcode(0xA0));
        assert_eq!(instr.selector(Slot::Source1), 1);
        assert_eq!(instr.selector(Slot::Source2), 2);
        assert_eq!(instr.selector(Slot::Destination), 3);
        assert_eq!(instr.to_bytes(), [0xA0, 1, 2, 3]);
    }

    #[test]
    fn test_relative_operand_address() {
        let config = Config::DEFAULT;
        let instr = Instruction::new(0x00, 5, 0xFE, 0);
        assert_eq!(instr.operand(Slot::Source1, &config).address(100), 105);
        assert_eq!(instr.operand(Slot::Source2, &config).address(100), 98);
        assert_eq!(instr.operand(Slot::Destination, &config).address(100), 100);
    }

    #[test]
    fn test_absolute_operand_address() {
        let config = Config::DEFAULT;
        let instr = Instruction::new(0x80, 5, 5, 5);
        assert_eq!(instr.operand(Slot::Source1, &config).address(100), 5);
        assert_eq!(instr.operand(Slot::Source2, &config).address(100), 105);
    }

    #[test]
    fn test_absolute_negative_displacement_wraps_to_end() {
        let config = Config::with_memory_size(16).unwrap();
        let instr = Instruction::new(0x20, 0, 0, 0xFF);
        let dest = instr.operand(Slot::Destination, &config);
        assert_eq!(dest.address(7), -1);
        assert_eq!(dest.resolve(16, 7), 15);
    }

    #[test]
    fn test_relative_displacement_past_i64_limits() {
        let config = Config::with_memory_size(7).unwrap();
        let instr = Instruction::new(0x00, 0x7F, 0, 0xFF);

        let src1 = instr.operand(Slot::Source1, &config);
        assert_eq!(src1.address(i64::MAX), i64::MAX as WideAddress + 127);
        // i64::MAX = 0 (mod 7), so +127 lands on 127 mod 7
        assert_eq!(src1.resolve(7, i64::MAX), 1);

        let dest = instr.operand(Slot::Destination, &config);
        // i64::MIN = 6 (mod 7)
        assert_eq!(dest.resolve(7, i64::MIN), 5);
    }

    #[test]
    fn test_absolute_addressing_disabled() {
        let config = Config {
            absolute_addressing: false,
            ..Config::DEFAULT
        };
        let instr = Instruction::new(0xE0, 1, 2, 3);
        for slot in Slot::ALL {
            assert_eq!(instr.mode(slot, &config), AddressingMode::Relative);
        }
    }

    #[test]
    fn test_unsigned_displacement() {
        let config = Config {
            displacement: Displacement::Unsigned,
            ..Config::DEFAULT
        };
        let instr = Instruction::new(0x00, 0xFF, 0, 0);
        assert_eq!(instr.operand(Slot::Source1, &config).address(10), 265);
    }

    #[test]
    fn test_operation_selection() {
        let instr = Instruction::new(0x01, 0, 0, 0);
        assert_eq!(instr.operation(&Config::DEFAULT), Operation::SaturatingSub);

        let decoding = Config {
            decode_opcodes: true,
            ..Config::DEFAULT
        };
        assert_eq!(instr.operation(&decoding), Operation::And);
        assert_eq!(
            Instruction::new(0xE3, 0, 0, 0).operation(&decoding),
            Operation::SaturatingSub
        );
    }
}
