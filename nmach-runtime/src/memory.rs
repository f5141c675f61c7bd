//! Memory subsystem
//!
//! A fixed-length ring of bytes. Every address is valid; reads and writes go
//! through [`resolve`] so no access can leave the buffer.

use nmach_spec::{offset, resolve, resolve_wide, Address, ConfigError, Instruction, INSTRUCTION_LEN};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Memory {
    /// Zero-filled memory of `size` bytes
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        Ok(Memory {
            cells: vec![0; size],
        })
    }

    /// Memory filled with bytes drawn from `rng`
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self, ConfigError> {
        let mut memory = Self::new(size)?;
        rng.fill(memory.cells.as_mut_slice());
        Ok(memory)
    }

    /// Memory holding exactly `image`
    pub fn from_bytes(image: Vec<u8>) -> Result<Self, ConfigError> {
        if image.is_empty() {
            return Err(ConfigError::EmptyMemory);
        }
        Ok(Memory { cells: image })
    }

    /// Number of cells (never zero)
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a constructed memory
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Buffer index for a logical address
    #[inline]
    pub fn resolve(&self, address: Address) -> usize {
        resolve(self.cells.len(), address)
    }

    #[inline]
    pub fn read(&self, address: Address) -> u8 {
        self.cells[self.resolve(address)]
    }

    #[inline]
    pub fn write(&mut self, address: Address, value: u8) {
        let index = self.resolve(address);
        self.cells[index] = value;
    }

    /// Read a resolved index
    #[inline]
    pub fn load(&self, index: usize) -> u8 {
        self.cells[index]
    }

    /// Write a resolved index, returning the previous value
    #[inline]
    pub fn store(&mut self, index: usize, value: u8) -> u8 {
        std::mem::replace(&mut self.cells[index], value)
    }

    /// Fetch the four instruction bytes at `entry`, each individually wrapped
    pub fn fetch(&self, entry: Address) -> Instruction {
        let len = self.cells.len();
        let mut bytes = [0u8; INSTRUCTION_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.cells[resolve_wide(len, offset(entry, i as i64))];
        }
        Instruction::from_bytes(bytes)
    }

    /// Count of non-zero cells
    pub fn nonzero_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b != 0).count()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cells
    }
}
