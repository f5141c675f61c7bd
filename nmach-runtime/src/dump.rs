//! Memory dump formatting
//!
//! Each byte is printed as two lowercase hex digits and a space, a fixed
//! number of bytes per line, followed by one blank line. Zero bytes can be
//! left blank so the live cells stand out.

use std::fmt;
use nmach_spec::{ConfigError, DUMP_ROW_WIDTH};
use crate::memory::Memory;

/// Dump layout options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpStyle {
    /// Bytes per line
    pub row_width: usize,
    /// Render zero bytes as blanks instead of `00`
    pub blank_zeros: bool,
    /// Append a `nnz = N` line
    pub show_nonzero: bool,
}

impl Default for DumpStyle {
    fn default() -> Self {
        Self {
            row_width: DUMP_ROW_WIDTH,
            blank_zeros: true,
            show_nonzero: true,
        }
    }
}

impl DumpStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_width == 0 {
            return Err(ConfigError::RowWidthZero);
        }
        Ok(())
    }
}

/// Printable view of a memory buffer
#[derive(Debug, Clone, Copy)]
pub struct MemoryDump<'a> {
    memory: &'a Memory,
    style: DumpStyle,
}

impl<'a> MemoryDump<'a> {
    pub fn new(memory: &'a Memory, style: DumpStyle) -> Result<Self, ConfigError> {
        style.validate()?;
        Ok(Self { memory, style })
    }

    /// Non-zero cells of the viewed memory
    pub fn nonzero_count(&self) -> usize {
        self.memory.nonzero_count()
    }
}

impl fmt::Display for MemoryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &byte) in self.memory.as_slice().iter().enumerate() {
            if byte == 0 && self.style.blank_zeros {
                f.write_str("   ")?;
            } else {
                write!(f, "{:02x} ", byte)?;
            }
            if (i + 1) % self.style.row_width == 0 {
                f.write_str("\n")?;
            }
        }
        f.write_str("\n")?;

        if self.style.show_nonzero {
            writeln!(f, "nnz = {}", self.nonzero_count())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(row_width: usize) -> DumpStyle {
        DumpStyle {
            row_width,
            blank_zeros: false,
            show_nonzero: false,
        }
    }

    #[test]
    fn test_default_style() {
        let style = DumpStyle::default();
        assert_eq!(style.row_width, 32);
        assert!(style.blank_zeros);
        assert!(style.show_nonzero);
    }

    #[test]
    fn test_zero_row_width_rejected() {
        let mem = Memory::new(4).unwrap();
        assert_eq!(
            MemoryDump::new(&mem, plain(0)).unwrap_err(),
            ConfigError::RowWidthZero
        );
    }

    #[test]
    fn test_hex_rows() {
        let mem = Memory::from_bytes(vec![0x00, 0x0a, 0xff, 0x10]).unwrap();
        let dump = MemoryDump::new(&mem, plain(2)).unwrap();
        assert_eq!(dump.to_string(), "00 0a \nff 10 \n\n");
    }

    #[test]
    fn test_blank_zeros() {
        let mem = Memory::from_bytes(vec![0x00, 0x0a, 0x00, 0x10]).unwrap();
        let style = DumpStyle {
            blank_zeros: true,
            ..plain(4)
        };
        let dump = MemoryDump::new(&mem, style).unwrap();
        assert_eq!(dump.to_string(), "   0a    10 \n\n");
    }

    #[test]
    fn test_partial_last_row() {
        let mem = Memory::from_bytes(vec![1, 2, 3]).unwrap();
        let dump = MemoryDump::new(&mem, plain(2)).unwrap();
        assert_eq!(dump.to_string(), "01 02 \n03 \n");
    }

    #[test]
    fn test_nonzero_line() {
        let mem = Memory::from_bytes(vec![0, 7, 0, 9]).unwrap();
        let style = DumpStyle {
            show_nonzero: true,
            ..plain(4)
        };
        let dump = MemoryDump::new(&mem, style).unwrap();
        assert_eq!(dump.nonzero_count(), mem.nonzero_count());
        assert!(dump.to_string().ends_with("\n\nnnz = 2\n"));
    }

    #[test]
    fn test_canonical_layout() {
        let mem = Memory::from_bytes(vec![0xAB; 1024]).unwrap();
        let out = MemoryDump::new(&mem, plain(32)).unwrap().to_string();
        let lines: Vec<&str> = out.split('\n').collect();
        // 32 rows, a blank line, and the empty tail after the final newline
        assert_eq!(lines.len(), 34);
        assert!(lines[..32].iter().all(|l| l.len() == 32 * 3));
        assert_eq!(lines[32], "");
    }
}
