//! Integration tests for the memory subsystem
//!
//! Tests ring addressing, instruction fetch, and dump formatting.

use nmach_runtime::{DumpStyle, Memory, MemoryDump};
use nmach_spec::{ConfigError, DEFAULT_MEMORY_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_every_address_is_valid() {
    let mut mem = Memory::new(DEFAULT_MEMORY_SIZE).unwrap();
    let addresses = [
        0,
        1023,
        1024,
        -1,
        -1024,
        -1025,
        (1 << 31) - 1,
        i64::MAX,
        i64::MIN,
    ];
    for (i, &addr) in addresses.iter().enumerate() {
        mem.write(addr, i as u8 + 1);
        assert_eq!(mem.read(addr), i as u8 + 1);
        assert!(mem.resolve(addr) < DEFAULT_MEMORY_SIZE);
    }
}

#[test]
fn test_aliases_share_a_cell() {
    let mut mem = Memory::new(8).unwrap();
    mem.write(3, 0x42);
    for k in -4..4 {
        assert_eq!(mem.read(3 + 8 * k), 0x42);
    }
}

#[test]
fn test_fetch_is_logically_contiguous() {
    let mem = Memory::from_bytes((0..16).collect()).unwrap();
    for entry in -40..40i64 {
        let bytes = mem.fetch(entry).to_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            assert_eq!(b as usize, mem.resolve(entry + i as i64));
        }
    }
}

#[test]
fn test_random_fill_uses_the_whole_range() {
    let mem = Memory::random(4096, &mut StdRng::seed_from_u64(99)).unwrap();
    let distinct: std::collections::HashSet<u8> = mem.as_slice().iter().copied().collect();
    assert!(distinct.len() > 200);
}

#[test]
fn test_dump_matches_memory() {
    let mem = Memory::random(64, &mut StdRng::seed_from_u64(5)).unwrap();
    let style = DumpStyle {
        row_width: 16,
        blank_zeros: false,
        show_nonzero: true,
    };
    let text = MemoryDump::new(&mem, style).unwrap().to_string();

    let parsed: Vec<u8> = text
        .lines()
        .take(4)
        .flat_map(|line| line.split_whitespace())
        .map(|hex| u8::from_str_radix(hex, 16).unwrap())
        .collect();
    assert_eq!(parsed, mem.as_slice());

    let nnz_line = text.lines().last().unwrap();
    assert_eq!(nnz_line, format!("nnz = {}", mem.nonzero_count()));
}

#[test]
fn test_dump_rejects_zero_width() {
    let mem = Memory::new(4).unwrap();
    let style = DumpStyle {
        row_width: 0,
        ..DumpStyle::default()
    };
    assert_eq!(MemoryDump::new(&mem, style).unwrap_err(), ConfigError::RowWidthZero);
}
