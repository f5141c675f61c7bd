//! Stress tests for nmach
//!
//! Long runs, degenerate ring sizes, and extreme entry addresses.

use nmach_runtime::{execute, HaltReason, Machine, MachineConfig, Memory};
use nmach_spec::{Config, Displacement, Opcode};
use proptest::prelude::*;

fn config(size: usize, steps: u64) -> MachineConfig {
    MachineConfig {
        spec: Config::with_memory_size(size).unwrap(),
        max_steps: Some(steps),
        seed: Some(1234),
        enable_execution_trace: false,
    }
}

// ============================================================================
// Long Runs
// ============================================================================

#[test]
fn test_100k_steps_canonical_size() {
    let result = Machine::new(config(1024, 100_000)).unwrap().run().unwrap();
    assert_eq!(result.halt_reason, HaltReason::StepLimit);
    assert_eq!(result.steps, 100_000);
    assert!(result.nonzero <= 1024);
}

#[test]
fn test_large_ring() {
    let result = Machine::new(config(1 << 16, 20_000)).unwrap().run().unwrap();
    assert_eq!(result.steps, 20_000);
}

#[test]
fn test_long_run_all_switches() {
    let mut cfg = config(512, 50_000);
    cfg.spec.decode_opcodes = true;
    cfg.spec.displacement = Displacement::Unsigned;
    let result = Machine::new(cfg).unwrap().run().unwrap();
    assert_eq!(result.steps, 50_000);
}

// ============================================================================
// Degenerate Sizes
// ============================================================================

#[test]
fn test_single_cell_ring() {
    // Every operand aliases the one cell, so x - x clears it
    let mut mem = Memory::from_bytes(vec![0xC3]).unwrap();
    let record = execute(&mut mem, 12345, &Config::with_memory_size(1).unwrap());
    assert_eq!((record.src1, record.src2, record.dest), (0, 0, 0));
    assert_eq!(mem.as_slice(), &[0]);
}

#[test]
fn test_tiny_rings_stay_in_bounds() {
    for size in 1..=5 {
        let mut machine = Machine::new(config(size, 0)).unwrap();
        for _ in 0..1_000 {
            let record = machine.step();
            assert!(record.src1 < size);
            assert!(record.src2 < size);
            assert!(record.dest < size);
        }
        assert_eq!(machine.memory().len(), size);
    }
}

// ============================================================================
// Extreme Entries
// ============================================================================

#[test]
fn test_extreme_entries() {
    for size in [7usize, 1000, 1024] {
        let spec = Config::with_memory_size(size).unwrap();
        let mut mem = Memory::from_bytes((0..size).map(|i| i as u8).collect()).unwrap();
        for entry in [i64::MIN, i64::MIN + 1, -1, i64::MAX - 3, i64::MAX - 1, i64::MAX] {
            let record = execute(&mut mem, entry, &spec);
            assert_eq!(record.entry, entry);

            let displacement = record.instruction.dest as i8 as i128;
            let expected = if record.instruction.opcode.to_u8() & Opcode::DEST_ABSOLUTE != 0 {
                displacement.rem_euclid(size as i128)
            } else {
                (entry as i128 + displacement).rem_euclid(size as i128)
            };
            assert_eq!(record.dest as i128, expected, "size={size} entry={entry}");
        }
    }
}

#[test]
fn test_negative_entry_matches_positive_congruent() {
    let spec = Config::with_memory_size(1024).unwrap();
    let base = nmach_runtime::run(6, 0).unwrap();

    for entry in [-1i64, -1024 * 7 + 13, -5000] {
        let mut a = base.clone();
        let mut b = base.clone();
        let ra = execute(&mut a, entry, &spec);
        let rb = execute(&mut b, entry.rem_euclid(1024), &spec);
        assert_eq!((ra.src1, ra.src2, ra.dest, ra.written), (rb.src1, rb.src2, rb.dest, rb.written));
        assert_eq!(a, b);
    }
}

proptest! {
    #[test]
    fn test_random_images_single_write(
        image in prop::collection::vec(any::<u8>(), 1..300),
        entry in any::<i64>(),
        decode_opcodes in any::<bool>(),
        absolute_addressing in any::<bool>(),
    ) {
        let spec = Config {
            decode_opcodes,
            absolute_addressing,
            ..Config::with_memory_size(image.len()).unwrap()
        };
        let before = Memory::from_bytes(image).unwrap();
        let mut after = before.clone();
        let record = execute(&mut after, entry, &spec);

        let changed: Vec<usize> = (0..before.len())
            .filter(|&i| before.load(i) != after.load(i))
            .collect();
        prop_assert!(changed.len() <= 1);
        prop_assert_eq!(after.load(record.dest), record.written);
    }
}
