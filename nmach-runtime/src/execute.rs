//! Instruction execution
//!
//! One call fetches the four bytes at the entry address, resolves the three
//! operands, applies the operation and writes one byte. There is no program
//! counter and no failure path: every entry address is valid.

use nmach_spec::{Address, Config, Instruction, Operation, Slot};
use crate::memory::Memory;
use crate::trace::StepRecord;

/// An instruction with all operand addresses resolved to buffer indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInstruction {
    pub entry: Address,
    pub instruction: Instruction,
    pub operation: Operation,
    pub src1: usize,
    pub src2: usize,
    pub dest: usize,
}

/// Fetch and decode the instruction at `entry` without executing it
///
/// Operands fold modulo `memory.len()`, whatever `config.memory_size` says.
pub fn decode(memory: &Memory, entry: Address, config: &Config) -> ResolvedInstruction {
    let instruction = memory.fetch(entry);
    let len = memory.len();
    let index = |slot: Slot| instruction.operand(slot, config).resolve(len, entry);

    ResolvedInstruction {
        entry,
        instruction,
        operation: instruction.operation(config),
        src1: index(Slot::Source1),
        src2: index(Slot::Source2),
        dest: index(Slot::Destination),
    }
}

/// Execute the instruction at `entry`, mutating at most one byte of `memory`
///
/// The ring size is `memory.len()`; `config.memory_size` only matters when
/// memory is built. `Machine` keeps the two equal.
pub fn execute(memory: &mut Memory, entry: Address, config: &Config) -> StepRecord {
    let resolved = decode(memory, entry, config);

    // Both sources are read before the write, even when an operand aliases dest
    let src1_value = memory.load(resolved.src1);
    let src2_value = memory.load(resolved.src2);
    let written = resolved.operation.apply(src1_value, src2_value);
    let previous = memory.store(resolved.dest, written);

    tracing::trace!(
        entry,
        opcode = %resolved.instruction.opcode,
        op = %resolved.operation,
        src1 = resolved.src1,
        src2 = resolved.src2,
        dest = resolved.dest,
        written,
        "executed"
    );

    StepRecord {
        entry,
        instruction: resolved.instruction,
        operation: resolved.operation,
        src1: resolved.src1,
        src1_value,
        src2: resolved.src2,
        src2_value,
        dest: resolved.dest,
        previous,
        written,
    }
}
