//! Main disassembler logic
//!
//! Any byte can start an instruction, so a listing is a window of entry
//! addresses rather than a walk over fixed instruction boundaries.

use nmach_runtime::{decode, Memory};
use nmach_spec::{Address, Config};
use crate::formatter::{format, format_bytes};

/// Render the instruction seen from `entry` as a single listing line
pub fn disassemble_at(memory: &Memory, entry: Address, config: &Config) -> String {
    let resolved = decode(memory, entry, config);
    let text = format(&resolved.instruction, config);
    format!(
        "{:>12}  {:#06x}  {}  {:<36} ; {:#06x} {:#06x} -> {:#06x}",
        entry,
        memory.resolve(entry),
        format_bytes(&resolved.instruction),
        text,
        resolved.src1,
        resolved.src2,
        resolved.dest,
    )
}

/// Disassemble `count` consecutive entry addresses starting at `start`
pub fn disassemble(memory: &Memory, start: Address, count: usize, config: &Config) -> String {
    let mut output = String::new();

    output.push_str("; NMACH Disassembly\n");
    output.push_str(&format!("; {}\n", config));
    output.push_str(&format!(
        "; Entries: {} instructions from {}\n",
        count, start
    ));
    output.push('\n');

    let mut entry = Some(start);
    for _ in 0..count {
        // The listing ends at i64::MAX rather than jumping to i64::MIN
        let Some(current) = entry else { break };
        output.push_str(&disassemble_at(memory, current, config));
        output.push('\n');
        entry = current.checked_add(1);
    }

    output
}
