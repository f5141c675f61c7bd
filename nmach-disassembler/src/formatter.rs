//! Instruction formatting to assembly text

use nmach_spec::{AddressingMode, Config, Instruction, Operand, Slot};

/// Format instruction as assembly text
///
/// ```text
/// subs [rel+1], [abs 16] -> [rel-2]
/// not [rel+4] -> [abs 0]
/// ```
pub fn format(instr: &Instruction, config: &Config) -> String {
    let operation = instr.operation(config);
    let src1 = format_operand(&instr.operand(Slot::Source1, config));
    let dest = format_operand(&instr.operand(Slot::Destination, config));

    if operation.uses_src2() {
        let src2 = format_operand(&instr.operand(Slot::Source2, config));
        format!("{} {}, {} -> {}", operation.mnemonic(), src1, src2, dest)
    } else {
        format!("{} {} -> {}", operation.mnemonic(), src1, dest)
    }
}

/// Format an operand selector
pub fn format_operand(operand: &Operand) -> String {
    match operand.mode {
        AddressingMode::Relative => format!("[rel{:+}]", operand.displacement),
        AddressingMode::Absolute => format!("[abs {}]", operand.displacement),
    }
}

/// Format the raw instruction bytes
pub fn format_bytes(instr: &Instruction) -> String {
    let [a, b, c, d] = instr.to_bytes();
    format!("{:02x} {:02x} {:02x} {:02x}", a, b, c, d)
}
