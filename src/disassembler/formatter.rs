//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::{DisassemblyOptions, Instruction, Line};

/// Two-digit uppercase hex, e.g. `10` -> `"0A"`.
pub fn hex(byte: u8) -> String {
    format!("{:02X}", byte)
}

/// Immediate operand, e.g. `#$0A`.
pub fn immediate(byte: u8) -> String {
    format!("#${}", hex(byte))
}

/// Zero page address, e.g. `$0A`.
pub fn zero_page(byte: u8) -> String {
    format!("${}", hex(byte))
}

/// 16-bit address from its little-endian stream bytes, displayed high byte
/// first: `address(0x34, 0x12)` -> `"$1234"`.
pub fn address(low: u8, high: u8) -> String {
    format!("${}{}", hex(high), hex(low))
}

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string containing the formatted assembly instruction
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the operand based on addressing mode
///
/// Missing operand bytes render as `??` placeholders.
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    let byte = match instr.operand_bytes.as_slice() {
        [b, ..] => Some(*b),
        [] => None,
    };
    let word = match instr.operand_bytes.as_slice() {
        [low, high, ..] => Some((*low, *high)),
        _ => None,
    };

    match (instr.addressing_mode, byte, word) {
        (Implicit, _, _) => String::new(),
        (Accumulator, _, _) => "A".to_string(),
        (Immediate, Some(b), _) => immediate(b),
        (Immediate, None, _) => "#$??".to_string(),
        (ZeroPage, Some(b), _) => zero_page(b),
        (ZeroPage, None, _) => "$??".to_string(),
        (ZeroPageX, Some(b), _) => format!("{},X", zero_page(b)),
        (ZeroPageX, None, _) => "$??,X".to_string(),
        (ZeroPageY, Some(b), _) => format!("{},Y", zero_page(b)),
        (ZeroPageY, None, _) => "$??,Y".to_string(),
        (Relative, Some(b), _) => {
            // Offset is relative to the following instruction
            let offset = b as i8;
            let target = instr.address.wrapping_add(2).wrapping_add(offset as u16);
            let [low, high] = target.to_le_bytes();
            address(low, high)
        }
        (Relative, None, _) => "$????".to_string(),
        (Absolute, _, Some((low, high))) => address(low, high),
        (Absolute, _, None) => "$????".to_string(),
        (AbsoluteX, _, Some((low, high))) => format!("{},X", address(low, high)),
        (AbsoluteX, _, None) => "$????,X".to_string(),
        (AbsoluteY, _, Some((low, high))) => format!("{},Y", address(low, high)),
        (AbsoluteY, _, None) => "$????,Y".to_string(),
        (Indirect, _, Some((low, high))) => format!("({})", address(low, high)),
        (Indirect, _, None) => "($????)".to_string(),
        (IndirectX, Some(b), _) => format!("({},X)", zero_page(b)),
        (IndirectX, None, _) => "($??,X)".to_string(),
        (IndirectY, Some(b), _) => format!("({}),Y", zero_page(b)),
        (IndirectY, None, _) => "($??),Y".to_string(),
    }
}

/// Comment line for a byte with no documented instruction.
pub fn format_unknown(opcode: u8) -> String {
    format!("; Unknown opcode {}", hex(opcode))
}

/// Format one listing line, with the address and byte columns requested by
/// `options`.
pub fn format_line(line: &Line, options: &DisassemblyOptions) -> String {
    let mut out = String::new();

    if options.show_offsets {
        out.push_str(&format!("{:04X}  ", line.address()));
    }

    if options.hex_dump {
        let raw = match line {
            Line::Instruction(instr) => std::iter::once(instr.opcode)
                .chain(instr.operand_bytes.iter().copied())
                .map(hex)
                .collect::<Vec<_>>()
                .join(" "),
            Line::Unknown { opcode, .. } => hex(*opcode),
        };
        out.push_str(&format!("{:<10}", raw));
    }

    match line {
        Line::Instruction(instr) => out.push_str(&format_instruction(instr)),
        Line::Unknown { opcode, .. } => out.push_str(&format_unknown(*opcode)),
    }

    out
}
