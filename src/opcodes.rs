//! # Opcode Table
//!
//! The documented NMOS 6502 instruction set and a 256-entry lookup table
//! indexed by opcode byte.
//!
//! - **151 documented opcodes** map to exactly one [`OpcodeMetadata`]
//! - **105 remaining byte values** map to `None` and are reported by the
//!   disassembler as unknown opcodes
//!
//! The lookup table is built at compile time from [`INSTRUCTION_SET`]; a
//! duplicated opcode in the list fails the build.

use crate::addressing::AddressingMode;
use AddressingMode::*;

/// Static description of one documented opcode.
///
/// # Examples
///
/// ```
/// use nesdis::{lookup, AddressingMode};
///
/// let lda = lookup(0xA9).unwrap();
/// assert_eq!(lda.mnemonic, "LDA");
/// assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda.size_bytes(), 2);
///
/// assert!(lookup(0x02).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Opcode byte value.
    pub opcode: u8,

    /// Three-letter instruction name (e.g., "LDA", "STA").
    pub mnemonic: &'static str,

    /// Addressing mode, which also fixes the operand byte count.
    pub addressing_mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Number of operand bytes following the opcode (0-2).
    pub const fn operand_bytes(&self) -> u8 {
        self.addressing_mode.operand_bytes()
    }

    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        1 + self.operand_bytes()
    }
}

const fn op(opcode: u8, mnemonic: &'static str, addressing_mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata {
        opcode,
        mnemonic,
        addressing_mode,
    }
}

/// The documented instruction set, grouped by mnemonic.
pub const INSTRUCTION_SET: [OpcodeMetadata; 151] = [
    // ADC
    op(0x61, "ADC", IndirectX),
    op(0x65, "ADC", ZeroPage),
    op(0x69, "ADC", Immediate),
    op(0x6D, "ADC", Absolute),
    op(0x71, "ADC", IndirectY),
    op(0x75, "ADC", ZeroPageX),
    op(0x79, "ADC", AbsoluteY),
    op(0x7D, "ADC", AbsoluteX),
    // AND
    op(0x21, "AND", IndirectX),
    op(0x25, "AND", ZeroPage),
    op(0x29, "AND", Immediate),
    op(0x2D, "AND", Absolute),
    op(0x31, "AND", IndirectY),
    op(0x35, "AND", ZeroPageX),
    op(0x39, "AND", AbsoluteY),
    op(0x3D, "AND", AbsoluteX),
    // ASL
    op(0x06, "ASL", ZeroPage),
    op(0x0A, "ASL", Accumulator),
    op(0x0E, "ASL", Absolute),
    op(0x16, "ASL", ZeroPageX),
    op(0x1E, "ASL", AbsoluteX),
    // BCC
    op(0x90, "BCC", Relative),
    // BCS
    op(0xB0, "BCS", Relative),
    // BEQ
    op(0xF0, "BEQ", Relative),
    // BIT
    op(0x24, "BIT", ZeroPage),
    op(0x2C, "BIT", Absolute),
    // BMI
    op(0x30, "BMI", Relative),
    // BNE
    op(0xD0, "BNE", Relative),
    // BPL
    op(0x10, "BPL", Relative),
    // BRK
    op(0x00, "BRK", Implicit),
    // BVC
    op(0x50, "BVC", Relative),
    // BVS
    op(0x70, "BVS", Relative),
    // CLC
    op(0x18, "CLC", Implicit),
    // CLD
    op(0xD8, "CLD", Implicit),
    // CLI
    op(0x58, "CLI", Implicit),
    // CLV
    op(0xB8, "CLV", Implicit),
    // CMP
    op(0xC1, "CMP", IndirectX),
    op(0xC5, "CMP", ZeroPage),
    op(0xC9, "CMP", Immediate),
    op(0xCD, "CMP", Absolute),
    op(0xD1, "CMP", IndirectY),
    op(0xD5, "CMP", ZeroPageX),
    op(0xD9, "CMP", AbsoluteY),
    op(0xDD, "CMP", AbsoluteX),
    // CPX
    op(0xE0, "CPX", Immediate),
    op(0xE4, "CPX", ZeroPage),
    op(0xEC, "CPX", Absolute),
    // CPY
    op(0xC0, "CPY", Immediate),
    op(0xC4, "CPY", ZeroPage),
    op(0xCC, "CPY", Absolute),
    // DEC
    op(0xC6, "DEC", ZeroPage),
    op(0xCE, "DEC", Absolute),
    op(0xD6, "DEC", ZeroPageX),
    op(0xDE, "DEC", AbsoluteX),
    // DEX
    op(0xCA, "DEX", Implicit),
    // DEY
    op(0x88, "DEY", Implicit),
    // EOR
    op(0x41, "EOR", IndirectX),
    op(0x45, "EOR", ZeroPage),
    op(0x49, "EOR", Immediate),
    op(0x4D, "EOR", Absolute),
    op(0x51, "EOR", IndirectY),
    op(0x55, "EOR", ZeroPageX),
    op(0x59, "EOR", AbsoluteY),
    op(0x5D, "EOR", AbsoluteX),
    // INC
    op(0xE6, "INC", ZeroPage),
    op(0xEE, "INC", Absolute),
    op(0xF6, "INC", ZeroPageX),
    op(0xFE, "INC", AbsoluteX),
    // INX
    op(0xE8, "INX", Implicit),
    // INY
    op(0xC8, "INY", Implicit),
    // JMP
    op(0x4C, "JMP", Absolute),
    op(0x6C, "JMP", Indirect),
    // JSR
    op(0x20, "JSR", Absolute),
    // LDA
    op(0xA1, "LDA", IndirectX),
    op(0xA5, "LDA", ZeroPage),
    op(0xA9, "LDA", Immediate),
    op(0xAD, "LDA", Absolute),
    op(0xB1, "LDA", IndirectY),
    op(0xB5, "LDA", ZeroPageX),
    op(0xB9, "LDA", AbsoluteY),
    op(0xBD, "LDA", AbsoluteX),
    // LDX
    op(0xA2, "LDX", Immediate),
    op(0xA6, "LDX", ZeroPage),
    op(0xAE, "LDX", Absolute),
    op(0xB6, "LDX", ZeroPageY),
    op(0xBE, "LDX", AbsoluteY),
    // LDY
    op(0xA0, "LDY", Immediate),
    op(0xA4, "LDY", ZeroPage),
    op(0xAC, "LDY", Absolute),
    op(0xB4, "LDY", ZeroPageX),
    op(0xBC, "LDY", AbsoluteX),
    // LSR
    op(0x46, "LSR", ZeroPage),
    op(0x4A, "LSR", Accumulator),
    op(0x4E, "LSR", Absolute),
    op(0x56, "LSR", ZeroPageX),
    op(0x5E, "LSR", AbsoluteX),
    // NOP
    op(0xEA, "NOP", Implicit),
    // ORA
    op(0x01, "ORA", IndirectX),
    op(0x05, "ORA", ZeroPage),
    op(0x09, "ORA", Immediate),
    op(0x0D, "ORA", Absolute),
    op(0x11, "ORA", IndirectY),
    op(0x15, "ORA", ZeroPageX),
    op(0x19, "ORA", AbsoluteY),
    op(0x1D, "ORA", AbsoluteX),
    // PHA
    op(0x48, "PHA", Implicit),
    // PHP
    op(0x08, "PHP", Implicit),
    // PLA
    op(0x68, "PLA", Implicit),
    // PLP
    op(0x28, "PLP", Implicit),
    // ROL
    op(0x26, "ROL", ZeroPage),
    op(0x2A, "ROL", Accumulator),
    op(0x2E, "ROL", Absolute),
    op(0x36, "ROL", ZeroPageX),
    op(0x3E, "ROL", AbsoluteX),
    // ROR
    op(0x66, "ROR", ZeroPage),
    op(0x6A, "ROR", Accumulator),
    op(0x6E, "ROR", Absolute),
    op(0x76, "ROR", ZeroPageX),
    op(0x7E, "ROR", AbsoluteX),
    // RTI
    op(0x40, "RTI", Implicit),
    // RTS
    op(0x60, "RTS", Implicit),
    // SBC
    op(0xE1, "SBC", IndirectX),
    op(0xE5, "SBC", ZeroPage),
    op(0xE9, "SBC", Immediate),
    op(0xED, "SBC", Absolute),
    op(0xF1, "SBC", IndirectY),
    op(0xF5, "SBC", ZeroPageX),
    op(0xF9, "SBC", AbsoluteY),
    op(0xFD, "SBC", AbsoluteX),
    // SEC
    op(0x38, "SEC", Implicit),
    // SED
    op(0xF8, "SED", Implicit),
    // SEI
    op(0x78, "SEI", Implicit),
    // STA
    op(0x81, "STA", IndirectX),
    op(0x85, "STA", ZeroPage),
    op(0x8D, "STA", Absolute),
    op(0x91, "STA", IndirectY),
    op(0x95, "STA", ZeroPageX),
    op(0x99, "STA", AbsoluteY),
    op(0x9D, "STA", AbsoluteX),
    // STX
    op(0x86, "STX", ZeroPage),
    op(0x8E, "STX", Absolute),
    op(0x96, "STX", ZeroPageY),
    // STY
    op(0x84, "STY", ZeroPage),
    op(0x8C, "STY", Absolute),
    op(0x94, "STY", ZeroPageX),
    // TAX
    op(0xAA, "TAX", Implicit),
    // TAY
    op(0xA8, "TAY", Implicit),
    // TSX
    op(0xBA, "TSX", Implicit),
    // TXA
    op(0x8A, "TXA", Implicit),
    // TXS
    op(0x9A, "TXS", Implicit),
    // TYA
    op(0x98, "TYA", Implicit),
];

/// Lookup table indexed by opcode byte. Undocumented opcodes are `None`.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table(&INSTRUCTION_SET);

const fn build_table(set: &[OpcodeMetadata]) -> [Option<OpcodeMetadata>; 256] {
    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];
    let mut i = 0;

    while i < set.len() {
        let entry = set[i];
        if table[entry.opcode as usize].is_some() {
            panic!("opcode listed twice in INSTRUCTION_SET");
        }
        table[entry.opcode as usize] = Some(entry);
        i += 1;
    }

    table
}

/// Look up the instruction definition for an opcode byte.
///
/// Returns `None` for the 105 undocumented opcodes.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_index_matches_opcode() {
        for (index, entry) in OPCODE_TABLE.iter().enumerate() {
            if let Some(metadata) = entry {
                assert_eq!(metadata.opcode as usize, index);
            }
        }
    }

    #[test]
    fn test_lookup_jmp_forms() {
        assert_eq!(lookup(0x4C).map(|m| m.addressing_mode), Some(Absolute));
        assert_eq!(lookup(0x6C).map(|m| m.addressing_mode), Some(Indirect));
    }

    #[test]
    fn test_lookup_undocumented() {
        for opcode in [0x02, 0x03, 0x1A, 0x80, 0xEB, 0xFF] {
            assert!(lookup(opcode).is_none(), "0x{:02X} should be absent", opcode);
        }
    }
}
