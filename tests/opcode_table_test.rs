//! Opcode table validation tests
//!
//! Verifies that the opcode table is complete and duplicate-free.

use std::collections::HashSet;

use nesdis::opcodes::INSTRUCTION_SET;
use nesdis::{lookup, AddressingMode, OPCODE_TABLE};

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(OPCODE_TABLE.len(), 256, "Opcode table must have exactly 256 entries");

    let documented = OPCODE_TABLE.iter().filter(|entry| entry.is_some()).count();
    assert_eq!(documented, 151, "Expected 151 documented opcodes");
    assert_eq!(256 - documented, 105);
}

#[test]
fn test_instruction_set_has_no_duplicates() {
    let mut seen = HashSet::new();

    for metadata in INSTRUCTION_SET.iter() {
        assert!(
            seen.insert(metadata.opcode),
            "Opcode 0x{:02X} ({}) is listed twice",
            metadata.opcode,
            metadata.mnemonic
        );
    }
}

#[test]
fn test_every_byte_is_classified_once() {
    for opcode in 0..=255u8 {
        let matches: Vec<_> = INSTRUCTION_SET
            .iter()
            .filter(|metadata| metadata.opcode == opcode)
            .copied()
            .collect();

        match lookup(opcode) {
            Some(metadata) => {
                assert_eq!(matches, vec![*metadata], "0x{:02X}", opcode);
                assert_eq!(metadata.opcode, opcode);
            }
            None => assert!(matches.is_empty(), "0x{:02X}", opcode),
        }
    }
}

#[test]
fn test_operand_sizes_follow_addressing_mode() {
    for metadata in INSTRUCTION_SET.iter() {
        let expected = match metadata.addressing_mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
            _ => 2,
        };
        assert_eq!(
            metadata.size_bytes(),
            expected,
            "Opcode 0x{:02X} ({}) has the wrong size",
            metadata.opcode,
            metadata.mnemonic
        );
    }
}

#[test]
fn test_mnemonics_are_three_uppercase_letters() {
    for metadata in INSTRUCTION_SET.iter() {
        assert_eq!(metadata.mnemonic.len(), 3);
        assert!(metadata.mnemonic.chars().all(|c| c.is_ascii_uppercase()));
    }
}

#[test]
fn test_instruction_counts() {
    let mnemonics: HashSet<_> = INSTRUCTION_SET.iter().map(|m| m.mnemonic).collect();
    assert_eq!(mnemonics.len(), 56, "The NMOS 6502 has 56 instruction types");

    let count = |name: &str| INSTRUCTION_SET.iter().filter(|m| m.mnemonic == name).count();
    assert_eq!(count("LDA"), 8);
    assert_eq!(count("STA"), 7);
    assert_eq!(count("LDX"), 5);
    assert_eq!(count("JMP"), 2);
    assert_eq!(count("NOP"), 1);
}

#[test]
fn test_branches_are_relative() {
    for opcode in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
        let metadata = lookup(opcode).unwrap();
        assert_eq!(metadata.addressing_mode, AddressingMode::Relative);
        assert!(metadata.mnemonic.starts_with('B'));
    }
}
