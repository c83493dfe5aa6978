//! Integration tests for the PRG-ROM disassembler

use nesdis::addressing::AddressingMode;
use nesdis::disassembler::formatter::format_instruction;
use nesdis::disassembler::{disassemble, DisassemblyOptions, Line, END_OF_SEGMENT};
use nesdis::DecodeError;

fn text(bytes: &[u8], options: DisassemblyOptions) -> Vec<String> {
    disassemble(bytes, options).text_lines().collect()
}

#[test]
fn test_single_instruction_disassembly() {
    let bytes = &[0xA9, 0x42]; // LDA #$42

    let listing = disassemble(bytes, DisassemblyOptions::default());

    assert_eq!(listing.lines.len(), 1);
    assert!(listing.is_complete());

    let Line::Instruction(instr) = &listing.lines[0] else {
        panic!("expected an instruction");
    };
    assert_eq!(instr.address, 0x8000);
    assert_eq!(instr.opcode, 0xA9);
    assert_eq!(instr.mnemonic, "LDA");
    assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
    assert_eq!(instr.operand_bytes, vec![0x42]);
    assert_eq!(instr.size_bytes, 2);

    assert_eq!(format_instruction(instr), "LDA #$42");
}

#[test]
fn test_reset_routine() {
    let bytes = &[
        0x78, // SEI
        0xD8, // CLD
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0xAD, 0x02, 0x20, // LDA $2002
        0x10, 0xFB, // BPL (back to LDA)
        0x8D, 0x00, 0x20, // STA $2000
        0x4C, 0x00, 0x80, // JMP $8000
    ];

    assert_eq!(
        text(bytes, DisassemblyOptions::default()),
        [
            "SEI",
            "CLD",
            "LDX #$FF",
            "TXS",
            "LDA $2002",
            "BPL $8005",
            "STA $2000",
            "JMP $8000",
        ]
    );
}

#[test]
fn test_every_operand_form() {
    let bytes = &[
        0x0A, // ASL A
        0x69, 0x0A, // ADC #$0A
        0x65, 0x0A, // ADC $0A
        0x75, 0x0A, // ADC $0A,X
        0xB6, 0x0A, // LDX $0A,Y
        0x6D, 0x34, 0x12, // ADC $1234
        0x7D, 0x34, 0x12, // ADC $1234,X
        0x79, 0x34, 0x12, // ADC $1234,Y
        0x6C, 0xFC, 0xFF, // JMP ($FFFC)
        0x61, 0x40, // ADC ($40,X)
        0x71, 0x40, // ADC ($40),Y
    ];

    assert_eq!(
        text(bytes, DisassemblyOptions::default()),
        [
            "ASL A",
            "ADC #$0A",
            "ADC $0A",
            "ADC $0A,X",
            "LDX $0A,Y",
            "ADC $1234",
            "ADC $1234,X",
            "ADC $1234,Y",
            "JMP ($FFFC)",
            "ADC ($40,X)",
            "ADC ($40),Y",
        ]
    );
}

#[test]
fn test_unknown_opcode_handling() {
    let bytes = &[
        0xA9, 0x42, // LDA #$42 (valid)
        0xFF, // Undocumented
        0xEA, // NOP (valid)
    ];

    let listing = disassemble(bytes, DisassemblyOptions::default());

    assert_eq!(listing.lines.len(), 3);
    assert_eq!(
        listing.lines[1],
        Line::Unknown {
            offset: 2,
            address: 0x8002,
            opcode: 0xFF
        }
    );
    assert_eq!(
        listing.render(),
        "LDA #$42\n; Unknown opcode FF\nNOP\n; EOF\n"
    );
}

#[test]
fn test_origin_and_columns() {
    let bytes = &[
        0xA9, 0x42, // LDA #$42
        0x8D, 0x00, 0x20, // STA $2000
    ];

    let options = DisassemblyOptions {
        origin: 0xC000,
        hex_dump: true,
        show_offsets: true,
    };

    assert_eq!(
        text(bytes, options),
        ["C000  A9 42     LDA #$42", "C002  8D 00 20  STA $2000"]
    );
}

#[test]
fn test_truncated_instruction_keeps_partial_output() {
    let bytes = &[0xEA, 0xEA, 0xAD, 0x02]; // NOP, NOP, LDA abs missing high byte

    let listing = disassemble(bytes, DisassemblyOptions::default());

    assert_eq!(listing.lines.len(), 2);
    assert_eq!(
        listing.error,
        Some(DecodeError::TruncatedInstruction {
            offset: 2,
            opcode: 0xAD,
            needed: 2,
            available: 1,
        })
    );
    assert!(!listing.render().contains(END_OF_SEGMENT));
    assert_eq!(
        listing.into_result().unwrap_err().to_string(),
        "truncated instruction at offset 0x0002: opcode AD needs 2 operand byte(s), 1 available"
    );
}

#[test]
fn test_empty_disassembly() {
    let listing = disassemble(&[], DisassemblyOptions::default());
    assert!(listing.lines.is_empty());
    assert_eq!(listing.into_result(), Ok(vec![]));
}

#[test]
fn test_disassembly_is_deterministic() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let first = disassemble(&bytes, DisassemblyOptions::default());
    let second = disassemble(&bytes, DisassemblyOptions::default());

    assert_eq!(first, second);
    assert_eq!(first.render(), second.render());
}
