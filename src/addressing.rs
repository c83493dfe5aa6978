//! # Addressing Modes
//!
//! The 13 addressing modes of the NMOS 6502. The mode fixes how many operand
//! bytes follow an opcode in the PRG-ROM stream and how the disassembler
//! renders them.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, TAX, PHA
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the
    /// address of the following instruction.
    ///
    /// Example: BEQ $8010
    Relative,

    /// Full 16-bit address, stored low byte first.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect through a zero page pointer.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed through a zero page pointer.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub const fn operand_bytes(self) -> u8 {
        use AddressingMode::*;

        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}
