//! PRG-ROM Disassembler Module
//!
//! Converts a code segment into 6502 assembly listing lines, one per
//! instruction or unknown opcode, in a single left-to-right pass.

pub mod decoder;
pub mod formatter;

use std::fmt;

use crate::addressing::AddressingMode;
use crate::error::DecodeError;

/// Marker written after the last line of a complete listing.
pub const END_OF_SEGMENT: &str = "; EOF";

/// A single decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Offset of the opcode within the code segment
    pub offset: usize,

    /// CPU address of the opcode (origin + offset, wrapping at 16 bits)
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes in stream order (`addressing_mode.operand_bytes()` of them when decoded)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,
}

/// One position of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A documented opcode and its operands.
    Instruction(Instruction),

    /// A byte with no documented instruction; rendered as a comment and
    /// consumes only itself.
    Unknown { offset: usize, address: u16, opcode: u8 },
}

impl Line {
    pub fn offset(&self) -> usize {
        match self {
            Line::Instruction(instr) => instr.offset,
            Line::Unknown { offset, .. } => *offset,
        }
    }

    pub fn address(&self) -> u16 {
        match self {
            Line::Instruction(instr) => instr.address,
            Line::Unknown { address, .. } => *address,
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Line::Instruction(instr) => instr.opcode,
            Line::Unknown { opcode, .. } => *opcode,
        }
    }

    /// Bytes consumed from the segment.
    pub fn size_bytes(&self) -> u8 {
        match self {
            Line::Instruction(instr) => instr.size_bytes,
            Line::Unknown { .. } => 1,
        }
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisassemblyOptions {
    /// CPU address of the first segment byte (affects address display and
    /// branch targets)
    pub origin: u16,

    /// Whether to prefix each line with the raw instruction bytes
    pub hex_dump: bool,

    /// Whether to prefix each line with its CPU address
    pub show_offsets: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self {
            origin: 0x8000,
            hex_dump: false,
            show_offsets: false,
        }
    }
}

/// The result of one disassembly pass.
///
/// A pass that hits a truncated instruction keeps every line decoded
/// before it, and records the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub lines: Vec<Line>,
    pub error: Option<DecodeError>,
    options: DisassemblyOptions,
}

impl Listing {
    pub fn options(&self) -> &DisassemblyOptions {
        &self.options
    }

    /// True if the pass reached the end of the segment.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Formatted text of each line, without terminators.
    pub fn text_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines
            .iter()
            .map(|line| formatter::format_line(line, &self.options))
    }

    /// Full listing text, one newline-terminated line per entry, followed
    /// by [`END_OF_SEGMENT`] if the pass completed.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Discard partial output on error.
    pub fn into_result(self) -> Result<Vec<Line>, DecodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.lines),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for text in self.text_lines() {
            writeln!(f, "{}", text)?;
        }
        if self.is_complete() {
            writeln!(f, "{}", END_OF_SEGMENT)?;
        }
        Ok(())
    }
}

/// Disassemble a code segment into a listing
///
/// # Arguments
///
/// * `bytes` - The PRG-ROM bytes to disassemble
/// * `options` - Disassembly options controlling output format
///
/// # Returns
///
/// A [`Listing`] with one [`Line`] per decoded position. If the segment
/// ends inside an instruction, the listing holds the lines before it and
/// `error` is set.
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Listing {
    let mut lines = Vec::new();

    for item in decoder::Decoder::new(bytes, options.origin) {
        match item {
            Ok(line) => lines.push(line),
            Err(err) => {
                return Listing {
                    lines,
                    error: Some(err),
                    options,
                }
            }
        }
    }

    Listing {
        lines,
        error: None,
        options,
    }
}
