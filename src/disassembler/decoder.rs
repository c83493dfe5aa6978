//! Instruction decoder for the PRG-ROM disassembler

use std::iter::FusedIterator;

use crate::disassembler::{Instruction, Line};
use crate::error::DecodeError;
use crate::opcodes::lookup;

/// Read position within a code segment.
///
/// The position only moves forward and never passes the end of the segment.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.bytes.len()
    }

    /// Consume one byte, or `None` at the end of the segment.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Consume exactly `count` bytes. Consumes nothing if fewer remain.
    pub fn take(&mut self, count: usize) -> Option<&'a [u8]> {
        if count > self.remaining() {
            return None;
        }
        let taken = &self.bytes[self.position..self.position + count];
        self.position += count;
        Some(taken)
    }
}

/// Iterator over the lines of a code segment.
///
/// Yields one `Ok(Line)` per decoded position. A truncated final instruction
/// yields a single `Err` and ends the iteration.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    origin: u16,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// `origin` is the CPU address of `bytes[0]`.
    pub fn new(bytes: &'a [u8], origin: u16) -> Self {
        Decoder {
            cursor: Cursor::new(bytes),
            origin,
            failed: false,
        }
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    fn address_of(&self, offset: usize) -> u16 {
        self.origin.wrapping_add(offset as u16)
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Line, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let offset = self.cursor.position();
        let address = self.address_of(offset);
        let opcode = self.cursor.next_byte()?;

        let Some(metadata) = lookup(opcode) else {
            return Some(Ok(Line::Unknown {
                offset,
                address,
                opcode,
            }));
        };

        let needed = metadata.operand_bytes();
        let Some(operands) = self.cursor.take(needed as usize) else {
            self.failed = true;
            return Some(Err(DecodeError::TruncatedInstruction {
                offset,
                opcode,
                needed,
                available: self.cursor.remaining(),
            }));
        };

        Some(Ok(Line::Instruction(Instruction {
            offset,
            address,
            opcode,
            mnemonic: metadata.mnemonic,
            addressing_mode: metadata.addressing_mode,
            operand_bytes: operands.to_vec(),
            size_bytes: metadata.size_bytes(),
        })))
    }
}

impl FusedIterator for Decoder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;

    fn single(bytes: &[u8]) -> Instruction {
        match Decoder::new(bytes, 0x8000).next() {
            Some(Ok(Line::Instruction(instr))) => instr,
            other => panic!("expected an instruction, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_lda_immediate() {
        let instr = single(&[0xA9, 0x42]);

        assert_eq!(instr.address, 0x8000);
        assert_eq!(instr.opcode, 0xA9);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.size_bytes, 2);
    }

    #[test]
    fn test_decode_sta_absolute() {
        let instr = single(&[0x8D, 0x00, 0x20]);

        assert_eq!(instr.mnemonic, "STA");
        assert_eq!(instr.addressing_mode, AddressingMode::Absolute);
        assert_eq!(instr.operand_bytes, vec![0x00, 0x20]);
        assert_eq!(instr.size_bytes, 3);
    }

    #[test]
    fn test_decode_indirect_y_takes_one_operand() {
        let instr = single(&[0xB1, 0x10, 0xEA]);

        assert_eq!(instr.addressing_mode, AddressingMode::IndirectY);
        assert_eq!(instr.operand_bytes, vec![0x10]);
    }

    #[test]
    fn test_unknown_opcode_consumes_one_byte() {
        let mut decoder = Decoder::new(&[0x02, 0xEA], 0xC000);

        assert_eq!(
            decoder.next(),
            Some(Ok(Line::Unknown {
                offset: 0,
                address: 0xC000,
                opcode: 0x02
            }))
        );
        assert_eq!(decoder.cursor().position(), 1);
        assert!(matches!(decoder.next(), Some(Ok(Line::Instruction(_)))));
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn test_truncated_instruction_fuses() {
        let mut decoder = Decoder::new(&[0x20, 0x00], 0x8000);

        assert_eq!(
            decoder.next(),
            Some(Err(DecodeError::TruncatedInstruction {
                offset: 0,
                opcode: 0x20,
                needed: 2,
                available: 1,
            }))
        );
        assert_eq!(decoder.next(), None);
        assert!(decoder.cursor().position() <= 2);
    }

    #[test]
    fn test_cursor_take_is_all_or_nothing() {
        let mut cursor = Cursor::new(&[1, 2, 3]);

        assert_eq!(cursor.take(2), Some(&[1u8, 2][..]));
        assert_eq!(cursor.take(2), None);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next_byte(), Some(3));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next_byte(), None);
    }
}
