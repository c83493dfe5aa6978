//! # NES PRG-ROM Disassembler
//!
//! Decodes the PRG-ROM code segment of an iNES / NES 2.0 cartridge dump into
//! 6502 assembly mnemonics.
//!
//! The pipeline has two stages:
//!
//! 1. [`cartridge::parse`] validates the header and returns a borrowed
//!    [`CodeSegment`] over the PRG-ROM bytes
//! 2. [`disassemble`] walks the segment once, looking each opcode up in
//!    [`OPCODE_TABLE`], and produces a [`Listing`]
//!
//! ## Quick Start
//!
//! ```rust
//! use nesdis::{disassemble_rom, DisassemblyOptions};
//!
//! let mut image = vec![0u8; 16 + 16384];
//! image[..4].copy_from_slice(b"NES\x1A");
//! image[4] = 1; // one 16 KiB PRG bank
//! image[16..19].copy_from_slice(&[0xA9, 0x0A, 0x60]); // LDA #$0A / RTS
//!
//! let listing = disassemble_rom(&image, DisassemblyOptions::default()).unwrap();
//! let text: Vec<String> = listing.text_lines().take(2).collect();
//! assert_eq!(text, ["LDA #$0A", "RTS"]);
//! ```
//!
//! Undocumented opcodes are not errors; they appear as
//! `; Unknown opcode XX` comment lines and decoding continues with the next
//! byte.
//!
//! ## Modules
//!
//! - `cartridge` - Header parsing and PRG-ROM location
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `disassembler` - Decoder loop and text formatting
//! - `error` - Error types

pub mod addressing;
pub mod cartridge;
pub mod disassembler;
pub mod error;
pub mod opcodes;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cartridge::{CodeSegment, Header, Variant};
pub use disassembler::{disassemble, DisassemblyOptions, Instruction, Line, Listing};
pub use error::{DecodeError, Error, FormatError};
pub use opcodes::{lookup, OpcodeMetadata, OPCODE_TABLE};

/// Disassemble the PRG-ROM of a parsed code segment.
pub fn disassemble_segment(segment: &CodeSegment<'_>, options: DisassemblyOptions) -> Listing {
    disassemble(segment.bytes(), options)
}

/// Parse a cartridge image and disassemble its PRG-ROM.
///
/// Container errors are returned before any decoding starts. A truncated
/// final instruction is reported through [`Listing::error`], with the lines
/// decoded before it kept.
pub fn disassemble_rom(image: &[u8], options: DisassemblyOptions) -> Result<Listing, FormatError> {
    let segment = cartridge::parse(image)?;
    Ok(disassemble_segment(&segment, options))
}
