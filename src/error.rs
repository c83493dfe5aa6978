//! Error types for container parsing and instruction decoding.

use crate::cartridge::Variant;

/// The input is not a cartridge image this crate can read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The first four bytes are not `NES\x1A`.
    #[error("not an iNES image (magic bytes: {found:02X?})")]
    NotAContainer {
        /// The bytes found where the magic was expected (fewer than four if
        /// the image is that short).
        found: Vec<u8>,
    },

    /// The header is valid but of a different variant than requested.
    #[error("expected {expected} header, found {found}")]
    UnsupportedVariant { expected: Variant, found: Variant },

    /// The image ends before the header or the code segment it declares.
    #[error("image too small for {field} (need {needed} bytes, got {actual})")]
    TruncatedImage {
        /// Which part of the image could not be read.
        field: &'static str,
        needed: usize,
        actual: usize,
    },
}

/// The code segment ended in the middle of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error(
        "truncated instruction at offset {offset:#06X}: opcode {opcode:02X} needs {needed} operand byte(s), {available} available"
    )]
    TruncatedInstruction {
        /// Offset of the opcode within the code segment.
        offset: usize,
        opcode: u8,
        needed: u8,
        available: usize,
    },
}

/// Any failure of the full image-to-listing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
