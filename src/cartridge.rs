//! # Cartridge Container
//!
//! Parses the 16-byte iNES / NES 2.0 header and locates the PRG-ROM code
//! segment inside a cartridge dump.
//!
//! ```text
//! Offset  Field
//! 0-3     "NES" 0x1A
//! 4       PRG-ROM size (iNES: 16 KiB banks; NES 2.0: low 8 bits)
//! 5       CHR-ROM size (iNES: 8 KiB banks; NES 2.0: low 8 bits)
//! 6       flags 6: mirroring, trainer (bit 2), mapper low nibble
//! 7       flags 7: NES 2.0 marker (bits 2-3 == 10), mapper high nibble
//! 8       NES 2.0: mapper bits 8-11
//! 9       NES 2.0: PRG size high nibble (low), CHR size high nibble (high)
//! ```
//!
//! The parser only borrows the image; the returned [`CodeSegment`] is a
//! slice into it.

use std::fmt;

use crate::error::FormatError;

/// `NES` followed by MS-DOS end-of-file.
pub const MAGIC: [u8; 4] = *b"NES\x1A";

/// Size of the fixed header preceding the trainer / PRG-ROM.
pub const HEADER_SIZE: usize = 16;

/// Size of the optional trainer block between header and PRG-ROM.
pub const TRAINER_SIZE: usize = 512;

/// iNES PRG-ROM bank size.
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// iNES CHR-ROM bank size.
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Header bytes that must be present for an NES 2.0 image.
const EXTENDED_MIN_HEADER: usize = 10;

/// Header format variant, selected by bits 2-3 of flags 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Original iNES layout; sizes are bank counts.
    Legacy,
    /// NES 2.0 layout; sizes are 12-bit values split across bytes 4/5 and 9.
    Extended,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Legacy => f.write_str("iNES"),
            Variant::Extended => f.write_str("NES 2.0"),
        }
    }
}

/// Nametable mirroring declared in flags 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// Bit 2 of flags 6: a 512-byte trainer precedes PRG-ROM.
pub const fn has_trainer(flags6: u8) -> bool {
    flags6 & 0b0000_0100 != 0
}

/// Bits 2-3 of flags 7 equal `10`: the header is NES 2.0.
pub const fn is_extended(flags7: u8) -> bool {
    flags7 & 0b0000_1100 == 0b0000_1000
}

/// iNES PRG-ROM size from the bank count in byte 4.
pub const fn legacy_prg_size(banks: u8) -> usize {
    banks as usize * PRG_BANK_SIZE
}

/// NES 2.0 PRG-ROM size: byte 4 plus the low nibble of byte 9 as bits 8-11.
pub const fn extended_prg_size(low: u8, high: u8) -> usize {
    low as usize + (((high & 0x0F) as usize) << 8)
}

/// NES 2.0 CHR-ROM size: byte 5 plus the high nibble of byte 9 as bits 8-11.
pub const fn extended_chr_size(low: u8, high: u8) -> usize {
    low as usize + (((high >> 4) as usize) << 8)
}

/// Mapper number from flags 6/7, plus byte 8 bits 0-3 for NES 2.0.
pub const fn mapper_number(flags6: u8, flags7: u8, byte8: Option<u8>) -> u16 {
    let base = ((flags7 & 0xF0) | (flags6 >> 4)) as u16;
    match byte8 {
        Some(byte8) => (((byte8 & 0x0F) as u16) << 8) | base,
        None => base,
    }
}

/// Mirroring from flags 6 (bit 3 overrides bit 0).
pub const fn mirroring(flags6: u8) -> Mirroring {
    if flags6 & 0x08 != 0 {
        Mirroring::FourScreen
    } else if flags6 & 0x01 != 0 {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    }
}

/// Decoded cartridge header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub variant: Variant,
    pub has_trainer: bool,
    /// Byte offset of PRG-ROM within the image.
    pub prg_rom_offset: usize,
    /// PRG-ROM length in bytes.
    pub prg_rom_size: usize,
    pub chr_rom_size: usize,
    pub mapper: u16,
    pub mirroring: Mirroring,
}

impl Header {
    /// Validate the magic and decode the header fields.
    ///
    /// Does not check that the image actually holds the PRG-ROM it declares;
    /// [`parse`] does.
    pub fn parse(image: &[u8]) -> Result<Self, FormatError> {
        if image.len() < MAGIC.len() || image[..MAGIC.len()] != MAGIC {
            return Err(FormatError::NotAContainer {
                found: image.iter().take(MAGIC.len()).copied().collect(),
            });
        }

        if image.len() < 8 {
            return Err(FormatError::TruncatedImage {
                field: "header flags",
                needed: 8,
                actual: image.len(),
            });
        }

        let flags6 = image[6];
        let flags7 = image[7];
        let variant = if is_extended(flags7) {
            Variant::Extended
        } else {
            Variant::Legacy
        };
        let has_trainer = has_trainer(flags6);

        let min_header = match variant {
            Variant::Extended => EXTENDED_MIN_HEADER,
            Variant::Legacy if has_trainer => HEADER_SIZE + TRAINER_SIZE,
            Variant::Legacy => HEADER_SIZE,
        };
        if image.len() < min_header {
            return Err(FormatError::TruncatedImage {
                field: "header",
                needed: min_header,
                actual: image.len(),
            });
        }

        let (prg_rom_size, chr_rom_size, mapper) = match variant {
            Variant::Legacy => (
                legacy_prg_size(image[4]),
                image[5] as usize * CHR_BANK_SIZE,
                mapper_number(flags6, flags7, None),
            ),
            Variant::Extended => (
                extended_prg_size(image[4], image[9]),
                extended_chr_size(image[5], image[9]),
                mapper_number(flags6, flags7, Some(image[8])),
            ),
        };

        let mut prg_rom_offset = HEADER_SIZE;
        if has_trainer {
            prg_rom_offset += TRAINER_SIZE;
        }

        Ok(Header {
            variant,
            has_trainer,
            prg_rom_offset,
            prg_rom_size,
            chr_rom_size,
            mapper,
            mirroring: mirroring(flags6),
        })
    }

    /// One past the last PRG-ROM byte.
    pub fn prg_rom_end(&self) -> usize {
        self.prg_rom_offset + self.prg_rom_size
    }
}

/// Read-only view of the PRG-ROM bytes of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSegment<'a> {
    header: Header,
    bytes: &'a [u8],
}

impl<'a> CodeSegment<'a> {
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Offset of the first code byte within the original image.
    pub fn offset(&self) -> usize {
        self.header.prg_rom_offset
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parse the header and return the PRG-ROM view.
///
/// # Errors
///
/// - [`FormatError::NotAContainer`] if the magic is wrong
/// - [`FormatError::TruncatedImage`] if the header or the declared PRG-ROM
///   extends past the end of `image`
///
/// # Examples
///
/// ```
/// let mut image = vec![0u8; 16 + 16384];
/// image[..4].copy_from_slice(b"NES\x1A");
/// image[4] = 1;
///
/// let segment = nesdis::cartridge::parse(&image).unwrap();
/// assert_eq!(segment.offset(), 16);
/// assert_eq!(segment.len(), 16384);
/// ```
pub fn parse(image: &[u8]) -> Result<CodeSegment<'_>, FormatError> {
    let header = Header::parse(image)?;
    let end = header.prg_rom_end();

    if end > image.len() {
        return Err(FormatError::TruncatedImage {
            field: "PRG-ROM",
            needed: end,
            actual: image.len(),
        });
    }

    Ok(CodeSegment {
        header,
        bytes: &image[header.prg_rom_offset..end],
    })
}

/// Like [`parse`], but fail with [`FormatError::UnsupportedVariant`] unless
/// the header is of the `expected` variant.
pub fn parse_as(image: &[u8], expected: Variant) -> Result<CodeSegment<'_>, FormatError> {
    let segment = parse(image)?;
    let found = segment.header.variant;

    if found != expected {
        return Err(FormatError::UnsupportedVariant { expected, found });
    }

    Ok(segment)
}
