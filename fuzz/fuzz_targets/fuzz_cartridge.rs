//! Fuzz target for the container parser.
//!
//! Arbitrary images, with the magic forced on some of them so the input
//! reaches the header field decoding.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nesdis::cartridge;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    force_magic: bool,
    image: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut image = input.image;
    if input.force_magic && image.len() >= 4 {
        image[..4].copy_from_slice(b"NES\x1A");
    }

    if let Ok(segment) = cartridge::parse(&image) {
        assert!(segment.offset() + segment.len() <= image.len());
        assert_eq!(cartridge::parse(&image), Ok(segment));
    }
});
