//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary code segments to the decoder loop and checks that the
//! lines tile the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nesdis::{disassemble, DecodeError, DisassemblyOptions};

/// Disassembly options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    origin: u16,
    hex_dump: bool,
    show_offsets: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        origin: input.options.origin,
        hex_dump: input.options.hex_dump,
        show_offsets: input.options.show_offsets,
    };

    let listing = disassemble(&input.bytes, options);

    let mut consumed: usize = 0;
    let mut expected_address = input.options.origin;

    for line in &listing.lines {
        assert_eq!(line.offset(), consumed);
        assert_eq!(line.address(), expected_address);
        assert!(line.size_bytes() >= 1 && line.size_bytes() <= 3);

        consumed += line.size_bytes() as usize;
        expected_address = expected_address.wrapping_add(line.size_bytes() as u16);
    }

    match listing.error {
        None => assert_eq!(consumed, input.bytes.len()),
        Some(DecodeError::TruncatedInstruction {
            offset, available, ..
        }) => {
            assert_eq!(offset, consumed);
            assert_eq!(offset + 1 + available, input.bytes.len());
        }
    }

    // Rendering must not panic
    let _ = listing.render();
});
