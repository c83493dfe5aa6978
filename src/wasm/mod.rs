//! WebAssembly bindings for the disassembler.
//!
//! Lets a browser front end disassemble a cartridge image loaded from a
//! file picker or drag-and-drop.

pub mod api;

pub use api::{disassemble_lines, disassemble_rom, DisassemblyLine, JsError};
