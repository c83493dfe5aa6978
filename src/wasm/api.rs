//! WASM API for the disassembler.

use wasm_bindgen::prelude::*;

use crate::disassembler::formatter::format_line;
use crate::{disassemble_rom as disassemble_image, DisassemblyOptions, Line};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::Error> for JsError {
    fn from(err: crate::Error) -> Self {
        JsError {
            message: err.to_string(),
        }
    }
}

/// One line of a listing
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

fn options(origin: u16) -> DisassemblyOptions {
    DisassemblyOptions {
        origin,
        ..DisassemblyOptions::default()
    }
}

/// Disassemble an image into listing text.
///
/// Fails on container errors and on a truncated final instruction.
#[wasm_bindgen]
pub fn disassemble_rom(image: &[u8], origin: u16) -> Result<String, JsError> {
    let listing = disassemble_image(image, options(origin)).map_err(crate::Error::from)?;
    if let Some(err) = listing.error {
        return Err(crate::Error::from(err).into());
    }
    Ok(listing.render())
}

/// Decode an image into [`DisassemblyLine`] records.
fn listing_lines(image: &[u8], origin: u16) -> Result<Vec<DisassemblyLine>, JsError> {
    let options = options(origin);
    let listing = disassemble_image(image, options).map_err(crate::Error::from)?;

    let lines = listing
        .lines
        .iter()
        .map(|line| {
            let bytes = match line {
                Line::Instruction(instr) => {
                    let mut bytes = vec![instr.opcode];
                    bytes.extend_from_slice(&instr.operand_bytes);
                    bytes
                }
                Line::Unknown { opcode, .. } => vec![*opcode],
            };

            DisassemblyLine {
                address: line.address(),
                bytes,
                text: format_line(line, &options),
            }
        })
        .collect();

    Ok(lines)
}

/// Disassemble an image into an array of [`DisassemblyLine`] objects.
///
/// A truncated final instruction is not an error here; the lines before it
/// are returned.
#[wasm_bindgen]
pub fn disassemble_lines(image: &[u8], origin: u16) -> Result<js_sys::Array, JsError> {
    let lines = js_sys::Array::new();
    for line in listing_lines(image, origin)? {
        lines.push(&JsValue::from(line));
    }
    Ok(lines)
}
