//! Command-line front end: read a `.nes` image, write its PRG-ROM listing.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};

use nesdis::cartridge::{self, Variant};
use nesdis::{disassemble_segment, DisassemblyOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble the PRG-ROM of an iNES / NES 2.0 image")]
struct Opts {
    /// Input file (*.nes)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (*.s / *.asm). By default stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CPU address of the first PRG-ROM byte, in hex
    #[arg(long, default_value = "8000", value_parser = parse_hex_u16)]
    origin: u16,

    /// Prefix each line with its CPU address
    #[arg(long)]
    offsets: bool,

    /// Prefix each line with the raw instruction bytes
    #[arg(long)]
    hex_dump: bool,

    /// Header variant to require
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Accept either variant
    Auto,
    /// Require an iNES header
    Legacy,
    /// Require a NES 2.0 header
    Extended,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{}': {}", s, e))
}

/// How far the disassembly pass got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The whole PRG-ROM was decoded.
    Complete,
    /// A truncated final instruction stopped the pass; the lines before it
    /// were still written.
    Partial,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Complete => ExitCode::SUCCESS,
            Outcome::Partial => ExitCode::FAILURE,
        }
    }
}

/// Disassemble `opts.input`, writing to `opts.output` or to `stdout`.
fn run(opts: &Opts, stdout: &mut dyn Write) -> Result<Outcome> {
    let image = fs::read(&opts.input)
        .with_context(|| format!("failed to read '{}'", opts.input.display()))?;

    let segment = match opts.format {
        Format::Auto => cartridge::parse(&image),
        Format::Legacy => cartridge::parse_as(&image, Variant::Legacy),
        Format::Extended => cartridge::parse_as(&image, Variant::Extended),
    }
    .with_context(|| format!("'{}' is not a usable NES image", opts.input.display()))?;

    let header = segment.header();
    info!(
        "{} header: mapper {}, {:?} mirroring, trainer {}, PRG-ROM {} bytes at offset {}, CHR-ROM {} bytes",
        header.variant,
        header.mapper,
        header.mirroring,
        header.has_trainer,
        header.prg_rom_size,
        header.prg_rom_offset,
        header.chr_rom_size,
    );

    let options = DisassemblyOptions {
        origin: opts.origin,
        hex_dump: opts.hex_dump,
        show_offsets: opts.offsets,
    };
    let listing = disassemble_segment(&segment, options);
    let text = listing.render();

    match &opts.output {
        Some(path) => {
            debug!("writing {} lines to {}", listing.lines.len(), path.display());
            fs::write(path, text)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => {
            debug!("writing {} lines to stdout", listing.lines.len());
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    if let Some(err) = listing.error {
        warn!("listing stopped early: {}", err);
        eprintln!("Error: {}", err);
        return Ok(Outcome::Partial);
    }

    Ok(Outcome::Complete)
}

fn main() -> ExitCode {
    env_logger::init();
    let opts = Opts::parse();

    match run(&opts, &mut io::stdout().lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
