//! ctfkit CLI - command-line tool for forensic file inspection.
//!
//! This is the main entry point for the ctfkit command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use ctfkit::prelude::*;

/// Bytes of payload shown when printing a chunk to the terminal.
const PREVIEW_LEN: usize = 64;

/// ctfkit - forensic inspection of chunked image containers
#[derive(Parser)]
#[command(name = "ctfkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a PNG signature and list its chunks
    PngInfo {
        /// Path to the PNG file
        #[arg(short, long, env = "CTFKIT_INPUT")]
        input: PathBuf,

        /// Abort on the first truncated or non-standard chunk
        #[arg(short, long, env = "CTFKIT_STRICT", value_parser = FalseyValueParser::new())]
        strict: bool,

        /// Treat CRC mismatches as decode failures
        #[arg(long)]
        verify_crc: bool,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a single chunk at a byte offset
    PngExtract {
        /// Path to the PNG file
        #[arg(short, long, env = "CTFKIT_INPUT")]
        input: PathBuf,

        /// Offset of the chunk's length field (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_offset)]
        offset: usize,

        /// Write the raw payload here instead of printing a preview
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject non-standard chunk types
        #[arg(short, long, env = "CTFKIT_STRICT", value_parser = FalseyValueParser::new())]
        strict: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::PngInfo {
            input,
            strict,
            verify_crc,
            json,
        } => cmd_png_info(&input, strict, verify_crc, json),
        Commands::PngExtract {
            input,
            offset,
            output,
            strict,
        } => cmd_png_extract(&input, offset, output.as_deref(), strict),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn parse_offset(s: &str) -> std::result::Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{}': {}", s, e))
}

fn parse_options(strict: bool, verify_crc: bool) -> ParseOptions {
    let options = if strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    };
    options.with_checksum_verification(verify_crc)
}

#[derive(Serialize)]
struct InfoReport {
    path: String,
    size: usize,
    signature_valid: bool,
    strict: bool,
    chunks: Vec<ChunkReport>,
    halt: Option<HaltReport>,
    trailing_bytes: usize,
}

#[derive(Serialize)]
struct ChunkReport {
    offset: usize,
    length: u32,
    chunk_type: String,
    critical: bool,
    claimed_crc: String,
    computed_crc: String,
    crc_ok: bool,
}

#[derive(Serialize)]
struct HaltReport {
    offset: usize,
    error: String,
}

impl From<&Chunk> for ChunkReport {
    fn from(chunk: &Chunk) -> Self {
        Self {
            offset: chunk.offset,
            length: chunk.length,
            chunk_type: chunk.chunk_type.to_string(),
            critical: chunk.is_critical(),
            claimed_crc: hex::encode(chunk.checksum_claim),
            computed_crc: hex::encode(chunk.computed_crc().to_be_bytes()),
            crc_ok: chunk.checksum_matches(),
        }
    }
}

fn cmd_png_info(input: &Path, strict: bool, verify_crc: bool, json: bool) -> Result<ExitCode> {
    let mut png =
        PngFile::open(input, parse_options(strict, verify_crc)).context("Failed to open PNG file")?;

    let signature_valid = png.validate_signature();
    let processed = png.process_chunks().context("Failed to process chunks")?;
    debug!("processed: {}", processed);

    let report = InfoReport {
        path: input.display().to_string(),
        size: png.size(),
        signature_valid,
        strict: png.is_strict(),
        chunks: png.chunks().iter().map(ChunkReport::from).collect(),
        halt: png.halt().map(|h| HaltReport {
            offset: h.offset(),
            error: h.error.to_string(),
        }),
        trailing_bytes: png.trailing_bytes(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_info(&report);
    }

    if signature_valid && processed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_info(report: &InfoReport) {
    println!("File: {} ({} bytes)", report.path, report.size);
    if report.signature_valid {
        println!("PNG file signature validated!");
    } else {
        println!("PNG file signature INVALID.");
    }

    if report.chunks.is_empty() {
        println!("Failed processing chunks.");
    } else {
        println!("Processed {} chunks.", report.chunks.len());
        println!(
            "\n{:>10} {:>10} {:<6} {:>8} {:>8} {}",
            "OFFSET", "LENGTH", "TYPE", "CLAIMED", "CRC", ""
        );
        for c in &report.chunks {
            println!(
                "{:>10} {:>10} {:<6} {:>8} {:>8} {}",
                c.offset,
                c.length,
                c.chunk_type,
                c.claimed_crc,
                c.computed_crc,
                if c.crc_ok { "" } else { "MISMATCH" }
            );
        }
    }

    if let Some(halt) = &report.halt {
        println!("\nWalk stopped at offset {}: {}", halt.offset, halt.error);
    }
    if report.trailing_bytes > 0 {
        println!("{} trailing bytes after last chunk", report.trailing_bytes);
    }
}

fn cmd_png_extract(input: &Path, offset: usize, output: Option<&Path>, strict: bool) -> Result<ExitCode> {
    let png = PngFile::open(input, parse_options(strict, false)).context("Failed to open PNG file")?;

    let chunk = png
        .extract_chunk_at(offset)
        .with_context(|| format!("Failed to decode chunk at offset {}", offset))?;

    println!(
        "{} chunk at offset {}: {} bytes, CRC {} ({})",
        chunk.chunk_type,
        chunk.offset,
        chunk.length,
        hex::encode(chunk.checksum_claim),
        if chunk.checksum_matches() { "ok" } else { "mismatch" }
    );

    match output {
        Some(path) => {
            fs::write(path, &chunk.data).context("Failed to write output file")?;
            println!("Payload written to {}", path.display());
        }
        None => {
            let preview = &chunk.data[..chunk.data.len().min(PREVIEW_LEN)];
            println!("{}", hex::encode(preview));
            if chunk.data.len() > PREVIEW_LEN {
                println!("... {} more bytes", chunk.data.len() - PREVIEW_LEN);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
