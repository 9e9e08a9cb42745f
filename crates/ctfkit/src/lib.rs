//! ctfkit - forensics and CTF file inspection library.
//!
//! This crate provides a unified interface to the ctfkit crates.
//!
//! # Crates
//!
//! - [`ctfkit_common`] - Common utilities (big-endian binary reading, CRC-32)
//! - [`ctfkit_png`] - PNG chunk container parsing with strict and lenient policies
//!
//! # Example
//!
//! ```no_run
//! use ctfkit::prelude::*;
//!
//! let mut png = PngFile::open("suspicious.png", ParseOptions::lenient())?;
//! png.process_chunks()?;
//!
//! for chunk in png.chunks().iter().filter(|c| !c.checksum_matches()) {
//!     println!("tampered {} chunk at {}", chunk.chunk_type, chunk.offset);
//! }
//! if let Some(halt) = png.halt() {
//!     println!("stopped at {}: {}", halt.offset(), halt.error);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use ctfkit_common as common;
pub use ctfkit_png as png;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ctfkit_common::{crc, BinaryReader};
    pub use ctfkit_png::{
        codec, Chunk, ChunkType, ChunkTypeSet, DecodeError, ParseOptions, PngFile, WalkHalt,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
