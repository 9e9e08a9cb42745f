//! PNG chunk container parser for forensic inspection.
//!
//! Treats a PNG file purely as a container: an 8-byte signature followed by
//! self-describing chunk records. Payloads are never decompressed or
//! interpreted, which makes the parser usable on files that no image decoder
//! would accept.
//!
//! # File Format
//!
//! - 8 bytes: signature `89 50 4E 47 0D 0A 1A 0A`
//! - repeated chunks, all integers big-endian:
//!   - 4 bytes: payload length
//!   - 4 bytes: type tag (e.g. `IHDR`, `IDAT`, `IEND`)
//!   - N bytes: payload
//!   - 4 bytes: CRC-32 over type and payload
//!
//! # Failure policy
//!
//! [`ParseOptions::strict`] aborts on the first truncated chunk or unknown type.
//! [`ParseOptions::lenient`] keeps every chunk decoded before the first failure
//! and records where it stopped, which is usually what you want for damaged or
//! deliberately crafted files.
//!
//! # Example
//!
//! ```no_run
//! use ctfkit_png::{ChunkType, ParseOptions, PngFile};
//!
//! let mut png = PngFile::open("challenge.png", ParseOptions::lenient())?;
//! println!("Signature valid: {}", png.validate_signature());
//!
//! png.process_chunks()?;
//! for chunk in png.chunks() {
//!     println!("{:>8} {} {} bytes", chunk.offset, chunk.chunk_type, chunk.length);
//! }
//!
//! for text in png.chunks_of_type(ChunkType::TEXT) {
//!     println!("{}", String::from_utf8_lossy(&text.data));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunk;
mod chunk_type;
mod error;
mod file;
mod options;

pub mod codec;
pub mod signature;
pub mod walker;

pub use chunk::{Chunk, CHUNK_OVERHEAD};
pub use chunk_type::{ChunkType, ChunkTypeSet};
pub use error::{DecodeError, Error, Result};
pub use file::PngFile;
pub use options::ParseOptions;
pub use signature::{PNG_SIGNATURE, SIGNATURE_LEN};
pub use walker::{ChunkIter, Walk, WalkHalt};
