//! Error types for PNG container parsing.

use thiserror::Error;

use crate::ChunkType;

/// Failure to decode a single chunk record.
///
/// This is a closed set on purpose: a lenient walk absorbs exactly these
/// variants and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read at `offset` would run past the end of the buffer.
    #[error("truncated chunk at offset {offset}: needed {needed} bytes but only {available} available")]
    TruncatedChunk {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The type tag is not in the allow-list (strict mode only).
    #[error("unrecognized chunk type {chunk_type} at offset {offset}")]
    UnrecognizedChunkType { offset: usize, chunk_type: ChunkType },

    /// The trailing CRC does not match `type ‖ data` (only with verification enabled).
    #[error("CRC mismatch in {chunk_type} chunk at offset {offset}: claimed {claimed:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        offset: usize,
        chunk_type: ChunkType,
        claimed: u32,
        computed: u32,
    },
}

impl DecodeError {
    /// Byte offset of the chunk that failed to decode.
    pub fn offset(&self) -> usize {
        match self {
            Self::TruncatedChunk { offset, .. }
            | Self::UnrecognizedChunkType { offset, .. }
            | Self::ChecksumMismatch { offset, .. } => *offset,
        }
    }
}

/// Errors that can occur when working with PNG containers.
#[derive(Debug, Error)]
pub enum Error {
    /// The input cannot even hold the 8-byte signature.
    #[error("input too small for PNG signature: {size} bytes")]
    EmptyInput { size: usize },

    /// A payload too long for the 32-bit length field.
    #[error("chunk payload of {size} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { size: usize },

    /// A chunk failed to decode.
    #[error(transparent)]
    Chunk(#[from] DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for PNG operations.
pub type Result<T> = std::result::Result<T, Error>;
