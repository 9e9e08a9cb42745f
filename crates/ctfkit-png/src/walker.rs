//! Sequential chunk walking.

use log::{debug, warn};

use crate::signature::SIGNATURE_LEN;
use crate::{codec, Chunk, DecodeError, ParseOptions};

/// Lazy iterator over consecutive chunks starting at an explicit offset.
///
/// Yields decoded chunks until the buffer is exhausted. A decode failure is
/// yielded once as `Err` and ends the iteration.
#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    buffer: &'a [u8],
    cursor: usize,
    options: &'a ParseOptions,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    /// Iterate from `offset`.
    pub fn new(buffer: &'a [u8], offset: usize, options: &'a ParseOptions) -> Self {
        Self {
            buffer,
            cursor: offset,
            options,
            done: false,
        }
    }

    /// Iterate from just past the signature.
    pub fn after_signature(buffer: &'a [u8], options: &'a ParseOptions) -> Self {
        Self::new(buffer, SIGNATURE_LEN, options)
    }

    /// Offset the next decode will start at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for ChunkIter<'_> {
    type Item = Result<Chunk, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor >= self.buffer.len() {
            return None;
        }

        match codec::decode(self.buffer, self.cursor, self.options) {
            Ok(chunk) => {
                // Every byte of the chunk was in bounds, so this cannot overflow
                self.cursor = chunk.end_offset();
                Some(Ok(chunk))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Where and why a lenient walk stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkHalt {
    /// The failure that ended the walk.
    pub error: DecodeError,
}

impl WalkHalt {
    /// Offset of the chunk that could not be decoded.
    pub fn offset(&self) -> usize {
        self.error.offset()
    }
}

/// Result of one complete left-to-right scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walk {
    /// Chunks in file order.
    pub chunks: Vec<Chunk>,
    /// Set when a lenient walk absorbed a decode failure.
    pub halt: Option<WalkHalt>,
}

/// Walk every chunk after the signature.
///
/// Strict mode returns the first decode failure and nothing else. Lenient
/// mode stops at the first failure, keeps every chunk decoded before it and
/// records the failure in [`Walk::halt`].
pub fn walk(buffer: &[u8], options: &ParseOptions) -> Result<Walk, DecodeError> {
    debug!(
        "walking {} bytes (strict: {}, verify checksums: {})",
        buffer.len(),
        options.strict,
        options.verify_checksums
    );

    let mut walk = Walk::default();

    for item in ChunkIter::after_signature(buffer, options) {
        match item {
            Ok(chunk) => {
                debug!(
                    "chunk {} at offset {}: {} bytes",
                    chunk.chunk_type, chunk.offset, chunk.length
                );
                walk.chunks.push(chunk);
            }
            Err(e) if options.strict => return Err(e),
            Err(e) => {
                warn!("stopping walk after {} chunks: {}", walk.chunks.len(), e);
                walk.halt = Some(WalkHalt { error: e });
            }
        }
    }

    debug!("walk finished with {} chunks", walk.chunks.len());
    Ok(walk)
}
