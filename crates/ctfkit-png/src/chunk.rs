//! A single decoded chunk record.

use ctfkit_common::crc;

use crate::ChunkType;

/// Bytes of framing around a chunk's payload: length, type and trailing CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// One length-prefixed, type-tagged record from a PNG container.
///
/// A `Chunk` owns a copy of its payload and never changes after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// Position of the length field within the source buffer.
    pub offset: usize,
    /// Declared payload size.
    pub length: u32,
    /// Four-byte type tag.
    pub chunk_type: ChunkType,
    /// Payload, exactly `length` bytes.
    pub data: Vec<u8>,
    /// Trailing value claimed to be the CRC of `type ‖ data`.
    pub checksum_claim: [u8; 4],
}

impl Chunk {
    /// Total bytes this record occupies on the wire.
    #[inline]
    pub fn total_size(&self) -> usize {
        CHUNK_OVERHEAD + self.length as usize
    }

    /// Offset of the first byte after this record, where the next one begins.
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.offset + self.total_size()
    }

    /// The claimed checksum as a big-endian integer.
    #[inline]
    pub fn claimed_crc(&self) -> u32 {
        u32::from_be_bytes(self.checksum_claim)
    }

    /// CRC-32 actually computed over `type ‖ data`.
    pub fn computed_crc(&self) -> u32 {
        crc::hash_parts(&[self.chunk_type.as_bytes(), &self.data])
    }

    /// Whether the claimed checksum matches the computed one.
    pub fn checksum_matches(&self) -> bool {
        self.claimed_crc() == self.computed_crc()
    }

    /// Whether this is a critical chunk according to its tag's ancillary bit.
    #[inline]
    pub fn is_critical(&self) -> bool {
        !self.chunk_type.is_ancillary()
    }
}
