//! CRC-32 checksum utilities.
//!
//! Chunked container formats in the PNG family protect each record with the
//! IEEE 802.3 CRC-32 (polynomial `0xEDB88320`, reflected), computed over the
//! record's type tag followed by its payload.

/// Compute the CRC-32 of a byte slice.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Compute the CRC-32 over several slices as if they were concatenated.
///
/// Avoids building a temporary buffer for `tag ‖ payload` style checksums.
pub fn hash_parts(parts: &[&[u8]]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}
