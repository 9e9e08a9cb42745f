//! Chunk wire format.
//!
//! ```text
//! length          u32, big-endian, payload size
//! type            4 bytes
//! data            `length` bytes
//! checksum_claim  4 bytes, CRC-32 of type ‖ data
//! ```
//!
//! This module is the only place that knows the layout. Decoding takes an
//! explicit offset and shares no cursor with anything else, so random access
//! and sequential walks can interleave freely.

use ctfkit_common::{crc, BinaryReader};

use crate::chunk::CHUNK_OVERHEAD;
use crate::{Chunk, ChunkType, DecodeError, Error, ParseOptions, Result};

fn truncated(offset: usize, needed: usize, reader: &BinaryReader<'_>) -> DecodeError {
    DecodeError::TruncatedChunk {
        offset,
        needed,
        available: reader.remaining(),
    }
}

/// Decode the chunk whose length field starts at `offset`.
///
/// Fails with [`DecodeError::TruncatedChunk`] if any field would run past the
/// end of `buffer`. In strict mode a type outside `options.allowed_types` fails
/// with [`DecodeError::UnrecognizedChunkType`]; in lenient mode the type is
/// never inspected. With `options.verify_checksums` a bad CRC fails with
/// [`DecodeError::ChecksumMismatch`].
pub fn decode(
    buffer: &[u8],
    offset: usize,
    options: &ParseOptions,
) -> std::result::Result<Chunk, DecodeError> {
    let mut reader = BinaryReader::new_at(buffer, offset);

    let length = reader
        .read_u32()
        .map_err(|_| truncated(offset, 4, &reader))?;

    let chunk_type: ChunkType = reader
        .read_struct()
        .map_err(|_| truncated(offset, 4, &reader))?;

    if options.strict && !options.allowed_types.contains(&chunk_type) {
        return Err(DecodeError::UnrecognizedChunkType { offset, chunk_type });
    }

    // u32 always fits in usize on the targets we build for
    let data_len = length as usize;
    let data = reader
        .read_bytes(data_len)
        .map_err(|_| truncated(offset, data_len, &reader))?;

    let checksum_claim: [u8; 4] = reader
        .read_array()
        .map_err(|_| truncated(offset, 4, &reader))?;

    let chunk = Chunk {
        offset,
        length,
        chunk_type,
        data: data.to_vec(),
        checksum_claim,
    };

    if options.verify_checksums {
        let computed = chunk.computed_crc();
        let claimed = chunk.claimed_crc();
        if computed != claimed {
            return Err(DecodeError::ChecksumMismatch {
                offset,
                chunk_type,
                claimed,
                computed,
            });
        }
    }

    Ok(chunk)
}

/// Encode one chunk record with an arbitrary trailing checksum value.
///
/// Fails with [`Error::PayloadTooLarge`] if `data` cannot be described by a
/// 32-bit length.
pub fn encode(chunk_type: ChunkType, data: &[u8], checksum_claim: [u8; 4]) -> Result<Vec<u8>> {
    let length = u32::try_from(data.len()).map_err(|_| Error::PayloadTooLarge { size: data.len() })?;

    let mut out = Vec::with_capacity(CHUNK_OVERHEAD + data.len());
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(chunk_type.as_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum_claim);
    Ok(out)
}

/// Encode one chunk record with its correct CRC-32.
pub fn encode_with_crc(chunk_type: ChunkType, data: &[u8]) -> Result<Vec<u8>> {
    let crc = crc::hash_parts(&[chunk_type.as_bytes(), data]);
    encode(chunk_type, data, crc.to_be_bytes())
}

impl Chunk {
    /// Re-encode this chunk exactly as it was read, claimed checksum included.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(self.chunk_type, &self.data, self.checksum_claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> ParseOptions {
        ParseOptions::lenient()
    }

    #[test]
    fn test_decode_iend() {
        let bytes = encode(ChunkType::IEND, b"", *b"AB12").unwrap();
        assert_eq!(bytes, b"\0\0\0\0IENDAB12");

        let chunk = decode(&bytes, 0, &lenient()).unwrap();
        assert_eq!(chunk.offset, 0);
        assert_eq!(chunk.length, 0);
        assert_eq!(chunk.chunk_type, ChunkType::IEND);
        assert!(chunk.data.is_empty());
        assert_eq!(&chunk.checksum_claim, b"AB12");
    }

    #[test]
    fn test_decode_at_offset() {
        let mut buf = b"padding!".to_vec();
        buf.extend(encode_with_crc(ChunkType::TEXT, b"Title\0ctf").unwrap());

        let chunk = decode(&buf, 8, &lenient()).unwrap();
        assert_eq!(chunk.offset, 8);
        assert_eq!(chunk.length, 9);
        assert_eq!(chunk.data, b"Title\0ctf");
        assert!(chunk.checksum_matches());
        assert_eq!(chunk.to_bytes().unwrap(), &buf[8..]);
    }

    #[test]
    fn test_truncated_fields() {
        let full = encode(ChunkType::IDAT, b"abcd", [1, 2, 3, 4]).unwrap();

        // Cut inside each of the four fields
        for (cut, needed) in [(2, 4), (6, 4), (10, 4), (14, 4)] {
            let err = decode(&full[..cut], 0, &lenient()).unwrap_err();
            match err {
                DecodeError::TruncatedChunk { offset, needed: n, .. } => {
                    assert_eq!(offset, 0);
                    assert_eq!(n, needed, "cut at {}", cut);
                }
                other => panic!("unexpected error at cut {}: {:?}", cut, other),
            }
        }
    }

    #[test]
    fn test_offset_past_end() {
        let err = decode(b"short", 100, &lenient()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedChunk {
                offset: 100,
                needed: 4,
                available: 0
            }
        );
    }

    #[test]
    fn test_huge_length_is_truncation() {
        let mut buf = u32::MAX.to_be_bytes().to_vec();
        buf.extend_from_slice(b"IDATxxxx");
        let err = decode(&buf, 0, &ParseOptions::strict()).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedChunk { needed, .. } if needed == u32::MAX as usize));
    }

    #[test]
    fn test_strict_rejects_unknown_type() {
        let bytes = encode_with_crc(ChunkType(*b"zzZZ"), b"x").unwrap();

        assert!(decode(&bytes, 0, &lenient()).is_ok());
        assert_eq!(
            decode(&bytes, 0, &ParseOptions::strict()).unwrap_err(),
            DecodeError::UnrecognizedChunkType {
                offset: 0,
                chunk_type: ChunkType(*b"zzZZ")
            }
        );
    }

    #[test]
    fn test_strict_with_custom_allow_list() {
        let bytes = encode_with_crc(ChunkType(*b"zzZZ"), b"").unwrap();
        let opts = ParseOptions::strict()
            .with_allowed_types([ChunkType(*b"zzZZ")].into_iter().collect());

        assert!(decode(&bytes, 0, &opts).is_ok());

        let iend = encode_with_crc(ChunkType::IEND, b"").unwrap();
        assert!(matches!(
            decode(&iend, 0, &opts),
            Err(DecodeError::UnrecognizedChunkType { .. })
        ));
    }

    #[test]
    fn test_checksum_verification() {
        let forged = encode(ChunkType::IEND, b"", *b"AB12").unwrap();
        let good = encode_with_crc(ChunkType::IEND, b"").unwrap();
        let verify = lenient().with_checksum_verification(true);

        assert!(decode(&forged, 0, &lenient()).is_ok());
        assert!(decode(&good, 0, &verify).is_ok());
        assert_eq!(
            decode(&forged, 0, &verify).unwrap_err(),
            DecodeError::ChecksumMismatch {
                offset: 0,
                chunk_type: ChunkType::IEND,
                claimed: u32::from_be_bytes(*b"AB12"),
                computed: 0xAE426082,
            }
        );
    }
}
