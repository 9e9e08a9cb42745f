//! Property tests for the container parser.

use ctfkit_png::{codec, ChunkType, DecodeError, Error, ParseOptions, PngFile, PNG_SIGNATURE};
use proptest::prelude::*;

fn arb_type() -> impl Strategy<Value = ChunkType> {
    any::<[u8; 4]>().prop_map(ChunkType)
}

fn arb_chunk() -> impl Strategy<Value = (ChunkType, Vec<u8>, [u8; 4])> {
    (arb_type(), prop::collection::vec(any::<u8>(), 0..64), any::<[u8; 4]>())
}

fn build(chunks: &[(ChunkType, Vec<u8>, [u8; 4])]) -> Vec<u8> {
    let mut buf = PNG_SIGNATURE.to_vec();
    for (t, data, crc) in chunks {
        buf.extend(codec::encode(*t, data, *crc).unwrap());
    }
    buf
}

proptest! {
    #[test]
    fn short_buffers_are_empty_input(data in prop::collection::vec(any::<u8>(), 0..8)) {
        let len = data.len();
        let err = PngFile::load(data, ParseOptions::default()).unwrap_err();
        let is_empty_input = matches!(err, Error::EmptyInput { size } if size == len);
        prop_assert!(is_empty_input, "unexpected error: {:?}", err);
    }

    #[test]
    fn signature_mutation_detected(
        tail in prop::collection::vec(any::<u8>(), 0..32),
        index in 0usize..8,
        flip in 1u8..=255,
    ) {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend(tail);
        let valid = PngFile::from_slice(&data, ParseOptions::default()).unwrap();
        prop_assert!(valid.validate_signature());

        data[index] ^= flip;
        let mutated = PngFile::load(data, ParseOptions::default()).unwrap();
        prop_assert!(!mutated.validate_signature());
    }

    #[test]
    fn decode_reproduces_encoded_fields(
        prefix in prop::collection::vec(any::<u8>(), 0..16),
        (chunk_type, data, crc) in arb_chunk(),
    ) {
        let mut buf = prefix.clone();
        buf.extend(codec::encode(chunk_type, &data, crc).unwrap());

        let chunk = codec::decode(&buf, prefix.len(), &ParseOptions::lenient()).unwrap();
        prop_assert_eq!(chunk.offset, prefix.len());
        prop_assert_eq!(chunk.length as usize, data.len());
        prop_assert_eq!(chunk.chunk_type, chunk_type);
        prop_assert_eq!(chunk.data, data);
        prop_assert_eq!(chunk.checksum_claim, crc);
    }

    #[test]
    fn lenient_walk_recovers_every_chunk(chunks in prop::collection::vec(arb_chunk(), 1..8)) {
        let buf = build(&chunks);
        let mut png = PngFile::load(buf, ParseOptions::lenient()).unwrap();

        prop_assert!(png.process_chunks().unwrap());
        prop_assert_eq!(png.chunks().len(), chunks.len());
        prop_assert!(png.halt().is_none());
        prop_assert_eq!(png.trailing_bytes(), 0);

        prop_assert_eq!(png.chunks()[0].offset, 8);
        for pair in png.chunks().windows(2) {
            prop_assert_eq!(pair[1].offset, pair[0].offset + 12 + pair[0].length as usize);
        }
        for (parsed, (t, data, _)) in png.chunks().iter().zip(&chunks) {
            prop_assert_eq!(parsed.chunk_type, *t);
            prop_assert_eq!(&parsed.data, data);
        }
    }

    #[test]
    fn truncation_keeps_prefix_or_fails_strictly(
        chunks in prop::collection::vec(arb_chunk(), 1..6),
        cut in 1usize..12,
    ) {
        let mut buf = build(&chunks);
        // Every chunk is at least 12 bytes, so the cut always lands inside the last one
        buf.truncate(buf.len() - cut);

        let mut lenient = PngFile::from_slice(&buf, ParseOptions::lenient()).unwrap();
        let any = lenient.process_chunks().unwrap();
        prop_assert_eq!(any, chunks.len() > 1);
        prop_assert_eq!(lenient.chunks().len(), chunks.len() - 1);

        // Strict decoding of arbitrary tags fails on type before truncation,
        // so allow every tag present to isolate the truncation path.
        let allowed = chunks.iter().map(|(t, _, _)| *t).collect();
        let strict_opts = ParseOptions::strict().with_allowed_types(allowed);
        let mut strict = PngFile::load(buf, strict_opts).unwrap();
        let err = strict.process_chunks().unwrap_err();
        prop_assert!(
            matches!(err, Error::Chunk(DecodeError::TruncatedChunk { .. })),
            "unexpected error: {:?}",
            err
        );
        prop_assert!(strict.chunks().is_empty());
    }
}
