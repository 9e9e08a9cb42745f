//! Signature validation.

/// The fixed 8-byte prefix every PNG container starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Length of [`PNG_SIGNATURE`].
pub const SIGNATURE_LEN: usize = PNG_SIGNATURE.len();

/// Check a header against the PNG signature.
///
/// Returns `true` only for an exact byte-for-byte match. Anything else,
/// including a header of the wrong length, is simply `false`.
#[inline]
pub fn validate(header: &[u8]) -> bool {
    header == PNG_SIGNATURE
}

/// Quick sniff: does `data` begin with the PNG signature?
pub fn is_png(data: &[u8]) -> bool {
    data.get(..SIGNATURE_LEN).is_some_and(validate)
}
