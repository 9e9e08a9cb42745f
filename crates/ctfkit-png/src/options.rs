//! Parser configuration.

use crate::ChunkTypeSet;

/// Failure policy and validation knobs for a container.
///
/// Fixed when a [`PngFile`](crate::PngFile) is created and applied to every
/// decode, sequential or random access.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Abort on any malformed or unrecognized chunk instead of keeping what parsed.
    pub strict: bool,
    /// Types accepted in strict mode. Ignored when `strict` is off.
    pub allowed_types: ChunkTypeSet,
    /// Recompute each chunk's CRC and fail on mismatch.
    pub verify_checksums: bool,
}

impl ParseOptions {
    /// Abort on the first bad chunk, standard allow-list.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Keep everything decodable up to the first bad chunk.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Replace the strict-mode allow-list.
    pub fn with_allowed_types(mut self, allowed_types: ChunkTypeSet) -> Self {
        self.allowed_types = allowed_types;
        self
    }

    /// Enable or disable CRC verification.
    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            allowed_types: ChunkTypeSet::standard(),
            verify_checksums: false,
        }
    }
}
