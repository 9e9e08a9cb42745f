//! Chunk type tags and allow-lists.

use std::collections::BTreeSet;
use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Bit 5 of each tag byte; set means lowercase letter.
const PROPERTY_BIT: u8 = 0x20;

/// Four-character chunk type tag.
///
/// The tag is stored verbatim. It is conventionally four ASCII letters, but a
/// hostile file may carry any bytes here, so nothing about the contents is assumed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Image header; must be the first chunk.
    pub const IHDR: Self = Self(*b"IHDR");
    /// Palette.
    pub const PLTE: Self = Self(*b"PLTE");
    /// Image data, possibly split over several chunks.
    pub const IDAT: Self = Self(*b"IDAT");
    /// Image end marker.
    pub const IEND: Self = Self(*b"IEND");

    /// Background color.
    pub const BKGD: Self = Self(*b"bKGD");
    /// Primary chromaticities and white point.
    pub const CHRM: Self = Self(*b"cHRM");
    /// Image gamma.
    pub const GAMA: Self = Self(*b"gAMA");
    /// Palette histogram.
    pub const HIST: Self = Self(*b"hIST");
    /// Embedded ICC profile.
    pub const ICCP: Self = Self(*b"iCCP");
    /// International (UTF-8) text.
    pub const ITXT: Self = Self(*b"iTXt");
    /// Physical pixel dimensions.
    pub const PHYS: Self = Self(*b"pHYs");
    /// Significant bits.
    pub const SBIT: Self = Self(*b"sBIT");
    /// Suggested palette.
    pub const SPLT: Self = Self(*b"sPLT");
    /// Standard RGB color space.
    pub const SRGB: Self = Self(*b"sRGB");
    /// Stereo image indicator.
    pub const STER: Self = Self(*b"sTER");
    /// Latin-1 text.
    pub const TEXT: Self = Self(*b"tEXt");
    /// Last modification time.
    pub const TIME: Self = Self(*b"tIME");
    /// Transparency.
    pub const TRNS: Self = Self(*b"tRNS");
    /// Compressed text.
    pub const ZTXT: Self = Self(*b"zTXt");

    /// Standardized critical chunk types.
    pub const CRITICAL: [Self; 4] = [Self::IHDR, Self::PLTE, Self::IDAT, Self::IEND];

    /// Standardized ancillary chunk types.
    pub const ANCILLARY: [Self; 15] = [
        Self::BKGD,
        Self::CHRM,
        Self::GAMA,
        Self::HIST,
        Self::ICCP,
        Self::ITXT,
        Self::PHYS,
        Self::SBIT,
        Self::SPLT,
        Self::SRGB,
        Self::STER,
        Self::TEXT,
        Self::TIME,
        Self::TRNS,
        Self::ZTXT,
    ];

    /// Raw tag bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether all four bytes are ASCII letters, as the format requires.
    pub fn is_well_formed(&self) -> bool {
        self.0.iter().all(u8::is_ascii_alphabetic)
    }

    /// Ancillary bit: lowercase first letter.
    #[inline]
    pub const fn is_ancillary(&self) -> bool {
        self.0[0] & PROPERTY_BIT != 0
    }

    /// Private bit: lowercase second letter.
    #[inline]
    pub const fn is_private(&self) -> bool {
        self.0[1] & PROPERTY_BIT != 0
    }

    /// Reserved bit: lowercase third letter. Always clear in conforming files.
    #[inline]
    pub const fn is_reserved_set(&self) -> bool {
        self.0[2] & PROPERTY_BIT != 0
    }

    /// Safe-to-copy bit: lowercase fourth letter.
    #[inline]
    pub const fn is_safe_to_copy(&self) -> bool {
        self.0[3] & PROPERTY_BIT != 0
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// An immutable set of accepted chunk types.
///
/// Strict parsing rejects any chunk whose type is not a member. The set is
/// handed to the parser as configuration, so callers can narrow or widen it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkTypeSet {
    types: BTreeSet<ChunkType>,
}

impl ChunkTypeSet {
    /// Every standardized type, critical and ancillary.
    pub fn standard() -> Self {
        ChunkType::CRITICAL
            .into_iter()
            .chain(ChunkType::ANCILLARY)
            .collect()
    }

    /// Only the standardized critical types.
    pub fn critical() -> Self {
        ChunkType::CRITICAL.into_iter().collect()
    }

    /// Only the standardized ancillary types.
    pub fn ancillary() -> Self {
        ChunkType::ANCILLARY.into_iter().collect()
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, chunk_type: &ChunkType) -> bool {
        self.types.contains(chunk_type)
    }

    /// Number of types in the set.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over members in byte order.
    pub fn iter(&self) -> impl Iterator<Item = &ChunkType> {
        self.types.iter()
    }
}

impl Default for ChunkTypeSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromIterator<ChunkType> for ChunkTypeSet {
    fn from_iter<I: IntoIterator<Item = ChunkType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let set = ChunkTypeSet::standard();
        assert_eq!(set.len(), 19);
        assert!(set.contains(&ChunkType::IHDR));
        assert!(set.contains(&ChunkType::ZTXT));
        assert!(!set.contains(&ChunkType(*b"zzZZ")));
        // Tags are case sensitive
        assert!(!set.contains(&ChunkType(*b"ihdr")));
    }

    #[test]
    fn test_subsets_partition_standard() {
        let critical = ChunkTypeSet::critical();
        let ancillary = ChunkTypeSet::ancillary();
        assert_eq!(critical.len() + ancillary.len(), ChunkTypeSet::standard().len());
        assert!(critical.iter().all(|t| !t.is_ancillary()));
        assert!(ancillary.iter().all(|t| t.is_ancillary()));
    }

    #[test]
    fn test_property_bits() {
        let t = ChunkType::TEXT;
        assert!(t.is_ancillary());
        assert!(!t.is_private());
        assert!(!t.is_reserved_set());
        assert!(t.is_safe_to_copy());

        let private = ChunkType(*b"prVt");
        assert!(private.is_private());
        assert!(!ChunkType::IDAT.is_private());
        assert!(!ChunkType::IDAT.is_safe_to_copy());
    }

    #[test]
    fn test_display_escapes_unprintable() {
        assert_eq!(ChunkType::IEND.to_string(), "IEND");
        assert_eq!(ChunkType([b'a', 0x00, b'b', 0xff]).to_string(), "a\\x00b\\xff");
    }

    #[test]
    fn test_well_formed() {
        assert!(ChunkType(*b"zzZZ").is_well_formed());
        assert!(!ChunkType(*b"AB12").is_well_formed());
    }

    #[test]
    fn test_custom_set() {
        let set: ChunkTypeSet = [ChunkType::IHDR, ChunkType(*b"zzZZ")].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&ChunkType(*b"zzZZ")));
        assert!(!set.contains(&ChunkType::IEND));
    }
}
