//! Common utilities for ctfkit.
//!
//! This crate provides the foundational pieces shared by the ctfkit format crates:
//!
//! - [`BinaryReader`] - Bounds-checked, zero-copy reading from byte slices
//!   in network byte order
//! - [`crc`] - CRC-32 (IEEE 802.3) checksum helpers

mod error;
mod reader;

pub mod crc;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
