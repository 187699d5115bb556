use std::fmt;

use serde::{Deserialize, Serialize};

const ZERO_BASE_BIT: u64 = 0b1;
const ENCODING_SHIFT: u32 = 1;
const ENCODING_MASK: u64 = 0b1111;
const INDEX_SHIFT: u32 = 5;

/// Per-element metadata that lets one value be decoded on its own.
///
/// Bit layout, most significant first:
/// ```text
/// [ index : 59 ][ encoding : 4 ][ non-zero base : 1 ]
/// ```
/// The low bit is set when the element was stored against a non-zero base,
/// so the decoder knows whether to read the base field or add zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u64);

/// Decoded fields of a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagFields {
    pub encoding: u8,
    pub index: u64,
    pub is_zero_base: bool,
}

impl Tag {
    /// Pack an element's position, its encoding id, and the base it was
    /// stored against. Only the low 4 bits of `encoding` are kept.
    pub fn new(index: u64, encoding: u8, base: u64) -> Self {
        let non_zero = if base != 0 { ZERO_BASE_BIT } else { 0 };
        Self((index << INDEX_SHIFT) | ((encoding as u64 & ENCODING_MASK) << ENCODING_SHIFT) | non_zero)
    }

    pub fn parse(self) -> TagFields {
        TagFields {
            encoding: ((self.0 >> ENCODING_SHIFT) & ENCODING_MASK) as u8,
            index: self.0 >> INDEX_SHIFT,
            is_zero_base: self.0 & ZERO_BASE_BIT == 0,
        }
    }
}

impl From<u64> for Tag {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::LowerHex for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
