//! Encoding ids stored in the 4-bit encoding field of every [`Tag`](crate::Tag).
//!
//! Three ids are reserved for results that do not come from the config
//! table; every other id is owned by exactly one table entry.

/// Every element is zero. A single zero byte stands for the whole block.
pub const ENCODING_ZEROS: u8 = 0b0000;
/// Every element equals the first. The stream is that value at element width.
pub const ENCODING_REPEATED: u8 = 0b0001;
/// No scheme fits. Elements are stored verbatim at element width.
pub const ENCODING_UNCOMPRESSED: u8 = 0b1111;

pub const ENCODING_BASE8_DELTA1: u8 = 0b0010;
pub const ENCODING_BASE8_DELTA2: u8 = 0b0011;
pub const ENCODING_BASE8_DELTA4: u8 = 0b0100;
pub const ENCODING_BASE4_DELTA1: u8 = 0b0101;
pub const ENCODING_BASE4_DELTA2: u8 = 0b0110;
pub const ENCODING_BASE2_DELTA1: u8 = 0b0111;

/// Largest value the tag's encoding field can carry.
pub const MAX_ENCODING: u8 = 0b1111;

pub const NAME_ZEROS: &str = "zeros";
pub const NAME_REPEATED: &str = "repeated_values";
pub const NAME_UNCOMPRESSED: &str = "no_compression";

/// Elements per block when the caller does not choose: one 64-byte cache
/// line of 8-byte words.
pub const DEFAULT_BLOCK_LEN: usize = 8;
pub const DEFAULT_ELEMENT_WIDTH: u8 = 8;

pub fn is_reserved(encoding: u8) -> bool {
    matches!(
        encoding,
        ENCODING_ZEROS | ENCODING_REPEATED | ENCODING_UNCOMPRESSED
    )
}
