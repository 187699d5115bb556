use thiserror::Error;

/// Result type used throughout `bdi_core`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A base or delta width outside {1, 2, 4, 8} bytes. Points at a malformed
    /// config table or codec setup, never at bad input data.
    #[error("unsupported width {0} bytes; expected 1, 2, 4, or 8")]
    UnsupportedWidth(u8),

    /// The config table violates a layout rule the decoder relies on.
    #[error("invalid config table: {0}")]
    InvalidConfig(String),

    /// Serialized bytes disagree with the output's declared size.
    #[error("encoding {encoding:#06b}: expected {expected} serialized bytes but produced {actual}")]
    SerializationLengthMismatch {
        encoding: u8,
        expected: usize,
        actual: usize,
    },

    /// A tag names an encoding id that neither the table nor the special cases know.
    #[error("unknown encoding id {0:#06b}")]
    UnknownEncoding(u8),

    /// The compressed buffer ends before the field a tag points at.
    #[error("compressed buffer too short: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("cannot compress an empty block")]
    EmptyBlock,

    /// A block value does not fit the codec's element width.
    #[error("value {value:#x} at index {index} does not fit in {width} bytes")]
    ValueOutOfRange { index: usize, value: u64, width: u8 },
}
