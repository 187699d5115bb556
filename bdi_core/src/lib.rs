pub mod codec;
pub mod config;
mod decoder;
mod encoder;
pub mod error;
pub mod format;
pub mod output;
pub mod tag;
pub mod width;

pub use codec::Codec;
pub use config::{BaseConfig, CompressionConfig, ConfigTable};
pub use error::{Error, Result};
pub use output::{BaseRef, CompressedElement, CompressedOutput};
pub use tag::{Tag, TagFields};
pub use width::limit_for;
