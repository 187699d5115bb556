use serde::Serialize;

use crate::error::{Error, Result};
use crate::format::ENCODING_UNCOMPRESSED;
use crate::tag::Tag;
use crate::width::{check_field_width, write_be};

/// The base an element was stored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseRef {
    /// Position of the base within its scheme's base list.
    pub slot: usize,
    pub value: u64,
}

/// One element of a compressed block, in original index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressedElement {
    pub tag: Tag,
    /// Bytes this element occupies in the stream.
    pub size: u8,
    /// Stored value: the delta against `base`, or the original value when
    /// the block was not compressed.
    pub value: u64,
    /// `None` only for the uncompressed fallback.
    pub base: Option<BaseRef>,
}

/// Result of compressing one block.
///
/// `size == base_size + sum(element.size)`; [`to_bytes`](Self::to_bytes)
/// refuses to emit a stream that breaks this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressedOutput {
    pub name: String,
    pub encoding: u8,
    /// The stored base. Zero when the scheme has none or none was needed.
    pub base: u64,
    pub base_size: u8,
    pub elements: Vec<CompressedElement>,
    /// Total stream bytes.
    pub size: usize,
    /// Bytes of the block before compression.
    pub original_size: usize,
}

impl CompressedOutput {
    /// Serialize to the wire layout: base field, then each element's stored
    /// value at its own width, all big-endian.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        check_field_width(self.base_size)?;
        for element in &self.elements {
            check_field_width(element.size)?;
        }

        let mut out = Vec::with_capacity(self.size);
        if self.encoding != ENCODING_UNCOMPRESSED {
            write_be(&mut out, self.base, self.base_size);
        }
        for element in &self.elements {
            write_be(&mut out, element.value, element.size);
        }

        if out.len() != self.size {
            return Err(Error::SerializationLengthMismatch {
                encoding: self.encoding,
                expected: self.size,
                actual: out.len(),
            });
        }
        Ok(out)
    }

    /// Debug view: the base followed by every stored value. Stored values
    /// are deltas, not the reconstructed originals.
    ///
    /// The base is listed only when some element was stored against it; a
    /// block that rode the zero base entirely shows its values unchanged.
    pub fn to_array(&self) -> Vec<u64> {
        let base = self.uses_stored_base().then_some(self.base);
        base.into_iter()
            .chain(self.elements.iter().map(|e| e.value))
            .collect()
    }

    /// Whether any element decodes against the stored base field.
    pub fn uses_stored_base(&self) -> bool {
        self.encoding != ENCODING_UNCOMPRESSED && self.elements.iter().any(|e| !e.tag.parse().is_zero_base)
    }

    pub fn is_compressed(&self) -> bool {
        self.encoding != ENCODING_UNCOMPRESSED
    }

    /// Bytes saved relative to the raw block.
    pub fn saved(&self) -> isize {
        self.original_size as isize - self.size as isize
    }

    /// Compression ratio (original / compressed).
    pub fn ratio(&self) -> f64 {
        if self.size == 0 {
            return 1.0;
        }
        self.original_size as f64 / self.size as f64
    }
}
