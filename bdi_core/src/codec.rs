use crate::config::ConfigTable;
use crate::decoder::decode;
use crate::encoder::{encode, search};
use crate::error::{Error, Result};
use crate::format::DEFAULT_ELEMENT_WIDTH;
use crate::output::CompressedOutput;
use crate::tag::Tag;
use crate::width::limit_for;

/// Base-Delta-Immediate block codec.
///
/// Holds the config table and the element width; both are fixed for the
/// life of the codec. Calls share no state, so one codec can serve any
/// number of threads.
///
/// Blocks are compressed whole but decoded one element at a time: each
/// element's [`Tag`] carries its index and scheme, which is enough to locate
/// and rebuild it from the serialized bytes without touching the others.
#[derive(Debug, Clone)]
pub struct Codec {
    table: ConfigTable,
    element_width: u8,
}

impl Codec {
    pub fn new(table: ConfigTable, element_width: u8) -> Result<Self> {
        limit_for(element_width)?;
        Ok(Self {
            table,
            element_width,
        })
    }

    /// Standard table with elements of `element_width` bytes.
    pub fn with_width(element_width: u8) -> Result<Self> {
        Self::new(ConfigTable::standard(), element_width)
    }

    pub fn table(&self) -> &ConfigTable {
        &self.table
    }

    pub fn element_width(&self) -> u8 {
        self.element_width
    }

    /// Pick the smallest representation of `block`.
    ///
    /// Never fails for lack of a fitting scheme; that case is stored
    /// uncompressed. Fails only on an empty block or a value wider than the
    /// element width.
    pub fn compress(&self, block: &[u64]) -> Result<CompressedOutput> {
        self.check_block(block)?;
        encode(block, self.element_width, &self.table)
    }

    /// Every table scheme that can represent `block`, in table order.
    /// Special cases and the fallback are not included.
    pub fn candidates(&self, block: &[u64]) -> Result<Vec<CompressedOutput>> {
        self.check_block(block)?;
        search(block, self.element_width, &self.table)
    }

    /// Rebuild the original value `tag` refers to from serialized `bytes`.
    pub fn decompress(&self, bytes: &[u8], tag: Tag) -> Result<u64> {
        decode(&self.table, self.element_width, bytes, tag)
    }

    fn check_block(&self, block: &[u64]) -> Result<()> {
        if block.is_empty() {
            return Err(Error::EmptyBlock);
        }
        let limit = limit_for(self.element_width)?;
        match block.iter().position(|&v| v > limit) {
            Some(index) => Err(Error::ValueOutOfRange {
                index,
                value: block[index],
                width: self.element_width,
            }),
            None => Ok(()),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            table: ConfigTable::standard(),
            element_width: DEFAULT_ELEMENT_WIDTH,
        }
    }
}
