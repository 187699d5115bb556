//! The ordered table of candidate base-delta schemes.
//!
//! A table is plain data handed to the [`Codec`](crate::Codec); nothing here
//! is global. [`ConfigTable::new`] enforces the layout rules that make a
//! single element decodable from its tag alone:
//! - at most one searched base per scheme, so the base field sits at offset 0;
//! - immediate bases are zero and take no bytes, so the tag's zero-base bit
//!   is enough to tell the two bases apart;
//! - one delta width per scheme, so element `i` lives at
//!   `base_size + i * delta_size`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::*;
use crate::width::limit_for;

/// One base of a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Bytes the base occupies in the stream. Zero for immediate bases.
    pub base_size: u8,
    /// Bytes each delta against this base occupies.
    pub delta_size: u8,
    /// Fixed base value; when set, the encoder never searches for a base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate: Option<u64>,
}

impl BaseConfig {
    /// A base picked from the block: the first unbased element that fits
    /// `base_size` bytes.
    pub const fn searched(base_size: u8, delta_size: u8) -> Self {
        Self {
            base_size,
            delta_size,
            immediate: None,
        }
    }

    /// The implicit zero base.
    pub const fn zero(delta_size: u8) -> Self {
        Self {
            base_size: 0,
            delta_size,
            immediate: Some(0),
        }
    }
}

/// A named scheme: the bases tried in order, sharing one encoding id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub name: String,
    pub encoding: u8,
    pub bases: Vec<BaseConfig>,
}

impl CompressionConfig {
    pub fn new(name: impl Into<String>, encoding: u8, bases: Vec<BaseConfig>) -> Self {
        Self {
            name: name.into(),
            encoding,
            bases,
        }
    }

    /// Immediate zero base followed by one searched base, the standard BDI shape.
    pub fn base_delta(name: impl Into<String>, encoding: u8, base_size: u8, delta_size: u8) -> Self {
        Self::new(
            name,
            encoding,
            vec![
                BaseConfig::zero(delta_size),
                BaseConfig::searched(base_size, delta_size),
            ],
        )
    }

    /// Bytes of base written ahead of the deltas.
    pub fn base_size(&self) -> u8 {
        self.bases.iter().map(|b| b.base_size).sum()
    }

    pub fn delta_size(&self) -> u8 {
        self.bases.first().map(|b| b.delta_size).unwrap_or(0)
    }

    /// Stream length for a block of `len` elements.
    pub fn encoded_size(&self, len: usize) -> usize {
        self.base_size() as usize + len * self.delta_size() as usize
    }

    fn validate(&self) -> Result<()> {
        let invalid = |why: &str| Err(Error::InvalidConfig(format!("{}: {}", self.name, why)));

        if self.encoding > MAX_ENCODING {
            return invalid("encoding id does not fit in 4 bits");
        }
        if is_reserved(self.encoding) {
            return invalid("encoding id is reserved for a special case");
        }
        if self.bases.is_empty() {
            return invalid("scheme has no bases");
        }

        let delta_size = self.delta_size();
        let mut searched = 0;
        for base in &self.bases {
            limit_for(base.delta_size)?;
            if base.delta_size != delta_size {
                return invalid("bases disagree on delta width");
            }
            match base.immediate {
                Some(0) if base.base_size == 0 => {}
                Some(0) => return invalid("immediate base must not occupy stream bytes"),
                Some(_) => return invalid("immediate base must be zero"),
                None => {
                    limit_for(base.base_size)?;
                    searched += 1;
                }
            }
        }
        if searched > 1 {
            return invalid("more than one searched base");
        }
        Ok(())
    }
}

/// Immutable, validated, ordered list of schemes. Search order is table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CompressionConfig>", into = "Vec<CompressionConfig>")]
pub struct ConfigTable {
    configs: Vec<CompressionConfig>,
}

impl ConfigTable {
    pub fn new(configs: Vec<CompressionConfig>) -> Result<Self> {
        let mut seen = HashSet::new();
        for config in &configs {
            config.validate()?;
            if !seen.insert(config.encoding) {
                return Err(Error::InvalidConfig(format!(
                    "{}: encoding id {:#06b} used twice",
                    config.name, config.encoding
                )));
            }
        }
        Ok(Self { configs })
    }

    /// The six classic base-delta schemes, in their historical search order.
    pub fn standard() -> Self {
        Self {
            configs: vec![
                CompressionConfig::base_delta("base8-delta1", ENCODING_BASE8_DELTA1, 8, 1),
                CompressionConfig::base_delta("base8-delta4", ENCODING_BASE8_DELTA4, 8, 4),
                CompressionConfig::base_delta("base8-delta2", ENCODING_BASE8_DELTA2, 8, 2),
                CompressionConfig::base_delta("base4-delta2", ENCODING_BASE4_DELTA2, 4, 2),
                CompressionConfig::base_delta("base4-delta1", ENCODING_BASE4_DELTA1, 4, 1),
                CompressionConfig::base_delta("base2-delta1", ENCODING_BASE2_DELTA1, 2, 1),
            ],
        }
    }

    pub fn configs(&self) -> &[CompressionConfig] {
        &self.configs
    }

    pub fn by_encoding(&self, encoding: u8) -> Option<&CompressionConfig> {
        self.configs.iter().find(|c| c.encoding == encoding)
    }
}

impl Default for ConfigTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<CompressionConfig>> for ConfigTable {
    type Error = Error;

    fn try_from(configs: Vec<CompressionConfig>) -> Result<Self> {
        Self::new(configs)
    }
}

impl From<ConfigTable> for Vec<CompressionConfig> {
    fn from(table: ConfigTable) -> Self {
        table.configs
    }
}
