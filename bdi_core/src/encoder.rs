//! Candidate search over the config table.
//!
//! Special cases are checked first and end the search: an all-zero block,
//! then a block of one repeated value. Otherwise every scheme in the table
//! is tried in order and the strictly smallest result wins, so ties keep the
//! scheme declared first. When nothing fits, the block is stored verbatim.

use tracing::{debug, trace};

use crate::config::{CompressionConfig, ConfigTable};
use crate::error::Result;
use crate::format::*;
use crate::output::{BaseRef, CompressedElement, CompressedOutput};
use crate::tag::Tag;
use crate::width::limit_for;

/// Working state of one element during a single scheme attempt.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Unbased(u64),
    Based { base: BaseRef, size: u8, delta: u64 },
}

/// Compress a non-empty block whose values all fit `width` bytes.
pub(crate) fn encode(block: &[u64], width: u8, table: &ConfigTable) -> Result<CompressedOutput> {
    let output = if block.iter().all(|&v| v == 0) {
        zeros(block, width)
    } else if block.iter().all(|&v| Some(&v) == block.first()) {
        repeated(block, width)
    } else {
        search(block, width, table)?
            .into_iter()
            .reduce(|best, next| if next.size < best.size { next } else { best })
            .unwrap_or_else(|| uncompressed(block, width))
    };

    debug!(
        scheme = %output.name,
        encoding = output.encoding,
        size = output.size,
        original_size = output.original_size,
        "compressed block"
    );
    Ok(output)
}

/// Every scheme in `table` that can represent `block`, in table order.
pub(crate) fn search(block: &[u64], width: u8, table: &ConfigTable) -> Result<Vec<CompressedOutput>> {
    let mut found = Vec::new();
    for config in table.configs() {
        match compress_with(block, width, config)? {
            Some(output) => found.push(output),
            None => trace!(scheme = %config.name, "scheme cannot represent block"),
        }
    }
    Ok(found)
}

fn compress_with(block: &[u64], width: u8, config: &CompressionConfig) -> Result<Option<CompressedOutput>> {
    let mut slots: Vec<Slot> = block.iter().map(|&v| Slot::Unbased(v)).collect();
    let mut stored_base = 0;

    for (slot, step) in config.bases.iter().enumerate() {
        if slots.iter().all(|s| matches!(s, Slot::Based { .. })) {
            break;
        }

        let base_value = match step.immediate {
            Some(value) => value,
            None => {
                let limit = limit_for(step.base_size)?;
                let candidate = slots.iter().find_map(|s| match *s {
                    Slot::Unbased(v) if v <= limit => Some(v),
                    _ => None,
                });
                match candidate {
                    Some(v) => {
                        stored_base = v;
                        v
                    }
                    None => return Ok(None),
                }
            }
        };

        let delta_limit = limit_for(step.delta_size)?;
        let base = BaseRef {
            slot,
            value: base_value,
        };
        for s in slots.iter_mut() {
            if let Slot::Unbased(value) = *s {
                // Deltas are unsigned; anything below the base is left for a later step.
                if let Some(delta) = value.checked_sub(base_value).filter(|d| *d <= delta_limit) {
                    *s = Slot::Based {
                        base,
                        size: step.delta_size,
                        delta,
                    };
                }
            }
        }
    }

    let elements: Option<Vec<CompressedElement>> = slots
        .iter()
        .enumerate()
        .map(|(i, s)| match *s {
            Slot::Based { base, size, delta } => Some(CompressedElement {
                tag: Tag::new(i as u64, config.encoding, base.value),
                size,
                value: delta,
                base: Some(base),
            }),
            Slot::Unbased(_) => None,
        })
        .collect();
    let Some(elements) = elements else {
        return Ok(None);
    };

    let base_size = config.base_size();
    let size = base_size as usize + elements.iter().map(|e| e.size as usize).sum::<usize>();
    Ok(Some(CompressedOutput {
        name: config.name.clone(),
        encoding: config.encoding,
        base: stored_base,
        base_size,
        elements,
        size,
        original_size: block.len() * width as usize,
    }))
}

/// One zero byte for the whole block; every index still gets its own tag.
fn zeros(block: &[u64], width: u8) -> CompressedOutput {
    shared_base(block, width, 0, 1, ENCODING_ZEROS, NAME_ZEROS)
}

fn repeated(block: &[u64], width: u8) -> CompressedOutput {
    let value = block.first().copied().unwrap_or(0);
    shared_base(block, width, value, width, ENCODING_REPEATED, NAME_REPEATED)
}

fn shared_base(block: &[u64], width: u8, value: u64, base_size: u8, encoding: u8, name: &str) -> CompressedOutput {
    let base = BaseRef { slot: 0, value };
    CompressedOutput {
        name: name.to_string(),
        encoding,
        base: value,
        base_size,
        elements: (0..block.len())
            .map(|i| CompressedElement {
                tag: Tag::new(i as u64, encoding, value),
                size: 0,
                value: 0,
                base: Some(base),
            })
            .collect(),
        size: base_size as usize,
        original_size: block.len() * width as usize,
    }
}

fn uncompressed(block: &[u64], width: u8) -> CompressedOutput {
    CompressedOutput {
        name: NAME_UNCOMPRESSED.to_string(),
        encoding: ENCODING_UNCOMPRESSED,
        base: 0,
        base_size: 0,
        elements: block
            .iter()
            .enumerate()
            .map(|(i, &value)| CompressedElement {
                tag: Tag::new(i as u64, ENCODING_UNCOMPRESSED, 0),
                size: width,
                value,
                base: None,
            })
            .collect(),
        size: block.len() * width as usize,
        original_size: block.len() * width as usize,
    }
}
