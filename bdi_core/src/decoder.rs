use crate::config::ConfigTable;
use crate::error::{Error, Result};
use crate::format::*;
use crate::tag::{Tag, TagFields};
use crate::width::read_be;

/// Reconstruct the single value `tag` points at, touching only the base
/// field and that element's delta.
pub(crate) fn decode(table: &ConfigTable, element_width: u8, bytes: &[u8], tag: Tag) -> Result<u64> {
    let TagFields {
        encoding,
        index,
        is_zero_base,
    } = tag.parse();

    match encoding {
        ENCODING_ZEROS => Ok(0),
        ENCODING_REPEATED => read_be(bytes, 0, element_width),
        ENCODING_UNCOMPRESSED => read_element(bytes, 0, index, element_width),
        other => {
            let config = table.by_encoding(other).ok_or(Error::UnknownEncoding(other))?;
            let base_size = config.base_size();
            let base = if is_zero_base {
                0
            } else {
                read_be(bytes, 0, base_size)?
            };
            let delta = read_element(bytes, base_size as usize, index, config.delta_size())?;
            Ok(base.wrapping_add(delta))
        }
    }
}

fn read_element(bytes: &[u8], start: usize, index: u64, width: u8) -> Result<u64> {
    let offset = usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_mul(width as usize))
        .and_then(|o| o.checked_add(start))
        .ok_or(Error::Truncated {
            needed: usize::MAX,
            available: bytes.len(),
        })?;
    read_be(bytes, offset, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_std(bytes: &[u8], tag: Tag) -> Result<u64> {
        decode(&ConfigTable::standard(), 8, bytes, tag)
    }

    #[test]
    fn zeros_ignore_the_buffer() {
        assert_eq!(decode_std(&[], Tag::new(5, ENCODING_ZEROS, 0)).unwrap(), 0);
    }

    #[test]
    fn repeated_reads_the_leading_field() {
        let bytes = 0xdead_beef_u64.to_be_bytes();
        assert_eq!(decode_std(&bytes, Tag::new(3, ENCODING_REPEATED, 1)).unwrap(), 0xdead_beef);
    }

    #[test]
    fn base_plus_delta() {
        // base2-delta1: two-byte base then one byte per element.
        let bytes = [0x12, 0x00, 0x05, 0x07];
        let tag = Tag::new(1, ENCODING_BASE2_DELTA1, 0x1200);
        assert_eq!(decode_std(&bytes, tag).unwrap(), 0x1207);
        let tag = Tag::new(1, ENCODING_BASE2_DELTA1, 0);
        assert_eq!(decode_std(&bytes, tag).unwrap(), 0x07);
    }

    #[test]
    fn uncompressed_reads_full_width_slots() {
        let mut bytes = 1u64.to_be_bytes().to_vec();
        bytes.extend_from_slice(&0xabcd_u64.to_be_bytes());
        assert_eq!(decode_std(&bytes, Tag::new(1, ENCODING_UNCOMPRESSED, 0)).unwrap(), 0xabcd);
    }

    #[test]
    fn unknown_encoding_is_an_error() {
        assert_eq!(decode_std(&[0; 16], Tag::new(0, 0b1010, 1)), Err(Error::UnknownEncoding(0b1010)));
    }

    #[test]
    fn out_of_range_index_is_truncation() {
        let bytes = [0x12, 0x00, 0x05];
        let err = decode_std(&bytes, Tag::new(4, ENCODING_BASE2_DELTA1, 1)).unwrap_err();
        assert_eq!(err, Error::Truncated { needed: 7, available: 3 });
    }
}
