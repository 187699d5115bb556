//! Width limits and fixed-width big-endian fields.
//!
//! Every base and delta in the compressed stream is an unsigned integer of
//! 1, 2, 4, or 8 bytes. Fields are written big-endian so hex dumps read in
//! the same order as the values they encode.

use crate::error::{Error, Result};

/// Widths a base, delta, or block element may use.
pub const SUPPORTED_WIDTHS: [u8; 4] = [1, 2, 4, 8];

/// Largest unsigned value representable in `width` bytes.
pub fn limit_for(width: u8) -> Result<u64> {
    match width {
        1 => Ok(u8::MAX as u64),
        2 => Ok(u16::MAX as u64),
        4 => Ok(u32::MAX as u64),
        8 => Ok(u64::MAX),
        other => Err(Error::UnsupportedWidth(other)),
    }
}

/// A stream field width: a supported width, or zero for a field that is
/// not written.
pub(crate) fn check_field_width(width: u8) -> Result<()> {
    if width == 0 {
        return Ok(());
    }
    limit_for(width).map(|_| ())
}

/// Append the low `width` bytes of `value`, most significant first.
///
/// `width` is in `0..=8`; a zero width writes nothing.
pub(crate) fn write_be(out: &mut Vec<u8>, value: u64, width: u8) {
    let bytes = value.to_be_bytes();
    out.extend_from_slice(&bytes[8 - width as usize..]);
}

/// Read a `width`-byte big-endian field starting at `offset`.
pub(crate) fn read_be(buf: &[u8], offset: usize, width: u8) -> Result<u64> {
    let end = offset + width as usize;
    let field = buf.get(offset..end).ok_or(Error::Truncated {
        needed: end,
        available: buf.len(),
    })?;
    Ok(field.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_match_width() {
        assert_eq!(limit_for(1).unwrap(), 0xff);
        assert_eq!(limit_for(2).unwrap(), 0xffff);
        assert_eq!(limit_for(4).unwrap(), 0xffff_ffff);
        assert_eq!(limit_for(8).unwrap(), u64::MAX);
    }

    #[test]
    fn other_widths_are_rejected() {
        for w in [0u8, 3, 5, 7, 16] {
            assert_eq!(limit_for(w), Err(Error::UnsupportedWidth(w)));
        }
    }

    #[test]
    fn fields_are_big_endian() {
        let mut out = Vec::new();
        write_be(&mut out, 0xc040_39c0, 4);
        write_be(&mut out, 0x38, 1);
        write_be(&mut out, 0xdead, 0);
        assert_eq!(out, vec![0xc0, 0x40, 0x39, 0xc0, 0x38]);
        assert_eq!(read_be(&out, 0, 4).unwrap(), 0xc040_39c0);
        assert_eq!(read_be(&out, 4, 1).unwrap(), 0x38);
    }

    #[test]
    fn field_widths_allow_zero() {
        assert!(check_field_width(0).is_ok());
        assert!(check_field_width(8).is_ok());
        assert_eq!(check_field_width(9), Err(Error::UnsupportedWidth(9)));
    }

    #[test]
    fn short_buffer_reports_truncation() {
        let err = read_be(&[0x01, 0x02], 1, 2).unwrap_err();
        assert_eq!(err, Error::Truncated { needed: 3, available: 2 });
    }
}
