//! Little-endian base-128 varints, as used for Snappy length prefixes.

use crate::error::{CursorError, CursorResult};

/// Maximum encoded length of a 32-bit varint.
pub const MAX_VARU32_LEN: usize = 5;

/// Decodes a varint `u32` from `buf` starting at `start`.
///
/// Returns the value and the cursor position just past the last byte
/// consumed. Fails with [`CursorError::UnexpectedEof`] if the input ends
/// before a byte with the high bit clear, and with
/// [`CursorError::VarintOverflow`] if more than five bytes would be needed
/// or the decoded value exceeds `u32::MAX`.
pub fn decode_varu32(buf: &[u8], start: usize) -> CursorResult<(u32, usize)> {
    let mut pos = start;
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let Some(&byte) = buf.get(pos) else {
            return Err(CursorError::UnexpectedEof {
                position: pos,
                requested: 1,
                available: 0,
            });
        };
        pos += 1;
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift > 32 {
            return Err(CursorError::VarintOverflow { position: start });
        }
    }
    let value = u32::try_from(value).map_err(|_| CursorError::VarintOverflow { position: start })?;
    Ok((value, pos))
}

/// Appends the varint encoding of `value` to `out`, returning the number of
/// bytes written.
pub fn push_varu32(out: &mut Vec<u8>, mut value: u32) -> usize {
    let start = out.len();
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
    out.len() - start
}

/// Returns the encoded length of `value` in bytes.
pub const fn varu32_len(mut value: u32) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}
