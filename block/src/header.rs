//! Block length prefix.

use cursor::decode_varu32;

use crate::error::{DecodeError, DecodeResult, Field, LimitKind};
use crate::limits::Limits;

/// The parsed length prefix of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Declared uncompressed length in bytes.
    pub uncompressed_len: usize,
    /// Number of input bytes the prefix occupies.
    pub header_len: usize,
}

/// Reads and validates the uncompressed length prefix of `input`.
///
/// Empty input yields a zero-length header without reading anything.
pub fn read_header(input: &[u8], limits: &Limits) -> DecodeResult<Header> {
    if input.is_empty() {
        return Ok(Header::default());
    }

    let (value, header_len) =
        decode_varu32(input, 0).map_err(|err| DecodeError::from_cursor(err, Field::LengthVarint))?;
    let uncompressed_len = usize::try_from(value).unwrap_or(usize::MAX);
    if uncompressed_len > limits.max_uncompressed_len {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::UncompressedLength,
            limit: limits.max_uncompressed_len,
            actual: uncompressed_len,
        });
    }

    Ok(Header {
        uncompressed_len,
        header_len,
    })
}
