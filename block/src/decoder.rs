//! Block decoding into an output buffer.

use crate::element::{Element, Elements};
use crate::error::{DecodeError, DecodeResult};
use crate::header::{read_header, Header};
use crate::limits::Limits;

/// Snappy block decoder.
///
/// Holds only configuration; every call owns its own output buffer, so a
/// single `Decoder` can be shared freely across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    limits: Limits,
}

impl Decoder {
    /// Creates a decoder with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given limits.
    #[must_use]
    pub const fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    /// Returns the limits enforced by this decoder.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the declared uncompressed length of `input` without decoding it.
    pub fn decompress_len(&self, input: &[u8]) -> DecodeResult<usize> {
        Ok(read_header(input, &self.limits)?.uncompressed_len)
    }

    /// Decodes `input` into a newly allocated buffer.
    ///
    /// The buffer is sized to the declared length once the header has passed
    /// the limit check. On any error it is dropped and nothing is returned.
    pub fn decompress(&self, input: &[u8]) -> DecodeResult<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let header = read_header(input, &self.limits)?;
        let mut output = vec![0u8; header.uncompressed_len];
        decode_block(input, header, &mut output)?;
        Ok(output)
    }

    /// Decodes `input` into the front of `output`, returning the number of
    /// bytes written.
    ///
    /// The contents of `output` are unspecified when an error is returned.
    pub fn decompress_into(&self, input: &[u8], output: &mut [u8]) -> DecodeResult<usize> {
        if input.is_empty() {
            return Ok(0);
        }
        let header = read_header(input, &self.limits)?;
        let needed = header.uncompressed_len;
        if output.len() < needed {
            return Err(DecodeError::OutputTooSmall {
                needed,
                available: output.len(),
            });
        }
        decode_block(input, header, &mut output[..needed])
    }
}

/// Runs the element loop over `input`, writing into `output`.
///
/// `output` must be exactly `header.uncompressed_len` bytes long.
fn decode_block(input: &[u8], header: Header, output: &mut [u8]) -> DecodeResult<usize> {
    let mut elements = Elements::with_header(input, header);
    for span in elements.by_ref() {
        let span = span?;
        let start = span.output_pos;
        match span.element {
            Element::Literal(bytes) => {
                output[start..start + bytes.len()].copy_from_slice(bytes);
            }
            Element::Copy { length, offset } => copy_back(output, start, offset, length),
        }
    }
    elements.finish()
}

/// Copies `length` bytes from `offset` bytes behind `start` to `start`.
///
/// The copy runs one byte at a time in increasing order. When `offset` is
/// smaller than `length` the ranges overlap and bytes written earlier in the
/// same copy are read again, repeating the last `offset` bytes.
fn copy_back(output: &mut [u8], start: usize, offset: usize, length: usize) {
    let src = start - offset;
    for i in 0..length {
        output[start + i] = output[src + i];
    }
}
