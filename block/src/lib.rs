//! Snappy raw block decoding.
//!
//! This crate decodes the Snappy block format: a varint uncompressed length
//! followed by literal and copy elements. It does not compress, and it does
//! not handle the Snappy framing format.
//!
//! # Design Principles
//!
//! - **All or nothing** - A call returns the complete output or an error, never partial data.
//! - **Bounded decoding** - The declared length is validated against [`Limits`] before allocation.
//! - **Diagnosable errors** - Every [`DecodeError`] carries the positions and lengths that failed.
//!
//! # Example
//!
//! ```
//! let mut block = vec![0x0D, 0x30];
//! block.extend_from_slice(b"Hello, World!");
//!
//! assert_eq!(block::decompress_len(&block).unwrap(), 13);
//! assert_eq!(block::decompress(&block).unwrap(), b"Hello, World!");
//! assert!(block::decompress(b"\x80").is_err());
//! ```

mod decoder;
mod element;
mod error;
mod header;
mod limits;

pub use decoder::Decoder;
pub use element::{Element, ElementKind, ElementSpan, Elements};
pub use error::{DecodeError, DecodeResult, ErrorKind, Field, LimitKind, OverflowError};
pub use header::{read_header, Header};
pub use limits::Limits;

/// Decodes a Snappy block with default limits.
pub fn decompress(input: &[u8]) -> DecodeResult<Vec<u8>> {
    Decoder::new().decompress(input)
}

/// Decodes a Snappy block into `output` with default limits, returning the
/// number of bytes written.
pub fn decompress_into(input: &[u8], output: &mut [u8]) -> DecodeResult<usize> {
    Decoder::new().decompress_into(input, output)
}

/// Returns the declared uncompressed length of a Snappy block.
pub fn decompress_len(input: &[u8]) -> DecodeResult<usize> {
    Decoder::new().decompress_len(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Limits::default();
        let _ = Decoder::with_limits(Limits::for_testing());
        let _ = ElementKind::from_tag(0);
        let _: DecodeResult<()> = Ok(());
    }

    #[test]
    fn free_functions_match_decoder() {
        let block = [6, 0x00, b'X', 0x05, 0x01];
        let decoder = Decoder::new();
        assert_eq!(decompress(&block).unwrap(), decoder.decompress(&block).unwrap());
        assert_eq!(decompress_len(&block).unwrap(), 6);

        let mut out = [0u8; 6];
        assert_eq!(decompress_into(&block, &mut out).unwrap(), 6);
        assert_eq!(&out, b"XXXXXX");
    }

    #[test]
    fn decoder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
        assert_send_sync::<DecodeError>();
    }
}
