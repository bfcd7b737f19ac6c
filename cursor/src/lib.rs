//! Bounded byte cursor and varint primitives for the snapdec decoder.
//!
//! This crate provides [`ByteReader`] for forward-only, bounds-checked reads
//! over borrowed input, and the little-endian base-128 varint used by the
//! Snappy block format for its length prefix.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No format knowledge** - This crate knows nothing about tags, literals or copies.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use cursor::{push_varu32, ByteReader};
//!
//! let mut bytes = Vec::new();
//! push_varu32(&mut bytes, 300);
//! bytes.extend_from_slice(&[0x34, 0x12]);
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_varu32().unwrap(), 300);
//! assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
//! assert!(reader.is_empty());
//! ```

mod error;
mod reader;
mod varint;

pub use error::{CursorError, CursorResult};
pub use reader::ByteReader;
pub use varint::{decode_varu32, push_varu32, varu32_len, MAX_VARU32_LEN};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_roundtrip_various_values() {
        let values = [0u32, 1, 60, 127, 128, 255, 65_535, 1 << 21, 1 << 28, u32::MAX];

        for value in values {
            let mut bytes = Vec::new();
            let written = push_varu32(&mut bytes, value);
            assert_eq!(written, bytes.len());

            let mut reader = ByteReader::new(&bytes);
            assert_eq!(
                reader.read_varu32().unwrap(),
                value,
                "roundtrip failed for {value}"
            );
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn reader_and_free_function_agree() {
        let bytes = [0x01, 0xE8, 0x07, 0x00];
        let (value, next) = decode_varu32(&bytes, 1).unwrap();

        let mut reader = ByteReader::new(&bytes);
        reader.read_u8().unwrap();
        assert_eq!(reader.read_varu32().unwrap(), value);
        assert_eq!(reader.position(), next);
        assert_eq!(value, 1000);
    }
}
