//! Byte-level reader with bounded operations.

use crate::error::{CursorError, CursorResult};
use crate::varint::decode_varu32;

/// A forward-only byte cursor over borrowed input.
///
/// All read operations are bounds-checked and return errors on failure.
/// The cursor only advances when a read succeeds, and never rewinds.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the total length of the underlying input.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        self.ensure_bytes(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> CursorResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> CursorResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads `len` bytes as a borrowed slice of the input.
    pub fn read_bytes(&mut self, len: usize) -> CursorResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a varint `u32`.
    pub fn read_varu32(&mut self) -> CursorResult<u32> {
        let (value, pos) = decode_varu32(self.data, self.pos)?;
        self.pos = pos;
        Ok(value)
    }

    fn ensure_bytes(&self, len: usize) -> CursorResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CursorError::UnexpectedEof {
                position: self.pos,
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(result, Err(CursorError::UnexpectedEof { .. })));
    }

    #[test]
    fn read_u8_advances() {
        let mut reader = ByteReader::new(&[1, 2]);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u8().unwrap(), 2);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_fixed_little_endian() {
        let mut reader = ByteReader::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut reader = ByteReader::new(&[0xAA, 0xBB, 0xCC]);
        reader.read_u8().unwrap();
        let err = reader.read_u32_le().unwrap_err();
        assert_eq!(
            err,
            CursorError::UnexpectedEof {
                position: 1,
                requested: 4,
                available: 2,
            }
        );
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16_le().unwrap(), 0xCCBB);
    }

    #[test]
    fn read_bytes_borrows_input() {
        let data = b"Hello, World!";
        let mut reader = ByteReader::new(data);
        assert_eq!(reader.read_bytes(5).unwrap(), b"Hello");
        assert_eq!(reader.read_bytes(0).unwrap(), b"");
        assert_eq!(reader.remaining(), 8);
    }

    #[test]
    fn read_varint_then_bytes() {
        let mut reader = ByteReader::new(&[0xAC, 0x02, 0x7F]);
        assert_eq!(reader.read_varu32().unwrap(), 300);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn read_varint_failure_keeps_position() {
        let mut reader = ByteReader::new(&[0x80]);
        assert!(reader.read_varu32().is_err());
        assert_eq!(reader.position(), 0);
    }
}
