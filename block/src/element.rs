//! Element parsing and validation.
//!
//! A block body is a sequence of elements, each introduced by a tag byte
//! whose low two bits select the kind:
//!
//! | bits | kind    | length                        | offset                         |
//! |------|---------|-------------------------------|--------------------------------|
//! | `00` | literal | `(tag >> 2) + 1`, or 1–4 extra LE bytes + 1 when above 60 | —  |
//! | `01` | copy-1  | `((tag >> 2) & 7) + 4`        | `(tag >> 5) << 8 \| next byte` |
//! | `10` | copy-2  | `(tag >> 2) + 1`              | 2 LE bytes                     |
//! | `11` | copy-4  | `(tag >> 2) + 1`              | 4 LE bytes                     |
//!
//! [`Elements`] walks a block and performs every check the decoder relies
//! on, without writing any output.

use cursor::{ByteReader, CursorResult};

use crate::error::{DecodeError, DecodeResult, Field, OverflowError};
use crate::header::{read_header, Header};
use crate::limits::Limits;

/// Longest literal length that fits directly in the tag.
const MAX_INLINE_LITERAL_LEN: usize = 60;

/// Element kind selected by the low two bits of a tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementKind {
    Literal = 0,
    Copy1 = 1,
    Copy2 = 2,
    Copy4 = 3,
}

impl ElementKind {
    /// Parses the element kind from a tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag & 0b11 {
            0 => Self::Literal,
            1 => Self::Copy1,
            2 => Self::Copy2,
            _ => Self::Copy4,
        }
    }

    /// Returns `true` for the three copy kinds.
    #[must_use]
    pub const fn is_copy(self) -> bool {
        !matches!(self, Self::Literal)
    }
}

/// A decoded element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    /// Bytes copied verbatim from the input.
    Literal(&'a [u8]),
    /// Repeat `length` bytes starting `offset` bytes back in the output.
    Copy { length: usize, offset: usize },
}

impl Element<'_> {
    /// Number of output bytes this element produces.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Literal(bytes) => bytes.len(),
            Self::Copy { length, .. } => *length,
        }
    }
}

/// A validated element together with where it sits in the input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan<'a> {
    pub kind: ElementKind,
    pub element: Element<'a>,
    /// Input position of the tag byte.
    pub input_pos: usize,
    /// Input bytes consumed, tag included.
    pub input_len: usize,
    /// Output position the element writes to.
    pub output_pos: usize,
}

/// Validating iterator over the elements of a block.
///
/// Yields one [`ElementSpan`] per element until the declared length is
/// reached or the input is exhausted. After the first error the iterator is
/// fused and [`Elements::finish`] reports that error again.
#[derive(Debug, Clone)]
pub struct Elements<'a> {
    reader: ByteReader<'a>,
    header: Header,
    out_pos: usize,
    failed: Option<DecodeError>,
}

impl<'a> Elements<'a> {
    /// Reads the block header and positions the iterator at the first element.
    pub fn new(input: &'a [u8], limits: &Limits) -> DecodeResult<Self> {
        let header = read_header(input, limits)?;
        Ok(Self::with_header(input, header))
    }

    /// Creates an iterator for a header that was already read from `input`.
    pub(crate) fn with_header(input: &'a [u8], header: Header) -> Self {
        let mut reader = ByteReader::new(input);
        // The header was parsed from this input, so skipping it cannot fail.
        let _ = reader.read_bytes(header.header_len);
        Self {
            reader,
            header,
            out_pos: 0,
            failed: None,
        }
    }

    /// Returns the parsed block header.
    #[must_use]
    pub const fn header(&self) -> Header {
        self.header
    }

    /// Returns the declared uncompressed length.
    #[must_use]
    pub const fn uncompressed_len(&self) -> usize {
        self.header.uncompressed_len
    }

    /// Returns the number of output bytes accounted for so far.
    #[must_use]
    pub const fn output_position(&self) -> usize {
        self.out_pos
    }

    /// Returns the current input position.
    #[must_use]
    pub const fn input_position(&self) -> usize {
        self.reader.position()
    }

    /// Drains any remaining elements and checks that exactly the declared
    /// length was produced.
    ///
    /// Returns the uncompressed length on success.
    pub fn finish(mut self) -> DecodeResult<usize> {
        for span in self.by_ref() {
            span?;
        }
        if let Some(err) = self.failed {
            return Err(err);
        }
        if self.out_pos != self.header.uncompressed_len {
            return Err(DecodeError::SizeMismatch {
                expected: self.header.uncompressed_len,
                actual: self.out_pos,
            });
        }
        Ok(self.out_pos)
    }

    fn next_element(&mut self) -> DecodeResult<ElementSpan<'a>> {
        let input_pos = self.reader.position();
        let tag = read(self.reader.read_u8(), Field::Tag)?;
        let kind = ElementKind::from_tag(tag);

        let element = match kind {
            ElementKind::Literal => {
                let length = self.literal_len(tag)?;
                let bytes = read(self.reader.read_bytes(length), Field::Literal)?;
                Element::Literal(bytes)
            }
            ElementKind::Copy1 => {
                let length = usize::from((tag >> 2) & 0b111) + 4;
                let low = read(self.reader.read_u8(), Field::CopyOffset)?;
                let offset = (usize::from(tag >> 5) << 8) | usize::from(low);
                Element::Copy { length, offset }
            }
            ElementKind::Copy2 => {
                let length = usize::from(tag >> 2) + 1;
                let offset = read(self.reader.read_u16_le(), Field::CopyOffset)?;
                Element::Copy {
                    length,
                    offset: usize::from(offset),
                }
            }
            ElementKind::Copy4 => {
                let length = usize::from(tag >> 2) + 1;
                let offset = read(self.reader.read_u32_le(), Field::CopyOffset)?;
                Element::Copy {
                    length,
                    offset: to_usize(offset),
                }
            }
        };

        if let Element::Copy { offset, .. } = element {
            if offset == 0 || offset > self.out_pos {
                return Err(DecodeError::InvalidOffset {
                    position: input_pos,
                    offset,
                    out_position: self.out_pos,
                });
            }
        }

        let length = element.output_len();
        if length > self.header.uncompressed_len - self.out_pos {
            return Err(DecodeError::Overflow(OverflowError::Output {
                position: input_pos,
                out_position: self.out_pos,
                length,
                declared: self.header.uncompressed_len,
            }));
        }

        let output_pos = self.out_pos;
        self.out_pos += length;
        Ok(ElementSpan {
            kind,
            element,
            input_pos,
            input_len: self.reader.position() - input_pos,
            output_pos,
        })
    }

    fn literal_len(&mut self, tag: u8) -> DecodeResult<usize> {
        let inline = usize::from(tag >> 2) + 1;
        if inline <= MAX_INLINE_LITERAL_LEN {
            return Ok(inline);
        }
        let width = inline - MAX_INLINE_LITERAL_LEN;
        let bytes = read(self.reader.read_bytes(width), Field::LiteralLength)?;
        let raw = bytes
            .iter()
            .rev()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));
        Ok(to_usize(raw).saturating_add(1))
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = DecodeResult<ElementSpan<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed.is_some()
            || self.reader.is_empty()
            || self.out_pos >= self.header.uncompressed_len
        {
            return None;
        }
        let result = self.next_element();
        if let Err(err) = &result {
            self.failed = Some(err.clone());
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Elements<'_> {}

fn read<T>(result: CursorResult<T>, field: Field) -> DecodeResult<T> {
    result.map_err(|err| DecodeError::from_cursor(err, field))
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
