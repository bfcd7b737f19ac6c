//! Error types for block decoding.

use std::fmt;

use cursor::CursorError;

/// Result type for block decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a Snappy block.
///
/// Every variant carries the cursor positions and lengths that were being
/// checked, so a malformed input can be diagnosed from the error alone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Input ended before a required field was fully available.
    Truncated {
        field: Field,
        /// Input position where the read started.
        position: usize,
        needed: usize,
        available: usize,
    },

    /// A varint or an element exceeded its value space.
    Overflow(OverflowError),

    /// A copy referenced offset 0 or bytes before the start of the output.
    InvalidOffset {
        /// Input position of the copy's tag byte.
        position: usize,
        offset: usize,
        out_position: usize,
    },

    /// Decoding stopped without producing exactly the declared length.
    SizeMismatch { expected: usize, actual: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Caller-provided output buffer is shorter than the declared length.
    OutputTooSmall { needed: usize, available: usize },
}

/// The part of the stream a truncated read was trying to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LengthVarint,
    Tag,
    LiteralLength,
    Literal,
    CopyOffset,
}

/// Details for overflow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowError {
    /// The length prefix did not fit in 32 bits.
    Varint { position: usize },

    /// An element would write past the declared uncompressed length.
    Output {
        /// Input position of the element's tag byte.
        position: usize,
        out_position: usize,
        length: usize,
        declared: usize,
    },
}

/// Specific limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    UncompressedLength,
}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Truncated,
    Overflow,
    InvalidOffset,
    SizeMismatch,
    LimitsExceeded,
    OutputTooSmall,
}

impl DecodeError {
    /// Returns the class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::InvalidOffset { .. } => ErrorKind::InvalidOffset,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::LimitsExceeded { .. } => ErrorKind::LimitsExceeded,
            Self::OutputTooSmall { .. } => ErrorKind::OutputTooSmall,
        }
    }

    /// Converts a cursor error raised while reading `field`.
    pub(crate) const fn from_cursor(err: CursorError, field: Field) -> Self {
        match err {
            CursorError::UnexpectedEof {
                position,
                requested,
                available,
            } => Self::Truncated {
                field,
                position,
                needed: requested,
                available,
            },
            CursorError::VarintOverflow { position } => {
                Self::Overflow(OverflowError::Varint { position })
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                field,
                position,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated {field} at offset {position}: need {needed} bytes, have {available}"
                )
            }
            Self::Overflow(err) => write!(f, "overflow: {err}"),
            Self::InvalidOffset {
                position,
                offset,
                out_position,
            } => {
                write!(
                    f,
                    "invalid copy offset {offset} at offset {position} with {out_position} bytes of output"
                )
            }
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "size mismatch: expected {expected} bytes, decoded {actual}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::OutputTooSmall { needed, available } => {
                write!(f, "output too small: need {needed}, have {available}")
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LengthVarint => "length varint",
            Self::Tag => "tag",
            Self::LiteralLength => "literal length",
            Self::Literal => "literal",
            Self::CopyOffset => "copy offset",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varint { position } => {
                write!(f, "length varint at offset {position} exceeds 32 bits")
            }
            Self::Output {
                position,
                out_position,
                length,
                declared,
            } => {
                write!(
                    f,
                    "element at offset {position} writes {length} bytes at output {out_position}, past declared length {declared}"
                )
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UncompressedLength => "uncompressed length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for OverflowError {}
