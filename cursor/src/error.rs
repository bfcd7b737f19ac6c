//! Error types for cursor operations.

use std::fmt;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading from a byte cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Attempted to read past the end of the input.
    UnexpectedEof {
        /// Cursor position at which the read started.
        position: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available from `position`.
        available: usize,
    },

    /// A varint did not terminate within five bytes, or its value does not
    /// fit in 32 bits.
    VarintOverflow {
        /// Cursor position of the first varint byte.
        position: usize,
    },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                position,
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes at offset {position} but only {available} bytes available"
                )
            }
            Self::VarintOverflow { position } => {
                write!(f, "varint at offset {position} overflows 32 bits")
            }
        }
    }
}

impl std::error::Error for CursorError {}
