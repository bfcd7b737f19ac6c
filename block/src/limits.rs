//! Configurable limits for bounded decoding.

/// Limits enforced while decoding a block.
///
/// The declared uncompressed length is attacker-controlled and decides the
/// size of the output allocation, so it is checked against these limits
/// before any memory is reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum declared uncompressed length in bytes.
    pub max_uncompressed_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // 1 GiB
            max_uncompressed_len: 1 << 30,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_uncompressed_len: 64 * 1024,
        }
    }

    /// Creates limits bounded only by the format itself.
    ///
    /// A Snappy length prefix can never declare more than `u32::MAX` bytes.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_uncompressed_len: u32::MAX as usize,
        }
    }

    /// Returns a copy with `max_uncompressed_len` replaced.
    #[must_use]
    pub const fn with_max_uncompressed_len(mut self, max_uncompressed_len: usize) -> Self {
        self.max_uncompressed_len = max_uncompressed_len;
        self
    }
}
