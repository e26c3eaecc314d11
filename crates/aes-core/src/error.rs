//! Error type shared by the cipher and the ECB driver.

use thiserror::Error;

/// Failures raised before or after block processing.
///
/// A wrong key is not an error: ECB has no integrity check, so decryption
/// under the wrong key simply produces wrong bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Ciphertext is empty or not a whole number of blocks.
    #[error("input length {len} is not a positive multiple of 16 bytes")]
    InvalidInputLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// Key material is not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Length of the rejected key.
        len: usize,
    },

    /// Trailing bytes do not form a PKCS#7 pad (strict policy only).
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
