//! Key types for AES-128.

use crate::block::Block;
use crate::error::Error;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 16] = value
            .try_into()
            .map_err(|_| Error::InvalidKeyLength { len: value.len() })?;
        Ok(Self(bytes))
    }
}

/// Number of round keys in an AES-128 schedule.
pub const ROUND_KEY_COUNT: usize = 11;

/// Expanded round keys for AES-128. Round 0 is the original key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Returns the final round key, the first one applied when decrypting.
    #[inline]
    pub fn last(&self) -> &Block {
        &self.0[ROUND_KEY_COUNT - 1]
    }
}
