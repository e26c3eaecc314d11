//! Electronic Codebook mode over the AES-128 block cipher.
//!
//! Every block is processed independently with the same schedule, so equal
//! ciphertext blocks always decrypt to equal plaintext blocks.

use std::collections::HashSet;

use crate::block::{Block, BLOCK_SIZE};
use crate::cipher::Aes128;
use crate::error::{Error, Result};
use crate::key::Aes128Key;
use crate::padding::{pkcs7_pad, pkcs7_unpad, pkcs7_unpad_strict};

/// What to do when the decrypted buffer does not end in a valid PKCS#7 pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingPolicy {
    /// Return the buffer unchanged.
    #[default]
    Lenient,
    /// Fail with [`Error::InvalidPadding`].
    Strict,
}

fn check_input_len(len: usize) -> Result<()> {
    if len == 0 || len % BLOCK_SIZE != 0 {
        return Err(Error::InvalidInputLength { len });
    }
    Ok(())
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

/// Decrypts an AES-128-ECB ciphertext and strips a trailing PKCS#7 pad.
///
/// The ciphertext must be a positive multiple of 16 bytes and the key exactly
/// 16 bytes. Invalid padding is tolerated; see [`decrypt_ecb_with`] for the
/// strict variant.
pub fn decrypt_ecb(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    decrypt_ecb_with(ciphertext, key, PaddingPolicy::Lenient)
}

/// Decrypts an AES-128-ECB ciphertext, handling the pad per `policy`.
pub fn decrypt_ecb_with(ciphertext: &[u8], key: &[u8], policy: PaddingPolicy) -> Result<Vec<u8>> {
    check_input_len(ciphertext.len())?;
    let key = Aes128Key::try_from(key)?;
    let cipher = Aes128::new(&key);

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        plaintext.extend_from_slice(&cipher.decrypt_block(&to_block(chunk)));
    }
    log::debug!("decrypted {} ECB blocks", ciphertext.len() / BLOCK_SIZE);

    let unpadded_len = match policy {
        PaddingPolicy::Lenient => {
            let len = pkcs7_unpad(&plaintext, BLOCK_SIZE).len();
            if len == plaintext.len() {
                log::debug!("no valid PKCS#7 pad found; returning buffer unchanged");
            }
            len
        }
        PaddingPolicy::Strict => pkcs7_unpad_strict(&plaintext, BLOCK_SIZE)?.len(),
    };
    plaintext.truncate(unpadded_len);

    Ok(plaintext)
}

/// PKCS#7-pads `plaintext` and encrypts it in ECB mode.
pub fn encrypt_ecb(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let key = Aes128Key::try_from(key)?;
    let cipher = Aes128::new(&key);

    let mut data = pkcs7_pad(plaintext, BLOCK_SIZE);
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let ct = cipher.encrypt_block(&to_block(chunk));
        chunk.copy_from_slice(&ct);
    }
    log::debug!("encrypted {} ECB blocks", data.len() / BLOCK_SIZE);

    Ok(data)
}

/// Number of aligned `block_size` chunks that repeat an earlier chunk.
///
/// A trailing partial chunk is ignored.
pub fn count_repeated_blocks(data: &[u8], block_size: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    let mut seen = HashSet::new();
    data.chunks_exact(block_size)
        .filter(|chunk| !seen.insert(*chunk))
        .count()
}

/// Whether any two aligned blocks of `data` are identical, the signature of
/// ECB output over structured plaintext.
pub fn has_repeated_blocks(data: &[u8], block_size: usize) -> bool {
    count_repeated_blocks(data, block_size) > 0
}
