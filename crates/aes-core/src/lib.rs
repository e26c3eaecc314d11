//! AES-128 in Electronic Codebook mode, implemented from FIPS-197.
//!
//! The crate provides:
//! - The AES-128 key schedule and single-block encryption and decryption.
//! - An ECB driver that decrypts whole buffers and strips PKCS#7 padding.
//! - Helpers for PKCS#7 padding and for spotting ECB output by its repeated blocks.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened. ECB carries no
//! integrity check, so a wrong key yields garbage plaintext rather than an error.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod ecb;
pub mod error;
mod key;
mod padding;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Aes128};
pub use crate::ecb::{
    count_repeated_blocks, decrypt_ecb, decrypt_ecb_with, encrypt_ecb, has_repeated_blocks,
    PaddingPolicy,
};
pub use crate::error::{Error, Result};
pub use crate::key::{Aes128Key, RoundKeys};
pub use crate::padding::{pkcs7_pad, pkcs7_unpad, pkcs7_unpad_strict};
