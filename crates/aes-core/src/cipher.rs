//! AES-128 key schedule and block encryption/decryption.

use crate::block::Block;
use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const ROUNDS: usize = ROUND_KEY_COUNT - 1;
const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

type Word = [u8; 4];

fn rot_word([a, b, c, d]: Word) -> Word {
    [b, c, d, a]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

fn xor_word(lhs: Word, rhs: Word) -> Word {
    [lhs[0] ^ rhs[0], lhs[1] ^ rhs[1], lhs[2] ^ rhs[2], lhs[3] ^ rhs[3]]
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut words = [[0u8; 4]; 4 * ROUND_KEY_COUNT];
    for (word, chunk) in words.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..words.len() {
        let mut temp = words[i - 1];
        if i % 4 == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / 4 - 1];
        }
        words[i] = xor_word(words[i - 4], temp);
    }

    let mut round_keys = [[0u8; 16]; ROUND_KEY_COUNT];
    for (round_key, group) in round_keys.iter_mut().zip(words.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(group) {
            dst.copy_from_slice(word);
        }
    }
    log::trace!("expanded AES-128 key into {ROUND_KEY_COUNT} round keys");

    RoundKeys(round_keys)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));
    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.last());

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.last());
    for round in (1..ROUNDS).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

/// AES-128 context holding the expanded schedule for one key.
///
/// The schedule is derived once in [`Aes128::new`] and only read afterwards,
/// so a shared reference can be used from several threads at once.
#[derive(Clone, Debug)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Aes128 {
    /// Expands `key` and keeps the schedule for later block operations.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// The expanded schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::{generic_array::GenericArray, BlockDecrypt, KeyInit};
    use hex_literal::hex;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
    const NIST_PLAIN: [u8; 16] = hex!("00112233445566778899aabbccddeeff");
    const NIST_CIPHER: [u8; 16] = hex!("69c4e0d86a7b0430d8cdb78070b4c55a");

    #[test]
    fn key_schedule_matches_fips_appendix_a() {
        let key = Aes128Key::from(hex!("2b7e151628aed2a6abf7158809cf4f3c"));
        let round_keys = expand_key(&key);
        assert_eq!(round_keys.get(0), &key.0);
        assert_eq!(round_keys.get(1), &hex!("a0fafe1788542cb123a339392a6c7605"));
        assert_eq!(round_keys.last(), &hex!("d014f9a8c9ee2589e13f0cc8b6630ca6"));
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        assert_eq!(decrypt_block(&NIST_CIPHER, &round_keys), NIST_PLAIN);
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        assert_eq!(encrypt_block(&NIST_PLAIN, &round_keys), NIST_CIPHER);
    }

    #[test]
    fn context_matches_free_functions() {
        let key = Aes128Key::from(*b"YELLOW SUBMARINE");
        let cipher = Aes128::new(&key);
        assert_eq!(cipher.round_keys(), &expand_key(&key));
        let ct = cipher.encrypt_block(b"sixteen byte msg");
        assert_eq!(&cipher.decrypt_block(&ct), b"sixteen byte msg");
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let rks = expand_key(&Aes128Key::from(key_bytes));
            let ct = encrypt_block(&block, &rks);
            assert_eq!(decrypt_block(&ct, &rks), block);
        }
    }

    #[test]
    fn decrypt_agrees_with_rustcrypto() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);

            let reference = aes::Aes128::new(GenericArray::from_slice(&key_bytes));
            let mut expected = GenericArray::clone_from_slice(&block);
            reference.decrypt_block(&mut expected);

            let rks = expand_key(&Aes128Key::from(key_bytes));
            assert_eq!(decrypt_block(&block, &rks)[..], expected[..]);
        }
    }
}
