//! AES round transformations on the column-major 4x4 state.

use crate::block::{state_index, xor_in_place, Block};
use crate::sbox::{inv_sbox, sbox};

/// MixColumns matrix over GF(2^8).
const MIX_MATRIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Inverse of [`MIX_MATRIX`].
const INV_MIX_MATRIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[state_index(row, col)] = src[state_index(row, (col + row) % 4)];
        }
    }
}

/// Rotates row `r` right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let src = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[state_index(row, col)] = src[state_index(row, (col + 4 - row) % 4)];
        }
    }
}

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
pub(crate) fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let hi_bit_set = a & 0x80;
        a <<= 1;
        if hi_bit_set != 0 {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    product
}

fn mix_with(state: &mut Block, matrix: &[[u8; 4]; 4]) {
    for col in 0..4 {
        let base = state_index(0, col);
        let column = [state[base], state[base + 1], state[base + 2], state[base + 3]];
        for (row, coeffs) in matrix.iter().enumerate() {
            state[base + row] = coeffs
                .iter()
                .zip(column.iter())
                .fold(0u8, |acc, (&c, &b)| acc ^ gmul(b, c));
        }
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX_MATRIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX_MATRIX);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn counting_block() -> Block {
        let mut block = [0u8; 16];
        for (i, b) in block.iter_mut().enumerate() {
            *b = i as u8;
        }
        block
    }

    #[test]
    fn gmul_matches_fips_examples() {
        assert_eq!(gmul(0x57, 0x83), 0xc1);
        assert_eq!(gmul(0x57, 0x13), 0xfe);
        assert_eq!(gmul(0x57, 0x01), 0x57);
        assert_eq!(gmul(0x00, 0x0e), 0x00);
    }

    #[test]
    fn inv_shift_rows_moves_rows_right() {
        let mut state = counting_block();
        inv_shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3]
        );
    }

    #[test]
    fn shift_rows_round_trip() {
        let mut state = counting_block();
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, counting_block());
    }

    #[test]
    fn mix_columns_known_column() {
        // Column db 13 53 45 maps to 8e 4d a1 bc.
        let mut state = hex!("db135345 f20a225c 01010101 c6c6c6c6");
        mix_columns(&mut state);
        assert_eq!(state, hex!("8e4da1bc 9fdc589d 01010101 c6c6c6c6"));
        inv_mix_columns(&mut state);
        assert_eq!(state, hex!("db135345 f20a225c 01010101 c6c6c6c6"));
    }

    #[test]
    fn inv_sub_bytes_undoes_sub_bytes() {
        let mut state = counting_block();
        sub_bytes(&mut state);
        assert_eq!(state[0], 0x63);
        inv_sub_bytes(&mut state);
        assert_eq!(state, counting_block());
    }
}
