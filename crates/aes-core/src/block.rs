//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes, laid out column-major as a 4x4 state.
pub type Block = [u8; BLOCK_SIZE];

/// Index of the state byte at `row`, `col`.
#[inline]
pub(crate) const fn state_index(row: usize, col: usize) -> usize {
    col * 4 + row
}

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_index_is_column_major() {
        assert_eq!(state_index(0, 0), 0);
        assert_eq!(state_index(1, 0), 1);
        assert_eq!(state_index(0, 1), 4);
        assert_eq!(state_index(3, 3), 15);
        for i in 0..BLOCK_SIZE {
            assert_eq!(state_index(i % 4, i / 4), i);
        }
    }

    #[test]
    fn xor_with_self_clears_block() {
        let mut block = *b"YELLOW SUBMARINE";
        let copy = block;
        xor_in_place(&mut block, &copy);
        assert_eq!(block, [0u8; BLOCK_SIZE]);
    }
}
