//! PKCS#7 padding.

use crate::error::{Error, Result};

/// Appends PKCS#7 padding so the result is a multiple of `block_size`.
///
/// Input that is already aligned gains a full block of padding.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=255).contains(&block_size),
        "PKCS#7 block size must be in 1..=255"
    );
    let pad = block_size - data.len() % block_size;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Length of the valid PKCS#7 pad at the end of `data`, if there is one.
fn pad_len(data: &[u8], block_size: usize) -> Option<usize> {
    let &last = data.last()?;
    let pad = usize::from(last);
    if pad == 0 || pad > block_size || pad > data.len() {
        return None;
    }
    data[data.len() - pad..]
        .iter()
        .all(|&b| b == last)
        .then_some(pad)
}

/// Strips a trailing PKCS#7 pad if one is present.
///
/// Data without a valid pad is returned unchanged.
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> &[u8] {
    match pad_len(data, block_size) {
        Some(pad) => &data[..data.len() - pad],
        None => data,
    }
}

/// Strips a trailing PKCS#7 pad, failing with [`Error::InvalidPadding`] if
/// the final bytes are not a valid pad.
pub fn pkcs7_unpad_strict(data: &[u8], block_size: usize) -> Result<&[u8]> {
    let pad = pad_len(data, block_size).ok_or(Error::InvalidPadding)?;
    Ok(&data[..data.len() - pad])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_submarine_to_twenty() {
        assert_eq!(
            pkcs7_pad(b"YELLOW SUBMARINE", 20),
            b"YELLOW SUBMARINE\x04\x04\x04\x04"
        );
    }

    #[test]
    fn aligned_input_gains_full_block() {
        let padded = pkcs7_pad(b"YELLOW SUBMARINE", 16);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
        assert_eq!(pkcs7_pad(b"", 16), vec![16u8; 16]);
    }

    #[test]
    fn strips_exactly_the_pad() {
        let data = b"ICE ICE BABY\x04\x04\x04\x04";
        assert_eq!(pkcs7_unpad(data, 16), b"ICE ICE BABY");
        assert_eq!(pkcs7_unpad_strict(data, 16), Ok(&b"ICE ICE BABY"[..]));
    }

    #[test]
    fn lenient_leaves_bad_padding_alone() {
        let mixed = b"ICE ICE BABY\x01\x02\x03\x04";
        assert_eq!(pkcs7_unpad(mixed, 16), &mixed[..]);
        let short = b"ICE ICE BABY\x05\x05\x05\x05";
        assert_eq!(pkcs7_unpad(short, 16), &short[..]);
        let zero = b"ICE ICE BABY\x00\x00\x00\x00";
        assert_eq!(pkcs7_unpad(zero, 16), &zero[..]);
        assert_eq!(pkcs7_unpad(b"", 16), b"");
    }

    #[test]
    fn strict_rejects_bad_padding() {
        assert_eq!(
            pkcs7_unpad_strict(b"ICE ICE BABY\x01\x02\x03\x04", 16),
            Err(Error::InvalidPadding)
        );
        assert_eq!(
            pkcs7_unpad_strict(b"ICE ICE BABY\x05\x05\x05\x05", 16),
            Err(Error::InvalidPadding)
        );
        let mut too_long = vec![0x41u8; 15];
        too_long.push(17);
        assert_eq!(pkcs7_unpad_strict(&too_long, 16), Err(Error::InvalidPadding));
        assert_eq!(pkcs7_unpad_strict(b"", 16), Err(Error::InvalidPadding));
    }

    #[test]
    fn full_block_of_padding_strips_to_empty() {
        assert_eq!(pkcs7_unpad_strict(&[16u8; 16], 16), Ok(&[][..]));
    }
}
