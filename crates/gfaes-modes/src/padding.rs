//! PKCS5-style byte-count padding.
//!
//! Every padded message gains at least one pad byte: input that is already
//! block aligned receives a full block of `0x10` bytes, so the last byte of a
//! padded buffer always names the pad length.

use gfaes_core::BLOCK_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A reversible padding strategy.
pub trait PaddingScheme {
    /// Extends `buffer` to the scheme's alignment.
    fn pad(&self, buffer: &[u8]) -> Vec<u8>;

    /// Strips what [`PaddingScheme::pad`] added.
    fn unpad(&self, buffer: &[u8]) -> Result<Vec<u8>>;
}

/// Padding strategies recognized by the cipher options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Padding {
    /// Byte-count padding, always at least one byte.
    #[default]
    Pkcs5,
    /// No padding; CBC input must already be block aligned.
    None,
}

impl PaddingScheme for Padding {
    fn pad(&self, buffer: &[u8]) -> Vec<u8> {
        match self {
            Padding::Pkcs5 => pad(buffer),
            Padding::None => buffer.to_vec(),
        }
    }

    fn unpad(&self, buffer: &[u8]) -> Result<Vec<u8>> {
        match self {
            Padding::Pkcs5 => unpad(buffer),
            Padding::None => Ok(buffer.to_vec()),
        }
    }
}

/// Appends `16 - len % 16` bytes, each holding the pad length.
pub fn pad(buffer: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - buffer.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(buffer.len() + pad_len);
    padded.extend_from_slice(buffer);
    padded.resize(buffer.len() + pad_len, pad_len as u8);
    padded
}

/// Truncates by the value of the last byte.
///
/// Only the range of the pad byte is checked; the remaining pad bytes are not
/// compared.
pub fn unpad(buffer: &[u8]) -> Result<Vec<u8>> {
    let pad = match buffer.last() {
        Some(pad) => *pad,
        None => return Err(Error::InvalidPadding { pad: 0 }),
    };
    let pad_len = usize::from(pad);
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > buffer.len() {
        return Err(Error::InvalidPadding { pad });
    }
    Ok(buffer[..buffer.len() - pad_len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pads_partial_block_with_pad_length() {
        let padded = pad(b"YELLOW SUBMARINE!");
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[17..], &[15u8; 15][..]);
    }

    #[test]
    fn aligned_input_gets_a_full_dummy_block() {
        let padded = pad(&[0xaa; 32]);
        assert_eq!(padded.len(), 48);
        assert_eq!(&padded[32..], &[16u8; 16][..]);
        assert_eq!(pad(&[]), vec![16u8; 16]);
    }

    #[test]
    fn unpad_strips_by_last_byte() {
        let mut buffer = b"hello".to_vec();
        buffer.extend_from_slice(&[11u8; 11]);
        assert_eq!(unpad(&buffer).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn unpad_rejects_impossible_pad_bytes() {
        assert!(matches!(unpad(&[]), Err(Error::InvalidPadding { pad: 0 })));
        assert!(matches!(unpad(&[1, 2, 0]), Err(Error::InvalidPadding { pad: 0 })));
        assert!(matches!(unpad(&[17u8; 32]), Err(Error::InvalidPadding { pad: 17 })));
        assert!(matches!(unpad(&[4, 4, 4]), Err(Error::InvalidPadding { pad: 4 })));
    }

    #[test]
    fn no_padding_is_identity() {
        let data = b"0123456789abcdef".to_vec();
        assert_eq!(Padding::None.pad(&data), data);
        assert_eq!(Padding::None.unpad(&data).unwrap(), data);
    }

    proptest! {
        #[test]
        fn unpad_inverts_pad(data in prop::collection::vec(any::<u8>(), 0..100)) {
            let padded = Padding::Pkcs5.pad(&data);
            prop_assert_eq!(padded.len() % BLOCK_SIZE, 0);
            prop_assert!(padded.len() > data.len());
            prop_assert_eq!(Padding::Pkcs5.unpad(&padded).unwrap(), data);
        }
    }
}
