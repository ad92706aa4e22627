//! Cipher Block Chaining.
//!
//! Each plaintext block is XORed with the previous ciphertext block (the IV for
//! the first block) before it is enciphered.

use gfaes_core::{decipher, encipher, Block, RoundKeys, StateArray, BLOCK_SIZE};

use crate::error::{Error, Result};
use crate::padding::PaddingScheme;

/// Pads `plaintext` and chains it through the forward round pipeline.
pub fn encrypt<P: PaddingScheme>(
    plaintext: &[u8],
    round_keys: &RoundKeys,
    iv: &Block,
    padding: &P,
) -> Result<Vec<u8>> {
    let padded = padding.pad(plaintext);
    if padded.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidBlockCount { len: padded.len() });
    }

    let mut ciphertext = Vec::with_capacity(padded.len());
    let mut previous = StateArray::from_bytes(iv)?;

    for chunk in padded.chunks_exact(BLOCK_SIZE) {
        let mut state = StateArray::from_bytes(chunk)?;
        state.xor(&previous)?;
        encipher(&mut state, round_keys)?;
        ciphertext.extend_from_slice(&state.to_buffer());
        previous = state;
    }

    Ok(ciphertext)
}

/// Deciphers `ciphertext` block by block, unchains it and strips the padding.
pub fn decrypt<P: PaddingScheme>(
    ciphertext: &[u8],
    round_keys: &RoundKeys,
    iv: &Block,
    padding: &P,
) -> Result<Vec<u8>> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidBlockCount {
            len: ciphertext.len(),
        });
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut previous = StateArray::from_bytes(iv)?;

    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        let mut state = StateArray::from_bytes(chunk)?;
        // the untouched ciphertext block chains into the next iteration
        let current = state.deep_copy();
        decipher(&mut state, round_keys)?;
        state.xor(&previous)?;
        plaintext.extend_from_slice(&state.to_buffer());
        previous = current;
    }

    padding.unpad(&plaintext)
}
