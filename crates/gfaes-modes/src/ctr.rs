//! Counter mode.
//!
//! The IV is the initial counter block. Each block of keystream is the forward
//! encipherment of the current counter, which then advances as a 128-bit
//! big-endian integer. Encryption and decryption are the same operation.

use gfaes_core::{encipher, Block, RoundKeys, StateArray, BLOCK_SIZE};

use crate::error::Result;

/// XORs `data` with the keystream generated from `iv`.
pub fn apply_keystream(data: &[u8], round_keys: &RoundKeys, iv: &Block) -> Result<Vec<u8>> {
    let pad_len = (BLOCK_SIZE - data.len() % BLOCK_SIZE) % BLOCK_SIZE;
    let mut buffer = Vec::with_capacity(data.len() + pad_len);
    buffer.extend_from_slice(data);
    buffer.resize(data.len() + pad_len, 0);

    let mut counter = *iv;
    let mut output = Vec::with_capacity(buffer.len());

    for chunk in buffer.chunks_exact(BLOCK_SIZE) {
        let mut keystream = StateArray::from_bytes(&counter)?;
        encipher(&mut keystream, round_keys)?;

        let mut state = StateArray::from_bytes(chunk)?;
        state.xor(&keystream)?;
        output.extend_from_slice(&state.to_buffer());

        increment_counter(&mut counter);
    }

    output.truncate(data.len());
    Ok(output)
}

/// Encrypts `plaintext`; identical to [`decrypt`].
#[inline]
pub fn encrypt(plaintext: &[u8], round_keys: &RoundKeys, iv: &Block) -> Result<Vec<u8>> {
    apply_keystream(plaintext, round_keys, iv)
}

/// Decrypts `ciphertext`; identical to [`encrypt`].
#[inline]
pub fn decrypt(ciphertext: &[u8], round_keys: &RoundKeys, iv: &Block) -> Result<Vec<u8>> {
    apply_keystream(ciphertext, round_keys, iv)
}

/// Adds one to `counter` as a big-endian integer, wrapping to zero past the top byte.
pub fn increment_counter(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            return;
        }
    }
}
