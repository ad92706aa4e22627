//! Mode-parameterized entry points.
//!
//! Ciphertext layout is `IV || blocks`: the first 16 bytes carry the IV (the
//! initial counter for CTR), the rest is the mode output.

use gfaes_core::{expand_key, Block, RoundKeys, BLOCK_SIZE};

use crate::cbc;
use crate::ctr;
use crate::error::{Error, Result};
use crate::options::{CipherOptions, Mode, Strength};

/// Validates `key` against `strength` and expands it.
///
/// Only the 128-bit schedule is specified; 192- and 256-bit keys of the correct
/// length fail with [`Error::UnsupportedStrength`].
pub fn schedule(key: &[u8], strength: Strength) -> Result<RoundKeys> {
    strength.check_key(key)?;
    match strength {
        Strength::Aes128 => Ok(expand_key(key, strength.iterations())?),
        other => Err(Error::UnsupportedStrength(other.bits())),
    }
}

/// A key expanded once and reused across messages.
#[derive(Clone, Debug)]
pub struct Cipher {
    round_keys: RoundKeys,
    options: CipherOptions,
}

impl Cipher {
    /// Expands `key` according to `options`.
    pub fn new(key: &[u8], options: CipherOptions) -> Result<Self> {
        let round_keys = schedule(key, options.strength)?;
        Ok(Self {
            round_keys,
            options,
        })
    }

    /// The options this cipher was built with.
    pub fn options(&self) -> &CipherOptions {
        &self.options
    }

    /// Encrypts `plaintext` under `iv` and returns `IV || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8], iv: &Block) -> Result<Vec<u8>> {
        let body = match self.options.mode {
            Mode::Cbc => cbc::encrypt(plaintext, &self.round_keys, iv, &self.options.padding)?,
            Mode::Ctr => ctr::encrypt(plaintext, &self.round_keys, iv)?,
        };
        let mut output = Vec::with_capacity(BLOCK_SIZE + body.len());
        output.extend_from_slice(iv);
        output.extend_from_slice(&body);
        Ok(output)
    }

    /// Splits the IV off `data` and recovers the plaintext.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < BLOCK_SIZE {
            return Err(Error::InvalidBlockCount { len: data.len() });
        }
        let mut iv = [0u8; BLOCK_SIZE];
        iv.copy_from_slice(&data[..BLOCK_SIZE]);
        let body = &data[BLOCK_SIZE..];

        match self.options.mode {
            Mode::Cbc => cbc::decrypt(body, &self.round_keys, &iv, &self.options.padding),
            Mode::Ctr => ctr::decrypt(body, &self.round_keys, &iv),
        }
    }
}

/// Encrypts `plaintext` and prepends `iv`.
pub fn encrypt(plaintext: &[u8], key: &[u8], iv: &Block, options: &CipherOptions) -> Result<Vec<u8>> {
    Cipher::new(key, *options)?.encrypt(plaintext, iv)
}

/// Decrypts `IV || ciphertext`.
pub fn decrypt(ciphertext: &[u8], key: &[u8], options: &CipherOptions) -> Result<Vec<u8>> {
    Cipher::new(key, *options)?.decrypt(ciphertext)
}
