//! Cipher configuration: strength, mode of operation and padding.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::padding::Padding;

/// Key strength, which fixes the key length and the number of rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    /// 128-bit key, 10 rounds.
    #[default]
    Aes128,
    /// 192-bit key, 12 rounds. The schedule is reserved, not implemented.
    Aes192,
    /// 256-bit key, 14 rounds. The schedule is reserved, not implemented.
    Aes256,
}

impl Strength {
    /// Key size in bits.
    pub const fn bits(self) -> u16 {
        match self {
            Strength::Aes128 => 128,
            Strength::Aes192 => 192,
            Strength::Aes256 => 256,
        }
    }

    /// Key size in bytes.
    pub const fn key_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of cipher rounds.
    pub const fn iterations(self) -> usize {
        match self {
            Strength::Aes128 => 10,
            Strength::Aes192 => 12,
            Strength::Aes256 => 14,
        }
    }

    /// Fails with [`Error::InvalidKeyLength`] unless `key` is exactly [`Strength::key_len`] bytes.
    pub fn check_key(self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_len() {
            return Err(Error::InvalidKeyLength {
                expected: self.key_len(),
                actual: key.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<u16> for Strength {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            128 => Ok(Strength::Aes128),
            192 => Ok(Strength::Aes192),
            256 => Ok(Strength::Aes256),
            other => Err(Error::UnsupportedStrength(other)),
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// Block-chaining mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Cipher block chaining.
    #[default]
    Cbc,
    /// Counter mode.
    Ctr,
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    /// Numeric identifiers: 1 = CBC, 2 = CTR.
    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Mode::Cbc),
            2 => Ok(Mode::Ctr),
            other => Err(Error::UnsupportedMode(other.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cbc" => Ok(Mode::Cbc),
            "ctr" => Ok(Mode::Ctr),
            _ => Err(Error::UnsupportedMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Cbc => f.write_str("CBC"),
            Mode::Ctr => f.write_str("CTR"),
        }
    }
}

/// Options shared by [`crate::encrypt`] and [`crate::decrypt`].
///
/// CTR ignores `padding`; the keystream preserves message length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherOptions {
    /// Key strength.
    pub strength: Strength,
    /// Mode of operation.
    pub mode: Mode,
    /// Padding applied to CBC plaintext.
    pub padding: Padding,
}

impl CipherOptions {
    /// Options with the default padding.
    pub fn new(strength: Strength, mode: Mode) -> Self {
        Self {
            strength,
            mode,
            padding: Padding::default(),
        }
    }

    /// Replaces the padding strategy.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}
