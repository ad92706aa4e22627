//! Self-describing ciphertext container.

use gfaes_core::Block;
use serde::{Deserialize, Serialize};

use crate::cipher::Cipher;
use crate::error::{Error, Result};
use crate::options::CipherOptions;

/// Ciphertext bundled with the options needed to open it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Format version tag.
    pub version: u32,
    /// Strength, mode and padding used for `payload`.
    pub options: CipherOptions,
    /// `IV || ciphertext`.
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Current format version.
    pub const VERSION: u32 = 1;

    /// Encrypts `plaintext` and records the options alongside the ciphertext.
    pub fn seal(plaintext: &[u8], key: &[u8], iv: &Block, options: CipherOptions) -> Result<Self> {
        let payload = Cipher::new(key, options)?.encrypt(plaintext, iv)?;
        Ok(Self {
            version: Self::VERSION,
            options,
            payload,
        })
    }

    /// Decrypts the payload with the recorded options.
    pub fn open(&self, key: &[u8]) -> Result<Vec<u8>> {
        Cipher::new(key, self.options)?.decrypt(&self.payload)
    }

    /// Serializes the envelope with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes an envelope with `bincode`, rejecting unknown versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: Self = bincode::deserialize(bytes)?;
        if envelope.version != Self::VERSION {
            return Err(Error::EnvelopeVersion {
                found: envelope.version,
            });
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Mode, Strength};

    #[test]
    fn sealed_envelope_opens_after_serialization() {
        let key = [0x11u8; 16];
        let iv = [0x22u8; 16];
        let options = CipherOptions::new(Strength::Aes128, Mode::Ctr);
        let envelope = Envelope::seal(b"attack at dawn", &key, &iv, options).expect("seal");
        let bytes = envelope.to_bytes().expect("serialize");
        let decoded = Envelope::from_bytes(&bytes).expect("deserialize");
        assert_eq!(decoded.options.mode, Mode::Ctr);
        assert_eq!(&decoded.payload[..16], &iv[..]);
        assert_eq!(decoded.open(&key).expect("open"), b"attack at dawn".to_vec());
    }

    #[test]
    fn unknown_versions_are_rejected() {
        let mut envelope =
            Envelope::seal(b"x", &[0u8; 16], &[0u8; 16], CipherOptions::default()).unwrap();
        envelope.version = 7;
        let bytes = envelope.to_bytes().unwrap();
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(Error::EnvelopeVersion { found: 7 })
        ));
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(
            Envelope::from_bytes(&[0xff, 0x01]),
            Err(Error::Envelope(_))
        ));
    }
}
