//! Error taxonomy for the mode layer.

/// Failures surfaced by the cipher entry points.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Key length does not match the selected strength.
    #[error("key is {actual} bytes, expected {expected} bytes for the selected strength")]
    InvalidKeyLength {
        /// Bytes required by the strength.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Mode identifier outside the recognized set.
    #[error("unsupported mode of operation \"{0}\", expected CBC or CTR")]
    UnsupportedMode(String),

    /// Strength value unknown, or known but without a specified key schedule.
    #[error("unsupported strength {0}: only 128-bit keys can be expanded")]
    UnsupportedStrength(u16),

    /// Input is missing its IV or is not a whole number of blocks.
    #[error("input of {len} bytes is not a valid sequence of 16-byte blocks")]
    InvalidBlockCount {
        /// Length of the offending input.
        len: usize,
    },

    /// Trailing pad byte could not have been produced by the padding scheme.
    #[error("invalid padding byte {pad:#04x}")]
    InvalidPadding {
        /// The byte that was read as the pad length.
        pad: u8,
    },

    /// Envelope was written by an incompatible version.
    #[error("envelope version {found} is not supported")]
    EnvelopeVersion {
        /// Version tag found in the envelope.
        found: u32,
    },

    /// Envelope (de)serialization failed.
    #[error("envelope encoding: {0}")]
    Envelope(#[from] bincode::Error),

    /// Failure inside the block cipher engine.
    #[error(transparent)]
    Core(#[from] gfaes_core::Error),
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
