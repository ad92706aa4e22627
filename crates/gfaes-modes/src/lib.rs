//! CBC and CTR modes of operation over the `gfaes-core` block cipher.
//!
//! Provides:
//! - PKCS5-style padding that always appends at least one byte.
//! - CBC and CTR over a caller-supplied IV.
//! - `encrypt`/`decrypt` entry points using the `IV || ciphertext` layout.
//! - A `bincode` envelope that records the options next to the ciphertext.
//!
//! Nothing here is constant-time; this is a study implementation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
mod cipher;
pub mod ctr;
mod envelope;
mod error;
mod options;
pub mod padding;

pub use crate::cipher::{decrypt, encrypt, schedule, Cipher};
pub use crate::envelope::Envelope;
pub use crate::error::{Error, Result};
pub use crate::options::{CipherOptions, Mode, Strength};
pub use crate::padding::{Padding, PaddingScheme};
