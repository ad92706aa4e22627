//! From-scratch AES engine built on explicit GF(2^8) arithmetic.
//!
//! This crate derives everything it needs instead of hardcoding it:
//! - Polynomial add/multiply/divide/inverse over GF(2^8).
//! - S-box and inverse S-box computed from field inversion plus an affine map.
//! - A square state array with row/column rotation and column substitution.
//! - The Rijndael key schedule and the forward/inverse round pipelines.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
pub mod field;
mod key;
pub mod round;
pub mod sbox;
mod state;

pub use crate::block::{xor_block, Block, BLOCK_SIZE};
pub use crate::cipher::{decipher, decrypt_block, encipher, encrypt_block, expand_key};
pub use crate::error::{Error, Result};
pub use crate::key::RoundKeys;
pub use crate::sbox::{tables, SubstitutionTables};
pub use crate::state::StateArray;
