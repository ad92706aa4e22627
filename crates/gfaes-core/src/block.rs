//! Block representation helpers.

use crate::error::{Error, Result};

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two equally sized byte sequences into a new buffer.
pub fn xor_block(left: &[u8], right: &[u8]) -> Result<Vec<u8>> {
    if left.len() != right.len() {
        return Err(Error::UnequalBlockLength {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left.iter().zip(right).map(|(l, r)| l ^ r).collect())
}
