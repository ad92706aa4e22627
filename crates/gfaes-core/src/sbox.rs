//! Forward and inverse substitution tables derived from field inversion.
//!
//! Both tables are computed once on first use and are read-only afterwards, so
//! they can be shared across threads without locking.

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::field;

/// Side length of the 16×16 table layout.
pub const TABLE_DIMENS: usize = 16;

const AFFINE_CONSTANT: u8 = 0x63;
const INVERSE_AFFINE_CONSTANT: u8 = 0x05;

static TABLES: Lazy<Result<SubstitutionTables>> = Lazy::new(SubstitutionTables::derive);

/// The S-box and its inverse, 256 entries each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionTables {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl SubstitutionTables {
    fn derive() -> Result<Self> {
        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];
        for value in 0..=255u8 {
            forward[usize::from(value)] = forward_affine(field::inverse(value)?);
            inverse[usize::from(value)] = field::inverse(inverse_affine(value))?;
        }
        Ok(Self { forward, inverse })
    }

    /// SubBytes lookup.
    #[inline]
    pub fn substitute(&self, byte: u8) -> u8 {
        self.forward[usize::from(byte)]
    }

    /// InvSubBytes lookup.
    #[inline]
    pub fn substitute_inverse(&self, byte: u8) -> u8 {
        self.inverse[usize::from(byte)]
    }

    /// Lookup through the 16×16 layout: `row` is the high nibble, `col` the low nibble.
    pub fn lookup(&self, row: usize, col: usize, inverse: bool) -> Result<u8> {
        for index in [row, col] {
            if index >= TABLE_DIMENS {
                return Err(Error::OutOfBounds {
                    index,
                    dimens: TABLE_DIMENS,
                });
            }
        }
        let table = if inverse { &self.inverse } else { &self.forward };
        Ok(table[row * TABLE_DIMENS + col])
    }

    /// The flat forward table.
    pub fn forward(&self) -> &[u8; 256] {
        &self.forward
    }

    /// The flat inverse table.
    pub fn inverse(&self) -> &[u8; 256] {
        &self.inverse
    }
}

/// Returns the process-wide tables, deriving them on first call.
pub fn tables() -> Result<&'static SubstitutionTables> {
    Lazy::force(&TABLES).as_ref().map_err(Clone::clone)
}

/// Rotates the low `width` bits of `pattern` right by `shifts` positions.
pub fn rotate_right_bits(pattern: u32, shifts: u32, width: u32) -> Result<u32> {
    if width == 0 || width > u32::BITS || (width < u32::BITS && pattern >> width != 0) {
        return Err(Error::InvalidBitWidth { width, pattern });
    }
    let shifts = shifts % width;
    if shifts == 0 {
        return Ok(pattern);
    }
    let low = pattern & ((1u32 << shifts) - 1);
    Ok((pattern >> shifts) | (low << (width - shifts)))
}

/// Rotates a byte right by `shifts` bits.
#[inline]
pub fn rotate_right(pattern: u8, shifts: u32) -> u8 {
    pattern.rotate_right(shifts % u8::BITS)
}

fn forward_affine(byte: u8) -> u8 {
    byte ^ rotate_right(byte, 4)
        ^ rotate_right(byte, 5)
        ^ rotate_right(byte, 6)
        ^ rotate_right(byte, 7)
        ^ AFFINE_CONSTANT
}

fn inverse_affine(byte: u8) -> u8 {
    rotate_right(byte, 2) ^ rotate_right(byte, 5) ^ rotate_right(byte, 7) ^ INVERSE_AFFINE_CONSTANT
}
