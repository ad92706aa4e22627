//! AES round transformations over a [`StateArray`].

use crate::error::Result;
use crate::field::multiply;
use crate::sbox::SubstitutionTables;
use crate::state::StateArray;

/// Per-row left rotations applied by ShiftRows.
pub const ROW_SHIFTS: [usize; 4] = [0, 1, 2, 3];

const MIX_COEFFICIENTS: [u8; 4] = [0x02, 0x03, 0x01, 0x01];
const INV_MIX_COEFFICIENTS: [u8; 4] = [0x0e, 0x0b, 0x0d, 0x09];

/// Applies SubBytes to the state in place.
pub fn sub_bytes(state: &mut StateArray, tables: &SubstitutionTables) -> Result<()> {
    for col in 0..state.dimens() {
        state.substitute_column(col, |byte| tables.substitute(byte))?;
    }
    Ok(())
}

/// Applies the inverse SubBytes transformation.
pub fn inv_sub_bytes(state: &mut StateArray, tables: &SubstitutionTables) -> Result<()> {
    for col in 0..state.dimens() {
        state.substitute_column(col, |byte| tables.substitute_inverse(byte))?;
    }
    Ok(())
}

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut StateArray) -> Result<()> {
    state.shift_rows_left(&ROW_SHIFTS)
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut StateArray) -> Result<()> {
    state.shift_rows_right(&ROW_SHIFTS)
}

/// MixColumns over every column: row `r` becomes `2·a[r] ⊕ 3·a[r+1] ⊕ a[r+2] ⊕ a[r+3]`.
pub fn mix_columns(state: &mut StateArray) -> Result<()> {
    mix_with(state, &MIX_COEFFICIENTS)
}

/// Inverse MixColumns with the `[0e, 0b, 0d, 09]` circulant.
pub fn inv_mix_columns(state: &mut StateArray) -> Result<()> {
    mix_with(state, &INV_MIX_COEFFICIENTS)
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut StateArray, round_key: &StateArray) -> Result<()> {
    state.xor(round_key)
}

fn mix_with(state: &mut StateArray, coefficients: &[u8; 4]) -> Result<()> {
    let dimens = state.dimens();
    for col in 0..dimens {
        let column = state.column(col)?;
        for row in 0..dimens {
            let mixed = coefficients
                .iter()
                .enumerate()
                .fold(0u8, |acc, (offset, coefficient)| {
                    acc ^ multiply(*coefficient, column[(row + offset) % dimens])
                });
            state.set(row, col, mixed)?;
        }
    }
    Ok(())
}
