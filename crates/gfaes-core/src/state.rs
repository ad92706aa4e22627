//! Square byte matrix holding one block while it moves through the rounds.

use crate::error::{Error, Result};

/// An N×N matrix of field elements, filled column by column from a flat buffer.
///
/// Byte `i` of the source buffer lands at row `i % N`, column `i / N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateArray {
    dimens: usize,
    // row-major: cells[row * dimens + col]
    cells: Vec<u8>,
}

impl StateArray {
    /// Builds a state array from `bytes`, whose length must be an even perfect square.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let len = bytes.len();
        let dimens = match square_root(len) {
            Some(dimens) if len != 0 && len % 2 == 0 => dimens,
            _ => return Err(Error::InvalidSize { len }),
        };

        let mut cells = vec![0u8; len];
        for (i, byte) in bytes.iter().enumerate() {
            let (row, col) = (i % dimens, i / dimens);
            cells[row * dimens + col] = *byte;
        }
        Ok(Self { dimens, cells })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dimens(&self) -> usize {
        self.dimens
    }

    /// Total number of bytes held.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Reads the element at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Result<u8> {
        self.check(row)?;
        self.check(col)?;
        Ok(self.cells[row * self.dimens + col])
    }

    /// Overwrites the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, element: u8) -> Result<()> {
        self.check(row)?;
        self.check(col)?;
        self.cells[row * self.dimens + col] = element;
        Ok(())
    }

    /// Rotates row `i` left by `shifts[i] mod N`. Rows past the schedule are untouched.
    pub fn shift_rows_left(&mut self, shifts: &[usize]) -> Result<()> {
        self.check_schedule(shifts)?;
        for (row, shift) in shifts.iter().enumerate() {
            let start = row * self.dimens;
            self.cells[start..start + self.dimens].rotate_left(shift % self.dimens);
        }
        Ok(())
    }

    /// Rotates row `i` right by `shifts[i] mod N`.
    pub fn shift_rows_right(&mut self, shifts: &[usize]) -> Result<()> {
        self.check_schedule(shifts)?;
        for (row, shift) in shifts.iter().enumerate() {
            let start = row * self.dimens;
            self.cells[start..start + self.dimens].rotate_right(shift % self.dimens);
        }
        Ok(())
    }

    /// Rotates column `i` upwards by `shifts[i] mod N`.
    pub fn shift_columns_up(&mut self, shifts: &[usize]) -> Result<()> {
        self.check_schedule(shifts)?;
        for (col, shift) in shifts.iter().enumerate() {
            let mut column = self.column(col)?;
            column.rotate_left(shift % self.dimens);
            self.write_column(col, &column);
        }
        Ok(())
    }

    /// Rotates column `i` downwards by `shifts[i] mod N`.
    pub fn shift_columns_down(&mut self, shifts: &[usize]) -> Result<()> {
        self.check_schedule(shifts)?;
        for (col, shift) in shifts.iter().enumerate() {
            let mut column = self.column(col)?;
            column.rotate_right(shift % self.dimens);
            self.write_column(col, &column);
        }
        Ok(())
    }

    /// Returns column `index`, top to bottom.
    pub fn column(&self, index: usize) -> Result<Vec<u8>> {
        self.check(index)?;
        Ok((0..self.dimens)
            .map(|row| self.cells[row * self.dimens + index])
            .collect())
    }

    /// Replaces every byte of column `index` with `map(byte)`.
    pub fn substitute_column<F>(&mut self, index: usize, map: F) -> Result<()>
    where
        F: Fn(u8) -> u8,
    {
        self.check(index)?;
        for row in 0..self.dimens {
            let cell = &mut self.cells[row * self.dimens + index];
            *cell = map(*cell);
        }
        Ok(())
    }

    /// Element-wise XOR with `other` (matrix addition over GF(2^8)).
    pub fn xor(&mut self, other: &StateArray) -> Result<()> {
        if other.dimens != self.dimens {
            return Err(Error::UnequalBlockLength {
                left: self.size(),
                right: other.size(),
            });
        }
        for (cell, rhs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell ^= *rhs;
        }
        Ok(())
    }

    /// Serializes back to a flat buffer in the order the array was built from.
    pub fn to_buffer(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        for col in 0..self.dimens {
            for row in 0..self.dimens {
                bytes.push(self.cells[row * self.dimens + col]);
            }
        }
        bytes
    }

    /// Independent copy sharing no storage with `self`.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    fn write_column(&mut self, index: usize, column: &[u8]) {
        for (row, byte) in column.iter().enumerate() {
            self.cells[row * self.dimens + index] = *byte;
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.dimens {
            return Err(Error::OutOfBounds {
                index,
                dimens: self.dimens,
            });
        }
        Ok(())
    }

    fn check_schedule(&self, shifts: &[usize]) -> Result<()> {
        if shifts.len() > self.dimens {
            return Err(Error::TooManyShifts {
                shifts: shifts.len(),
                rows: self.dimens,
            });
        }
        Ok(())
    }
}

fn square_root(len: usize) -> Option<usize> {
    (0..=len)
        .take_while(|d| d * d <= len)
        .last()
        .filter(|d| d * d == len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sequential() -> StateArray {
        let bytes: Vec<u8> = (0..16).collect();
        StateArray::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn builds_column_major() {
        let state = sequential();
        assert_eq!(state.dimens(), 4);
        assert_eq!(state.at(0, 0), Ok(0));
        assert_eq!(state.at(1, 0), Ok(1));
        assert_eq!(state.at(0, 1), Ok(4));
        assert_eq!(state.at(3, 2), Ok(11));
        assert_eq!(state.column(3), Ok(vec![12, 13, 14, 15]));
    }

    #[test]
    fn rejects_non_square_sizes() {
        for len in [0usize, 1, 9, 15, 17] {
            let bytes = vec![0u8; len];
            assert_eq!(StateArray::from_bytes(&bytes), Err(Error::InvalidSize { len }));
        }
        assert!(StateArray::from_bytes(&[0u8; 4]).is_ok());
        assert!(StateArray::from_bytes(&[0u8; 36]).is_ok());
    }

    #[test]
    fn indices_are_bounds_checked() {
        let mut state = sequential();
        assert_eq!(state.at(4, 0), Err(Error::OutOfBounds { index: 4, dimens: 4 }));
        assert_eq!(state.at(0, 7), Err(Error::OutOfBounds { index: 7, dimens: 4 }));
        assert!(state.set(0, 4, 1).is_err());
        assert!(state.column(4).is_err());
        state.set(2, 3, 0xaa).unwrap();
        assert_eq!(state.at(2, 3), Ok(0xaa));
    }

    #[test]
    fn shift_rows_left_uses_per_row_counts() {
        let mut state = sequential();
        state.shift_rows_left(&[0, 1, 2, 3]).unwrap();
        assert_eq!(
            state.to_buffer(),
            vec![0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        state.shift_rows_right(&[0, 1, 2, 3]).unwrap();
        assert_eq!(state, sequential());
    }

    #[test]
    fn shift_counts_are_taken_modulo_dimension() {
        let mut wrapped = sequential();
        wrapped.shift_rows_left(&[4, 5, 6, 7]).unwrap();
        let mut direct = sequential();
        direct.shift_rows_left(&[0, 1, 2, 3]).unwrap();
        assert_eq!(wrapped, direct);
    }

    #[test]
    fn oversized_schedules_are_rejected() {
        let mut state = sequential();
        let err = Err(Error::TooManyShifts { shifts: 5, rows: 4 });
        assert_eq!(state.shift_rows_left(&[0; 5]), err);
        assert_eq!(state.shift_rows_right(&[0; 5]), err);
        assert_eq!(state.shift_columns_up(&[0; 5]), err);
        assert_eq!(state, sequential());
    }

    #[test]
    fn column_shifts_rotate_vertically() {
        let mut state = sequential();
        state.shift_columns_up(&[1]).unwrap();
        assert_eq!(state.column(0), Ok(vec![1, 2, 3, 0]));
        assert_eq!(state.column(1), Ok(vec![4, 5, 6, 7]));
        state.shift_columns_down(&[1]).unwrap();
        assert_eq!(state, sequential());
    }

    #[test]
    fn substitute_column_applies_map() {
        let mut state = sequential();
        state.substitute_column(2, |b| b.wrapping_mul(2)).unwrap();
        assert_eq!(state.column(2), Ok(vec![16, 18, 20, 22]));
        assert_eq!(state.column(1), Ok(vec![4, 5, 6, 7]));
    }

    #[test]
    fn xor_is_elementwise() {
        let mut state = sequential();
        let mask = StateArray::from_bytes(&[0xff; 16]).unwrap();
        state.xor(&mask).unwrap();
        assert_eq!(state.at(1, 1), Ok(0xff ^ 5));
        state.xor(&mask).unwrap();
        assert_eq!(state, sequential());

        let small = StateArray::from_bytes(&[0u8; 4]).unwrap();
        assert_eq!(
            state.xor(&small),
            Err(Error::UnequalBlockLength { left: 16, right: 4 })
        );
    }

    #[test]
    fn deep_copy_is_independent() {
        let original = sequential();
        let mut copy = original.deep_copy();
        copy.set(0, 0, 0xee).unwrap();
        assert_eq!(original.at(0, 0), Ok(0));
        assert_eq!(copy.at(0, 0), Ok(0xee));
    }

    proptest! {
        #[test]
        fn buffer_round_trip(bytes in any::<[u8; 16]>()) {
            let state = StateArray::from_bytes(&bytes).unwrap();
            prop_assert_eq!(state.to_buffer(), bytes.to_vec());
            prop_assert_eq!(StateArray::from_bytes(&state.to_buffer()).unwrap(), state);
        }

        #[test]
        fn uniform_shift_is_undone(bytes in any::<[u8; 16]>(), k in 0usize..64) {
            let original = StateArray::from_bytes(&bytes).unwrap();
            let mut state = original.clone();
            state.shift_rows_left(&[k; 4]).unwrap();
            state.shift_rows_right(&[k; 4]).unwrap();
            prop_assert_eq!(state, original);
        }
    }
}
