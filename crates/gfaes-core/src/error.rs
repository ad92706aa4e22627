//! Error taxonomy for the cipher engine.

/// Failures surfaced by field arithmetic, table derivation and state-array handling.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A state array was built from a byte count that does not form a square matrix.
    #[error("state array requires a square byte count, got {len}")]
    InvalidSize {
        /// Number of bytes supplied.
        len: usize,
    },

    /// A row or column index fell outside the matrix.
    #[error("index {index} is out of bounds, expected a value below {dimens}")]
    OutOfBounds {
        /// Offending index.
        index: usize,
        /// Matrix dimension.
        dimens: usize,
    },

    /// A shift schedule listed more entries than the matrix has rows or columns.
    #[error("{shifts} shift counts exceed the {rows} rows of the state array")]
    TooManyShifts {
        /// Length of the shift schedule.
        shifts: usize,
        /// Rows (or columns) available.
        rows: usize,
    },

    /// Two blocks of different lengths were combined.
    #[error("blocks are not equal in size: {left} != {right}")]
    UnequalBlockLength {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// The extended Euclidean algorithm did not terminate on a unit.
    #[error("element {element:#04x} has no multiplicative inverse modulo {modulus:#05x}")]
    NoInverse {
        /// Element that was inverted.
        element: u8,
        /// Field modulus in use.
        modulus: u16,
    },

    /// Polynomial division by zero or by a polynomial wider than the field allows.
    #[error("invalid divisor {divisor:#x}: must be non-zero with degree at most {order}")]
    InvalidDivisor {
        /// Rejected divisor.
        divisor: u16,
        /// Field order (maximum divisor degree).
        order: u32,
    },

    /// Rotation width outside 1..=32, or a pattern wider than the width.
    #[error("invalid rotation width {width} for pattern {pattern:#x}")]
    InvalidBitWidth {
        /// Requested width in bits.
        width: u32,
        /// Pattern being rotated.
        pattern: u32,
    },
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
