//! Expanded round keys.

use crate::state::StateArray;

/// Ordered round keys, index 0 (pre-round) through `iterations` (final round).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub(crate) Vec<StateArray>);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=iterations).
    #[inline]
    pub fn get(&self, round: usize) -> &StateArray {
        &self.0[round]
    }

    /// Number of keys held (`iterations + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no keys have been produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of cipher rounds these keys drive.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Iterates over the keys in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = &StateArray> {
        self.0.iter()
    }
}
