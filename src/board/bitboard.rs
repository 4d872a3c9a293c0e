//! Square set backed by a single u128 (81 cells fit in 128 bits)

use serde::{Deserialize, Serialize};

use super::{Pos, TOTAL_CELLS};

/// Set of squares, used for the squares already captured in a chain.
/// Serialized as a list of squares so the JSON stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Pos>", from = "Vec<Pos>")]
pub struct Bitboard {
    bits: u128,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= 1u128 << pos.to_index();
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        (self.bits >> pos.to_index()) & 1 == 1
    }

    /// Copy with one more square set
    #[inline]
    #[must_use]
    pub fn with(mut self, pos: Pos) -> Self {
        self.set(pos);
        self
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u128,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;

        if idx < TOTAL_CELLS {
            Some(Pos::from_index(idx))
        } else {
            None
        }
    }
}

impl From<Bitboard> for Vec<Pos> {
    fn from(set: Bitboard) -> Self {
        set.iter_ones().collect()
    }
}

impl From<Vec<Pos>> for Bitboard {
    fn from(squares: Vec<Pos>) -> Self {
        squares
            .into_iter()
            .filter(|p| p.is_on_board())
            .fold(Bitboard::new(), Bitboard::with)
    }
}
