//! Occupancy row - one playfield row as a 10-bit set
//!
//! Bit `c` is column `c` (0 = leftmost). Bits 10..16 are never set.

use serde::Serialize;

use crate::types::{FULL_ROW_MASK, PLAYFIELD_WIDTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct OccupancyRow(u16);

impl OccupancyRow {
    pub const EMPTY: OccupancyRow = OccupancyRow(0);
    pub const FULL: OccupancyRow = OccupancyRow(FULL_ROW_MASK);

    /// Build a row from a raw bit pattern.
    ///
    /// Panics if any bit outside the 10 columns is set.
    pub fn from_bits(bits: u16) -> Self {
        assert!(
            bits & !FULL_ROW_MASK == 0,
            "row bits {bits:#06x} exceed {PLAYFIELD_WIDTH} columns"
        );
        Self(bits)
    }

    #[inline(always)]
    fn mask(col: u8) -> u16 {
        assert!(col < PLAYFIELD_WIDTH, "column {col} out of range");
        1 << col
    }

    #[inline]
    pub fn set(&mut self, col: u8) {
        self.0 |= Self::mask(col);
    }

    #[inline]
    pub fn clear(&mut self, col: u8) {
        self.0 &= !Self::mask(col);
    }

    #[inline]
    pub fn get(&self, col: u8) -> bool {
        self.0 & Self::mask(col) != 0
    }

    /// All ten columns occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.0 == FULL_ROW_MASK
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of occupied columns.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn bits(&self) -> u16 {
        self.0
    }
}
