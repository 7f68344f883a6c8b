//! Playfield module - the 10x20 occupancy grid
//!
//! The playfield is 20 [`OccupancyRow`]s, row 0 at the top and row 19 at the
//! bottom. Only occupancy is tracked; which piece a settled cell came from is
//! a rendering concern and lives outside the core.
//!
//! Coordinates are `(col, row)` as `i8` so pieces can sit above the field
//! (negative rows) while they spawn.

use std::fmt;

use arrayvec::ArrayVec;

use crate::row::OccupancyRow;
use crate::types::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

const HEIGHT: usize = PLAYFIELD_HEIGHT as usize;
const WIDTH: usize = PLAYFIELD_WIDTH as usize;

/// Row indices returned by [`Playfield::find_full_rows`], top to bottom.
pub type FullRows = ArrayVec<usize, HEIGHT>;

/// Boolean view of the field, `grid[row][col]`.
pub type OccupancyGrid = [[bool; WIDTH]; HEIGHT];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Playfield {
    rows: [OccupancyRow; HEIGHT],
}

impl Playfield {
    /// Create an empty playfield
    pub fn new() -> Self {
        Self {
            rows: [OccupancyRow::EMPTY; HEIGHT],
        }
    }

    /// Build a playfield from a boolean grid (`grid[row][col]`).
    pub fn from_grid(grid: &OccupancyGrid) -> Self {
        let mut field = Self::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &filled) in cells.iter().enumerate() {
                if filled {
                    field.rows[row].set(col as u8);
                }
            }
        }
        field
    }

    /// Build a playfield from text rows, bottom-aligned: `#` occupied, anything
    /// else empty. Rows missing at the top are empty.
    ///
    /// Panics if more than 20 rows or a row wider than 10 columns is given.
    pub fn from_ascii(lines: &[&str]) -> Self {
        assert!(lines.len() <= HEIGHT, "too many rows: {}", lines.len());
        let mut field = Self::new();
        let offset = HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            assert!(line.len() <= WIDTH, "row {i} wider than {WIDTH}: {line:?}");
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    field.rows[offset + i].set(col as u8);
                }
            }
        }
        field
    }

    pub fn width(&self) -> u8 {
        PLAYFIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        PLAYFIELD_HEIGHT
    }

    #[inline(always)]
    fn in_bounds(col: i8, row: i8) -> bool {
        col >= 0 && (col as usize) < WIDTH && row >= 0 && (row as usize) < HEIGHT
    }

    /// Collision query.
    ///
    /// Anything above the field (`row < 0`) is free. Every other out-of-bounds
    /// cell counts as occupied so walls and floor block movement.
    #[inline]
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        if row < 0 {
            return false;
        }
        if !Self::in_bounds(col, row) {
            return true;
        }
        self.rows[row as usize].get(col as u8)
    }

    /// Mark a cell occupied. Panics outside the visible field.
    pub fn occupy(&mut self, col: i8, row: i8) {
        assert!(
            Self::in_bounds(col, row),
            "cannot occupy ({col}, {row}) outside the playfield"
        );
        self.rows[row as usize].set(col as u8);
    }

    /// Mark a cell empty. Panics outside the visible field.
    pub fn vacate(&mut self, col: i8, row: i8) {
        assert!(
            Self::in_bounds(col, row),
            "cannot vacate ({col}, {row}) outside the playfield"
        );
        self.rows[row as usize].clear(col as u8);
    }

    pub fn row(&self, row: usize) -> OccupancyRow {
        self.rows[row]
    }

    pub fn rows(&self) -> &[OccupancyRow; HEIGHT] {
        &self.rows
    }

    /// Indices of all full rows, scanned top to bottom.
    pub fn find_full_rows(&self) -> FullRows {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_full())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Remove the given rows and compact everything above them downward.
    ///
    /// Indices are processed in ascending order, each one shifting every row
    /// above it down by one, so a row with `k` cleared rows beneath it falls
    /// exactly `k`. Row 0 is left empty after each shift.
    pub fn clear_rows(&mut self, indices: &[usize]) {
        let mut sorted: ArrayVec<usize, HEIGHT> = ArrayVec::new();
        for &idx in indices {
            assert!(idx < HEIGHT, "row {idx} out of range");
            if !sorted.contains(&idx) {
                sorted.push(idx);
            }
        }
        sorted.sort_unstable();

        for &cleared in &sorted {
            self.rows[cleared] = OccupancyRow::EMPTY;
            // copy_within handles the overlapping ranges
            self.rows.copy_within(0..cleared, 1);
            self.rows[0] = OccupancyRow::EMPTY;
        }
    }

    /// Find and clear every full row, returning the cleared indices.
    pub fn clear_full_rows(&mut self) -> FullRows {
        let full = self.find_full_rows();
        self.clear_rows(&full);
        full
    }

    /// Deep, independent copy. Used by the placement search so simulated
    /// drops never touch the live field.
    pub fn copy(&self) -> Playfield {
        self.clone()
    }

    /// Count empty cells that have an occupied cell somewhere above them in
    /// the same column.
    pub fn holes(&self) -> u32 {
        let mut covered: u16 = 0;
        let mut holes = 0;
        for row in &self.rows {
            let bits = row.bits();
            holes += (covered & !bits).count_ones();
            covered |= bits;
        }
        holes
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(OccupancyRow::is_empty)
    }

    /// Total number of occupied cells.
    pub fn occupied_count(&self) -> u32 {
        self.rows.iter().map(OccupancyRow::count).sum()
    }

    pub fn to_grid(&self) -> OccupancyGrid {
        let mut grid = [[false; WIDTH]; HEIGHT];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.rows[row].get(col as u8);
            }
        }
        grid
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for col in 0..PLAYFIELD_WIDTH {
                f.write_str(if row.get(col) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
