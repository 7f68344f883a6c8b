use serde::Serialize;

use crate::pieces::{Piece, PieceCells};
use crate::playfield::OccupancyGrid;
use crate::types::{Orientation, SessionState, ShapeKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub orientation: Orientation,
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            orientation: value.orientation(),
            cells: *value.cells(),
        }
    }
}

/// Read-only view handed to drawing code. Owns its data so the session can
/// keep mutating while the view is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Snapshot {
    pub playfield: OccupancyGrid,
    pub active: Option<ActiveSnapshot>,
    pub queue: Vec<ShapeKind>,
    pub held: Option<ShapeKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub state: SessionState,
}

impl Snapshot {
    pub fn running(&self) -> bool {
        self.state.is_running()
    }

    /// Whether the cell is settled or covered by the active piece.
    pub fn is_filled(&self, col: i8, row: i8) -> bool {
        let settled = row >= 0
            && col >= 0
            && (row as usize) < PLAYFIELD_HEIGHT as usize
            && (col as usize) < PLAYFIELD_WIDTH as usize
            && self.playfield[row as usize][col as usize];
        settled
            || self
                .active
                .is_some_and(|a| a.cells.contains(&(col, row)))
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            playfield: [[false; PLAYFIELD_WIDTH as usize]; PLAYFIELD_HEIGHT as usize],
            active: None,
            queue: Vec::new(),
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            state: SessionState::Running,
        }
    }
}
