//! Pieces module - tetromino layouts, clockwise rotation deltas and kicks
//!
//! Rotation here is table-driven per cell rather than computed from a pivot:
//! each `(shape, orientation)` pair has four `(dcol, drow)` deltas, one per
//! cell in spawn order, and the kick tables then nudge the whole piece. Cell
//! order therefore matters and never changes after spawn.
//!
//! All tables are immutable data keyed by [`ShapeKind`] and [`Orientation`].

use serde::Serialize;

use crate::playfield::Playfield;
use crate::types::{
    CellPos, Direction, Orientation, RotateDirection, ShapeKind, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH,
};

/// Four cells of a piece, in spawn order
pub type PieceCells = [CellPos; 4];

/// Per-cell offsets applied by one clockwise rotation step
pub type RotationDeltas = [CellPos; 4];

/// Ordered kick candidates for one orientation transition
pub type KickList = [CellPos; 5];

/// Spawn cells for each shape, `(col, row)`.
pub fn spawn_cells(kind: ShapeKind) -> PieceCells {
    match kind {
        ShapeKind::O => [(4, 0), (5, 0), (4, 1), (5, 1)],
        ShapeKind::I => [(3, 0), (4, 0), (5, 0), (6, 0)],
        ShapeKind::S => [(3, 0), (4, 0), (4, -1), (5, -1)],
        ShapeKind::Z => [(3, -1), (4, -1), (4, 0), (5, 0)],
        ShapeKind::J => [(3, -1), (3, 0), (4, 0), (5, 0)],
        ShapeKind::T => [(3, 0), (4, 0), (5, 0), (4, -1)],
        ShapeKind::L => [(5, -1), (5, 0), (4, 0), (3, 0)],
    }
}

/// Clockwise rotation deltas leaving `from`. `None` for O, which never rotates.
pub fn rotation_deltas(kind: ShapeKind, from: Orientation) -> Option<RotationDeltas> {
    use Orientation::*;

    let deltas = match (kind, from) {
        (ShapeKind::O, _) => return None,

        (ShapeKind::I, North) => [(2, -1), (1, 0), (0, 1), (-1, 2)],
        (ShapeKind::I, East) => [(1, 2), (0, 1), (-1, 0), (-2, -1)],
        (ShapeKind::I, South) => [(-2, 1), (-1, 0), (0, -1), (1, -2)],
        (ShapeKind::I, West) => [(-1, -2), (0, -1), (1, 0), (2, 1)],

        (ShapeKind::L, North) => [(0, 2), (-1, 1), (0, 0), (1, -1)],
        (ShapeKind::L, East) => [(-2, 0), (-1, -1), (0, 0), (1, 1)],
        (ShapeKind::L, South) => [(0, -2), (1, -1), (0, 0), (-1, 1)],
        (ShapeKind::L, West) => [(2, 0), (1, 1), (0, 0), (-1, -1)],

        (ShapeKind::J, North) => [(2, 0), (1, -1), (0, 0), (-1, 1)],
        (ShapeKind::J, East) => [(0, 2), (1, 1), (0, 0), (-1, -1)],
        (ShapeKind::J, South) => [(-2, 0), (-1, 1), (0, 0), (1, -1)],
        (ShapeKind::J, West) => [(0, -2), (-1, -1), (0, 0), (1, 1)],

        (ShapeKind::S, North) => [(1, -1), (0, 0), (1, 1), (0, 2)],
        (ShapeKind::S, East) => [(1, 1), (0, 0), (-1, 1), (-2, 0)],
        (ShapeKind::S, South) => [(-1, 1), (0, 0), (-1, -1), (0, -2)],
        (ShapeKind::S, West) => [(-1, -1), (0, 0), (1, -1), (2, 0)],

        (ShapeKind::Z, North) => [(2, 0), (1, 1), (0, 0), (-1, 1)],
        (ShapeKind::Z, East) => [(0, 2), (-1, 1), (0, 0), (-1, -1)],
        (ShapeKind::Z, South) => [(-2, 0), (-1, -1), (0, 0), (1, -1)],
        (ShapeKind::Z, West) => [(0, -2), (1, -1), (0, 0), (1, 1)],

        (ShapeKind::T, North) => [(1, 1), (0, 0), (0, 0), (0, 0)],
        (ShapeKind::T, East) => [(0, 0), (0, 0), (0, 0), (-1, 1)],
        (ShapeKind::T, South) => [(0, 0), (0, 0), (-1, -1), (0, 0)],
        (ShapeKind::T, West) => [(-1, -1), (0, 0), (1, 1), (1, -1)],
    };
    Some(deltas)
}

/// Kick tables come in two classes: the I piece and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    I,
    Other,
}

impl KickClass {
    pub fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => KickClass::I,
            _ => KickClass::Other,
        }
    }
}

/// I piece kicks, indexed by the orientation being left (N->E, E->S, S->W, W->N)
const I_KICKS: [KickList; 4] = [
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, 1)],
];

/// Kicks for J, L, S, T, Z (same indexing as [`I_KICKS`])
const OTHER_KICKS: [KickList; 4] = [
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// Kick candidates for the clockwise transition out of `from`.
pub fn kicks(class: KickClass, from: Orientation) -> &'static KickList {
    match class {
        KickClass::I => &I_KICKS[from.index()],
        KickClass::Other => &OTHER_KICKS[from.index()],
    }
}

/// Result of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateResult {
    /// Orientation advanced; `kick` is the offset that made it fit
    Rotated { kick: CellPos },
    /// Accepted but nothing to do (O piece or counter-clockwise)
    Unchanged,
    /// Every kick candidate collided; piece untouched
    Blocked,
}

impl RotateResult {
    /// Whether the piece's geometry changed.
    pub fn changed(self) -> bool {
        matches!(self, RotateResult::Rotated { .. })
    }
}

/// A tetromino: shape, orientation and its four cells in playfield space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    kind: ShapeKind,
    orientation: Orientation,
    cells: PieceCells,
}

impl Piece {
    /// Create a piece in its spawn layout, facing North
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            orientation: Orientation::North,
            cells: spawn_cells(kind),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    /// Leftmost occupied column.
    pub fn min_column(&self) -> i8 {
        self.cells.iter().map(|&(c, _)| c).min().unwrap_or(0)
    }

    /// Whether one step in `direction` keeps every cell free.
    ///
    /// Walls block at columns -1 and 10, the floor at row 20. A cell more than
    /// one row above the field can always keep falling.
    pub fn check_move(&self, field: &Playfield, direction: Direction) -> bool {
        let (dc, dr) = direction.delta();
        self.cells.iter().all(|&(col, row)| {
            let (c, r) = (col + dc, row + dr);
            match direction {
                Direction::Down if row < -1 => true,
                Direction::Down => r < PLAYFIELD_HEIGHT as i8 && !field.is_occupied(c, r),
                Direction::Left | Direction::Right => {
                    c >= 0 && c < PLAYFIELD_WIDTH as i8 && !field.is_occupied(c, r)
                }
            }
        })
    }

    /// Shift all cells one step. Only call after [`Piece::check_move`].
    pub fn shift(&mut self, direction: Direction) {
        let (dc, dr) = direction.delta();
        for cell in &mut self.cells {
            cell.0 += dc;
            cell.1 += dr;
        }
    }

    /// Move if the whole piece fits; otherwise leave every cell in place.
    pub fn try_move(&mut self, field: &Playfield, direction: Direction) -> bool {
        if !self.check_move(field, direction) {
            return false;
        }
        self.shift(direction);
        true
    }

    /// Rotate with kicks. First kick that fits wins.
    pub fn rotate(&mut self, field: &Playfield, direction: RotateDirection) -> RotateResult {
        if direction == RotateDirection::CounterClockwise {
            return RotateResult::Unchanged;
        }
        let Some(deltas) = rotation_deltas(self.kind, self.orientation) else {
            return RotateResult::Unchanged;
        };

        for &(kc, kr) in kicks(KickClass::of(self.kind), self.orientation) {
            let mut candidate = self.cells;
            for (cell, &(dc, dr)) in candidate.iter_mut().zip(deltas.iter()) {
                cell.0 += dc + kc;
                cell.1 += dr + kr;
            }

            let fits = candidate.iter().all(|&(c, r)| {
                c >= 0
                    && c < PLAYFIELD_WIDTH as i8
                    && r < PLAYFIELD_HEIGHT as i8
                    && !field.is_occupied(c, r)
            });

            if fits {
                self.cells = candidate;
                self.orientation = self.orientation.rotate_cw();
                return RotateResult::Rotated { kick: (kc, kr) };
            }
        }

        RotateResult::Blocked
    }

    /// Back to the spawn layout, facing North.
    pub fn reset(&mut self) {
        self.cells = spawn_cells(self.kind);
        self.orientation = Orientation::North;
    }

    /// Drop until blocked, returning the number of rows fallen.
    pub fn drop_to_rest(&mut self, field: &Playfield) -> u32 {
        let mut fallen = 0;
        while self.try_move(field, Direction::Down) {
            fallen += 1;
        }
        fallen
    }
}
