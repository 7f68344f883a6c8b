//! Place module - simulate one target placement for the active piece
//!
//! A placement is a rotation count plus a target leftmost column. Planning
//! one works on a clone of the piece and a private copy of the playfield, so
//! the caller's state is only ever read.

use bitris_core::{Piece, PieceCells, Playfield};
use bitris_types::{Direction, Intent, RotateDirection, ShapeKind, PLAYFIELD_WIDTH, SEARCH_LINE_WEIGHT};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("could not rotate to the target orientation")]
    RotationBlocked,
    #[error("target column {0} is outside the playfield")]
    ColumnOutOfRange(i8),
    #[error("could not move to the target column due to collision")]
    ColumnBlocked,
    #[error("piece would come to rest above the visible field")]
    TopOut,
}

/// A reachable resting position and how good it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise rotations applied before translating
    pub rotations: u8,
    /// Leftmost column after translating
    pub column: i8,
    /// Signed column delta from the rotated piece's position
    pub shift: i8,
    /// Where the piece settles
    pub cells: PieceCells,
    pub lines: u32,
    /// Holes left behind after any clear
    pub holes: u32,
    pub score: i32,
}

impl Placement {
    /// Intents that reproduce this placement on the live active piece.
    pub fn intents(&self) -> Vec<Intent> {
        let step = if self.shift < 0 {
            Intent::MoveLeft
        } else {
            Intent::MoveRight
        };
        let mut out = Vec::with_capacity(self.rotations as usize + self.shift.unsigned_abs() as usize + 1);
        out.extend(std::iter::repeat(Intent::Rotate).take(self.rotations as usize));
        out.extend(std::iter::repeat(step).take(self.shift.unsigned_abs() as usize));
        out.push(Intent::HardDrop);
        out
    }
}

/// How many distinct clockwise rotation counts are worth trying for `kind`.
pub fn rotation_count(kind: ShapeKind) -> u8 {
    match kind {
        ShapeKind::O => 1,
        _ => 4,
    }
}

/// Rotate a clone of `piece` `rotations` times on `field`.
pub fn rotated(field: &Playfield, piece: &Piece, rotations: u8) -> Result<Piece, PlaceError> {
    let mut out = piece.clone();
    for _ in 0..rotations {
        if !out.rotate(field, RotateDirection::Clockwise).changed() {
            return Err(PlaceError::RotationBlocked);
        }
    }
    Ok(out)
}

/// Translate an already rotated piece to `column`, drop it and score the
/// resulting field.
pub fn settle(
    field: &Playfield,
    piece: &Piece,
    rotations: u8,
    column: i8,
) -> Result<Placement, PlaceError> {
    if !(0..PLAYFIELD_WIDTH as i8).contains(&column) {
        return Err(PlaceError::ColumnOutOfRange(column));
    }

    let shift = column - piece.min_column();
    let direction = if shift < 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    let mut trial = piece.clone();
    if !(0..shift.unsigned_abs()).all(|_| trial.try_move(field, direction)) {
        return Err(PlaceError::ColumnBlocked);
    }
    trial.drop_to_rest(field);

    if trial.cells().iter().any(|&(_, row)| row <= 0) {
        return Err(PlaceError::TopOut);
    }

    let mut sim = field.copy();
    for &(col, row) in trial.cells() {
        sim.occupy(col, row);
    }
    let lines = sim.clear_full_rows().len() as u32;
    let holes = sim.holes();

    Ok(Placement {
        rotations,
        column,
        shift,
        cells: *trial.cells(),
        lines,
        holes,
        score: lines as i32 * SEARCH_LINE_WEIGHT - holes as i32,
    })
}

/// Plan one placement from scratch: rotate, translate, drop, score.
pub fn plan(
    field: &Playfield,
    piece: &Piece,
    rotations: u8,
    column: i8,
) -> Result<Placement, PlaceError> {
    let turned = rotated(field, piece, rotations)?;
    settle(field, &turned, rotations, column)
}
