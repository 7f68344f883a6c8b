//! Search module - exhaustive one-piece placement search
//!
//! Every reachable (rotation count, leftmost column) pair is settled on a
//! private copy of the playfield and scored as
//! `lines * SEARCH_LINE_WEIGHT - holes`. The first best candidate wins, in
//! rotation-then-column order. Nothing here looks at the queue or hold slot.

use bitris_core::{Piece, Playfield, Session};
use bitris_types::{Intent, PLAYFIELD_WIDTH};
use tracing::debug;

use crate::place::{rotated, rotation_count, settle, Placement};

/// Every placement that survives rotation, translation and the top-out check,
/// in search order.
pub fn candidates(field: &Playfield, piece: &Piece) -> Vec<Placement> {
    let mut out = Vec::new();
    for rotations in 0..rotation_count(piece.kind()) {
        // later counts go through this one, so a blocked rotation ends the scan
        let Ok(turned) = rotated(field, piece, rotations) else {
            break;
        };
        out.extend((0..PLAYFIELD_WIDTH as i8).filter_map(|column| {
            settle(field, &turned, rotations, column).ok()
        }));
    }
    out
}

/// Highest-scoring placement; ties keep the earliest candidate.
pub fn best_placement(field: &Playfield, piece: &Piece) -> Option<Placement> {
    let mut best: Option<Placement> = None;
    for candidate in candidates(field, piece) {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Intents for the best placement, or a bare `HardDrop` when nothing fits.
pub fn best_action_sequence(field: &Playfield, piece: &Piece) -> Vec<Intent> {
    match best_placement(field, piece) {
        Some(placement) => {
            debug!(
                shape = piece.kind().as_str(),
                rotations = placement.rotations,
                column = placement.column,
                lines = placement.lines,
                holes = placement.holes,
                score = placement.score,
                "best placement"
            );
            placement.intents()
        }
        None => {
            debug!(shape = piece.kind().as_str(), "no placement survives, dropping in place");
            vec![Intent::HardDrop]
        }
    }
}

/// Placement search over a live session. Only reads the session.
pub trait AutoPlay {
    fn best_placement(&self) -> Option<Placement>;

    fn best_action_sequence(&self) -> Vec<Intent>;
}

impl<R> AutoPlay for Session<R> {
    fn best_placement(&self) -> Option<Placement> {
        let piece = self.active()?;
        best_placement(self.playfield(), piece)
    }

    fn best_action_sequence(&self) -> Vec<Intent> {
        match self.active() {
            Some(piece) => best_action_sequence(self.playfield(), piece),
            None => vec![Intent::HardDrop],
        }
    }
}
