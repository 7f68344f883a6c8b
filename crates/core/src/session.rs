//! Session module - the live game: playfield, active piece, spawner, score
//!
//! The session is driven entirely from outside. A driver applies discrete
//! [`Intent`]s and calls [`Session::tick_gravity`] on its own timer; within one
//! tick intents go first, then at most one gravity step, then lock, clear and
//! respawn if the gravity step was blocked. [`Session::step`] packages that
//! order for drivers that batch their input per tick.
//!
//! While the session is running there is always exactly one active piece.
//! Once it has ended (top-out) every mutating call is a caller bug and panics.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::{ConfigError, SessionConfig};
use crate::pieces::{Piece, PieceCells};
use crate::playfield::{FullRows, Playfield};
use crate::scoring::line_clear_score;
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::spawner::Spawner;
use crate::types::{Direction, Intent, RotateDirection, SessionState, ShapeKind};

/// Emitted every time a piece settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub shape: ShapeKind,
    /// Cleared row indices, top to bottom, as they were before compaction
    pub cleared_rows: FullRows,
    pub points: u32,
}

impl LockEvent {
    pub fn lines(&self) -> usize {
        self.cleared_rows.len()
    }
}

/// Result of one gravity tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: SessionState,
    pub score: u32,
    /// The active piece fell one row
    pub moved: bool,
    /// Set when the tick locked a piece
    pub lock: Option<LockEvent>,
}

#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    playfield: Playfield,
    active: Option<Piece>,
    spawner: Spawner<R>,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    state: SessionState,
}

impl Session<StdRng> {
    /// Start a session on an empty playfield with the first piece active.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let spawner = Spawner::seeded(config.seed, config.queue_len, config.hold_policy);
        Ok(Self::with_spawner(spawner))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_spawner(Spawner::seeded(
            seed,
            crate::types::DEFAULT_QUEUE_LEN,
            Default::default(),
        ))
    }
}

impl Default for Session<StdRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

impl<R: Rng> Session<R> {
    /// Start on an empty playfield, taking the first active piece from `spawner`.
    pub fn with_spawner(mut spawner: Spawner<R>) -> Self {
        let active = spawner.spawn();
        Self::from_parts(Playfield::new(), active, spawner)
    }

    /// Assemble a running session from existing state, e.g. a prepared field.
    pub fn from_parts(playfield: Playfield, active: Piece, spawner: Spawner<R>) -> Self {
        Self {
            playfield,
            active: Some(active),
            spawner,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            state: SessionState::Running,
        }
    }
}

impl<R> Session<R> {
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// The falling piece. `None` only after the session ended.
    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn spawner(&self) -> &Spawner<R> {
        &self.spawner
    }

    pub fn held(&self) -> Option<ShapeKind> {
        self.spawner.held().map(Piece::kind)
    }

    pub fn can_hold(&self) -> bool {
        self.spawner.can_hold()
    }

    pub fn queue_shapes(&self) -> Vec<ShapeKind> {
        self.spawner.queue_shapes()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Cells where the active piece would come to rest.
    pub fn landing_cells(&self) -> Option<PieceCells> {
        let mut ghost = self.active.clone()?;
        ghost.drop_to_rest(&self.playfield);
        Some(*ghost.cells())
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.playfield = self.playfield.to_grid();
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.queue.clear();
        out.queue.extend(self.spawner.queue().map(Piece::kind));
        out.held = self.held();
        out.can_hold = self.can_hold();
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<R: Rng> Session<R> {
    /// Active piece plus the field it collides against.
    fn active_and_field(&mut self) -> (&mut Piece, &Playfield) {
        assert!(self.is_running(), "session has ended");
        let Some(active) = self.active.as_mut() else {
            panic!("running session without an active piece");
        };
        (active, &self.playfield)
    }

    /// Apply one intent. Returns whether the active piece's geometry changed
    /// (or, for `Hold`, whether a different piece is now active).
    ///
    /// Panics if the session has ended.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.try_move(Direction::Left),
            Intent::MoveRight => self.try_move(Direction::Right),
            Intent::SoftDown => self.try_move(Direction::Down),
            Intent::Rotate => self.rotate(RotateDirection::Clockwise),
            Intent::HardDrop => {
                let (active, field) = self.active_and_field();
                active.drop_to_rest(field) > 0
            }
            Intent::Hold => self.hold(),
        }
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        let (active, field) = self.active_and_field();
        active.try_move(field, direction)
    }

    fn rotate(&mut self, direction: RotateDirection) -> bool {
        let (active, field) = self.active_and_field();
        active.rotate(field, direction).changed()
    }

    fn hold(&mut self) -> bool {
        assert!(self.is_running(), "session has ended");
        let Some(active) = self.active.take() else {
            panic!("running session without an active piece");
        };
        let outcome = self.spawner.hold(active);
        let accepted = outcome.accepted();
        self.active = Some(outcome.into_active());
        accepted
    }

    /// One implicit gravity step; locks, clears and respawns when blocked.
    ///
    /// Panics if the session has ended.
    pub fn tick_gravity(&mut self) -> TickOutcome {
        let moved = self.try_move(Direction::Down);
        let lock = if moved { None } else { self.lock_active() };
        TickOutcome {
            state: self.state,
            score: self.score,
            moved,
            lock,
        }
    }

    /// Apply `intents` in order, then one gravity tick.
    pub fn step(&mut self, intents: &[Intent]) -> TickOutcome {
        for &intent in intents {
            self.apply_intent(intent);
        }
        self.tick_gravity()
    }

    /// Settle the active piece. Returns `None` on top-out.
    fn lock_active(&mut self) -> Option<LockEvent> {
        let piece = self.active.take()?;

        if piece.cells().iter().any(|&(_, row)| row <= 0) {
            self.state = SessionState::Ended;
            info!(
                score = self.score,
                lines = self.lines,
                pieces = self.pieces_locked,
                "top out"
            );
            return None;
        }

        for &(col, row) in piece.cells() {
            self.playfield.occupy(col, row);
        }
        self.pieces_locked += 1;

        let cleared_rows = self.playfield.find_full_rows();
        let points = line_clear_score(cleared_rows.len());
        self.score += points;
        self.lines += cleared_rows.len() as u32;
        self.playfield.clear_rows(&cleared_rows);

        if cleared_rows.is_empty() {
            debug!(shape = piece.kind().as_str(), "lock");
        } else {
            info!(
                shape = piece.kind().as_str(),
                lines = cleared_rows.len(),
                points,
                score = self.score,
                "lines cleared"
            );
        }

        self.active = Some(self.spawner.spawn());

        let event = LockEvent {
            shape: piece.kind(),
            cleared_rows,
            points,
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HoldPolicy;

    fn session_with(active: ShapeKind, field: Playfield) -> Session {
        Session::from_parts(
            field,
            Piece::new(active),
            Spawner::seeded(11, 3, HoldPolicy::OncePerPiece),
        )
    }

    #[test]
    fn new_session_has_active_and_full_queue() {
        let session = Session::new(SessionConfig::default()).unwrap();
        assert!(session.active().is_some());
        assert_eq!(session.queue_shapes().len(), 3);
        assert_eq!(session.score(), 0);
        assert!(session.is_running());
    }

    #[test]
    fn new_rejects_empty_queue() {
        let config = SessionConfig {
            queue_len: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(Session::new(config), Err(ConfigError::EmptyQueue)));
    }

    #[test]
    fn move_left_until_wall() {
        let mut session = session_with(ShapeKind::O, Playfield::new());
        let mut moves = 0;
        while session.apply_intent(Intent::MoveLeft) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(session.active().unwrap().min_column(), 0);
    }

    #[test]
    fn hard_drop_rests_without_locking() {
        let mut session = session_with(ShapeKind::I, Playfield::new());
        assert!(session.apply_intent(Intent::HardDrop));
        assert_eq!(session.pieces_locked(), 0);
        assert!(session.active().unwrap().cells().iter().all(|&(_, r)| r == 19));

        let outcome = session.tick_gravity();
        assert!(!outcome.moved);
        assert!(outcome.lock.is_some());
        assert_eq!(session.pieces_locked(), 1);
        assert!(session.playfield().row(19).get(3));
    }

    #[test]
    fn soft_down_never_locks() {
        let mut session = session_with(ShapeKind::O, Playfield::new());
        while session.apply_intent(Intent::SoftDown) {}
        assert!(!session.apply_intent(Intent::SoftDown));
        assert_eq!(session.pieces_locked(), 0);
        assert!(session.playfield().is_empty());
    }

    #[test]
    fn landing_cells_match_hard_drop() {
        let mut session = session_with(ShapeKind::T, Playfield::new());
        let ghost = session.landing_cells().unwrap();
        session.apply_intent(Intent::HardDrop);
        assert_eq!(session.active().unwrap().cells(), &ghost);
    }

    #[test]
    fn top_out_discards_piece() {
        // column 4 filled up to row 2: an O spawning at rows 0-1 cannot fall
        let mut field = Playfield::new();
        for row in 2..20 {
            field.occupy(4, row);
        }
        let mut session = session_with(ShapeKind::O, field.clone());
        let outcome = session.tick_gravity();
        assert_eq!(outcome.state, SessionState::Ended);
        assert!(outcome.lock.is_none());
        assert!(session.active().is_none());
        assert_eq!(session.playfield(), &field);
    }

    #[test]
    #[should_panic(expected = "session has ended")]
    fn intents_after_top_out_panic() {
        let mut field = Playfield::new();
        for row in 2..20 {
            field.occupy(4, row);
        }
        let mut session = session_with(ShapeKind::O, field);
        session.tick_gravity();
        session.apply_intent(Intent::MoveLeft);
    }

    #[test]
    fn snapshot_reflects_state() {
        let session = session_with(ShapeKind::J, Playfield::from_ascii(&["#........."]));
        let snap = session.snapshot();
        assert!(snap.playfield[19][0]);
        assert_eq!(snap.active.unwrap().kind, ShapeKind::J);
        assert_eq!(snap.queue.len(), 3);
        assert!(snap.held.is_none());
        assert!(snap.running());
        assert!(snap.is_filled(3, 0));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let session = Session::seeded(3);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["state"], "Running");
        assert_eq!(json["playfield"].as_array().unwrap().len(), 20);
    }
}
