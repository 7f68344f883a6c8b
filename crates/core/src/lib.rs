//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block state machine. It has no
//! dependencies on rendering, input or timing; a driver feeds it intents and
//! gravity ticks and reads back snapshots.
//!
//! - **Deterministic**: a seeded session replays identically (the search relies on this)
//! - **Bitset-backed**: each row is a 10-bit [`OccupancyRow`]
//! - **Synchronous**: every operation runs to completion, nothing blocks
//!
//! # Module Structure
//!
//! - [`row`]: one row of occupancy as a 10-bit set
//! - [`playfield`]: 10x20 field with collision queries and row clearing
//! - [`pieces`]: spawn layouts, per-cell rotation deltas, kick tables, [`Piece`]
//! - [`spawner`]: repeat-avoiding shape generator, queue and hold slot
//! - [`scoring`]: classic 0-4 line table
//! - [`session`]: intents, gravity, lock and line-clear pipeline
//! - [`snapshot`]: owned read-only view for drawing
//! - [`config`]: session configuration and its validation error
//!
//! # Game Rules
//!
//! - Pieces spawn partly above the field (negative rows) and only rotate clockwise
//! - O never rotates; other shapes try five kicks, first fit wins
//! - A piece locks when a gravity step is blocked; if any of its cells is in
//!   row 0 or above, the session ends instead
//! - Cleared rows score 0/40/100/300/1200 for 0-4 lines
//!
//! # Example
//!
//! ```
//! use bitris_core::{Session, SessionConfig};
//! use bitris_types::{Intent, SessionState};
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//!
//! session.apply_intent(Intent::MoveLeft);
//! session.apply_intent(Intent::Rotate);
//! session.apply_intent(Intent::HardDrop);
//!
//! // the next gravity tick locks the piece and spawns another
//! let outcome = session.tick_gravity();
//! assert!(outcome.lock.is_some());
//! assert_eq!(outcome.state, SessionState::Running);
//! ```

pub mod config;
pub mod pieces;
pub mod playfield;
pub mod row;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod spawner;

pub use bitris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, HoldPolicy, SessionConfig};
pub use pieces::{Piece, PieceCells, RotateResult};
pub use playfield::{FullRows, OccupancyGrid, Playfield};
pub use row::OccupancyRow;
pub use scoring::line_clear_score;
pub use session::{LockEvent, Session, TickOutcome};
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use spawner::{HoldOutcome, Spawner};
