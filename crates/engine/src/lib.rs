//! Engine - placement search on top of `bitris-core`
//!
//! The engine never mutates a session. It clones the active piece, simulates
//! each placement on a private playfield copy and hands back the intents a
//! driver should apply.
//!
//! ```
//! use bitris_core::Session;
//! use bitris_engine::AutoPlay;
//!
//! let mut session = Session::seeded(3);
//! let intents = session.best_action_sequence();
//! let outcome = session.step(&intents);
//! assert!(outcome.lock.is_some());
//! ```

pub mod place;
pub mod search;

pub use place::{plan, PlaceError, Placement};
pub use search::{best_action_sequence, best_placement, candidates, AutoPlay};
