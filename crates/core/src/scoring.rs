//! Scoring module - classic line-clear table
//!
//! Points depend only on how many rows a single lock clears. There is no
//! level multiplier, combo or drop bonus.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with one lock.
///
/// A 4-cell piece can never clear more than 4 rows; anything above is a
/// caller bug.
pub fn line_clear_score(lines: usize) -> u32 {
    assert!(lines < LINE_SCORES.len(), "{lines} lines cannot clear at once");
    LINE_SCORES[lines]
}
