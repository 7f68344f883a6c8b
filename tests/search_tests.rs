//! Placement search tests - driving sessions with the search

use bitris::core::{Piece, Playfield, Session, SessionConfig, Spawner};
use bitris::engine::{best_action_sequence, candidates, plan, AutoPlay, PlaceError};
use bitris::types::{Intent, SessionState, ShapeKind, SEARCH_LINE_WEIGHT};

#[test]
fn test_i_on_empty_field_leaves_zero_holes() {
    let session = Session::from_parts(
        Playfield::new(),
        Piece::new(ShapeKind::I),
        Spawner::seeded(1, 3, Default::default()),
    );
    let best = session.best_placement().unwrap();
    assert_eq!(best.holes, 0);

    let mut session = session;
    let intents = session.best_action_sequence();
    let outcome = session.step(&intents);
    assert!(outcome.lock.is_some());
    assert_eq!(session.playfield().holes(), 0);
}

#[test]
fn test_search_prefers_clearing_lines() {
    let field = Playfield::from_ascii(&[
        "##.#######", // 18
        "##.#######", // 19
    ]);
    let piece = Piece::new(ShapeKind::I);
    let all = candidates(&field, &piece);
    let best = all.iter().max_by_key(|p| p.score).unwrap();
    assert_eq!(best.lines, 2);
    assert_eq!(best.score, 2 * SEARCH_LINE_WEIGHT);

    let mut session = Session::from_parts(field, piece, Spawner::seeded(1, 3, Default::default()));
    let intents = session.best_action_sequence();
    let outcome = session.step(&intents);
    let event = outcome.lock.unwrap();
    assert_eq!(event.lines(), 2);
    assert_eq!(session.score(), 100);
}

#[test]
fn test_ties_keep_lowest_rotation_then_column() {
    let field = Playfield::new();
    let piece = Piece::new(ShapeKind::O);
    let intents = best_action_sequence(&field, &piece);
    // column 0 is the first zero-hole spot; O starts at column 4
    assert_eq!(
        intents,
        vec![
            Intent::MoveLeft,
            Intent::MoveLeft,
            Intent::MoveLeft,
            Intent::MoveLeft,
            Intent::HardDrop,
        ]
    );
}

#[test]
fn test_search_never_mutates_session() {
    let session = Session::new(SessionConfig {
        seed: 42,
        ..SessionConfig::default()
    })
    .unwrap();
    let before = session.snapshot();
    let _ = session.best_action_sequence();
    let _ = session.best_placement();
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_plan_reports_why_a_placement_fails() {
    let field = Playfield::new();
    let piece = Piece::new(ShapeKind::I);
    assert_eq!(plan(&field, &piece, 0, 8), Err(PlaceError::ColumnBlocked));
    assert_eq!(plan(&field, &piece, 0, -1), Err(PlaceError::ColumnOutOfRange(-1)));
    assert!(plan(&field, &piece, 1, 9).is_ok());
}

#[test]
fn test_every_searched_sequence_locks_a_piece() {
    let mut session = Session::seeded(2024);
    let mut points = 0;
    while session.is_running() && session.pieces_locked() < 100 {
        let intents = session.best_action_sequence();
        let outcome = session.step(&intents);
        match outcome.lock {
            Some(event) => points += event.points,
            None => assert_eq!(outcome.state, SessionState::Ended),
        }
    }
    assert_eq!(points, session.score());
    assert!(session.pieces_locked() > 0);
}
