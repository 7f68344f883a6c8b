//! Headless autoplay runner (default binary).
//!
//! Plays one session with the placement search until it tops out or a piece
//! limit is reached, then prints the final snapshot as JSON on stdout.
//!
//! Environment:
//! - `BITRIS_SEED`, `BITRIS_QUEUE_LEN`, `BITRIS_HOLD_POLICY`: session config
//! - `BITRIS_MAX_PIECES`: stop after this many locks (default 500)
//! - `RUST_LOG`: tracing filter (default `info`)

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bitris::core::{Session, SessionConfig};
use bitris::engine::AutoPlay;

const DEFAULT_MAX_PIECES: u32 = 500;

fn max_pieces_from_env() -> Result<u32> {
    match std::env::var("BITRIS_MAX_PIECES") {
        Ok(v) => v
            .parse()
            .with_context(|| format!("BITRIS_MAX_PIECES must be a positive integer, got {v:?}")),
        Err(_) => Ok(DEFAULT_MAX_PIECES),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig::from_env();
    let max_pieces = max_pieces_from_env()?;
    let mut session = Session::new(config.clone()).context("starting session")?;
    info!(
        seed = config.seed,
        queue_len = config.queue_len,
        hold_policy = config.hold_policy.as_str(),
        max_pieces,
        "autoplay start"
    );

    while session.is_running() && session.pieces_locked() < max_pieces {
        let intents = session.best_action_sequence();
        let mut outcome = session.step(&intents);
        // the sequence ends in a hard drop, so this only loops if a drop was a no-op
        while outcome.lock.is_none() && outcome.state.is_running() {
            outcome = session.tick_gravity();
        }
        if outcome.lock.is_some() && session.pieces_locked() % 100 == 0 {
            info!(
                pieces = session.pieces_locked(),
                score = session.score(),
                lines = session.lines(),
                "progress"
            );
        }
    }

    info!(
        score = session.score(),
        lines = session.lines(),
        pieces = session.pieces_locked(),
        state = ?session.state(),
        "autoplay finished"
    );

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
