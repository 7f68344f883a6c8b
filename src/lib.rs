//! Bitris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so drivers and integration
//! tests can write `bitris::{core, engine, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use bitris_core as core;
pub use bitris_engine as engine;
pub use bitris_types as types;
