//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name (`blocktris::{core, input, scores, term,
//! types}`) and hosts the pieces the terminal binary needs around them: environment
//! configuration and the session event log.

pub mod config;
pub mod event_log;

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_scores as scores;
pub use blocktris_term as term;
pub use blocktris_types as types;
