//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key press becomes at
//! most one action, applied immediately by the caller; there is no input queue.

pub mod map;

pub use blocktris_types as types;

pub use map::{gate_action, map_key, should_quit};
