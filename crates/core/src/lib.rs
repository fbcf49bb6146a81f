//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and the gravity scheduler.
//! It has **zero dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Time is injected through a [`Clock`], so gravity can be driven by hand
//! - **Allocation-free**: Boards, pieces and snapshots are `Copy` values
//!
//! # Module Structure
//!
//! - [`pieces`]: Piece shapes and their cyclic rotation states
//! - [`rng`]: Seeded uniform piece generation
//! - [`board`]: 10x20 grid with placement checks, stamping and row collapse
//! - [`transform`]: Spawning, moving, rotating (with wall kicks) and dropping
//! - [`scoring`]: Line-clear scores, hard-drop bonus, levels and gravity speed
//! - [`session`]: The game state machine
//! - [`scheduler`]: Gravity cadence, clocks and input dispatch
//! - [`snapshot`]: Read-only view for presentation
//!
//! # Example
//!
//! ```
//! use blocktris_core::Session;
//! use blocktris_types::GameAction;
//!
//! let mut session = Session::new(12345);
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! let snapshot = session.apply(GameAction::HardDrop);
//!
//! // Hard drop awards two points per row fallen.
//! assert!(snapshot.score > 0);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod transform;

pub use blocktris_types as types;

pub use board::{Board, RowCollapse};
pub use pieces::{get_shape, rotation_states, Shape};
pub use rng::{random_piece_kind, PieceGenerator, SimpleRng};
pub use scheduler::{Clock, GameLoop, ManualClock, Scheduler, SystemClock};
pub use scoring::{drop_interval_for, hard_drop_bonus, level_for, score_for_clear};
pub use session::{Phase, Session, SessionEvent};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use transform::{drop_target, spawn, Piece};
