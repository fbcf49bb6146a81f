//! Terminal view of the game.
//!
//! A small, game-oriented rendering layer: the view draws a [`core::GameSnapshot`] into a
//! plain framebuffer, and the renderer flushes framebuffers to a terminal backend.
//!
//! - `core` stays deterministic and testable; nothing here mutates a session
//! - Board cells are 2 columns wide by default to offset the terminal glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
