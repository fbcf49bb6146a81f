//! Read-only view of a session for presentation layers.

use crate::pieces::Shape;
use crate::transform::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.minos().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceSnapshot>,
    /// Landing row of the current piece (same column)
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub playing: bool,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// Gravity and player moves are accepted
    pub fn playable(&self) -> bool {
        self.playing && !self.paused && !self.game_over
    }

    /// Settled cell at (x, y), None when empty or out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost_y: None,
            next: None,
            score: 0,
            level: 0,
            lines: 0,
            playing: false,
            paused: false,
            game_over: false,
            drop_interval_ms: crate::types::BASE_DROP_MS,
        }
    }
}
