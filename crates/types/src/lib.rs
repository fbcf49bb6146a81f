//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score submission).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (`BOARD_WIDTH / 2 - 1`, 0) = (4, 0)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the cooperative loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `DROP_STEP_MS` | 50 | Gravity speed-up per level |
//! | `MIN_DROP_MS` | 50 | Gravity floor, reached at level 19 |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval of the cooperative loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u32 = 50;

/// Gravity interval floor
pub const MIN_DROP_MS: u32 = 50;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row fallen during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the preview panel and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell settled by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Direction of a player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Board offset for one step in this direction.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Game actions that a presentation layer can send to a session
///
/// Each action maps to exactly one session entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never settles the piece)
    SoftDrop,
    /// Advance to the next rotation state, with wall kicks
    Rotate,
    /// Drop piece to its landing row and settle it
    HardDrop,
    /// Pause a running game
    Pause,
    /// Resume a paused game
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    /// Start a new game (valid from any state)
    Start,
}

impl GameAction {
    /// Parse action from a camelCase (or any-case) name
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglepause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "togglepause" => Some(GameAction::TogglePause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }
}
