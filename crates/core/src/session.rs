//! Session module - the game state machine
//!
//! Ties together the board, the transform engine, the piece generator and scoring.
//!
//! Lifecycle: `Idle` → `Playing` ⇄ `Paused`, and `Playing` → `GameOver` when a freshly
//! spawned piece does not fit. `start()` is accepted from every phase and begins a new game.
//!
//! Player actions outside `Playing` are ignored: they return `false` and leave the session
//! exactly as it was. Accepted transforms replace the current piece wholesale.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_for, hard_drop_bonus, level_for, score_for_clear};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::transform::{self, drop_target, spawn, try_translate, Piece};
use crate::types::{Direction, GameAction, PieceKind};

/// Maximum number of undrained events kept by a session
const EVENT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Notable transitions, drained by observers (logging, score submission).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Settled {
        kind: PieceKind,
        lines_cleared: u32,
        score_gained: u32,
        hard_drop_rows: u32,
    },
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
    },
}

/// Complete game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: Board,
    current: Option<Piece>,
    next: Option<PieceKind>,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    phase: Phase,
    drop_interval_ms: u32,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl Session {
    /// Create an idle session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            generator: PieceGenerator::new(seed),
            score: 0,
            level: 0,
            lines: 0,
            phase: Phase::Idle,
            drop_interval_ms: drop_interval_for(0),
            events: ArrayVec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A game is running, paused or not
    pub fn playing(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Paused)
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Gravity and player moves are accepted
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Start a new game: clear everything and draw the current and next pieces.
    pub fn start(&mut self) -> bool {
        self.board = Board::new();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.drop_interval_ms = drop_interval_for(0);
        self.events.clear();

        let first = self.generator.next_kind();
        let next = self.generator.next_kind();
        self.current = Some(spawn(first));
        self.next = Some(next);
        self.phase = Phase::Playing;

        self.push_event(SessionEvent::Started);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Playing;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// The falling piece, if player moves are currently accepted
    fn active_piece(&self) -> Option<Piece> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.current
    }

    /// Move the falling piece one cell; never settles it.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        let (dx, dy) = direction.delta();
        match try_translate(&self.board, &piece, dx, dy) {
            Some(moved) => {
                self.current = Some(moved);
                true
            }
            None => false,
        }
    }

    /// Rotate the falling piece, falling back to wall kicks.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        match transform::rotate(&self.board, &piece) {
            Some(rotated) => {
                self.current = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Drop the piece to its landing row and settle it immediately.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        let landed = piece.at(drop_target(&self.board, &piece));
        let rows = (landed.y - piece.y) as u32;
        self.settle(landed, rows);
        true
    }

    /// One row of gravity; settles the piece when it cannot descend.
    pub fn gravity_tick(&mut self) -> bool {
        let Some(piece) = self.active_piece() else {
            return false;
        };
        match try_translate(&self.board, &piece, 0, 1) {
            Some(lower) => self.current = Some(lower),
            None => self.settle(piece, 0),
        }
        true
    }

    /// Stamp, collapse, score, then spawn the next piece or end the game.
    fn settle(&mut self, piece: Piece, hard_drop_rows: u32) {
        let collapse = self.board.stamp(&piece).collapse_full_rows();
        let cleared = collapse.count();

        // Line clears score at the level the piece was played on.
        let gained = score_for_clear(cleared, self.level)
            .saturating_add(hard_drop_bonus(hard_drop_rows));

        self.board = collapse.board;
        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = level_for(self.lines);
        self.drop_interval_ms = drop_interval_for(self.level);
        self.current = None;

        self.push_event(SessionEvent::Settled {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            score_gained: gained,
            hard_drop_rows,
        });

        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = match self.next {
            Some(kind) => kind,
            None => self.generator.next_kind(),
        };
        let piece = spawn(kind);

        if !piece.is_valid(&self.board) {
            self.phase = Phase::GameOver;
            self.push_event(SessionEvent::GameOver {
                score: self.score,
                level: self.level,
                lines: self.lines,
            });
            return;
        }

        self.current = Some(piece);
        self.next = Some(self.generator.next_kind());
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events recorded since the last call.
    pub fn take_events(&mut self) -> ArrayVec<SessionEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    /// Where the current piece would land if dropped now
    pub fn ghost(&self) -> Option<Piece> {
        let piece = self.current?;
        Some(piece.at(drop_target(&self.board, &piece)))
    }

    /// Apply a game action; returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::SoftDrop => self.move_piece(Direction::Down),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Start => self.start(),
        }
    }

    /// Apply a game action and return the resulting snapshot.
    pub fn apply(&mut self, action: GameAction) -> GameSnapshot {
        self.apply_action(action);
        self.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.to_grid();
        out.current = self.current.map(PieceSnapshot::from);
        out.ghost_y = self.ghost().map(|g| g.y);
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.playing = self.playing();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
