//! Transform module - spawning, moving, rotating and dropping the falling piece
//!
//! Transforms never mutate a piece in place: each one produces a candidate [`Piece`] that
//! the caller validates against a [`Board`] before accepting it.

use crate::board::Board;
use crate::pieces::{get_shape, next_rotation, Shape, WALL_KICKS};
use crate::types::{PieceKind, BOARD_WIDTH};

/// Spawn position for new pieces (x, y): horizontally centered, top row
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8 - 1, 0);

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Occupancy matrix of the current rotation state
    pub shape: Shape,
    /// Board column of the shape's top-left cell
    pub x: i8,
    /// Board row of the shape's top-left cell (may be negative)
    pub y: i8,
    /// Index into the kind's rotation states
    pub rotation: u8,
}

impl Piece {
    /// Candidate with its position offset by (`dx`, `dy`)
    pub fn translated(&self, dx: i8, dy: i8) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate at the given position
    pub fn at(&self, (x, y): (i8, i8)) -> Piece {
        Piece { x, y, ..*self }
    }

    /// Candidate in the next rotation state, same position
    pub fn rotated(&self) -> Piece {
        let rotation = next_rotation(self.kind, self.rotation);
        Piece {
            shape: get_shape(self.kind, rotation),
            rotation,
            ..*self
        }
    }

    /// Check if the piece fits on the board at its position
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_placement(&self.shape, self.x, self.y)
    }

    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.minos().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Create a piece of `kind` in rotation state 0 at the spawn position.
///
/// Does not check the board; a spawn that does not fit means the stack reached the top.
pub fn spawn(kind: PieceKind) -> Piece {
    let (x, y) = SPAWN_POSITION;
    Piece {
        kind,
        shape: get_shape(kind, 0),
        x,
        y,
        rotation: 0,
    }
}

/// Translate if the result fits, otherwise None.
pub fn try_translate(board: &Board, piece: &Piece, dx: i8, dy: i8) -> Option<Piece> {
    let moved = piece.translated(dx, dy);
    moved.is_valid(board).then_some(moved)
}

/// Rotate with wall kicks.
///
/// Tries the next rotation state in place, then each offset of [`WALL_KICKS`] in order.
/// Returns the first placement that fits, or None (the piece stays as it was).
pub fn rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    let rotated = piece.rotated();
    if rotated.is_valid(board) {
        return Some(rotated);
    }

    WALL_KICKS
        .iter()
        .map(|&(dx, dy)| rotated.translated(dx, dy))
        .find(|kicked| kicked.is_valid(board))
}

/// Lowest position reachable by repeated single-row descent.
pub fn drop_target(board: &Board, piece: &Piece) -> (i8, i8) {
    let mut landed = *piece;
    while let Some(lower) = try_translate(board, &landed, 0, 1) {
        landed = lower;
    }
    (landed.x, landed.y)
}

/// Rows between the piece and its drop target
pub fn drop_distance(board: &Board, piece: &Piece) -> u32 {
    let (_, y) = drop_target(board, piece);
    (y - piece.y) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::rotation_states;
    use crate::types::BOARD_HEIGHT;

    #[test]
    fn test_spawn_is_centered_on_top_row() {
        let piece = spawn(PieceKind::T);
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.shape, get_shape(PieceKind::T, 0));
    }

    #[test]
    fn test_rotating_n_times_returns_to_start() {
        for kind in PieceKind::ALL {
            let start = spawn(kind);
            let mut piece = start;
            for _ in 0..rotation_states(kind).len() {
                piece = piece.rotated();
            }
            assert_eq!(piece, start, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = spawn(PieceKind::O);
        let mut piece = o;
        for _ in 0..4 {
            piece = rotate(&Board::new(), &piece).unwrap();
            assert_eq!(piece, o);
        }
    }

    #[test]
    fn test_rotate_in_open_space_needs_no_kick() {
        let board = Board::new();
        let piece = spawn(PieceKind::T).translated(0, 5);
        let rotated = rotate(&board, &piece).unwrap();
        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
        assert_eq!(rotated.rotation, 1);
    }

    #[test]
    fn test_rotate_against_right_wall_kicks_left() {
        let board = Board::new();
        // Vertical I in the last column; horizontal I needs 4 columns.
        let piece = Piece {
            kind: PieceKind::I,
            shape: get_shape(PieceKind::I, 1),
            x: 9,
            y: 5,
            rotation: 1,
        };
        // (-1,0) and (+1,0) fail, (0,-1) fails, (-2,0) fails, (+2,0) fails: x=9 needs -3.
        assert_eq!(rotate(&board, &piece), None);

        let piece = piece.at((8, 5));
        // In place needs x=8..11: fails. (-1,0): x=7..10 fails. (+1,0) fails. (0,-1) fails.
        // (-2,0): x=6..9 fits.
        let kicked = rotate(&board, &piece).unwrap();
        assert_eq!((kicked.x, kicked.y), (6, 5));
        assert_eq!(kicked.rotation, 0);
    }

    #[test]
    fn test_kick_order_prefers_left_first() {
        let board = Board::new();
        // Vertical I at x=7: horizontal needs x..x+3 <= 9, so in place fails, (-1,0) fits.
        let piece = Piece {
            kind: PieceKind::I,
            shape: get_shape(PieceKind::I, 1),
            x: 7,
            y: 5,
            rotation: 1,
        };
        let kicked = rotate(&board, &piece).unwrap();
        assert_eq!((kicked.x, kicked.y), (6, 5));
    }

    #[test]
    fn test_kick_up_is_tried_before_two_column_kicks() {
        let mut board = Board::new();
        // T at rotation 1 covers (4,10) (4,11) (5,11) (4,12).
        let piece = Piece {
            kind: PieceKind::T,
            shape: get_shape(PieceKind::T, 1),
            x: 4,
            y: 10,
            rotation: 1,
        };
        // Rotation 2 is [111;010]. Blocking (3,10) and (6,10) rules out in place and
        // both one-column kicks, while one row up is clear.
        board.set(3, 10, Some(PieceKind::Z));
        board.set(6, 10, Some(PieceKind::Z));
        assert!(piece.is_valid(&board));

        let kicked = rotate(&board, &piece).unwrap();
        assert_eq!((kicked.x, kicked.y), (4, 9));
        assert_eq!(kicked.rotation, 2);
    }

    #[test]
    fn test_drop_target_on_empty_board_hits_floor() {
        let board = Board::new();
        let piece = spawn(PieceKind::I);
        assert_eq!(drop_target(&board, &piece), (4, BOARD_HEIGHT as i8 - 1));
        assert_eq!(drop_distance(&board, &piece), 19);
    }

    #[test]
    fn test_drop_target_lands_on_stack() {
        let mut board = Board::new();
        board.set(5, 12, Some(PieceKind::S));
        let piece = spawn(PieceKind::O);
        // O occupies columns 4 and 5; column 5 is blocked at row 12.
        assert_eq!(drop_target(&board, &piece), (4, 10));
    }

    #[test]
    fn test_try_translate_rejects_collision() {
        let mut board = Board::new();
        board.set(3, 1, Some(PieceKind::J));
        let piece = spawn(PieceKind::T);
        // T row 1 spans columns 4..=6; moving left would cover column 3.
        assert_eq!(try_translate(&board, &piece, -1, 0), None);
        assert!(try_translate(&board, &piece, 1, 0).is_some());
    }
}
