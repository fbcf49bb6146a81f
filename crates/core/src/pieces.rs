//! Pieces module - tetromino shapes and their rotation states
//!
//! Every piece kind owns an ordered, cyclic list of occupancy matrices. Rotating past the
//! last state wraps to the first. The O piece has a single state; I, S and Z alias after
//! 180° and therefore have two; T, J and L have four.

use crate::types::PieceKind;

/// Offset of a single mino relative to the shape's top-left cell
pub type MinoOffset = (i8, i8);

/// A boolean occupancy matrix, stored row by row (top row first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: &'static [&'static [u8]],
}

impl Shape {
    const fn new(rows: &'static [&'static [u8]]) -> Self {
        Self { rows }
    }

    /// Number of columns in the matrix
    pub fn width(&self) -> u8 {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0) as u8
    }

    /// Number of rows in the matrix
    pub fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Whether the matrix cell at (`col`, `row`) is occupied
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .is_some_and(|&c| c != 0)
    }

    /// Offsets of the occupied cells, row-major.
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> {
        let rows = self.rows;
        rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0)
                .map(move |(dx, _)| (dx as i8, dy as i8))
        })
    }

    /// Raw matrix rows, one byte per column (0 empty, 1 occupied).
    pub fn rows(&self) -> impl Iterator<Item = &'static [u8]> {
        self.rows.iter().copied()
    }
}

static I_STATES: [Shape; 2] = [
    Shape::new(&[&[1, 1, 1, 1]]),
    Shape::new(&[&[1], &[1], &[1], &[1]]),
];

static O_STATES: [Shape; 1] = [Shape::new(&[&[1, 1], &[1, 1]])];

static T_STATES: [Shape; 4] = [
    Shape::new(&[&[0, 1, 0], &[1, 1, 1]]),
    Shape::new(&[&[1, 0], &[1, 1], &[1, 0]]),
    Shape::new(&[&[1, 1, 1], &[0, 1, 0]]),
    Shape::new(&[&[0, 1], &[1, 1], &[0, 1]]),
];

static S_STATES: [Shape; 2] = [
    Shape::new(&[&[0, 1, 1], &[1, 1, 0]]),
    Shape::new(&[&[1, 0], &[1, 1], &[0, 1]]),
];

static Z_STATES: [Shape; 2] = [
    Shape::new(&[&[1, 1, 0], &[0, 1, 1]]),
    Shape::new(&[&[0, 1], &[1, 1], &[1, 0]]),
];

static J_STATES: [Shape; 4] = [
    Shape::new(&[&[1, 0, 0], &[1, 1, 1]]),
    Shape::new(&[&[1, 1], &[1, 0], &[1, 0]]),
    Shape::new(&[&[1, 1, 1], &[0, 0, 1]]),
    Shape::new(&[&[0, 1], &[0, 1], &[1, 1]]),
];

static L_STATES: [Shape; 4] = [
    Shape::new(&[&[0, 0, 1], &[1, 1, 1]]),
    Shape::new(&[&[1, 0], &[1, 0], &[1, 1]]),
    Shape::new(&[&[1, 1, 1], &[1, 0, 0]]),
    Shape::new(&[&[1, 1], &[0, 1], &[0, 1]]),
];

/// Rotation states of a piece kind, in rotation order.
pub fn rotation_states(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Get the shape for a piece kind and rotation index (wraps around)
pub fn get_shape(kind: PieceKind, rotation: u8) -> Shape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Index of the state that follows `rotation`
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    let count = rotation_states(kind).len() as u8;
    (rotation + 1) % count
}

/// Initial shape for a newly spawned piece
pub fn get_spawn_shape(kind: PieceKind) -> Shape {
    get_shape(kind, 0)
}

/// Positional offsets tried, in order, when a rotation collides in place.
///
/// The same list applies to every piece kind and every rotation transition.
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_minos() {
        for kind in PieceKind::ALL {
            for shape in rotation_states(kind) {
                assert_eq!(shape.minos().count(), 4, "{:?} state {:?}", kind, shape);
            }
        }
    }

    #[test]
    fn state_counts_match_piece_symmetry() {
        assert_eq!(rotation_states(PieceKind::O).len(), 1);
        assert_eq!(rotation_states(PieceKind::I).len(), 2);
        assert_eq!(rotation_states(PieceKind::S).len(), 2);
        assert_eq!(rotation_states(PieceKind::Z).len(), 2);
        assert_eq!(rotation_states(PieceKind::T).len(), 4);
        assert_eq!(rotation_states(PieceKind::J).len(), 4);
        assert_eq!(rotation_states(PieceKind::L).len(), 4);
    }

    #[test]
    fn t_spawn_shape_minos() {
        let t = get_spawn_shape(PieceKind::T);
        assert_eq!(t.width(), 3);
        assert_eq!(t.height(), 2);
        let minos: Vec<_> = t.minos().collect();
        assert_eq!(minos, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn next_rotation_wraps() {
        assert_eq!(next_rotation(PieceKind::O, 0), 0);
        assert_eq!(next_rotation(PieceKind::I, 1), 0);
        assert_eq!(next_rotation(PieceKind::L, 3), 0);
        assert_eq!(next_rotation(PieceKind::L, 2), 3);
    }

    #[test]
    fn is_filled_outside_matrix_is_false() {
        let i = get_spawn_shape(PieceKind::I);
        assert!(i.is_filled(3, 0));
        assert!(!i.is_filled(4, 0));
        assert!(!i.is_filled(0, 1));
    }
}
