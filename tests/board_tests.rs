//! Board tests - placement, stamping and row collapse through the public API

use blocktris::core::{get_shape, spawn, Board};
use blocktris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(10, 0, Some(PieceKind::T)));
}

#[test]
fn test_full_row_detection() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::Z);
    assert!(board.is_row_full(19));

    board.set(9, 19, None);
    assert!(!board.is_row_full(19));
    assert!(!board.is_row_full(20));
}

#[test]
fn test_placement_rejects_overlap() {
    let mut board = Board::new();
    board.set(5, 1, Some(PieceKind::S));

    let t = get_shape(PieceKind::T, 0);
    // [010;111] at (4,0) covers (5,0), (4,1), (5,1), (6,1).
    assert!(!board.is_valid_placement(&t, 4, 0));
    assert!(board.is_valid_placement(&t, 6, 0));
}

#[test]
fn test_collapse_rows_3_and_7() {
    let mut board = Board::new();
    fill_row(&mut board, 3, PieceKind::I);
    fill_row(&mut board, 7, PieceKind::I);
    board.set(0, 2, Some(PieceKind::J)); // above both cleared rows
    board.set(1, 5, Some(PieceKind::L)); // between them
    board.set(2, 12, Some(PieceKind::O)); // below both

    let collapse = board.collapse_full_rows();
    assert_eq!(collapse.count(), 2);
    assert_eq!(collapse.rows.as_slice(), &[3, 7]);

    let after = collapse.board;
    assert_eq!(after.occupied_count(), 3);
    // Shifted down by two rows.
    assert_eq!(after.get(0, 4), Some(Some(PieceKind::J)));
    // Shifted down by one row.
    assert_eq!(after.get(1, 6), Some(Some(PieceKind::L)));
    // Untouched.
    assert_eq!(after.get(2, 12), Some(Some(PieceKind::O)));
    // New empty rows on top.
    assert!(after.rows().take(2).all(|row| row.iter().all(|c| c.is_none())));
}

#[test]
fn test_collapse_keeps_height() {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        fill_row(&mut board, y, PieceKind::T);
    }
    let collapse = board.collapse_full_rows();
    assert_eq!(collapse.count(), BOARD_HEIGHT as usize);
    assert_eq!(collapse.board, Board::new());
    assert_eq!(collapse.board.rows().count(), BOARD_HEIGHT as usize);
}

#[test]
fn test_stamp_then_collapse_clears_completed_row() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        if !(4..=7).contains(&x) {
            board.set(x, 19, Some(PieceKind::Z));
        }
    }
    let piece = spawn(PieceKind::I).at((4, 19));
    assert!(piece.is_valid(&board));

    let stamped = board.stamp(&piece);
    assert!(stamped.is_row_full(19));
    // The input board is left as it was.
    assert!(!board.is_row_full(19));

    let collapse = stamped.collapse_full_rows();
    assert_eq!(collapse.count(), 1);
    assert_eq!(collapse.board.occupied_count(), 0);
}

#[test]
fn test_stamped_piece_no_longer_fits_in_place() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for (i, shape) in blocktris::core::rotation_states(kind).iter().enumerate() {
            let piece = blocktris::core::Piece {
                kind,
                shape: *shape,
                x: 3,
                y: 8,
                rotation: i as u8,
            };
            assert!(piece.is_valid(&board));
            assert!(!piece.is_valid(&board.stamp(&piece)), "{:?} {}", kind, i);
        }
    }
}
