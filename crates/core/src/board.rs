//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! `Board` is a `Copy` value: [`Board::stamp`] and [`Board::collapse_full_rows`] return a new
//! board and leave their input untouched.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::transform::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one collapse, top to bottom.
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

/// Result of [`Board::collapse_full_rows`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCollapse {
    pub board: Board,
    pub rows: ClearedRows,
}

impl RowCollapse {
    /// Number of rows removed
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    ///
    /// Intended for building fixtures; gameplay only writes cells through `stamp`.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Whether `shape` with its top-left cell at (`x`, `y`) fits on the board.
    ///
    /// Every filled cell must be inside the side walls and above the floor. Cells above the
    /// top edge (`y < 0`) are allowed and are not checked for occupancy, so pieces can spawn
    /// partially off the top.
    pub fn is_valid_placement(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().all(|(dx, dy)| {
            let px = x as i16 + dx as i16;
            let py = y as i16 + dy as i16;
            if px < 0 || px >= BOARD_WIDTH as i16 || py >= BOARD_HEIGHT as i16 {
                return false;
            }
            py < 0 || self.cells[(py as usize) * WIDTH + (px as usize)].is_none()
        })
    }

    /// Return a copy of the board with the piece's on-board cells written with its kind.
    ///
    /// Cells above the top edge are dropped.
    pub fn stamp(&self, piece: &Piece) -> Board {
        let mut next = *self;
        for (dx, dy) in piece.shape.minos() {
            let y = piece.y + dy;
            if y >= 0 {
                next.set(piece.x + dx, y, Some(piece.kind));
            }
        }
        next
    }

    /// Remove every full row at once and shift the rest down.
    ///
    /// Full rows are found in one top-to-bottom pass before anything moves, so a multi-row
    /// clear is a single event. The same number of empty rows is prepended at the top and the
    /// remaining rows keep their relative order.
    pub fn collapse_full_rows(&self) -> RowCollapse {
        let mut rows = ClearedRows::new();
        for y in 0..HEIGHT {
            if self.is_row_full(y) {
                rows.push(y as u8);
            }
        }

        if rows.is_empty() {
            return RowCollapse { board: *self, rows };
        }

        let mut next = *self;
        let mut write_y = HEIGHT;

        // Scan from bottom to top, compacting surviving rows downwards.
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * WIDTH;
                next.cells
                    .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
            }
        }

        next.cells[..write_y * WIDTH].fill(None);

        RowCollapse { board: next, rows }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy into a 2D grid, row-major
    pub fn to_grid(&self) -> [[Cell; WIDTH]; HEIGHT] {
        let mut grid = [[None; WIDTH]; HEIGHT];
        for (y, row) in self.rows().enumerate() {
            grid[y].copy_from_slice(row);
        }
        grid
    }

    /// Build a board from a 2D grid, row-major
    pub fn from_grid(grid: &[[Cell; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
