//! Piece shapes and the active falling piece.
//!
//! Each kind has one immutable square matrix template; rotated orientations
//! are computed on demand (transpose + row reversal, i.e. a clockwise
//! quarter turn), never stored. The active piece is replaced wholesale on
//! every move, rotation, and spawn.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::types::PieceKind;

/// Largest matrix edge across all kinds (the I piece).
pub const MAX_MATRIX: usize = 4;

/// A square boolean bitmask of edge length 2..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[bool; MAX_MATRIX]; MAX_MATRIX],
}

impl ShapeMatrix {
    /// The canonical spawn-orientation template for a kind.
    pub fn template(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[
                [false, false, false, false],
                [true, true, true, true],
                [false, false, false, false],
                [false, false, false, false],
            ]),
            PieceKind::O => Self::from_rows(&[[true, true], [true, true]]),
            PieceKind::T => Self::from_rows(&[
                [false, true, false],
                [true, true, true],
                [false, false, false],
            ]),
            PieceKind::L => Self::from_rows(&[
                [false, false, true],
                [true, true, true],
                [false, false, false],
            ]),
            PieceKind::J => Self::from_rows(&[
                [true, false, false],
                [true, true, true],
                [false, false, false],
            ]),
            PieceKind::S => Self::from_rows(&[
                [false, true, true],
                [true, true, false],
                [false, false, false],
            ]),
            PieceKind::Z => Self::from_rows(&[
                [true, true, false],
                [false, true, true],
                [false, false, false],
            ]),
        }
    }

    fn from_rows<const N: usize>(rows: &[[bool; N]; N]) -> Self {
        let mut cells = [[false; MAX_MATRIX]; MAX_MATRIX];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..N].copy_from_slice(row);
        }
        Self { size: N, cells }
    }

    /// Edge length of the matrix (2 for O, 4 for I, 3 otherwise).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut out = Self {
            size: n,
            cells: [[false; MAX_MATRIX]; MAX_MATRIX],
        };
        for r in 0..n {
            for c in 0..n {
                out.cells[r][c] = self.cells[n - 1 - c][r];
            }
        }
        out
    }

    /// Local (row, col) offsets of the four filled cells.
    pub fn filled_offsets(&self) -> ArrayVec<(usize, usize), 4> {
        let mut out = ArrayVec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if self.cells[r][c] {
                    out.push((r, c));
                }
            }
        }
        out
    }
}

/// The falling piece: kind, current orientation matrix, and the board
/// position of the matrix origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    /// A fresh piece at row 0, horizontally centered by matrix width.
    pub fn spawn(kind: PieceKind, board_cols: usize) -> Self {
        let matrix = ShapeMatrix::template(kind);
        let col = board_cols as i32 / 2 - matrix.size() as i32 / 2;
        Self {
            kind,
            matrix,
            row: 0,
            col,
        }
    }

    /// This piece translated by (d_row, d_col).
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }

    /// This piece with its matrix turned clockwise, position unchanged.
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotated_cw(),
            ..*self
        }
    }

    /// Absolute board coordinates of the four filled cells.
    pub fn cells(&self) -> ArrayVec<(i32, i32), 4> {
        self.matrix
            .filled_offsets()
            .into_iter()
            .map(|(r, c)| (self.row + r as i32, self.col + c as i32))
            .collect()
    }

    /// Legality check: every filled cell inside the board and unoccupied.
    ///
    /// The single source of truth for movement, rotation, drops, and spawn.
    pub fn fits(&self, board: &Board) -> bool {
        self.cells()
            .iter()
            .all(|&(r, c)| board.is_inside(r, c) && !board.is_occupied(r, c))
    }

    /// The landing row: the greatest row this piece can legally occupy,
    /// probing downward one row at a time (capped at the board height).
    pub fn drop_row(&self, board: &Board) -> i32 {
        let mut row = self.row;
        while row < board.rows() as i32 {
            if !self.offset(row - self.row + 1, 0).fits(board) {
                break;
            }
            row += 1;
        }
        row
    }
}
