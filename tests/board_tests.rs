//! Board and piece behavior through the public API.

use gridfall::core::{ActivePiece, Board, ShapeMatrix};
use gridfall::types::PieceKind;

fn board_with_full_rows(rows: &[i32]) -> Board {
    let mut board = Board::new(20, 10);
    for &r in rows {
        for c in 0..10 {
            board.set(r, c, Some(PieceKind::S));
        }
    }
    board
}

#[test]
fn full_rows_are_reported_ascending() {
    let board = board_with_full_rows(&[19, 3, 11]);
    assert_eq!(board.full_rows(), vec![3, 11, 19]);
}

#[test]
fn full_board_reports_every_row() {
    let board = board_with_full_rows(&(0..20).collect::<Vec<_>>());
    assert_eq!(board.full_rows(), (0..20).collect::<Vec<_>>());
    assert!(Board::new(20, 10).full_rows().is_empty());
}

#[test]
fn clearing_any_subset_preserves_the_row_count() {
    let board = board_with_full_rows(&[0, 5, 10, 19]);
    for subset in [
        vec![],
        vec![0usize],
        vec![19],
        vec![0, 5],
        vec![0, 5, 10, 19],
    ] {
        let cleared = board.without_rows(&subset);
        assert_eq!(cleared.rows(), 20);
        assert_eq!(cleared.cols(), 10);
        assert_eq!(cleared.cells().len(), 200);
    }
}

#[test]
fn cleared_rows_pull_the_stack_down() {
    let mut board = Board::new(20, 10);
    board.set(10, 0, Some(PieceKind::T));
    for c in 0..10 {
        board.set(15, c, Some(PieceKind::I));
    }
    let cleared = board.without_rows(&[15]);
    assert!(cleared.is_occupied(11, 0), "survivor shifted down one row");
    assert!(!cleared.is_occupied(10, 0));
    assert!(!cleared.is_occupied(15, 0));
}

#[test]
fn merge_ignores_cells_outside_the_board() {
    let board = Board::new(20, 10);
    let merged = board.merged(&[(19, 9), (20, 9), (19, 10), (-1, 0)], PieceKind::L);
    assert_eq!(merged.cells().iter().filter(|c| c.is_some()).count(), 1);
    assert!(merged.is_occupied(19, 9));
}

#[test]
fn rotation_four_times_is_identity_for_every_kind() {
    for kind in PieceKind::ALL {
        let template = ShapeMatrix::template(kind);
        let mut matrix = template;
        for _ in 0..4 {
            matrix = matrix.rotated_cw();
        }
        assert_eq!(matrix, template);
    }
}

#[test]
fn spawned_pieces_sit_at_the_top_center() {
    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind, 10);
        assert_eq!(piece.row, 0);
        let expected = 5 - piece.matrix.size() as i32 / 2;
        assert_eq!(piece.col, expected, "{kind:?}");
        assert!(piece.fits(&Board::new(20, 10)));
    }
}

#[test]
fn fits_rejects_walls_floor_and_overlap() {
    let mut board = Board::new(20, 10);
    board.set(10, 5, Some(PieceKind::Z));

    let piece = ActivePiece::spawn(PieceKind::O, 10);
    assert!(!ActivePiece { col: -1, ..piece }.fits(&board));
    assert!(!ActivePiece { col: 9, ..piece }.fits(&board));
    assert!(!ActivePiece { row: 19, ..piece }.fits(&board));
    assert!(!ActivePiece { row: 9, col: 5, ..piece }.fits(&board), "overlap");
    assert!(ActivePiece { row: 9, col: 6, ..piece }.fits(&board));
}

#[test]
fn drop_row_lands_on_the_stack() {
    let mut board = Board::new(20, 10);
    for c in 0..10 {
        board.set(19, c, Some(PieceKind::J));
        board.set(18, c, Some(PieceKind::J));
    }
    let piece = ActivePiece::spawn(PieceKind::O, 10);
    // O occupies two rows; the stack top is row 18, so it rests at 16.
    assert_eq!(piece.drop_row(&board), 16);
}
