//! Board tests - grid storage, placement predicate and line clearing

use blockfall::core::pieces::{base_shape, get_shape};
use blockfall::core::Board;
use blockfall::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
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

    assert!(board.set(0, 0, Some(PieceKind::I)));
    assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, -1, Some(PieceKind::T)));
    assert!(!board.set(BOARD_WIDTH as i8, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_accepts_rows_above_the_board_only() {
    let mut board = Board::new();
    board.set(3, 0, Some(PieceKind::O));

    // Above the top is open, sides and floor are walls
    assert!(board.accepts(3, -1));
    assert!(board.accepts(0, -4));
    assert!(!board.accepts(-1, -1));
    assert!(!board.accepts(BOARD_WIDTH as i8, -1));
    assert!(!board.accepts(0, BOARD_HEIGHT as i8));
    assert!(!board.accepts(3, 0));
    assert!(board.accepts(4, 0));

    // Open space above the board is one board height tall
    assert!(board.accepts(0, -(BOARD_HEIGHT as i8)));
    assert!(!board.accepts(0, -(BOARD_HEIGHT as i8) - 1));
}

#[test]
fn test_fits_uses_every_offset() {
    let board = Board::from_ascii(&["....T....."]);
    let t = base_shape(PieceKind::T).cells();

    // T at x=3 puts its bottom row on columns 3..=5 of the target row
    assert!(board.fits(&t, 3, 17));
    assert!(!board.fits(&t, 3, 18));
    assert!(board.fits(&t, 5, 18));
    assert!(!board.fits(&t, 8, 0));
    assert!(board.fits(&t, 0, -1));
}

#[test]
fn test_lock_piece_writes_kind() {
    let mut board = Board::new();
    let i_vertical = get_shape(PieceKind::I, Rotation::East).cells();

    assert!(board.lock_piece(&i_vertical, 0, 16, PieceKind::I));
    for y in 16..20 {
        assert_eq!(board.get(0, y), Some(Some(PieceKind::I)));
    }
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_lock_piece_partially_above_board() {
    let mut board = Board::new();
    let i_vertical = get_shape(PieceKind::I, Rotation::East).cells();

    // Two cells land on rows 0 and 1, two hang above the board
    assert!(!board.lock_piece(&i_vertical, 9, -2, PieceKind::I));
    assert_eq!(board.occupied_count(), 2);
    assert!(board.is_occupied(9, 0));
    assert!(board.is_occupied(9, 1));
}

#[test]
fn test_single_row_clear_shifts_rows_above() {
    let mut board = Board::from_ascii(&[
        "..T.......",
        ".SS......Z",
        "IIIIIIIIII",
        "J........L",
    ]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[18]);

    // Rows above the cleared one moved down by one, the row below stayed
    assert_eq!(board.get(2, 17), Some(Some(PieceKind::T)));
    assert_eq!(board.get(1, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.get(9, 18), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(9, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.occupied_count(), 6);
}

#[test]
fn test_four_row_clear_preserves_order() {
    let mut board = Board::from_ascii(&[
        "O.........",
        "IIIIIIIIII",
        "IIIIIIIIII",
        ".T........",
        "IIIIIIIIII",
        "IIIIIIIIII",
    ]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15, 16, 18, 19]);

    assert_eq!(board.get(0, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.occupied_count(), 2);
    for y in 0..18 {
        assert!(!board.is_row_full(y));
    }
}

#[test]
fn test_clear_with_no_full_rows_is_noop() {
    let mut board = Board::from_ascii(&["IIIIIIIII.", "T.T.T.T.T."]);
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_resets_every_cell() {
    let mut board = Board::from_ascii(&["IIIIIIIII."; 5]);
    board.clear();
    assert_eq!(board, Board::new());
}
