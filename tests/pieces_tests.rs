//! Pieces module tests - shape matrices and clockwise rotation

use blockfall::core::pieces::{base_shape, get_shape, rotate, spawn_x, Shape};
use blockfall::types::{PieceKind, Rotation};

fn rows(shape: &Shape) -> Vec<String> {
    (0..shape.height() as usize)
        .map(|y| {
            (0..shape.width() as usize)
                .map(|x| if shape.is_filled(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

// ============== Shape Tests ==============

#[test]
fn test_spawn_shapes() {
    assert_eq!(rows(&base_shape(PieceKind::I)), ["####"]);
    assert_eq!(rows(&base_shape(PieceKind::O)), ["##", "##"]);
    assert_eq!(rows(&base_shape(PieceKind::T)), [".#.", "###"]);
    assert_eq!(rows(&base_shape(PieceKind::S)), [".##", "##."]);
    assert_eq!(rows(&base_shape(PieceKind::Z)), ["##.", ".##"]);
    assert_eq!(rows(&base_shape(PieceKind::J)), ["#..", "###"]);
    assert_eq!(rows(&base_shape(PieceKind::L)), ["..#", "###"]);
}

#[test]
fn test_t_piece_rotations() {
    assert_eq!(rows(&get_shape(PieceKind::T, Rotation::East)), ["#.", "##", "#."]);
    assert_eq!(rows(&get_shape(PieceKind::T, Rotation::South)), ["###", ".#."]);
    assert_eq!(rows(&get_shape(PieceKind::T, Rotation::West)), [".#", "##", ".#"]);
}

#[test]
fn test_i_piece_rotations() {
    assert_eq!(
        rows(&get_shape(PieceKind::I, Rotation::East)),
        ["#", "#", "#", "#"]
    );
    assert_eq!(rows(&get_shape(PieceKind::I, Rotation::South)), ["####"]);
}

#[test]
fn test_s_j_l_rotate_clockwise() {
    assert_eq!(rows(&get_shape(PieceKind::S, Rotation::East)), ["#.", "##", ".#"]);
    assert_eq!(rows(&get_shape(PieceKind::J, Rotation::East)), ["##", "#.", "#."]);
    assert_eq!(rows(&get_shape(PieceKind::L, Rotation::East)), ["#.", "#.", "##"]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = base_shape(PieceKind::O);
    assert_eq!(rotate(&north), north);
}

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in PieceKind::ALL {
        let original = base_shape(kind);
        let mut shape = original;
        for _ in 0..4 {
            shape = rotate(&shape);
        }
        assert_eq!(shape, original, "{kind} should return to spawn orientation");
    }
}

#[test]
fn test_rotate_on_arbitrary_matrix() {
    let shape = Shape::from_rows(&[&[1, 0, 0], &[1, 1, 0], &[0, 0, 1]]);
    let turned = rotate(&shape);
    assert_eq!(rows(&turned), [".##", ".#.", "#.."]);
}

#[test]
fn test_rotation_matches_get_shape() {
    for kind in PieceKind::ALL {
        let mut rotation = Rotation::North;
        let mut shape = base_shape(kind);
        for _ in 0..4 {
            assert_eq!(get_shape(kind, rotation), shape);
            rotation = rotation.rotate_cw();
            shape = rotate(&shape);
        }
    }
}

#[test]
fn test_spawn_columns() {
    assert_eq!(spawn_x(PieceKind::I), 3);
    assert_eq!(spawn_x(PieceKind::O), 4);
    for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(spawn_x(kind), 4);
    }
}
