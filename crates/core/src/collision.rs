//! Collision and rotation rules
//!
//! A piece collides when any of its four cells lies outside
//! `[0, width) x [0, rows)` or lands on an occupied cell. Everything else in
//! this module is built on that single check.
//!
//! Rotation is attempted at the same origin only. If the rotated cells collide
//! the rotation is rejected outright; no alternate offsets are searched.

use crate::board::Board;
use crate::pieces::{cells_for, spawn_position, Piece, PieceCells};
use crate::types::{PieceKind, Rotation};

/// Cells that could not be computed collide unconditionally
fn cells_collide(board: &Board, cells: Option<PieceCells>) -> bool {
    cells.map_or(true, |cells| cells.iter().any(|&(x, y)| !board.is_empty_at(x, y)))
}

/// True if `kind` at origin `(x, y)` in `rotation` overlaps a wall, the floor,
/// the ceiling or a locked cell
pub fn check_collision(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    cells_collide(board, cells_for(kind, x, y, i32::from(rotation.index())))
}

/// Collision check on untyped input
///
/// An unknown kind or an origin outside the coordinate range collides
/// unconditionally.
pub fn check_collision_raw(board: &Board, kind: u8, x: i32, y: i32, rotation_state: i32) -> bool {
    let Some(kind) = PieceKind::from_u8(kind) else {
        return true;
    };
    let (Ok(x), Ok(y)) = (i8::try_from(x), i8::try_from(y)) else {
        return true;
    };
    check_collision(board, kind, x, y, Rotation::from_index(rotation_state))
}

/// Check if the piece fits at its own coordinates
pub fn is_valid_position(board: &Board, piece: &Piece) -> bool {
    !cells_collide(board, piece.cells())
}

/// Check if piece can move by `(dx, dy)`
pub fn can_move(board: &Board, piece: &Piece, dx: i8, dy: i8) -> bool {
    piece
        .shifted(dx, dy)
        .is_some_and(|moved| is_valid_position(board, &moved))
}

/// Check if piece fits in `rotation` at the same origin
pub fn can_rotate(board: &Board, piece: &Piece, rotation: Rotation) -> bool {
    is_valid_position(board, &piece.with_rotation(rotation))
}

/// Check if the piece is resting on the floor or a locked cell
pub fn is_touching_floor(board: &Board, piece: &Piece) -> bool {
    !can_move(board, piece, 0, 1)
}

/// Check if a fresh piece of `kind` fits at its spawn origin
pub fn can_spawn(board: &Board, kind: PieceKind) -> bool {
    let (x, y) = spawn_position(kind);
    !check_collision(board, kind, x, y, Rotation::North)
}

/// Spawn check on an untyped kind; unknown kinds can never spawn
pub fn can_spawn_raw(board: &Board, kind: u8) -> bool {
    PieceKind::from_u8(kind).is_some_and(|kind| can_spawn(board, kind))
}

/// Try to shift the piece by `(dx, dy)`
/// Returns the moved piece, or None if the target collides
pub fn try_move(board: &Board, piece: &Piece, dx: i8, dy: i8) -> Option<Piece> {
    piece
        .shifted(dx, dy)
        .filter(|moved| is_valid_position(board, moved))
}

/// Try to rotate the piece one step in place (no wall kicks)
/// Returns the rotated piece, or None if the rotation is rejected
pub fn try_rotate(board: &Board, piece: &Piece, clockwise: bool) -> Option<Piece> {
    let rotation = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };

    can_rotate(board, piece, rotation).then(|| piece.with_rotation(rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, BOARD_WIDTH};

    fn piece(kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> Piece {
        Piece { kind, x, y, rotation }
    }

    #[test]
    fn test_empty_board_spawn_ok() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            assert!(can_spawn(&board, kind), "{kind:?} should spawn on empty board");
        }
    }

    #[test]
    fn test_unknown_kind_always_collides() {
        let board = Board::new();
        assert!(check_collision_raw(&board, 0, 4, 5, 0));
        assert!(check_collision_raw(&board, 8, 4, 5, 0));
        assert!(!check_collision_raw(&board, 3, 4, 5, 0));
        assert!(!can_spawn_raw(&board, 0));
        assert!(can_spawn_raw(&board, 7));
    }

    #[test]
    fn test_raw_out_of_range_origin_collides() {
        let board = Board::new();
        assert!(check_collision_raw(&board, 1, 300, 0, 0));
        assert!(check_collision_raw(&board, 1, 0, -300, 0));
    }

    #[test]
    fn test_origin_near_coordinate_limit_collides() {
        let board = Board::new();
        assert!(check_collision_raw(&board, 1, 126, 0, 0));
        assert!(check_collision_raw(&board, 1, 0, 126, 1));
        assert!(check_collision_raw(&board, 2, 127, 127, 0));
        assert!(check_collision(&board, PieceKind::T, 4, 127, Rotation::North));

        let p = piece(PieceKind::I, 0, 126, Rotation::North);
        assert!(!is_valid_position(&board, &p));
        assert!(!can_move(&board, &p, 0, 1));
        assert!(is_touching_floor(&board, &p));
        assert_eq!(try_rotate(&board, &p, true), None);
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::new();
        // I horizontal spans columns x..x+3
        assert!(!check_collision(&board, PieceKind::I, 0, 5, Rotation::North));
        assert!(check_collision(&board, PieceKind::I, -1, 5, Rotation::North));
        assert!(!check_collision(&board, PieceKind::I, 6, 5, Rotation::North));
        assert!(check_collision(&board, PieceKind::I, 7, 5, Rotation::North));
        // Horizontal I sits on row y+1
        assert!(!check_collision(&board, PieceKind::I, 0, 20, Rotation::North));
        assert!(check_collision(&board, PieceKind::I, 0, 21, Rotation::North));
    }

    #[test]
    fn test_is_touching_floor() {
        let board = Board::new();
        let resting = piece(PieceKind::O, 3, 20, Rotation::North);
        let falling = piece(PieceKind::O, 3, 10, Rotation::North);
        assert!(is_touching_floor(&board, &resting));
        assert!(!is_touching_floor(&board, &falling));

        let board = board.with_cell(4, 12, Some(PieceKind::L)).unwrap();
        assert!(is_touching_floor(&board, &falling));
    }

    #[test]
    fn test_try_move_blocked_by_stack() {
        let board = Board::new().with_cell(7, 11, Some(PieceKind::Z)).unwrap();
        let p = piece(PieceKind::O, 4, 10, Rotation::North);
        // O occupies columns 5-6 at rows 10-11
        assert_eq!(try_move(&board, &p, 1, 0), None);
        assert_eq!(try_move(&board, &p, -1, 0), Some(piece(PieceKind::O, 3, 10, Rotation::North)));
    }

    #[test]
    fn test_rotate_in_open_space() {
        let board = Board::new();
        let p = piece(PieceKind::T, 4, 10, Rotation::North);
        let rotated = try_rotate(&board, &p, true).unwrap();
        assert_eq!(rotated.rotation, Rotation::East);
        assert_eq!((rotated.x, rotated.y), (4, 10));

        let back = try_rotate(&board, &rotated, false).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_rotation_against_wall_is_not_kicked() {
        let board = Board::new();
        // Vertical I against the left wall: column x+2 == 0.
        let p = piece(PieceKind::I, -2, 10, Rotation::East);
        assert!(is_valid_position(&board, &p));
        // Horizontal would need columns -2..1.
        assert_eq!(try_rotate(&board, &p, true), None);
        assert_eq!(try_rotate(&board, &p, false), None);
    }

    #[test]
    fn test_rotation_rejected_for_every_kind_and_state() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            for state in 0..4 {
                let rotation = Rotation::from_index(state);
                let p = piece(kind, 3, 10, rotation);
                for clockwise in [true, false] {
                    let target = if clockwise { rotation.rotate_cw() } else { rotation.rotate_ccw() };
                    let own = p.cells().unwrap();
                    // Block a target cell that the current orientation does not use.
                    let blocker = p
                        .with_rotation(target)
                        .cells()
                        .unwrap()
                        .into_iter()
                        .find(|c| !own.contains(c))
                        .unwrap();
                    let board = Board::new()
                        .with_cell(blocker.0, blocker.1, Some(PieceKind::O))
                        .unwrap();

                    assert!(is_valid_position(&board, &p));
                    assert_eq!(try_rotate(&board, &p, clockwise), None, "{kind:?} {state} cw={clockwise}");
                }
            }
        }
    }

    #[test]
    fn test_full_hidden_rows_block_every_spawn() {
        let full: [Cell; BOARD_WIDTH as usize] = [Some(PieceKind::J); BOARD_WIDTH as usize];
        let board = Board::new().with_row(0, full).unwrap().with_row(1, full).unwrap();
        for kind in PieceKind::ALL {
            assert!(!can_spawn(&board, kind), "{kind:?} should be blocked");
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_piece() -> impl Strategy<Value = Piece> {
            (0usize..7, -3i8..12, -3i8..24, 0i32..4).prop_map(|(k, x, y, r)| Piece {
                kind: PieceKind::ALL[k],
                x,
                y,
                rotation: Rotation::from_index(r),
            })
        }

        proptest! {
            #[test]
            fn accepted_moves_stay_on_board(piece in arb_piece(), dx in -1i8..=1, dy in 0i8..=1) {
                let board = Board::new();
                if let Some(moved) = try_move(&board, &piece, dx, dy) {
                    let cells = moved.cells().unwrap();
                    prop_assert!(cells.iter().all(|&(x, y)| board.get(x, y).is_some()));
                    prop_assert_eq!((moved.x, moved.y), (piece.x + dx, piece.y + dy));
                }
            }

            #[test]
            fn rotation_never_moves_origin(piece in arb_piece(), clockwise in any::<bool>()) {
                let board = Board::new();
                if let Some(rotated) = try_rotate(&board, &piece, clockwise) {
                    prop_assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
                    prop_assert!(is_valid_position(&board, &rotated));
                }
            }

            #[test]
            fn raw_check_matches_typed(piece in arb_piece()) {
                let board = Board::new();
                prop_assert_eq!(
                    check_collision_raw(
                        &board,
                        piece.kind.as_u8(),
                        i32::from(piece.x),
                        i32::from(piece.y),
                        i32::from(piece.rotation.index()),
                    ),
                    !is_valid_position(&board, &piece)
                );
            }
        }
    }
}
