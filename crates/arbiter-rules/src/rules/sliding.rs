//! Shared movement rule for the sliding pieces: rook, bishop, and queen.

use arbiter_core::{Direction, Piece, PieceKind, Square};

use super::{target_verdict, EvalMode, Verdict};
use crate::Board;

pub(super) fn evaluate(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    mode: EvalMode,
) -> Verdict {
    match from.direction_to(to) {
        Some(direction) if permits(piece.kind, direction) => {}
        _ => return Verdict::rejected(mode),
    }
    for between in from.squares_between(to) {
        if let Some(blocker) = board.piece_at(between) {
            // A probe ray passes through the defending king so the king
            // cannot shield the squares behind itself.
            let transparent = mode == EvalMode::AttackProbe
                && blocker.kind == PieceKind::King
                && blocker.side != piece.side;
            if !transparent {
                return Verdict::rejected(mode);
            }
        }
    }
    target_verdict(board, piece, to, mode)
}

fn permits(kind: PieceKind, direction: Direction) -> bool {
    match kind {
        PieceKind::Rook => direction.is_orthogonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate as dispatch;
    use arbiter_core::Side;
    use proptest::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn piece(kind: PieceKind, side: Side) -> Piece {
        Piece::new(kind, side)
    }

    #[test]
    fn rook_moves_along_ranks_and_files() {
        let board = Board::from_placement([(sq("d4"), piece(PieceKind::Rook, Side::White))]);
        assert_eq!(dispatch(&board, sq("d4"), sq("d8"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("d4"), sq("a4"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("d4"), sq("e5"), EvalMode::Play), Verdict::Invalid);
        assert_eq!(dispatch(&board, sq("d4"), sq("e6"), EvalMode::Play), Verdict::Invalid);
    }

    #[test]
    fn bishop_moves_along_diagonals() {
        let board = Board::from_placement([(sq("c1"), piece(PieceKind::Bishop, Side::White))]);
        assert_eq!(dispatch(&board, sq("c1"), sq("h6"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("c1"), sq("a3"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("c1"), sq("c4"), EvalMode::Play), Verdict::Invalid);
    }

    #[test]
    fn queen_moves_along_any_line() {
        let board = Board::from_placement([(sq("d1"), piece(PieceKind::Queen, Side::White))]);
        assert_eq!(dispatch(&board, sq("d1"), sq("d7"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("d1"), sq("h5"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("d1"), sq("e3"), EvalMode::Play), Verdict::Invalid);
    }

    #[test]
    fn blockers_stop_the_ray() {
        let board = Board::from_placement([
            (sq("a1"), piece(PieceKind::Rook, Side::White)),
            (sq("a4"), piece(PieceKind::Pawn, Side::White)),
            (sq("a6"), piece(PieceKind::Pawn, Side::Black)),
        ]);
        assert_eq!(dispatch(&board, sq("a1"), sq("a3"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("a1"), sq("a4"), EvalMode::Play), Verdict::Invalid);
        assert_eq!(dispatch(&board, sq("a1"), sq("a6"), EvalMode::Play), Verdict::Invalid);
        // Probe mode blocks on ordinary pieces just the same.
        assert_eq!(
            dispatch(&board, sq("a1"), sq("a6"), EvalMode::AttackProbe),
            Verdict::InvalidAttack
        );
    }

    #[test]
    fn capture_and_own_piece_destinations() {
        let board = Board::from_placement([
            (sq("a1"), piece(PieceKind::Rook, Side::White)),
            (sq("a5"), piece(PieceKind::Knight, Side::Black)),
            (sq("h1"), piece(PieceKind::Knight, Side::White)),
        ]);
        assert_eq!(dispatch(&board, sq("a1"), sq("a5"), EvalMode::Play), Verdict::Valid);
        assert_eq!(dispatch(&board, sq("a1"), sq("h1"), EvalMode::Play), Verdict::Invalid);
        // Probing a defended own piece still counts as an attack.
        assert_eq!(
            dispatch(&board, sq("a1"), sq("h1"), EvalMode::AttackProbe),
            Verdict::ValidAttack
        );
    }

    #[test]
    fn enemy_king_on_the_ray_is_a_partial_check() {
        let board = Board::from_placement([
            (sq("e1"), piece(PieceKind::Rook, Side::White)),
            (sq("e8"), piece(PieceKind::King, Side::Black)),
        ]);
        assert_eq!(
            dispatch(&board, sq("e1"), sq("e8"), EvalMode::Play),
            Verdict::PartialCheck
        );
        assert_eq!(
            dispatch(&board, sq("e1"), sq("e8"), EvalMode::AttackProbe),
            Verdict::PartialCheck
        );
    }

    #[test]
    fn probe_ray_passes_through_the_defending_king() {
        let board = Board::from_placement([
            (sq("e1"), piece(PieceKind::Rook, Side::Black)),
            (sq("g1"), piece(PieceKind::King, Side::White)),
        ]);
        // h1 lies behind the white king on the black rook's ray.
        assert_eq!(
            dispatch(&board, sq("e1"), sq("h1"), EvalMode::AttackProbe),
            Verdict::ValidAttack
        );
        // As a real move the king blocks the ray.
        assert_eq!(dispatch(&board, sq("e1"), sq("h1"), EvalMode::Play), Verdict::Invalid);
    }

    #[test]
    fn probe_ray_is_blocked_by_the_attackers_own_king() {
        let board = Board::from_placement([
            (sq("e1"), piece(PieceKind::Rook, Side::Black)),
            (sq("g1"), piece(PieceKind::King, Side::Black)),
        ]);
        assert_eq!(
            dispatch(&board, sq("e1"), sq("h1"), EvalMode::AttackProbe),
            Verdict::InvalidAttack
        );
    }

    proptest! {
        #[test]
        fn lone_slider_verdict_matches_ray_geometry(
            kind_index in 0usize..3,
            from_index in 0u8..64,
            to_index in 0u8..64,
        ) {
            let kind = [PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen][kind_index];
            let from = Square::from_index(from_index).unwrap();
            let to = Square::from_index(to_index).unwrap();
            prop_assume!(from != to);

            let board = Board::from_placement([(from, Piece::new(kind, Side::White))]);
            let expected = match from.direction_to(to) {
                Some(direction) => super::permits(kind, direction),
                None => false,
            };
            prop_assert_eq!(
                dispatch(&board, from, to, EvalMode::Play).is_playable(),
                expected
            );
        }
    }
}
