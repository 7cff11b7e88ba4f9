//! King movement rule and the castling classifier.

use arbiter_core::{MoveClassification, Piece, PieceKind, Side, Square, Wing};

use super::{target_verdict, EvalMode, Verdict};
use crate::safety;
use crate::Board;

pub(super) fn evaluate(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    mode: EvalMode,
) -> Verdict {
    if !from.is_adjacent(to) {
        return Verdict::rejected(mode);
    }
    target_verdict(board, piece, to, mode)
}

/// Full castling legality for an explicit wing request.
///
/// Returns [`MoveClassification::Castling`] when every condition holds:
/// the wing's rights are intact, king and rook are unmoved on their home
/// squares, the squares between them are empty, and the king is neither in
/// check nor passing through or landing on an attacked square. Anything
/// less is [`MoveClassification::NotAllowed`].
pub fn castle_classification(board: &Board, side: Side, wing: Wing) -> MoveClassification {
    if !board.castling_rights().allows(side, wing) {
        return MoveClassification::NotAllowed;
    }

    let king_home = side.king_home();
    let rook_home = wing.rook_home(side);
    let king_ready = matches!(
        board.occupant_at(king_home),
        Some(occupant) if occupant.piece == Piece::new(PieceKind::King, side) && !occupant.moved
    );
    let rook_ready = matches!(
        board.occupant_at(rook_home),
        Some(occupant) if occupant.piece == Piece::new(PieceKind::Rook, side) && !occupant.moved
    );
    if !king_ready || !rook_ready {
        return MoveClassification::NotAllowed;
    }

    if king_home
        .squares_between(rook_home)
        .any(|square| !board.is_empty(square))
    {
        return MoveClassification::NotAllowed;
    }

    // The king may not castle out of, through, or into an attack.
    let enemy = side.opposite();
    let exposed = [king_home, wing.king_transit(side), wing.king_target(side)]
        .into_iter()
        .any(|square| !safety::attackers_of(board, square, enemy).is_empty());
    if exposed {
        return MoveClassification::NotAllowed;
    }

    MoveClassification::Castling
}
