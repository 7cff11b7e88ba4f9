//! Pawn movement rule: pushes, double steps, diagonal captures, en passant,
//! and promotion classification.

use arbiter_core::{MoveClassification, Piece, PieceKind, Side, Square};

use super::{EvalMode, Verdict};
use crate::Board;

pub(super) fn evaluate(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    mode: EvalMode,
) -> Verdict {
    let side = piece.side;
    let file_delta = from.file_delta(to);
    let rank_delta = from.rank_delta(to);
    let forward = side.forward();

    if mode == EvalMode::AttackProbe {
        // Pawns threaten exactly the two forward diagonals, occupied or not.
        if file_delta.abs() != 1 || rank_delta != forward {
            return Verdict::InvalidAttack;
        }
        return match board.piece_at(to) {
            Some(other) if other.kind == PieceKind::King && other.side != side => {
                Verdict::PartialCheck
            }
            _ => Verdict::ValidAttack,
        };
    }

    // Single push.
    if file_delta == 0 && rank_delta == forward {
        return if board.is_empty(to) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        };
    }

    // Double step, only from the pawn's starting square.
    if file_delta == 0 && rank_delta == 2 * forward {
        let hop = match from.offset(0, forward) {
            Some(square) => square,
            None => return Verdict::Invalid,
        };
        return if board.on_home_square(from) && board.is_empty(hop) && board.is_empty(to) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        };
    }

    // Diagonal: a capture, or an eligible en passant onto an empty square.
    if file_delta.abs() == 1 && rank_delta == forward {
        return match board.piece_at(to) {
            Some(other) if other.side == side => Verdict::Invalid,
            Some(other) if other.kind == PieceKind::King => Verdict::PartialCheck,
            Some(_) => Verdict::Valid,
            None => {
                if en_passant_victim(board, from, to, side).is_some() {
                    Verdict::Valid
                } else {
                    Verdict::Invalid
                }
            }
        };
    }

    Verdict::Invalid
}

pub(super) fn classify(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
) -> MoveClassification {
    if !evaluate(board, piece, from, to, EvalMode::Play).is_playable() {
        return MoveClassification::NotAllowed;
    }
    if to.rank() == piece.side.promotion_rank() {
        return MoveClassification::Promotion;
    }
    if from.rank_delta(to) == 2 * piece.side.forward() {
        return MoveClassification::PawnDoubleStep;
    }
    if from.file_delta(to) != 0 && board.is_empty(to) {
        return MoveClassification::EnPassant;
    }
    MoveClassification::Normal
}

/// Returns the square of the pawn captured en passant by `from` -> `to`,
/// when that capture is eligible right now.
///
/// Eligibility: the mover stands on its fifth rank and steps diagonally to
/// an empty sixth-rank square, and the square behind the destination holds
/// an enemy pawn whose double step was the immediately preceding move.
pub(crate) fn en_passant_victim(
    board: &Board,
    from: Square,
    to: Square,
    side: Side,
) -> Option<Square> {
    if from.rank() != side.nth_rank(5) || to.rank() != side.nth_rank(6) {
        return None;
    }
    if from.file_delta(to).abs() != 1 || from.rank_delta(to) != side.forward() {
        return None;
    }
    if !board.is_empty(to) {
        return None;
    }
    let victim_square = to.offset(0, -side.forward())?;
    let victim = board.occupant_at(victim_square)?;
    let enemy_pawn = victim.piece.kind == PieceKind::Pawn && victim.piece.side != side;
    let just_double_stepped =
        victim.double_stepped && victim.arrived_turn + 1 == board.total_moves();
    if enemy_pawn && just_double_stepped {
        Some(victim_square)
    } else {
        None
    }
}
