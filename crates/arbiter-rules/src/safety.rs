//! King safety: attacker sets, speculative move probes, and status
//! resolution.

use arbiter_core::{Direction, KingStatus, MoveClassification, PieceKind, Side, Square, Wing};

use crate::board::{Board, PositionError};
use crate::rules::{self, EvalMode};

/// Returns every square from which a piece of `by` threatens `target`,
/// sorted by square index.
pub fn attackers_of(board: &Board, target: Square, by: Side) -> Vec<Square> {
    let mut attackers: Vec<Square> = board
        .occupants()
        .filter(|(_, occupant)| occupant.piece.side == by)
        .map(|(square, _)| square)
        .filter(|&square| rules::evaluate(board, square, target, EvalMode::AttackProbe).threatens())
        .collect();
    attackers.sort_unstable();
    attackers
}

/// Runs `probe` against a scratch board on which `from` -> `to` has been
/// applied, including en passant victim removal. The committed board is
/// never touched.
pub(crate) fn with_hypothetical_move<R>(
    board: &Board,
    from: Square,
    to: Square,
    probe: impl FnOnce(&Board) -> R,
) -> R {
    let mut scratch = board.clone();
    if let Some(mover) = scratch.lift(from) {
        if mover.piece.kind == PieceKind::Pawn {
            if let Some(victim) = rules::en_passant_victim(board, from, to, mover.piece.side) {
                scratch.lift(victim);
            }
        }
        scratch.put(to, mover);
    }
    probe(&scratch)
}

/// Returns true if playing `from` -> `to` would leave `side`'s own king
/// attacked.
///
/// A side without a king on the board has nothing to expose.
pub fn would_expose_own_king(board: &Board, from: Square, to: Square, side: Side) -> bool {
    with_hypothetical_move(board, from, to, |scratch| {
        match scratch.king_square(side) {
            Some(king) => !attackers_of(scratch, king, side.opposite()).is_empty(),
            None => false,
        }
    })
}

/// Resolves the safety status of `side`'s king.
///
/// A king under attack is in check unless no escape, capture of a lone
/// attacker, or interposition can lift the attack, in which case it is
/// checkmate. An unattacked king whose side has no legal move at all is
/// stalemate.
pub fn king_status(board: &Board, side: Side) -> Result<KingStatus, PositionError> {
    let king = board
        .king_square(side)
        .ok_or(PositionError::MissingKing(side))?;
    let attackers = attackers_of(board, king, side.opposite());

    if attackers.is_empty() {
        if king_has_move(board, side, king) || any_piece_can_move(board, side) {
            return Ok(KingStatus::Ok);
        }
        return Ok(KingStatus::Stalemate);
    }

    if king_has_move(board, side, king) {
        return Ok(KingStatus::Check);
    }
    // Capture and interposition only resolve a single attacker; against a
    // double check the king has to move.
    if let [attacker] = attackers.as_slice() {
        if can_capture_attacker(board, side, *attacker)
            || can_interpose(board, side, king, *attacker)
        {
            return Ok(KingStatus::Check);
        }
    }
    Ok(KingStatus::Checkmate)
}

/// A legal king move exists: an adjacent step that does not leave the king
/// attacked, or an available castle.
fn king_has_move(board: &Board, side: Side, king: Square) -> bool {
    let step_exists = Direction::ALL
        .iter()
        .filter_map(|&direction| king.towards(direction))
        .any(|to| {
            rules::evaluate(board, king, to, EvalMode::Play).is_playable()
                && !would_expose_own_king(board, king, to, side)
        });
    if step_exists {
        return true;
    }
    Wing::ALL
        .iter()
        .any(|&wing| rules::castle_classification(board, side, wing) == MoveClassification::Castling)
}

/// Some non-king piece can legally capture the lone attacker without
/// exposing the king, counting en passant against a freshly double-stepped
/// pawn.
fn can_capture_attacker(board: &Board, side: Side, attacker: Square) -> bool {
    board
        .occupants()
        .filter(|(_, occupant)| {
            occupant.piece.side == side && occupant.piece.kind != PieceKind::King
        })
        .any(|(from, occupant)| {
            if rules::evaluate(board, from, attacker, EvalMode::Play).is_playable()
                && !would_expose_own_king(board, from, attacker, side)
            {
                return true;
            }
            occupant.piece.kind == PieceKind::Pawn
                && en_passant_capture_of(board, from, side, attacker)
                    .map_or(false, |to| !would_expose_own_king(board, from, to, side))
        })
}

/// The destination square from which the pawn on `from` captures `victim`
/// en passant, if that capture is currently eligible.
fn en_passant_capture_of(board: &Board, from: Square, side: Side, victim: Square) -> Option<Square> {
    for file_delta in [-1i8, 1] {
        if let Some(to) = from.offset(file_delta, side.forward()) {
            if rules::en_passant_victim(board, from, to, side) == Some(victim) {
                return Some(to);
            }
        }
    }
    None
}

/// Some non-king piece can legally block a square between the lone sliding
/// attacker and the king without exposing the king. Contact and knight
/// checks cannot be interposed.
fn can_interpose(board: &Board, side: Side, king: Square, attacker: Square) -> bool {
    let sliding = board
        .piece_at(attacker)
        .map_or(false, |piece| piece.kind.is_sliding());
    if !sliding {
        return false;
    }
    attacker.squares_between(king).any(|gap| {
        board
            .occupants()
            .filter(|(_, occupant)| {
                occupant.piece.side == side && occupant.piece.kind != PieceKind::King
            })
            .any(|(from, _)| {
                rules::evaluate(board, from, gap, EvalMode::Play).is_playable()
                    && !would_expose_own_king(board, from, gap, side)
            })
    })
}

/// Exhaustive scan: some non-king piece of `side` has at least one legal,
/// non-exposing move.
fn any_piece_can_move(board: &Board, side: Side) -> bool {
    board
        .occupants()
        .filter(|(_, occupant)| {
            occupant.piece.side == side && occupant.piece.kind != PieceKind::King
        })
        .any(|(from, _)| {
            Square::all().any(|to| {
                rules::evaluate(board, from, to, EvalMode::Play).is_playable()
                    && !would_expose_own_king(board, from, to, side)
            })
        })
}
