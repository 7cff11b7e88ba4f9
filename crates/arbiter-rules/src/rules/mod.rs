//! Per-piece movement rules.
//!
//! Every rule answers one of two questions about the piece standing on a
//! square, selected by [`EvalMode`]:
//!
//! - [`EvalMode::Play`]: may this piece actually move to the target?
//! - [`EvalMode::AttackProbe`]: does this piece threaten the target?
//!
//! The two differ where chess itself treats movement and attack
//! differently: pawns advance straight but capture diagonally, and in probe
//! mode a sliding ray passes through the defending king so the king cannot
//! shield squares behind itself.

mod king;
mod knight;
mod pawn;
mod sliding;

pub use king::castle_classification;
pub(crate) use pawn::en_passant_victim;

use arbiter_core::{MoveClassification, Piece, PieceKind, Square};

use crate::Board;

/// How a legality question is being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// A real move attempt: occupancy, blocking, and turn-independent
    /// legality all apply.
    Play,
    /// An attack probe: target occupancy is ignored and the defending
    /// king is transparent to sliding rays.
    AttackProbe,
}

/// The outcome of a single rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The move may be played.
    Valid,
    /// The target square is threatened.
    ValidAttack,
    /// The move may not be played.
    Invalid,
    /// The target square is not threatened.
    InvalidAttack,
    /// The target holds the enemy king: never playable as a capture, but
    /// the square counts as attacked.
    PartialCheck,
}

impl Verdict {
    /// The rejection verdict for the given mode.
    #[inline]
    pub(crate) const fn rejected(mode: EvalMode) -> Self {
        match mode {
            EvalMode::Play => Verdict::Invalid,
            EvalMode::AttackProbe => Verdict::InvalidAttack,
        }
    }

    /// Returns true if the evaluated move may actually be played.
    #[inline]
    pub const fn is_playable(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Returns true if the evaluated square counts as attacked.
    #[inline]
    pub const fn threatens(self) -> bool {
        matches!(self, Verdict::ValidAttack | Verdict::PartialCheck)
    }
}

/// Evaluates the piece standing on `from` against the target square `to`.
///
/// Returns the rejection verdict for the mode when `from` is empty. Turn
/// order is not checked here; that belongs to the game layer.
pub fn evaluate(board: &Board, from: Square, to: Square, mode: EvalMode) -> Verdict {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return Verdict::rejected(mode),
    };
    match piece.kind {
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
            sliding::evaluate(board, piece, from, to, mode)
        }
        PieceKind::Knight => knight::evaluate(board, piece, from, to, mode),
        PieceKind::King => king::evaluate(board, piece, from, to, mode),
        PieceKind::Pawn => pawn::evaluate(board, piece, from, to, mode),
    }
}

/// Classifies a standard from/to move of the piece on `from`.
///
/// Yields the category a legal move would commit as, or
/// [`MoveClassification::NotAllowed`]. Castling never appears here: it is
/// requested explicitly and classified by [`castle_classification`].
pub fn classify(board: &Board, from: Square, to: Square) -> MoveClassification {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return MoveClassification::NotAllowed,
    };
    match piece.kind {
        PieceKind::Pawn => pawn::classify(board, piece, from, to),
        _ => {
            if evaluate(board, from, to, EvalMode::Play).is_playable() {
                MoveClassification::Normal
            } else {
                MoveClassification::NotAllowed
            }
        }
    }
}

/// Destination handling shared by the non-pawn rules: an enemy king is
/// reported as a partial check, anything else resolves by occupancy.
fn target_verdict(board: &Board, piece: Piece, to: Square, mode: EvalMode) -> Verdict {
    let target = board.piece_at(to);
    if let Some(other) = target {
        if other.kind == PieceKind::King && other.side != piece.side {
            return Verdict::PartialCheck;
        }
    }
    match mode {
        EvalMode::AttackProbe => Verdict::ValidAttack,
        EvalMode::Play => match target {
            None => Verdict::Valid,
            Some(other) if other.side != piece.side => Verdict::Valid,
            Some(_) => Verdict::Invalid,
        },
    }
}
