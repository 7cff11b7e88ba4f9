//! Knight movement rule.

use arbiter_core::{Piece, Square};

use super::{target_verdict, EvalMode, Verdict};
use crate::Board;

pub(super) fn evaluate(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    mode: EvalMode,
) -> Verdict {
    if !from.is_knight_leap(to) {
        return Verdict::rejected(mode);
    }
    // Knights jump: nothing between the squares matters.
    target_verdict(board, piece, to, mode)
}
