//! Evaluation outcomes reported by the rules engine.

use std::fmt;

/// The category assigned to a committed or rejected move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveClassification {
    /// An ordinary move onto an empty square.
    Normal,
    /// A move that captured an enemy piece on its destination.
    Capture,
    /// A pawn's initial two-square advance.
    PawnDoubleStep,
    /// An en passant capture.
    EnPassant,
    /// A completed castling move.
    Castling,
    /// A pawn reached its promotion rank; the game pauses for the upgrade.
    Promotion,
    /// The request was rejected; nothing changed.
    NotAllowed,
}

impl MoveClassification {
    /// Returns true unless the request was rejected.
    #[inline]
    pub const fn is_allowed(self) -> bool {
        !matches!(self, MoveClassification::NotAllowed)
    }
}

impl fmt::Display for MoveClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveClassification::Normal => "normal",
            MoveClassification::Capture => "capture",
            MoveClassification::PawnDoubleStep => "pawn double step",
            MoveClassification::EnPassant => "en passant",
            MoveClassification::Castling => "castling",
            MoveClassification::Promotion => "promotion",
            MoveClassification::NotAllowed => "not allowed",
        };
        write!(f, "{}", name)
    }
}

/// The safety status of one side's king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KingStatus {
    /// Not attacked; the side has at least one legal move.
    Ok,
    /// Attacked, with at least one legal way out.
    Check,
    /// Attacked with no legal way out.
    Checkmate,
    /// Not attacked, but the side has no legal move at all.
    Stalemate,
}

impl KingStatus {
    /// Returns true if the king is currently attacked.
    #[inline]
    pub const fn is_attacked(self) -> bool {
        matches!(self, KingStatus::Check | KingStatus::Checkmate)
    }

    /// Returns true if the status ends the game.
    #[inline]
    pub const fn ends_game(self) -> bool {
        matches!(self, KingStatus::Checkmate | KingStatus::Stalemate)
    }
}

impl fmt::Display for KingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KingStatus::Ok => "ok",
            KingStatus::Check => "check",
            KingStatus::Checkmate => "checkmate",
            KingStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_classifications() {
        assert!(MoveClassification::Normal.is_allowed());
        assert!(MoveClassification::Capture.is_allowed());
        assert!(MoveClassification::EnPassant.is_allowed());
        assert!(MoveClassification::Promotion.is_allowed());
        assert!(!MoveClassification::NotAllowed.is_allowed());
    }

    #[test]
    fn status_predicates() {
        assert!(!KingStatus::Ok.is_attacked());
        assert!(KingStatus::Check.is_attacked());
        assert!(KingStatus::Checkmate.is_attacked());
        assert!(!KingStatus::Stalemate.is_attacked());

        assert!(!KingStatus::Ok.ends_game());
        assert!(!KingStatus::Check.ends_game());
        assert!(KingStatus::Checkmate.ends_game());
        assert!(KingStatus::Stalemate.ends_game());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", MoveClassification::PawnDoubleStep), "pawn double step");
        assert_eq!(format!("{}", KingStatus::Checkmate), "checkmate");
    }
}
