//! Move request representation.

use std::fmt;

use crate::{File, Side, Square};

/// The two wings a king may castle on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    KingSide,
    QueenSide,
}

impl Wing {
    /// Both wings in order.
    pub const ALL: [Wing; 2] = [Wing::KingSide, Wing::QueenSide];

    /// Returns the square the wing's rook starts the game on.
    #[inline]
    pub const fn rook_home(self, side: Side) -> Square {
        let file = match self {
            Wing::KingSide => File::H,
            Wing::QueenSide => File::A,
        };
        Square::new(file, side.back_rank())
    }

    /// Returns the square the king lands on when castling on this wing.
    #[inline]
    pub const fn king_target(self, side: Side) -> Square {
        let file = match self {
            Wing::KingSide => File::G,
            Wing::QueenSide => File::C,
        };
        Square::new(file, side.back_rank())
    }

    /// Returns the square the rook lands on when castling on this wing.
    #[inline]
    pub const fn rook_target(self, side: Side) -> Square {
        let file = match self {
            Wing::KingSide => File::F,
            Wing::QueenSide => File::D,
        };
        Square::new(file, side.back_rank())
    }

    /// Returns the square the king passes through when castling on this wing.
    #[inline]
    pub const fn king_transit(self, side: Side) -> Square {
        let file = match self {
            Wing::KingSide => File::F,
            Wing::QueenSide => File::D,
        };
        Square::new(file, side.back_rank())
    }
}

impl fmt::Display for Wing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wing::KingSide => write!(f, "kingside"),
            Wing::QueenSide => write!(f, "queenside"),
        }
    }
}

/// A move submitted for evaluation.
///
/// Castling is requested explicitly by wing rather than being encoded as a
/// special from/to pair, so the two-piece move never collides with an
/// ordinary king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRequest {
    /// Move the piece standing on `from` to `to`.
    Standard { from: Square, to: Square },
    /// Castle on the given wing.
    Castle(Wing),
}

impl MoveRequest {
    /// Creates a standard from/to request.
    #[inline]
    pub const fn standard(from: Square, to: Square) -> Self {
        MoveRequest::Standard { from, to }
    }

    /// Creates a castling request.
    #[inline]
    pub const fn castle(wing: Wing) -> Self {
        MoveRequest::Castle(wing)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRequest::Standard { from, to } => write!(f, "{}{}", from, to),
            MoveRequest::Castle(Wing::KingSide) => write!(f, "O-O"),
            MoveRequest::Castle(Wing::QueenSide) => write!(f, "O-O-O"),
        }
    }
}
