//! Player side representation.

use crate::{File, Rank, Square};

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    /// Both sides in order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// Returns the opposite side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank direction pawns advance in (+1 for White, -1 for Black).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Returns the nth rank counted from this side's edge of the board.
    ///
    /// `nth_rank(1)` is the back rank, `nth_rank(8)` the promotion rank.
    /// `n` must be in 1-8.
    #[inline]
    pub const fn nth_rank(self, n: u8) -> Rank {
        let index = match self {
            Side::White => n - 1,
            Side::Black => 8 - n,
        };
        Rank::ALL[index as usize]
    }

    /// Returns the back rank for this side (rank 1 for White, 8 for Black).
    #[inline]
    pub const fn back_rank(self) -> Rank {
        self.nth_rank(1)
    }

    /// Returns the rank on which this side's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> Rank {
        self.nth_rank(8)
    }

    /// Returns the square this side's king starts the game on.
    #[inline]
    pub const fn king_home(self) -> Square {
        Square::new(File::E, self.back_rank())
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}
