//! Board state: piece placement and the move metadata the rules read.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use arbiter_core::{File, Piece, PieceKind, Rank, Side, Square, Wing};
use thiserror::Error;

/// Errors raised by operations that must locate a king.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    /// The given side has no king on the board.
    #[error("no {0} king on the board")]
    MissingKing(Side),
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(side: Side, wing: Wing) -> u8 {
        let wing_bit = match wing {
            Wing::KingSide => 0,
            Wing::QueenSide => 1,
        };
        1u8 << (side.index() * 2 + wing_bit)
    }

    /// Returns true if the given side may still castle on the given wing.
    #[inline]
    pub const fn allows(self, side: Side, wing: Wing) -> bool {
        (self.0 & Self::flag(side, wing)) != 0
    }

    /// Grants one wing.
    #[inline]
    fn grant(&mut self, side: Side, wing: Wing) {
        self.0 |= Self::flag(side, wing);
    }

    /// Permanently revokes one wing.
    #[inline]
    pub fn revoke(&mut self, side: Side, wing: Wing) {
        self.0 &= !Self::flag(side, wing);
    }

    /// Permanently revokes both wings for a side.
    #[inline]
    pub fn revoke_side(&mut self, side: Side) {
        self.revoke(side, Wing::KingSide);
        self.revoke(side, Wing::QueenSide);
    }
}

/// A piece standing on a square, together with its move metadata.
///
/// The metadata lives inside the occupant record, so vacating a square
/// removes the flags along with the piece that owned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    /// The piece on the square.
    pub piece: Piece,
    /// Whether the piece has moved at any point in the game.
    pub moved: bool,
    /// True only while the piece is a pawn whose last move was a
    /// two-square advance.
    pub double_stepped: bool,
    /// The total move count at the moment the piece arrived here.
    pub arrived_turn: u32,
}

impl Occupant {
    fn starting(piece: Piece) -> Self {
        Occupant {
            piece,
            moved: false,
            double_stepped: false,
            arrived_turn: 0,
        }
    }
}

/// Piece placement plus the bookkeeping state the rules consult.
///
/// Mutation goes through the invariant-preserving methods in this module;
/// speculative evaluation works on clones and never touches a committed
/// board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Occupied squares only; empty squares are absent keys.
    squares: HashMap<Square, Occupant>,
    /// The placement the game started from.
    initial: HashMap<Square, Piece>,
    /// Castling rights.
    castling: CastlingRights,
    /// The side to move.
    turn: Side,
    /// Total moves committed by both sides.
    total_moves: u32,
    /// Moves committed per side.
    side_moves: [u32; 2],
}

impl Board {
    /// Creates a board with the standard starting placement, White to move.
    pub fn standard() -> Self {
        Self::from_placement(standard_placement())
    }

    /// Creates a board from an arbitrary placement.
    ///
    /// Castling rights are granted only where the king and the wing's rook
    /// both stand on their standard home squares.
    pub fn from_placement(placement: impl IntoIterator<Item = (Square, Piece)>) -> Self {
        let initial: HashMap<Square, Piece> = placement.into_iter().collect();
        let squares = initial
            .iter()
            .map(|(&square, &piece)| (square, Occupant::starting(piece)))
            .collect();
        let mut board = Board {
            squares,
            initial,
            castling: CastlingRights::NONE,
            turn: Side::White,
            total_moves: 0,
            side_moves: [0, 0],
        };
        board.castling = board.derive_castling_rights();
        board
    }

    fn derive_castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::NONE;
        for side in Side::ALL {
            let king = Piece::new(PieceKind::King, side);
            if self.piece_at(side.king_home()) != Some(king) {
                continue;
            }
            let rook = Piece::new(PieceKind::Rook, side);
            for wing in Wing::ALL {
                if self.piece_at(wing.rook_home(side)) == Some(rook) {
                    rights.grant(side, wing);
                }
            }
        }
        rights
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(&square).map(|occupant| occupant.piece)
    }

    /// Returns the full occupant record at the given square, if any.
    #[inline]
    pub fn occupant_at(&self, square: Square) -> Option<Occupant> {
        self.squares.get(&square).copied()
    }

    /// Returns true if the square is empty.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        !self.squares.contains_key(&square)
    }

    /// Returns the current placement, ordered by square index.
    pub fn placement(&self) -> BTreeMap<Square, Piece> {
        self.squares
            .iter()
            .map(|(&square, occupant)| (square, occupant.piece))
            .collect()
    }

    /// Returns the placement of one side's pieces, ordered by square index.
    pub fn pieces_of(&self, side: Side) -> BTreeMap<Square, Piece> {
        self.squares
            .iter()
            .filter(|(_, occupant)| occupant.piece.side == side)
            .map(|(&square, occupant)| (square, occupant.piece))
            .collect()
    }

    /// Iterates over occupied squares in arbitrary order.
    pub(crate) fn occupants(&self) -> impl Iterator<Item = (Square, &Occupant)> {
        self.squares.iter().map(|(&square, occupant)| (square, occupant))
    }

    /// Returns the square of the given side's king, if one is on the board.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        let king = Piece::new(PieceKind::King, side);
        self.squares
            .iter()
            .find(|(_, occupant)| occupant.piece == king)
            .map(|(&square, _)| square)
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the total number of committed moves.
    #[inline]
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Returns the number of moves committed by one side.
    #[inline]
    pub fn moves_by(&self, side: Side) -> u32 {
        self.side_moves[side.index()]
    }

    /// Returns true if the piece on the square has moved.
    ///
    /// False for empty squares.
    pub fn has_moved(&self, square: Square) -> bool {
        self.squares
            .get(&square)
            .map_or(false, |occupant| occupant.moved)
    }

    /// Returns true if the square holds a pawn whose last move was a
    /// two-square advance.
    pub fn double_stepped(&self, square: Square) -> bool {
        self.squares
            .get(&square)
            .map_or(false, |occupant| occupant.double_stepped)
    }

    /// Returns true if the square holds the unmoved piece the game
    /// started there.
    pub fn on_home_square(&self, square: Square) -> bool {
        match (self.squares.get(&square), self.initial.get(&square)) {
            (Some(occupant), Some(&piece)) => !occupant.moved && occupant.piece == piece,
            _ => false,
        }
    }

    /// Removes and returns the occupant of a square.
    pub(crate) fn lift(&mut self, square: Square) -> Option<Occupant> {
        self.squares.remove(&square)
    }

    /// Places an occupant, returning whatever it displaced.
    ///
    /// A displaced king or home-square rook loses its castling rights.
    pub(crate) fn put(&mut self, square: Square, occupant: Occupant) -> Option<Occupant> {
        let displaced = self.squares.insert(square, occupant);
        if let Some(victim) = displaced {
            self.revoke_rights_for(victim.piece, square);
        }
        displaced
    }

    /// Moves the occupant of `from` to `to`, stamping its metadata and
    /// revoking any castling rights tied to `from`. Returns the captured
    /// occupant, if any.
    ///
    /// The arrival stamp records the move counter before
    /// [`Board::bump_counters`] advances it. No-op when `from` is empty.
    pub(crate) fn relocate(
        &mut self,
        from: Square,
        to: Square,
        double_stepped: bool,
    ) -> Option<Occupant> {
        let mut occupant = match self.squares.remove(&from) {
            Some(occupant) => occupant,
            None => return None,
        };
        occupant.moved = true;
        occupant.double_stepped = double_stepped;
        occupant.arrived_turn = self.total_moves;
        self.revoke_rights_for(occupant.piece, from);
        self.put(to, occupant)
    }

    fn revoke_rights_for(&mut self, piece: Piece, square: Square) {
        match piece.kind {
            PieceKind::King => self.castling.revoke_side(piece.side),
            PieceKind::Rook => {
                for wing in Wing::ALL {
                    if square == wing.rook_home(piece.side) {
                        self.castling.revoke(piece.side, wing);
                    }
                }
            }
            _ => {}
        }
    }

    /// Advances the move counters for a committed move by `side`.
    pub(crate) fn bump_counters(&mut self, side: Side) {
        self.total_moves += 1;
        self.side_moves[side.index()] += 1;
    }

    /// Passes the turn to the other side.
    pub(crate) fn flip_turn(&mut self) {
        self.turn = self.turn.opposite();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank.to_char())?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, " {}", piece.letter())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

fn standard_placement() -> Vec<(Square, Piece)> {
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    let mut placement = Vec::with_capacity(32);
    for (index, &file) in File::ALL.iter().enumerate() {
        let kind = BACK_RANK[index];
        placement.push((
            Square::new(file, Rank::R1),
            Piece::new(kind, Side::White),
        ));
        placement.push((
            Square::new(file, Rank::R2),
            Piece::new(PieceKind::Pawn, Side::White),
        ));
        placement.push((
            Square::new(file, Rank::R7),
            Piece::new(PieceKind::Pawn, Side::Black),
        ));
        placement.push((
            Square::new(file, Rank::R8),
            Piece::new(kind, Side::Black),
        ));
    }
    placement
}
