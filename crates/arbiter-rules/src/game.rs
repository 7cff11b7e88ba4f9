//! Full game orchestration: validated move application, the promotion
//! pause, scoring, and history.

use std::collections::{BTreeMap, BTreeSet};

use arbiter_core::{
    KingStatus, MoveClassification, MoveRequest, Piece, PieceKind, Side, Square, Wing,
};

use crate::board::{Board, CastlingRights, Occupant, PositionError};
use crate::rules::{self, EvalMode};
use crate::safety;

/// Switches for setup tooling that needs to arrange positions without
/// being bound by normal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleToggles {
    /// Reject out-of-turn moves and pass the turn on every commit.
    pub enforce_turn_order: bool,
    /// Reject moves that would leave the mover's own king attacked.
    pub enforce_king_safety: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        RuleToggles {
            enforce_turn_order: true,
            enforce_king_safety: true,
        }
    }
}

/// A promotion awaiting its piece choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    /// The square the pawn still stands on.
    pub from: Square,
    /// The promotion-rank square the pawn moved against.
    pub to: Square,
}

/// A committed move as recorded in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    /// The side that moved.
    pub side: Side,
    /// Source square (the king's, for castling).
    pub from: Square,
    /// Destination square (the king's, for castling).
    pub to: Square,
    /// What the move committed as.
    pub classification: MoveClassification,
    /// White's king status after the move; `None` if White has no king.
    pub white_status: Option<KingStatus>,
    /// Black's king status after the move; `None` if Black has no king.
    pub black_status: Option<KingStatus>,
}

/// A complete game: board state plus the orchestration that validates
/// requests, keeps score, and records history.
///
/// Every request resolves to a [`MoveClassification`]; rejected requests
/// return [`MoveClassification::NotAllowed`] and leave the game untouched.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    toggles: RuleToggles,
    scores: [u32; 2],
    pending: [Vec<PendingPromotion>; 2],
    history: Vec<PlayedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// Creates a game from an arbitrary placement.
    ///
    /// Castling rights derive from home-square occupancy, as in
    /// [`Board::from_placement`].
    pub fn from_placement(placement: impl IntoIterator<Item = (Square, Piece)>) -> Self {
        Self::from_board(Board::from_placement(placement))
    }

    fn from_board(board: Board) -> Self {
        Game {
            board,
            toggles: RuleToggles::default(),
            scores: [0, 0],
            pending: [Vec::new(), Vec::new()],
            history: Vec::new(),
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the active rule toggles.
    pub fn toggles(&self) -> RuleToggles {
        self.toggles
    }

    /// Replaces the rule toggles.
    pub fn set_toggles(&mut self, toggles: RuleToggles) {
        self.toggles = toggles;
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Side {
        self.board.turn()
    }

    /// Returns the piece at the given square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Returns the current placement, ordered by square index.
    pub fn placement(&self) -> BTreeMap<Square, Piece> {
        self.board.placement()
    }

    /// Returns one side's pieces, ordered by square index.
    pub fn pieces_of(&self, side: Side) -> BTreeMap<Square, Piece> {
        self.board.pieces_of(side)
    }

    /// Returns the castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.board.castling_rights()
    }

    /// Returns the capture points accumulated by a side.
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Returns the committed move history, oldest first.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Returns a side's promotions awaiting their piece choice.
    pub fn pending_promotions(&self, side: Side) -> &[PendingPromotion] {
        &self.pending[side.index()]
    }

    /// Returns true while a promotion awaits its piece choice; all move
    /// requests are rejected until then.
    pub fn is_paused(&self) -> bool {
        self.pending.iter().any(|list| !list.is_empty())
    }

    /// Resolves the king status of a side on the current board.
    pub fn king_status(&self, side: Side) -> Result<KingStatus, PositionError> {
        safety::king_status(&self.board, side)
    }

    /// Returns every destination [`Game::apply`] would accept for the
    /// piece of `side` on `from`, castling targets included.
    ///
    /// Turn order deliberately does not gate this query; the pause does.
    pub fn legal_destinations(&self, side: Side, from: Square) -> BTreeSet<Square> {
        let mut destinations = BTreeSet::new();
        if self.is_paused() {
            return destinations;
        }
        let piece = match self.board.piece_at(from) {
            Some(piece) if piece.side == side => piece,
            _ => return destinations,
        };
        for to in Square::all() {
            if rules::evaluate(&self.board, from, to, EvalMode::Play).is_playable()
                && !self.exposes_king(from, to, side)
            {
                destinations.insert(to);
            }
        }
        if piece.kind == PieceKind::King {
            for wing in Wing::ALL {
                if rules::castle_classification(&self.board, side, wing)
                    == MoveClassification::Castling
                {
                    destinations.insert(wing.king_target(side));
                }
            }
        }
        destinations
    }

    /// Applies `side`'s move request.
    ///
    /// On success the move is committed, scored, and recorded, and the
    /// returned classification says what it committed as. On any failure
    /// the game is left exactly as it was and
    /// [`MoveClassification::NotAllowed`] is returned.
    pub fn apply(&mut self, side: Side, request: MoveRequest) -> MoveClassification {
        if self.is_paused() {
            return MoveClassification::NotAllowed;
        }
        if self.toggles.enforce_turn_order && side != self.board.turn() {
            return MoveClassification::NotAllowed;
        }
        match request {
            MoveRequest::Castle(wing) => self.apply_castle(side, wing),
            MoveRequest::Standard { from, to } => self.apply_standard(side, from, to),
        }
    }

    /// Completes a pending promotion of `side` whose pawn or destination
    /// square is `square`, placing a piece of `kind`.
    ///
    /// Returns false, changing nothing, when no pending entry matches,
    /// `kind` is not a promotion choice, or the upgrade would leave the
    /// side's king attacked.
    pub fn promote_pending(&mut self, side: Side, square: Square, kind: PieceKind) -> bool {
        if !kind.is_promotion_choice() {
            return false;
        }
        let index = match self.pending[side.index()]
            .iter()
            .position(|entry| entry.from == square || entry.to == square)
        {
            Some(index) => index,
            None => return false,
        };
        let entry = self.pending[side.index()][index];
        if self.board.piece_at(entry.from) != Some(Piece::new(PieceKind::Pawn, side)) {
            return false;
        }
        // The upgraded piece occupies the same square the pawn aimed at, so
        // probing the pawn's own move asks exactly the right question.
        if self.toggles.enforce_king_safety
            && safety::would_expose_own_king(&self.board, entry.from, entry.to, side)
        {
            return false;
        }

        self.pending[side.index()].remove(index);
        self.board.lift(entry.from);
        let upgraded = Occupant {
            piece: Piece::new(kind, side),
            moved: true,
            double_stepped: false,
            arrived_turn: self.board.total_moves(),
        };
        if let Some(victim) = self.board.put(entry.to, upgraded) {
            self.scores[side.index()] += victim.piece.point_value();
        }
        self.refresh_promotion_record(side, entry);
        true
    }

    fn apply_castle(&mut self, side: Side, wing: Wing) -> MoveClassification {
        if rules::castle_classification(&self.board, side, wing) != MoveClassification::Castling {
            return MoveClassification::NotAllowed;
        }
        let king_home = side.king_home();
        let king_target = wing.king_target(side);
        self.board.relocate(king_home, king_target, false);
        self.board
            .relocate(wing.rook_home(side), wing.rook_target(side), false);
        self.close_move(side);
        self.record(side, king_home, king_target, MoveClassification::Castling)
    }

    fn apply_standard(&mut self, side: Side, from: Square, to: Square) -> MoveClassification {
        match self.board.piece_at(from) {
            Some(piece) if piece.side == side => {}
            _ => return MoveClassification::NotAllowed,
        }
        match rules::classify(&self.board, from, to) {
            MoveClassification::Normal => self.commit_plain(side, from, to, MoveClassification::Normal),
            MoveClassification::PawnDoubleStep => {
                self.commit_plain(side, from, to, MoveClassification::PawnDoubleStep)
            }
            MoveClassification::EnPassant => self.commit_en_passant(side, from, to),
            MoveClassification::Promotion => self.request_promotion(side, from, to),
            MoveClassification::NotAllowed
            | MoveClassification::Capture
            | MoveClassification::Castling => MoveClassification::NotAllowed,
        }
    }

    fn commit_plain(
        &mut self,
        side: Side,
        from: Square,
        to: Square,
        classification: MoveClassification,
    ) -> MoveClassification {
        if self.exposes_king(from, to, side) {
            return MoveClassification::NotAllowed;
        }
        let double_stepped = classification == MoveClassification::PawnDoubleStep;
        let captured = self.board.relocate(from, to, double_stepped);
        self.close_move(side);
        let classification = match captured {
            Some(victim) => {
                self.scores[side.index()] += victim.piece.point_value();
                MoveClassification::Capture
            }
            None => classification,
        };
        self.record(side, from, to, classification)
    }

    fn commit_en_passant(&mut self, side: Side, from: Square, to: Square) -> MoveClassification {
        if self.exposes_king(from, to, side) {
            return MoveClassification::NotAllowed;
        }
        let victim_square = match rules::en_passant_victim(&self.board, from, to, side) {
            Some(square) => square,
            None => return MoveClassification::NotAllowed,
        };
        if let Some(victim) = self.board.lift(victim_square) {
            self.scores[side.index()] += victim.piece.point_value();
        }
        self.board.relocate(from, to, false);
        self.close_move(side);
        self.record(side, from, to, MoveClassification::EnPassant)
    }

    fn request_promotion(&mut self, side: Side, from: Square, to: Square) -> MoveClassification {
        if self.exposes_king(from, to, side) {
            return MoveClassification::NotAllowed;
        }
        // The pawn stays put until the upgrade names a piece; the move
        // still consumes this side's turn.
        self.pending[side.index()].push(PendingPromotion { from, to });
        self.close_move(side);
        self.record(side, from, to, MoveClassification::Promotion)
    }

    fn exposes_king(&self, from: Square, to: Square, side: Side) -> bool {
        self.toggles.enforce_king_safety
            && safety::would_expose_own_king(&self.board, from, to, side)
    }

    fn close_move(&mut self, side: Side) {
        self.board.bump_counters(side);
        if self.toggles.enforce_turn_order {
            self.board.flip_turn();
        }
    }

    fn record(
        &mut self,
        side: Side,
        from: Square,
        to: Square,
        classification: MoveClassification,
    ) -> MoveClassification {
        let white_status = safety::king_status(&self.board, Side::White).ok();
        let black_status = safety::king_status(&self.board, Side::Black).ok();
        self.history.push(PlayedMove {
            side,
            from,
            to,
            classification,
            white_status,
            black_status,
        });
        classification
    }

    /// A completed promotion changes the board after its history entry was
    /// written; bring that entry's statuses up to date.
    fn refresh_promotion_record(&mut self, side: Side, entry: PendingPromotion) {
        let white_status = safety::king_status(&self.board, Side::White).ok();
        let black_status = safety::king_status(&self.board, Side::Black).ok();
        if let Some(played) = self.history.iter_mut().rev().find(|played| {
            played.side == side
                && played.classification == MoveClassification::Promotion
                && played.from == entry.from
                && played.to == entry.to
        }) {
            played.white_status = white_status;
            played.black_status = black_status;
        }
    }
}
