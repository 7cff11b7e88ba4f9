//! Chess rules arbitration: movement law, hazard detection, and full
//! game orchestration.
//!
//! This crate provides:
//! - [`Board`] - piece placement plus the move metadata the rules read
//! - [`Game`] - validated move application, scoring, and history
//! - [`rules`] - per-piece movement law with play and attack-probe modes
//! - [`safety`] - attack detection, pin-aware legality, and king status
//!
//! # Architecture
//!
//! Movement law is split per piece family and evaluated in one of two
//! modes: play mode answers "may this piece make this move", probe mode
//! answers "does this piece threaten that square". Hazard questions
//! (check, checkmate, stalemate) are settled by replaying candidate
//! moves on a scratch clone of the board; committed state is never
//! mutated speculatively.
//!
//! # Example
//!
//! ```
//! use arbiter_core::{KingStatus, MoveClassification, MoveRequest, Side, Square};
//! use arbiter_rules::Game;
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert_eq!(
//!     game.apply(Side::White, MoveRequest::standard(e2, e4)),
//!     MoveClassification::PawnDoubleStep,
//! );
//! assert_eq!(game.turn(), Side::Black);
//! assert_eq!(game.king_status(Side::Black), Ok(KingStatus::Ok));
//! ```

mod board;
mod game;
pub mod rules;
pub mod safety;

pub use board::{Board, CastlingRights, Occupant, PositionError};
pub use game::{Game, PendingPromotion, PlayedMove, RuleToggles};
pub use rules::{castle_classification, classify, evaluate, EvalMode, Verdict};
pub use safety::{attackers_of, king_status, would_expose_own_king};
