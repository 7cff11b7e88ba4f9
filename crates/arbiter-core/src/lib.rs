//! Core types for the chess arbiter.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceKind`], and [`Side`] for piece representation
//! - [`Square`], [`File`], [`Rank`], and [`Direction`] for board geometry
//! - [`MoveRequest`] and [`Wing`] for submitted moves
//! - [`MoveClassification`] and [`KingStatus`] for evaluation outcomes

mod outcome;
mod piece;
mod request;
mod side;
mod square;

pub use outcome::{KingStatus, MoveClassification};
pub use piece::{Piece, PieceKind};
pub use request::{MoveRequest, Wing};
pub use side::Side;
pub use square::{Direction, File, Rank, Square};
