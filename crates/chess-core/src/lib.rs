//! Core types for chess-family games.
//!
//! This crate provides the fundamental types used by the rule engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Coord`] for 1-based cell coordinates on boards of any size
//! - [`Pattern`], [`Stride`] and [`MoveType`] for movement capability
//! - [`Move`] for move representation
//! - FEN / X-FEN parsing and serialization

mod color;
pub mod coord;
mod fen;
mod mov;
pub mod movement;
mod piece;

pub use color::Color;
pub use coord::Coord;
pub use fen::{FenError, FenParser};
pub use mov::{CastleSide, Move, MoveFlag};
pub use movement::{MoveType, Pattern, Stride};
pub use piece::{Piece, PieceKind};
