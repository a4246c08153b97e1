//! Rule engine for chess-family games on rectangular boards.
//!
//! This crate provides:
//! - [`Board`] - Cell grid, piece arena and all game state of one position
//! - [`Settings`] - Pluggable rules (pawn long moves, promotion, castling,
//!   en passant, turn order, draw thresholds), loadable from TOML
//! - Move generation and legality checking for every piece kind through two
//!   shared movement primitives
//! - Castling with arbitrary rook files, en passant and promotion
//! - [`Outcome`] derivation: checkmate, stalemate and automatic draws
//! - [`Game`] - History tracking, repetition and declared results
//! - FEN / X-FEN import and export, coordinate move notation
//!
//! # Architecture
//!
//! Pieces never point back at the board. A [`Board`] owns a grid of cells
//! that refer to pieces by [`PieceId`], and every rule takes the board by
//! reference. Legality is decided by applying a candidate move to a copy
//! of the board and asking whether the mover's king is attacked there.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Coord};
//! use chess_rules::{setup, Game, Outcome};
//!
//! let mut board = setup::standard();
//! let moves = board.legal_moves(Color::White);
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! let e2 = Coord::from_algebraic("e2").unwrap();
//! let e4 = Coord::from_algebraic("e4").unwrap();
//! assert!(board.try_move(e2, e4, None));
//!
//! let mut game = Game::new();
//! game.make_move_str("f2f3").unwrap();
//! game.make_move_str("e7e5").unwrap();
//! game.make_move_str("g2g4").unwrap();
//! game.make_move_str("d8h4").unwrap();
//! assert_eq!(game.outcome(), Outcome::Checkmate { winner: Color::Black });
//! ```

mod board;
mod fen;
mod game;
pub mod movegen;
pub mod notation;
pub mod rules;
mod settings;
pub mod setup;

pub use board::{Board, BoardPiece, Cell, PieceId, PositionKey};
pub use game::{Game, GameError, GameMove};
pub use movegen::perft::{perft, perft_divide};
pub use notation::{decode_move, encode_move, NotationError};
pub use rules::{Castling, DrawReason, Outcome};
pub use settings::{
    CastlingRule, EnPassantRule, PawnLongMove, PromotionRule, Settings, SettingsError,
};
