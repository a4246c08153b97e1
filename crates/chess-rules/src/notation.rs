//! Coordinate move notation.
//!
//! Moves are written as origin and destination cells plus an optional
//! promotion letter: `e2e4`, `e7e8q`, `a9a10`. Castling is written as the
//! king's move (`e1g1`); when reading, the king may also "capture" its own
//! castling rook (`e1h1`) and `O-O` / `O-O-O` are accepted.

use chess_core::{CastleSide, Coord, Move};
use thiserror::Error;

use crate::board::Board;
use crate::movegen;

/// Errors that can occur when reading move notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move text")]
    Empty,

    #[error("invalid move format: {0}")]
    InvalidFormat(String),

    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),
}

/// Writes a cell in algebraic form.
pub fn encode_coord(coord: Coord) -> String {
    coord.to_algebraic()
}

/// Reads a cell in algebraic form.
pub fn decode_coord(text: &str) -> Result<Coord, NotationError> {
    Coord::from_algebraic(text.trim()).ok_or_else(|| NotationError::InvalidFormat(text.to_string()))
}

/// Writes a move in coordinate notation.
pub fn encode_move(m: &Move) -> String {
    m.to_coordinates()
}

fn castle_token(text: &str) -> Option<CastleSide> {
    match text {
        "O-O" | "0-0" => Some(CastleSide::King),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queen),
        _ => None,
    }
}

/// Reads a move and resolves it against the legal moves on `board`.
///
/// The returned move carries the flags the rules need (long advance,
/// en passant, castling, promotion).
pub fn decode_move(board: &Board, text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NotationError::Empty);
    }
    let no_match = || NotationError::NoMatchingMove(text.to_string());

    if let Some(side) = castle_token(text) {
        return board
            .castlings(board.side_to_move())
            .into_iter()
            .find(|c| c.side == side)
            .and_then(|c| c.to_move(board))
            .ok_or_else(no_match);
    }

    let (from, to, promotion) = Move::parse_coordinates(text)
        .ok_or_else(|| NotationError::InvalidFormat(text.to_string()))?;
    if !board.contains(from) || !board.contains(to) {
        return Err(no_match());
    }
    let id = board.piece_at(from).ok_or_else(no_match)?;
    let color = board.piece(id).color();
    if board.settings().enforce_turns && color != board.side_to_move() {
        return Err(no_match());
    }

    let moves = movegen::legal_moves_for(board, id);
    if let Some(m) = moves
        .iter()
        .filter(|m| m.to == to && m.flag.promotion_kind() == promotion)
        .min_by_key(|m| m.flag.is_castling())
    {
        return Ok(*m);
    }

    if promotion.is_none() {
        if let Some(castling) = board
            .castlings(color)
            .into_iter()
            .find(|c| c.king == id && board.piece(c.rook).coord == Some(to))
        {
            return castling.to_move(board).ok_or_else(no_match);
        }
    }
    Err(no_match())
}
