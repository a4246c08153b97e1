//! Rule evaluation on top of the board.
//!
//! The pawn and castling evaluators live in their own modules; this module
//! ties them and the move generator together into the operations a caller
//! uses on a [`Board`]: attempting moves, querying check and deriving the
//! [`Outcome`].

pub mod castling;
pub mod pawns;

use std::collections::HashSet;
use std::fmt;

use chess_core::{CastleSide, Color, Coord, Move, MoveFlag, Piece, PieceKind};

use crate::board::{Board, PieceId};
use crate::movegen;

pub use castling::Castling;

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Both players agreed to a draw.
    Agreement,
    /// The same position occurred often enough.
    Repetition,
    /// Too many moves without a capture or pawn move.
    MoveRule,
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DrawReason::Agreement => "agreement",
            DrawReason::Repetition => "repetition",
            DrawReason::MoveRule => "move rule",
            DrawReason::InsufficientMaterial => "insufficient material",
        };
        f.write_str(reason)
    }
}

/// State of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    TimeForfeit { winner: Color },
    Resignation { winner: Color },
}

impl Outcome {
    /// Returns true unless the game is still in progress.
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner }
            | Outcome::TimeForfeit { winner }
            | Outcome::Resignation { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::Draw(reason) => write!(f, "draw by {}", reason),
            Outcome::TimeForfeit { winner } => write!(f, "{} wins on time", winner),
            Outcome::Resignation { winner } => write!(f, "{} wins by resignation", winner),
        }
    }
}

/// Returns true if no sequence of moves can end in mate: only kings remain,
/// plus at most one bishop or knight in total.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    for (_, piece) in board.pieces() {
        match piece.kind() {
            PieceKind::King => {}
            PieceKind::Bishop | PieceKind::Knight => minors += 1,
            _ => return false,
        }
    }
    minors <= 1
}

/// Derives the outcome from the board alone.
///
/// The side to move is mated or stalemated when it has no legal move.
/// Otherwise the move rule and insufficient material may end the game.
/// Repetition needs the position history and is judged by
/// [`Game`](crate::Game).
pub fn outcome(board: &Board) -> Outcome {
    let color = board.side_to_move();
    if !movegen::has_legal_move(board, color) {
        return if movegen::in_check(board, color) {
            Outcome::Checkmate {
                winner: color.opposite(),
            }
        } else {
            Outcome::Stalemate
        };
    }
    if let Some(moves) = board.settings().move_rule {
        if board.halfmove_clock() >= moves.saturating_mul(2) {
            return Outcome::Draw(DrawReason::MoveRule);
        }
    }
    if is_insufficient_material(board) {
        return Outcome::Draw(DrawReason::InsufficientMaterial);
    }
    Outcome::InProgress
}

impl Board {
    /// Cells the piece attacks, ignoring the safety of its own king.
    pub fn attacks(&self, id: PieceId) -> Vec<Coord> {
        movegen::attacks(self, id)
    }

    /// Every cell attacked by one of `color`'s pieces.
    pub fn attacked_cells(&self, color: Color) -> HashSet<Coord> {
        movegen::attacked_cells(self, color)
    }

    /// Cells the piece may legally move to, castling destinations included.
    pub fn legal_destinations(&self, id: PieceId) -> Vec<Coord> {
        movegen::legal_destinations(self, id)
    }

    /// All legal moves of `color`.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        movegen::legal_moves(self, color)
    }

    /// The castlings `color` may play right now.
    pub fn castlings(&self, color: Color) -> Vec<Castling> {
        castling::castlings(self, color)
    }

    pub fn in_check(&self, color: Color) -> bool {
        movegen::in_check(self, color)
    }

    pub fn in_checkmate(&self, color: Color) -> bool {
        movegen::in_check(self, color) && !movegen::has_legal_move(self, color)
    }

    pub fn in_stalemate(&self, color: Color) -> bool {
        !movegen::in_check(self, color) && !movegen::has_legal_move(self, color)
    }

    /// See [`outcome`].
    pub fn outcome(&self) -> Outcome {
        outcome(self)
    }

    /// Attempts to move the piece on `from` to `to`.
    ///
    /// `promotion` names the piece a pawn turns into; it is required for a
    /// promoting move and refused for any other. Moving a king onto its
    /// castling destination castles, unless that cell is also an ordinary
    /// king step (possible in Chess960 setups): the step is played then,
    /// and castling needs [`Board::castle`]. Returns false, leaving the
    /// board untouched, if the move is not legal.
    pub fn try_move(&mut self, from: Coord, to: Coord, promotion: Option<Piece>) -> bool {
        match self.resolve(from, to, promotion) {
            Ok((id, m)) => {
                self.commit(id, m);
                true
            }
            Err(reason) => {
                tracing::trace!(%from, %to, reason, "move rejected");
                false
            }
        }
    }

    /// Plays a fully flagged move, as produced by [`Board::legal_moves`].
    ///
    /// Returns false, leaving the board untouched, if the move is not legal.
    pub fn play(&mut self, m: Move) -> bool {
        let resolved = self.mover(m.from).and_then(|id| {
            if movegen::legal_moves_for(self, id).contains(&m) {
                Ok(id)
            } else {
                Err("not a legal move")
            }
        });
        match resolved {
            Ok(id) => {
                self.commit(id, m);
                true
            }
            Err(reason) => {
                tracing::trace!(mv = %m, reason, "move rejected");
                false
            }
        }
    }

    /// Castles `color` on `side` if that castling is enabled.
    pub fn castle(&mut self, color: Color, side: CastleSide) -> bool {
        let castling = castling::castlings(self, color)
            .into_iter()
            .find(|c| c.side == side);
        match castling.and_then(|c| c.to_move(self).map(|m| (c.king, m))) {
            Some((king, m)) => {
                self.commit(king, m);
                true
            }
            None => {
                tracing::trace!(%color, ?side, "castling rejected");
                false
            }
        }
    }

    /// The piece on `from`, if it may move now.
    fn mover(&self, from: Coord) -> Result<PieceId, &'static str> {
        if !self.contains(from) {
            return Err("origin is off the board");
        }
        let id = self.piece_at(from).ok_or("no piece on origin")?;
        if self.settings().enforce_turns && self.piece(id).color() != self.side_to_move() {
            return Err("not this color's turn");
        }
        Ok(id)
    }

    fn resolve(
        &self,
        from: Coord,
        to: Coord,
        promotion: Option<Piece>,
    ) -> Result<(PieceId, Move), &'static str> {
        let id = self.mover(from)?;
        let color = self.piece(id).color();
        let candidates: Vec<Move> = movegen::legal_moves_for(self, id)
            .into_iter()
            .filter(|m| m.to == to)
            .collect();
        if candidates.is_empty() {
            return Err("not a legal destination");
        }

        let chosen = match promotion {
            Some(target) => {
                if target.color != color {
                    return Err("promotion piece has the wrong color");
                }
                candidates
                    .iter()
                    .find(|m| m.flag == MoveFlag::Promotion(target.kind))
                    .ok_or("promotion not allowed here")?
            }
            None => candidates
                .iter()
                .find(|m| !m.flag.is_castling() && m.flag.promotion_kind().is_none())
                .or_else(|| candidates.iter().find(|m| m.flag.is_castling()))
                .ok_or("promotion piece required")?,
        };
        Ok((id, *chosen))
    }

    fn commit(&mut self, id: PieceId, m: Move) {
        let piece = self.piece(id).piece;
        self.perform(m);
        tracing::debug!(
            from = %m.from,
            to = %m.to,
            piece = %piece.kind,
            color = %piece.color,
            flag = ?m.flag,
            "move committed"
        );
    }
}
