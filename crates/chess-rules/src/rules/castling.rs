//! Castling evaluation.
//!
//! Each color owns two castling slots. A slot names the file its rook
//! started on, so the same code handles standard chess and shuffled
//! back ranks. The king and rook always land on the slot's fixed
//! destination files, whatever their origin.

use chess_core::{CastleSide, Color, Coord, Move, MoveFlag, PieceKind};

use crate::board::{Board, PieceId};
use crate::movegen;
use crate::settings::CastlingRule;

/// A fully resolved castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Castling {
    pub king: PieceId,
    pub rook: PieceId,
    pub king_to: Coord,
    pub rook_to: Coord,
    pub side: CastleSide,
    /// Whether the castling may be played right now.
    pub enabled: bool,
}

impl Castling {
    /// The move that plays this castling.
    pub fn to_move(&self, board: &Board) -> Option<Move> {
        let from = board.piece(self.king).coord?;
        Some(Move::new(from, self.king_to, MoveFlag::Castle(self.side)))
    }
}

/// Files after `from` up to and including `to`.
fn span(from: i32, to: i32) -> Vec<i32> {
    if from < to {
        (from + 1..=to).collect()
    } else {
        (to..from).rev().collect()
    }
}

/// Every castling slot of `color` that still has a king and a rook to
/// castle with, enabled or not.
pub fn castling_options(board: &Board, color: Color) -> Vec<Castling> {
    if board.settings().castling == CastlingRule::Disabled {
        return Vec::new();
    }
    let Some(king) = board.king(color) else {
        return Vec::new();
    };
    let back = color.back_rank(board.height());

    let mut options = Vec::with_capacity(2);
    for side in CastleSide::ALL {
        let Some(file) = board.rook_origin(color, side) else {
            continue;
        };
        let rook_from = Coord::new(file, back);
        if !board.contains(rook_from) {
            continue;
        }
        let Some(rook) = board.piece_at(rook_from) else {
            continue;
        };
        let piece = board.piece(rook);
        if piece.kind() != PieceKind::Rook || piece.color() != color {
            continue;
        }

        let (king_file, rook_file) = side.destination_files(board.width());
        let mut castling = Castling {
            king,
            rook,
            king_to: Coord::new(king_file, back),
            rook_to: Coord::new(rook_file, back),
            side,
            enabled: false,
        };
        castling.enabled = is_enabled(board, color, &castling);
        options.push(castling);
    }
    options
}

/// The castlings `color` may play right now.
pub fn castlings(board: &Board, color: Color) -> Vec<Castling> {
    castling_options(board, color)
        .into_iter()
        .filter(|c| c.enabled)
        .collect()
}

fn is_enabled(board: &Board, color: Color, castling: &Castling) -> bool {
    if board.settings().enforce_turns && board.side_to_move() != color {
        return false;
    }

    let king = board.piece(castling.king);
    let rook = board.piece(castling.rook);
    let (Some(king_from), Some(rook_from)) = (king.coord, rook.coord) else {
        return false;
    };
    let back = color.back_rank(board.height());
    if king.has_moved || rook.has_moved || king_from.rank != back || rook_from.rank != back {
        return false;
    }
    if !board.contains(castling.king_to) || !board.contains(castling.rook_to) {
        return false;
    }
    if movegen::in_check(board, color) {
        return false;
    }

    let free_of = |file: i32, allowed: PieceId| match board.piece_at(Coord::new(file, back)) {
        None => true,
        Some(id) => id == allowed,
    };

    let king_path = span(king_from.file, castling.king_to.file);
    if !king_path.iter().all(|&f| free_of(f, castling.rook)) {
        return false;
    }
    let rook_path = span(rook_from.file, castling.rook_to.file);
    if !rook_path.iter().all(|&f| free_of(f, castling.king)) {
        return false;
    }

    let attacked = movegen::attacked_cells(board, color.opposite());
    if king_path
        .iter()
        .any(|&f| attacked.contains(&Coord::new(f, back)))
    {
        return false;
    }

    let castle = Move::new(king_from, castling.king_to, MoveFlag::Castle(castling.side));
    movegen::is_safe(board, castle, color)
}
