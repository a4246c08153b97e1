//! Move generation.
//!
//! Raw generation walks a piece's [`Pattern`](chess_core::Pattern)s with the
//! shared primitives. Legal generation then projects every candidate onto a
//! copy of the board and keeps only those that leave the mover's king safe.
//! Attack generation never applies that filter; check detection is built on
//! it and would otherwise be circular.

pub mod perft;
mod primitives;

use std::collections::HashSet;

use chess_core::{Color, Coord, Move, MoveFlag, PieceKind, Stride};

use crate::board::{Board, PieceId};
use crate::rules::{castling, pawns};

pub use primitives::{leaper, reader, stroke, Generation};

/// Walks every pattern of the piece.
fn walk(board: &Board, id: PieceId, generation: Generation, out: &mut Vec<Coord>) {
    for pattern in board.piece(id).kind().patterns() {
        match pattern.stride {
            Stride::Leap => leaper(board, id, pattern, generation, out),
            Stride::Ride { max_steps } => reader(board, id, pattern, max_steps, generation, out),
            Stride::Advance => {
                let steps = pawns::advance_steps(board, id);
                reader(board, id, pattern, steps, generation, out);
            }
        }
    }
}

/// Destinations the piece could reach ignoring the safety of its own king,
/// en passant included, castling excluded.
pub fn pseudo_destinations(board: &Board, id: PieceId) -> Vec<Coord> {
    let mut out = Vec::new();
    walk(board, id, Generation::Moves, &mut out);
    if let Some(target) = pawns::en_passant_target(board, id) {
        out.push(target);
    }
    out
}

/// Cells the piece attacks. A captured piece attacks nothing.
pub fn attacks(board: &Board, id: PieceId) -> Vec<Coord> {
    let mut out = Vec::new();
    walk(board, id, Generation::Attacks, &mut out);
    out
}

/// The union of the attack sets of all of `color`'s pieces.
pub fn attacked_cells(board: &Board, color: Color) -> HashSet<Coord> {
    let mut out = Vec::new();
    for id in board.pieces_of(color) {
        walk(board, id, Generation::Attacks, &mut out);
    }
    out.into_iter().collect()
}

/// Returns true if any piece of color `by` attacks `coord`.
pub fn is_attacked(board: &Board, coord: Coord, by: Color) -> bool {
    let mut out = Vec::new();
    board.pieces_of(by).into_iter().any(|id| {
        out.clear();
        walk(board, id, Generation::Attacks, &mut out);
        out.contains(&coord)
    })
}

/// Returns true if `color`'s king is attacked. A board without that king is
/// never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    board
        .king_coord(color)
        .is_some_and(|king| is_attacked(board, king, color.opposite()))
}

/// Returns true if applying `m` leaves `color`'s king unattacked.
pub(crate) fn is_safe(board: &Board, m: Move, color: Color) -> bool {
    let mut projection = board.copy();
    projection.perform(m);
    !in_check(&projection, color)
}

/// Flags a raw destination: long pawn advances and en passant captures.
fn classify(board: &Board, id: PieceId, from: Coord, to: Coord) -> MoveFlag {
    if board.piece(id).kind() != PieceKind::Pawn {
        return MoveFlag::Normal;
    }
    if from.file != to.file && board.cell(to).is_empty() {
        MoveFlag::EnPassant
    } else if (to.rank - from.rank).abs() > 1 {
        MoveFlag::LongAdvance
    } else {
        MoveFlag::Normal
    }
}

/// Legal moves of one piece.
///
/// A promoting destination yields one move per allowed promotion kind; a
/// king also gets its enabled castlings.
pub fn legal_moves_for(board: &Board, id: PieceId) -> Vec<Move> {
    let piece = board.piece(id);
    let Some(from) = piece.coord else {
        return Vec::new();
    };
    let color = piece.color();

    let mut moves = Vec::new();
    for to in pseudo_destinations(board, id) {
        let m = Move::new(from, to, classify(board, id, from, to));
        if !is_safe(board, m, color) {
            continue;
        }
        if pawns::is_promotion(board, id, to) {
            moves.extend(
                board
                    .settings()
                    .allowed_promotions
                    .iter()
                    .map(|&kind| Move::new(from, to, MoveFlag::Promotion(kind))),
            );
        } else {
            moves.push(m);
        }
    }

    if piece.kind() == PieceKind::King {
        moves.extend(
            castling::castlings(board, color)
                .into_iter()
                .filter(|c| c.king == id)
                .map(|c| Move::new(from, c.king_to, MoveFlag::Castle(c.side))),
        );
    }
    moves
}

/// Legal destinations of one piece, castling destinations included.
pub fn legal_destinations(board: &Board, id: PieceId) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::new();
    for m in legal_moves_for(board, id) {
        if !out.contains(&m.to) {
            out.push(m.to);
        }
    }
    out
}

/// All legal moves of `color`.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .into_iter()
        .flat_map(|id| legal_moves_for(board, id))
        .collect()
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .into_iter()
        .any(|id| !legal_moves_for(board, id).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use chess_core::Piece;

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn load(fen: &str) -> Board {
        Board::from_fen(fen, Settings::default()).unwrap()
    }

    fn startpos() -> Board {
        load(chess_core::FenParser::STARTPOS)
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let board = startpos();
        assert_eq!(legal_moves(&board, Color::White).len(), 20);
        assert_eq!(legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn startpos_attacks() {
        let board = startpos();
        let white = attacked_cells(&board, Color::White);
        assert!(white.contains(&c("e3")));
        assert!(!white.contains(&c("e4")));
        // Own pieces defended by neighbours count as attacked.
        assert!(white.contains(&c("d1")));
        assert!(is_attacked(&board, c("f3"), Color::White));
        assert!(!is_attacked(&board, c("f3"), Color::Black));
        assert!(!in_check(&board, Color::White));
    }

    #[test]
    fn pawn_advance_is_not_an_attack() {
        let board = startpos();
        let pawn = board.piece_at(c("e2")).unwrap();
        let mut attacked = attacks(&board, pawn);
        attacked.sort();
        assert_eq!(attacked, vec![c("d3"), c("f3")]);
        let mut dests = legal_destinations(&board, pawn);
        dests.sort();
        assert_eq!(dests, vec![c("e3"), c("e4")]);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let board = load("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
        let knight = board.piece_at(c("e2")).unwrap();
        assert!(legal_destinations(&board, knight).is_empty());
        // The pinned knight still attacks.
        assert!(!attacks(&board, knight).is_empty());
    }

    #[test]
    fn king_cannot_approach_the_other_king() {
        let board = load("8/8/8/4k3/8/4K3/8/8 w - - 0 1");
        let king = board.king(Color::White).unwrap();
        let dests = legal_destinations(&board, king);
        assert_eq!(dests.len(), 5);
        assert!(!dests.contains(&c("e4")));
        assert!(!dests.contains(&c("d4")));
        assert!(!dests.contains(&c("f4")));
    }

    #[test]
    fn king_cannot_capture_defended_piece() {
        let board = load("4k3/8/8/8/8/8/3rr3/4K3 w - - 0 1");
        let king = board.king(Color::White).unwrap();
        let dests = legal_destinations(&board, king);
        assert_eq!(dests, vec![c("f1")]);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let board = load("k3r3/8/8/8/1b6/8/8/4K2R w - - 0 1");
        assert!(in_check(&board, Color::White));
        let moves = legal_moves(&board, Color::White);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from == c("e1")));
    }

    #[test]
    fn promotion_expands_allowed_kinds() {
        let board = load("8/P7/8/8/8/8/8/4K2k w - - 0 1");
        let moves = legal_moves(&board, Color::White);
        let promotions: Vec<_> = moves
            .iter()
            .filter_map(|m| m.flag.promotion_kind())
            .collect();
        assert_eq!(
            promotions,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
    }

    #[test]
    fn en_passant_is_generated_and_flagged() {
        let board = Board::from_fen(
            "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1",
            Settings::default(),
        )
        .unwrap();
        let moves = legal_moves(&board, Color::White);
        assert!(moves
            .iter()
            .any(|m| m.flag == MoveFlag::EnPassant && m.from == c("f5") && m.to == c("e6")));
    }

    #[test]
    fn captured_piece_has_no_moves() {
        let mut board = Board::new(8, 8, Settings::default());
        let rook = board.place(c("a1"), Piece::new(Color::White, PieceKind::Rook));
        board.empty(c("a1"));
        assert!(legal_moves_for(&board, rook).is_empty());
        assert!(attacks(&board, rook).is_empty());
    }

    #[test]
    fn no_king_is_never_in_check() {
        let mut board = Board::new(8, 8, Settings::default());
        board.place(c("a1"), Piece::new(Color::Black, PieceKind::Queen));
        assert!(!in_check(&board, Color::White));
    }

    #[test]
    fn archbishop_moves_on_wide_board() {
        let mut board = Board::new(10, 8, Settings::default());
        let id = board.place(c("a1"), Piece::new(Color::White, PieceKind::Archbishop));
        let dests = legal_destinations(&board, id);
        // Seven diagonal steps plus two knight jumps.
        assert_eq!(dests.len(), 9);
        assert!(dests.contains(&c("h8")));
        assert!(dests.contains(&c("b3")));
        assert!(dests.contains(&c("c2")));
    }
}
