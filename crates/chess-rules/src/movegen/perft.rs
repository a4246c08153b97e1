//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::legal_moves;
use crate::board::Board;

/// Counts the number of leaf nodes at the given depth for the side to move.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, board.side_to_move());

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        let mut child = board.copy();
        child.perform(m);
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Perft with divide: the node count below each move, sorted by notation.
/// Useful for finding which move has an incorrect count.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(board, board.side_to_move());
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let mut child = board.copy();
        child.perform(m);
        let nodes = if depth > 1 {
            perft(&child, depth - 1)
        } else {
            1
        };
        results.push((m.to_coordinates(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
