//! Pawn-specific rules: long advances, en passant and promotion.

use chess_core::{Coord, PieceKind};

use crate::board::{Board, PieceId};
use crate::settings::{EnPassantRule, PawnLongMove, PromotionRule};

/// How many ranks the pawn may advance from where it stands.
pub fn advance_steps(board: &Board, id: PieceId) -> u32 {
    let pawn = board.piece(id);
    let Some(coord) = pawn.coord else {
        return 1;
    };
    let steps = match board.settings().pawn_long_move {
        PawnLongMove::Disabled => 1,
        PawnLongMove::FromStartRank { steps } => {
            if coord.rank == pawn.color().pawn_rank(board.height()) {
                steps
            } else {
                1
            }
        }
        PawnLongMove::WhileUnmoved { steps } => {
            if pawn.has_moved {
                1
            } else {
                steps
            }
        }
    };
    // A bound of 0 would make the advance unbounded.
    steps.max(1)
}

/// The cell the pawn would move to when capturing en passant, if it may.
///
/// The board's en-passant pawn must be an opposing pawn on the same rank and
/// an adjacent file, standing where a long advance from its start rank
/// could have put it. The capture lands behind it.
pub fn en_passant_target(board: &Board, id: PieceId) -> Option<Coord> {
    let settings = board.settings();
    if settings.en_passant != EnPassantRule::Standard || !settings.pawn_long_move.allows_long_move()
    {
        return None;
    }
    let pawn = board.piece(id);
    if pawn.kind() != PieceKind::Pawn {
        return None;
    }
    let from = pawn.coord?;

    let victim_coord = board.en_passant()?;
    if !board.contains(victim_coord)
        || victim_coord.rank != from.rank
        || (victim_coord.file - from.file).abs() != 1
    {
        return None;
    }
    let victim = board.piece(board.piece_at(victim_coord)?);
    if victim.kind() != PieceKind::Pawn || victim.color() == pawn.color() {
        return None;
    }

    let color = victim.color();
    let advanced = (victim_coord.rank - color.pawn_rank(board.height())) * color.forward();
    if advanced < 2 || advanced > settings.pawn_long_move.max_steps() as i32 {
        return None;
    }

    let target = Coord::new(victim_coord.file, from.rank + pawn.color().forward());
    (board.contains(target) && board.cell(target).is_empty()).then_some(target)
}

/// Returns true if moving the pawn to `to` is a promotion.
///
/// The pawn must stand on the rank before its promotion rank and `to` must
/// be on the promotion rank.
pub fn is_promotion(board: &Board, id: PieceId, to: Coord) -> bool {
    if board.settings().promotion != PromotionRule::BackRank {
        return false;
    }
    let pawn = board.piece(id);
    let Some(from) = pawn.coord else {
        return false;
    };
    let color = pawn.color();
    let last = color.promotion_rank(board.height());
    pawn.kind() == PieceKind::Pawn && from.rank == last - color.forward() && to.rank == last
}
