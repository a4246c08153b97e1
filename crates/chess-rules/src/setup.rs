//! Starting positions.

use chess_core::{CastleSide, Color, Coord, FenParser, Piece, PieceKind};

use crate::board::Board;
use crate::Settings;

/// The Capablanca chess starting position (10x8).
pub const CAPABLANCA: &str = "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1";

/// Number of distinct Chess960 starting positions.
pub const CHESS960_POSITIONS: u32 = 960;

/// Index of the standard arrangement in the Chess960 numbering.
pub const CHESS960_STANDARD: u32 = 518;

/// Standard chess with default settings.
pub fn standard() -> Board {
    Board::from_fen(FenParser::STARTPOS, Settings::default()).expect("STARTPOS is valid")
}

/// Capablanca chess, with archbishops and chancellors as promotion targets.
pub fn capablanca() -> Board {
    Board::from_fen(CAPABLANCA, Settings::capablanca()).expect("CAPABLANCA is valid")
}

/// The Chess960 back rank with the given number (0..960).
///
/// The number is decoded the usual way: the light-squared bishop, the
/// dark-squared bishop, the queen and the knight pair are placed in turn,
/// and the remaining three files take rook, king, rook.
pub fn chess960_back_rank(index: u32) -> Option<[PieceKind; 8]> {
    if index >= CHESS960_POSITIONS {
        return None;
    }
    const KNIGHTS: [(usize, usize); 10] = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 2),
        (1, 3),
        (1, 4),
        (2, 3),
        (2, 4),
        (3, 4),
    ];

    let mut rank: [Option<PieceKind>; 8] = [None; 8];
    let mut n = index as usize;

    rank[n % 4 * 2 + 1] = Some(PieceKind::Bishop);
    n /= 4;
    rank[n % 4 * 2] = Some(PieceKind::Bishop);
    n /= 4;

    let free = |rank: &[Option<PieceKind>; 8]| -> Vec<usize> {
        (0..8).filter(|&i| rank[i].is_none()).collect()
    };

    let queen = free(&rank)[n % 6];
    rank[queen] = Some(PieceKind::Queen);
    n /= 6;

    let (a, b) = KNIGHTS[n];
    let empty = free(&rank);
    rank[empty[a]] = Some(PieceKind::Knight);
    rank[empty[b]] = Some(PieceKind::Knight);

    for (slot, kind) in free(&rank)
        .into_iter()
        .zip([PieceKind::Rook, PieceKind::King, PieceKind::Rook])
    {
        rank[slot] = Some(kind);
    }

    let mut out = [PieceKind::Pawn; 8];
    for (cell, kind) in out.iter_mut().zip(rank) {
        *cell = kind?;
    }
    Some(out)
}

/// A Chess960 starting position, or `None` if `index` is out of range.
pub fn chess960(index: u32) -> Option<Board> {
    let back_rank = chess960_back_rank(index)?;
    Some(from_back_rank(&back_rank, 8, Settings::default()))
}

/// Mirrored back ranks behind full pawn rows, with every rook on either
/// side of the king registered for castling.
///
/// # Panics
///
/// Panics if the back rank is wider than 26 files or `height` is below 4.
pub fn from_back_rank(back_rank: &[PieceKind], height: i32, settings: Settings) -> Board {
    assert!(height >= 4, "board height {} too small for a setup", height);
    let width = back_rank.len() as i32;
    let mut board = Board::new(width, height, settings);

    for color in Color::ALL {
        let back = color.back_rank(height);
        let pawns = color.pawn_rank(height);
        for (i, &kind) in back_rank.iter().enumerate() {
            let file = i as i32 + 1;
            board.place(Coord::new(file, back), Piece::new(color, kind));
            board.place(Coord::new(file, pawns), Piece::new(color, PieceKind::Pawn));
        }
    }

    let king = back_rank.iter().position(|&k| k == PieceKind::King);
    if let Some(king) = king {
        let queen_side = back_rank[..king]
            .iter()
            .position(|&k| k == PieceKind::Rook);
        let king_side = back_rank[king + 1..]
            .iter()
            .rposition(|&k| k == PieceKind::Rook)
            .map(|i| i + king + 1);
        for color in Color::ALL {
            board.set_rook_origin(color, CastleSide::Queen, queen_side.map(|i| i as i32 + 1));
            board.set_rook_origin(color, CastleSide::King, king_side.map(|i| i as i32 + 1));
        }
    }
    board
}
