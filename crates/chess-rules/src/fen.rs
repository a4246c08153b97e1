//! Reading and writing boards as FEN / X-FEN.
//!
//! The text layer lives in [`chess_core::FenParser`]; this module maps it
//! onto a [`Board`] through the board's public operations.
//!
//! Castling rights become rook-origin slots. `K`/`Q` (and `k`/`q`) name the
//! outermost rook on that side of the king, any other letter names the
//! rook's file directly. The en-passant square names the cell behind the
//! pawn that just advanced; the board stores the pawn itself.

use chess_core::coord::file_from_char;
use chess_core::{CastleSide, Color, Coord, FenError, FenParser, PieceKind};

use crate::board::Board;
use crate::Settings;

impl Board {
    /// Builds a board from a FEN or X-FEN string.
    ///
    /// Pawns away from their start rank are marked as moved.
    pub fn from_fen(fen: &str, settings: Settings) -> Result<Board, FenError> {
        let parsed = FenParser::parse(fen)?;
        let (width, height) = (parsed.width, parsed.height);
        let mut board = Board::new(width, height, settings);

        for (i, row) in parsed.rows().iter().enumerate() {
            let rank = height - i as i32;
            for (f, cell) in row.iter().enumerate() {
                let Some(piece) = *cell else {
                    continue;
                };
                if piece.kind == PieceKind::King && board.king(piece.color).is_some() {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "more than one {} king",
                        piece.color
                    )));
                }
                let id = board.place(Coord::new(f as i32 + 1, rank), piece);
                if piece.kind == PieceKind::Pawn && rank != piece.color.pawn_rank(height) {
                    board.set_has_moved(id, true);
                }
            }
        }

        let side_to_move = if parsed.active_color == 'w' {
            Color::White
        } else {
            Color::Black
        };
        board.set_side_to_move(side_to_move);

        if parsed.castling != "-" {
            for letter in parsed.castling.chars() {
                let (color, side, file) = castling_slot(&board, letter)?;
                board.set_rook_origin(color, side, Some(file));
            }
        }

        if parsed.en_passant != "-" {
            let square = Coord::from_algebraic(&parsed.en_passant)
                .ok_or_else(|| FenError::InvalidEnPassantSquare(parsed.en_passant.clone()))?;
            let mover = side_to_move.opposite();
            let pawn = Coord::new(square.file, square.rank + mover.forward());
            let is_pawn = board.contains(pawn)
                && board.piece_at(pawn).is_some_and(|id| {
                    let p = board.piece(id);
                    p.kind() == PieceKind::Pawn && p.color() == mover
                });
            if is_pawn {
                board.set_en_passant(Some(pawn));
            }
        }

        board.set_halfmove_clock(parsed.halfmove_clock);
        board.set_fullmove_number(parsed.fullmove_number);
        Ok(board)
    }

    /// Writes the board as FEN, using X-FEN letters for castling rooks that
    /// are not the outermost on their side.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (1..=self.height()).rev() {
            let mut empty = 0;
            for file in 1..=self.width() {
                match self.piece_at(Coord::new(file, rank)) {
                    Some(id) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(self.piece(id).piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 1 {
                placement.push('/');
            }
        }

        let mut castling = String::new();
        for color in Color::ALL {
            for side in [CastleSide::King, CastleSide::Queen] {
                if let Some(letter) = self.castling_letter(color, side) {
                    castling.push(letter);
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant()
            .filter(|&pawn| self.contains(pawn))
            .and_then(|pawn| {
                let color = self.piece(self.piece_at(pawn)?).color();
                Some(Coord::new(pawn.file, pawn.rank - color.forward()).to_algebraic())
            })
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            self.side_to_move().to_fen_char(),
            castling,
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    fn castling_letter(&self, color: Color, side: CastleSide) -> Option<char> {
        let file = self.rook_origin(color, side)?;
        let back = color.back_rank(self.height());
        let outermost = self
            .king_coord(color)
            .and_then(|king| outermost_rook(self, color, side, king.file));
        let letter = if outermost == Some(file) {
            match side {
                CastleSide::King => 'k',
                CastleSide::Queen => 'q',
            }
        } else {
            Coord::new(file, back).file_char()?
        };
        Some(match color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        })
    }
}

/// File of `color`'s rook furthest from the king on `side` of its back rank.
fn outermost_rook(board: &Board, color: Color, side: CastleSide, king_file: i32) -> Option<i32> {
    let back = color.back_rank(board.height());
    let is_rook = |file: i32| {
        board.piece_at(Coord::new(file, back)).is_some_and(|id| {
            let p = board.piece(id);
            p.kind() == PieceKind::Rook && p.color() == color
        })
    };
    match side {
        CastleSide::Queen => (1..king_file).find(|&f| is_rook(f)),
        CastleSide::King => (king_file + 1..=board.width()).rev().find(|&f| is_rook(f)),
    }
}

/// Resolves one castling letter to a rook-origin slot.
fn castling_slot(board: &Board, letter: char) -> Result<(Color, CastleSide, i32), FenError> {
    let color = if letter.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let back = color.back_rank(board.height());
    let invalid = |why: &str| FenError::InvalidCastlingRights(format!("'{}' {}", letter, why));

    let king_file = board
        .king_coord(color)
        .filter(|king| king.rank == back)
        .map(|king| king.file)
        .ok_or_else(|| invalid("without a king on the back rank"))?;

    let (side, file) = match letter.to_ascii_lowercase() {
        'k' => (
            CastleSide::King,
            outermost_rook(board, color, CastleSide::King, king_file),
        ),
        'q' => (
            CastleSide::Queen,
            outermost_rook(board, color, CastleSide::Queen, king_file),
        ),
        other => {
            let file = file_from_char(other).ok_or_else(|| invalid("is not a file"))?;
            let side = if file < king_file {
                CastleSide::Queen
            } else {
                CastleSide::King
            };
            let rook = board.piece_at(Coord::new(file, back)).filter(|&id| {
                let p = board.piece(id);
                p.kind() == PieceKind::Rook && p.color() == color
            });
            (side, rook.map(|_| file))
        }
    };
    let file = file.ok_or_else(|| invalid("has no matching rook"))?;
    Ok((color, side, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn load(fen: &str) -> Result<Board, FenError> {
        Board::from_fen(fen, Settings::default())
    }

    #[test]
    fn startpos_roundtrip() {
        let board = Board::from_fen(FenParser::STARTPOS, Settings::default()).unwrap();
        assert_eq!(board.to_fen(), FenParser::STARTPOS);
        assert_eq!(board.width(), 8);
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.rook_origin(Color::White, CastleSide::Queen), Some(1));
        assert_eq!(board.rook_origin(Color::Black, CastleSide::King), Some(8));
        assert_eq!(board.king_coord(Color::Black), Some(c("e8")));
    }

    #[test]
    fn en_passant_square_maps_to_pawn() {
        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3";
        let board = Board::from_fen(fen, Settings::default()).unwrap();
        assert_eq!(board.en_passant(), Some(c("e5")));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn en_passant_without_pawn_is_dropped() {
        let board = load("4k3/8/8/8/8/8/8/4K3 w - e6 0 1").unwrap();
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn moved_pawns() {
        let board = load("4k3/8/8/8/8/4P3/3P4/4K3 w - - 0 1").unwrap();
        let advanced = board.piece_at(c("e3")).unwrap();
        let home = board.piece_at(c("d2")).unwrap();
        assert!(board.piece(advanced).has_moved);
        assert!(!board.piece(home).has_moved);
    }

    #[test]
    fn shredder_letters() {
        let fen = "1r2k1r1/8/8/8/8/8/8/RR2K2R w HBg - 0 1";
        let board = Board::from_fen(fen, Settings::default()).unwrap();
        assert_eq!(board.rook_origin(Color::White, CastleSide::King), Some(8));
        assert_eq!(board.rook_origin(Color::White, CastleSide::Queen), Some(2));
        assert_eq!(board.rook_origin(Color::Black, CastleSide::King), Some(7));
        assert_eq!(board.rook_origin(Color::Black, CastleSide::Queen), None);
        // h1 is outermost and written as K; b1 is not and keeps its letter.
        assert_eq!(board.to_fen(), "1r2k1r1/8/8/8/8/8/8/RR2K2R w KBk - 0 1");
    }

    #[test]
    fn castling_letter_without_rook_fails() {
        let err = load("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidCastlingRights(_)));

        let err = load("4k3/8/8/8/8/8/8/R7 w Q - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidCastlingRights(_)));
    }

    #[test]
    fn wide_board() {
        let fen = "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1";
        let board = Board::from_fen(fen, Settings::capablanca()).unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.rook_origin(Color::White, CastleSide::King), Some(10));
        let archbishop = board.piece_at(c("c1")).unwrap();
        assert_eq!(board.piece(archbishop).kind(), PieceKind::Archbishop);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn tall_board_runs() {
        let fen = "k7/8/8/8/8/8/8/8/8/K7 w - - 0 1";
        let board = Board::from_fen(fen, Settings::default()).unwrap();
        assert_eq!(board.height(), 10);
        assert_eq!(board.king_coord(Color::Black), Some(c("a10")));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn second_king_is_rejected() {
        let err = load("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidPiecePlacement(_)));
    }

    #[test]
    fn oversized_empty_run_is_rejected() {
        let err = load("k99999999999/K w - - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidPiecePlacement(_)));
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(matches!(
            load("8/8 w - - 0"),
            Err(FenError::InvalidPartCount(5))
        ));
    }
}
