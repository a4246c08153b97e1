//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! The parser accepts rectangular boards of any size up to 26 files: empty
//! runs may span several digits ("10"), and the castling field may use the
//! X-FEN / Shredder letters (`A`-`Z` for White rook files, `a`-`z` for
//! Black) in addition to `KQkq`.

use thiserror::Error;

use crate::coord::{file_from_char, MAX_FILES};
use crate::{Coord, Piece};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// This struct holds the raw parsed FEN components. The rules crate is
/// responsible for turning them into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    /// Active color ('w' or 'b')
    pub active_color: char,
    /// Castling availability (e.g., "KQkq", "HAha", "-")
    pub castling: String,
    /// En passant target square (e.g., "e3", "-")
    pub en_passant: String,
    /// Halfmove clock
    pub halfmove_clock: u32,
    /// Fullmove number
    pub fullmove_number: u32,
    /// Number of files, derived from the placement.
    pub width: i32,
    /// Number of ranks, derived from the placement.
    pub height: i32,
    rows: Vec<Vec<Option<Piece>>>,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        let rows = parse_piece_placement(piece_placement)?;
        let width = rows[0].len() as i32;
        let height = rows.len() as i32;

        let active_color = match parts[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling, width)?;

        let en_passant = parts[3];
        Self::validate_en_passant(en_passant, width, height)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
            width,
            height,
            rows,
        })
    }

    /// Returns the placement as rows of cells, top rank (highest) first.
    pub fn rows(&self) -> &[Vec<Option<Piece>>] {
        &self.rows
    }

    fn validate_castling(castling: &str, width: i32) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            let ok = "KQkq".contains(c) || file_from_char(c).is_some_and(|f| f <= width);
            if !ok {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }

    fn validate_en_passant(ep: &str, width: i32, height: i32) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }

        match Coord::from_algebraic(ep) {
            Some(c) if c.within(width, height) && c.rank > 1 && c.rank < height => Ok(()),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}

/// Expands the placement field into rows, checking that every rank has the
/// same number of cells and that the board is at most `MAX_FILES` wide.
fn parse_piece_placement(placement: &str) -> Result<Vec<Vec<Option<Piece>>>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    let height = ranks.len();
    let mut rows: Vec<Vec<Option<Piece>>> = Vec::with_capacity(height);

    for (i, rank) in ranks.iter().enumerate() {
        let rank_number = height - i;
        let mut row = Vec::new();
        let mut digits = String::new();
        for c in rank.chars() {
            if c.is_ascii_digit() {
                if digits.is_empty() && c == '0' {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "empty run starting with 0 in rank {}",
                        rank_number
                    )));
                }
                digits.push(c);
                continue;
            }
            push_empty_run(&mut row, &mut digits, rank_number)?;
            let piece = Piece::from_fen_char(c).ok_or_else(|| {
                FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c, rank_number
                ))
            })?;
            push_cell(&mut row, Some(piece), rank_number)?;
        }
        push_empty_run(&mut row, &mut digits, rank_number)?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected {}",
                    rank_number,
                    row.len(),
                    first.len()
                )));
            }
        } else if row.is_empty() {
            return Err(FenError::InvalidPiecePlacement(format!(
                "board must have 1 to {} files, got 0",
                MAX_FILES
            )));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Appends the pending empty run, if any, to `row`.
fn push_empty_run(
    row: &mut Vec<Option<Piece>>,
    digits: &mut String,
    rank_number: usize,
) -> Result<(), FenError> {
    if digits.is_empty() {
        return Ok(());
    }
    let run = digits
        .parse::<usize>()
        .ok()
        .filter(|&n| n <= MAX_FILES as usize)
        .ok_or_else(|| {
            FenError::InvalidPiecePlacement(format!(
                "empty run {} in rank {} is wider than {} files",
                digits, rank_number, MAX_FILES
            ))
        })?;
    digits.clear();
    for _ in 0..run {
        push_cell(row, None, rank_number)?;
    }
    Ok(())
}

fn push_cell(
    row: &mut Vec<Option<Piece>>,
    cell: Option<Piece>,
    rank_number: usize,
) -> Result<(), FenError> {
    if row.len() >= MAX_FILES as usize {
        return Err(FenError::InvalidPiecePlacement(format!(
            "rank {} is wider than {} files",
            rank_number, MAX_FILES
        )));
    }
    row.push(cell);
    Ok(())
}
