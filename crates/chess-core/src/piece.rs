//! Piece representation.

use serde::{Deserialize, Serialize};

use crate::movement::{MoveType, Pattern, Stride};
use crate::Color;

const ROOK: [Pattern; 1] = [Pattern::reader(1, 0)];
const BISHOP: [Pattern; 1] = [Pattern::reader(1, 1)];
const QUEEN: [Pattern; 2] = [Pattern::reader(1, 0), Pattern::reader(1, 1)];
const KNIGHT: [Pattern; 1] = [Pattern::leaper(1, 2)];
const KING: [Pattern; 2] = [Pattern::leaper(1, 0), Pattern::leaper(1, 1)];
const ARCHBISHOP: [Pattern; 2] = [Pattern::reader(1, 1), Pattern::leaper(1, 2)];
const CHANCELLOR: [Pattern; 2] = [Pattern::reader(1, 0), Pattern::leaper(1, 2)];
const PAWN: [Pattern; 2] = [
    Pattern {
        m: 1,
        n: 0,
        stride: Stride::Advance,
        forward_only: true,
        move_type: MoveType::NonCaptureOnly,
    },
    Pattern {
        m: 1,
        n: 1,
        stride: Stride::Leap,
        forward_only: true,
        move_type: MoveType::CaptureOnly,
    },
];

/// The kinds of pieces the engine knows how to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
    /// Bishop + knight.
    Archbishop = 6,
    /// Rook + knight.
    Chancellor = 7,
}

impl PieceKind {
    /// Returns the movement patterns whose union is this kind's movement.
    pub const fn patterns(self) -> &'static [Pattern] {
        match self {
            PieceKind::Pawn => &PAWN,
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &BISHOP,
            PieceKind::Rook => &ROOK,
            PieceKind::Queen => &QUEEN,
            PieceKind::King => &KING,
            PieceKind::Archbishop => &ARCHBISHOP,
            PieceKind::Chancellor => &CHANCELLOR,
        }
    }

    /// Returns the lowercase letter used in FEN and move notation.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Archbishop => 'a',
            PieceKind::Chancellor => 'c',
        }
    }

    /// Parses a piece letter, ignoring case.
    pub const fn from_char(c: char) -> Option<PieceKind> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'a' => PieceKind::Archbishop,
            'c' => PieceKind::Chancellor,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Archbishop => "Archbishop",
            PieceKind::Chancellor => "Chancellor",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece, independent of where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Returns the FEN character: uppercase for White, lowercase for Black.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece.
    pub const fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_char(c) {
            Some(kind) => Some(Piece { color, kind }),
            None => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
