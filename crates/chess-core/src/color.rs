//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, White first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the forward rank direction for this color (+1 for White, -1 for Black).
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Returns this color's back rank on a board of the given height (1-based).
    #[inline]
    pub const fn back_rank(self, height: i32) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => height,
        }
    }

    /// Returns the rank this color's pawns start on.
    #[inline]
    pub const fn pawn_rank(self, height: i32) -> i32 {
        self.back_rank(height) + self.forward()
    }

    /// Returns the back rank of the opponent, where this color's pawns promote.
    #[inline]
    pub const fn promotion_rank(self, height: i32) -> i32 {
        self.opposite().back_rank(height)
    }

    /// Returns the FEN active-color character.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
