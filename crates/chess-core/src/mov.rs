//! Move representation.

use crate::{Coord, PieceKind};
use std::fmt;

/// The two castling slots a color owns.
///
/// The slots are named after standard chess, but the rook that belongs to a
/// slot may start on any file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CastleSide {
    /// Slot 0: king ends on file 3, rook on file 4.
    Queen = 0,
    /// Slot 1: king ends on the second-to-last file, rook next to it.
    King = 1,
}

impl CastleSide {
    /// Both sides, slot order.
    pub const ALL: [CastleSide; 2] = [CastleSide::Queen, CastleSide::King];

    /// Returns the slot index (0 or 1).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the destination files `(king, rook)` on a board of the given width.
    #[inline]
    pub const fn destination_files(self, width: i32) -> (i32, i32) {
        match self {
            CastleSide::Queen => (3, 4),
            CastleSide::King => (width - 1, width - 2),
        }
    }
}

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal,
    /// Pawn advance of more than one rank.
    LongAdvance,
    /// En passant capture.
    EnPassant,
    /// Castling; `from`/`to` describe the king.
    Castle(CastleSide),
    /// Pawn promotion to the given kind.
    Promotion(PieceKind),
}

impl MoveFlag {
    /// Returns the promotion kind if this is a promotion move.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveFlag::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::Castle(_))
    }
}

/// A move between two cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Coord, to: Coord, flag: MoveFlag) -> Self {
        Move { from, to, flag }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Coord, to: Coord) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Returns coordinate notation for this move (e.g. "e2e4", "e7e8q", "a9a10").
    pub fn to_coordinates(self) -> String {
        match self.flag.promotion_kind() {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Splits coordinate notation into origin, destination and promotion kind.
    ///
    /// This only checks the text; the rules crate resolves the result
    /// against a position to recover flags.
    pub fn parse_coordinates(s: &str) -> Option<(Coord, Coord, Option<PieceKind>)> {
        let bytes = s.as_bytes();
        if !s.is_ascii() || bytes.len() < 4 {
            return None;
        }
        // The destination starts at the second file letter.
        let split = bytes
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, b)| b.is_ascii_lowercase())
            .map(|(i, _)| i)?;
        let from = Coord::from_algebraic(&s[..split])?;
        let rest = &s[split..];
        let (to_str, promotion) = match rest.as_bytes().last() {
            Some(b) if b.is_ascii_alphabetic() && rest.len() > 2 => {
                let kind = PieceKind::from_char(*b as char)?;
                (&rest[..rest.len() - 1], Some(kind))
            }
            _ => (rest, None),
        };
        let to = Coord::from_algebraic(to_str)?;
        Some((from, to, promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinates())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_coordinates() {
        let m = Move::new(c("e2"), c("e4"), MoveFlag::LongAdvance);
        assert_eq!(m.to_coordinates(), "e2e4");

        let promo = Move::new(c("e7"), c("e8"), MoveFlag::Promotion(PieceKind::Queen));
        assert_eq!(promo.to_coordinates(), "e7e8q");

        let tall = Move::normal(c("a9"), c("a10"));
        assert_eq!(tall.to_coordinates(), "a9a10");
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!(
            Move::parse_coordinates("e2e4"),
            Some((c("e2"), c("e4"), None))
        );
        assert_eq!(
            Move::parse_coordinates("b7b8n"),
            Some((c("b7"), c("b8"), Some(PieceKind::Knight)))
        );
        assert_eq!(
            Move::parse_coordinates("j10j11c"),
            Some((c("j10"), c("j11"), Some(PieceKind::Chancellor)))
        );
        assert_eq!(
            Move::parse_coordinates("a10a9"),
            Some((c("a10"), c("a9"), None))
        );
    }

    #[test]
    fn parse_coordinates_rejects_garbage() {
        assert!(Move::parse_coordinates("e2").is_none());
        assert!(Move::parse_coordinates("e2e").is_none());
        assert!(Move::parse_coordinates("invalid").is_none());
        assert!(Move::parse_coordinates("e7e8x").is_none());
        assert!(Move::parse_coordinates("e0e4").is_none());
    }

    #[test]
    fn move_flag_helpers() {
        assert_eq!(MoveFlag::Normal.promotion_kind(), None);
        assert_eq!(
            MoveFlag::Promotion(PieceKind::Rook).promotion_kind(),
            Some(PieceKind::Rook)
        );
        assert!(MoveFlag::Castle(CastleSide::King).is_castling());
        assert!(!MoveFlag::EnPassant.is_castling());
    }

    #[test]
    fn castle_destinations_scale_with_width() {
        assert_eq!(CastleSide::Queen.destination_files(8), (3, 4));
        assert_eq!(CastleSide::King.destination_files(8), (7, 6));
        assert_eq!(CastleSide::King.destination_files(10), (9, 8));
    }

    #[test]
    fn move_debug_display() {
        let m = Move::normal(c("e2"), c("e4"));
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }
}
