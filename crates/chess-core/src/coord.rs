//! Board coordinate representation.

use std::fmt;
use std::ops::Add;

/// Largest number of files a board may have; files are lettered `a`..=`z`.
pub const MAX_FILES: i32 = 26;

/// A cell coordinate on a rectangular board.
///
/// Both components are 1-based: `(1, 1)` is the bottom-left cell from
/// White's point of view (`a1`). A `Coord` is a plain value and carries no
/// board dimensions; use [`Coord::within`] to test it against a board.
/// Offsets (vectors) use the same type and may be negative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub file: i32,
    pub rank: i32,
}

impl Coord {
    /// Creates a coordinate from file and rank.
    #[inline]
    pub const fn new(file: i32, rank: i32) -> Self {
        Coord { file, rank }
    }

    /// Returns true if this coordinate lies on a `width` x `height` board.
    #[inline]
    pub const fn within(self, width: i32, height: i32) -> bool {
        self.file >= 1 && self.file <= width && self.rank >= 1 && self.rank <= height
    }

    /// Parses a coordinate from algebraic notation (e.g. "e4", "j10").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        if !file_char.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || digits.starts_with('0')
        {
            return None;
        }
        let rank = digits.parse::<i32>().ok()?;
        Some(Coord::new(file_char as i32 - 'a' as i32 + 1, rank))
    }

    /// Returns the file letter, or `None` beyond the 26th file.
    pub fn file_char(self) -> Option<char> {
        file_to_char(self.file)
    }

    /// Returns the algebraic notation for this coordinate.
    pub fn to_algebraic(self) -> String {
        match self.file_char() {
            Some(c) => format!("{}{}", c, self.rank),
            None => format!("({},{})", self.file, self.rank),
        }
    }
}

/// Converts a 1-based file number into its lowercase letter.
pub fn file_to_char(file: i32) -> Option<char> {
    if (1..=MAX_FILES).contains(&file) {
        Some((b'a' + (file - 1) as u8) as char)
    } else {
        None
    }
}

/// Converts a file letter (either case) into its 1-based file number.
pub fn file_from_char(c: char) -> Option<i32> {
    if c.is_ascii_alphabetic() {
        Some(c.to_ascii_lowercase() as i32 - 'a' as i32 + 1)
    } else {
        None
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.file, self.rank)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn coord_add() {
        let c = Coord::new(2, 1) + Coord::new(1, 2);
        assert_eq!(c, Coord::new(3, 3));
        assert_eq!(Coord::new(2, 1) + Coord::new(-2, 1), Coord::new(0, 2));
    }

    #[test]
    fn coord_within() {
        assert!(Coord::new(1, 1).within(5, 6));
        assert!(Coord::new(5, 6).within(5, 6));
        assert!(!Coord::new(0, 2).within(5, 6));
        assert!(!Coord::new(6, 1).within(5, 6));
        assert!(!Coord::new(3, 7).within(5, 6));
    }

    #[test]
    fn coord_from_algebraic() {
        assert_eq!(Coord::from_algebraic("a1"), Some(Coord::new(1, 1)));
        assert_eq!(Coord::from_algebraic("e4"), Some(Coord::new(5, 4)));
        assert_eq!(Coord::from_algebraic("j10"), Some(Coord::new(10, 10)));
        assert_eq!(Coord::from_algebraic("E4"), None);
        assert_eq!(Coord::from_algebraic("a0"), None);
        assert_eq!(Coord::from_algebraic("a"), None);
        assert_eq!(Coord::from_algebraic("a1x"), None);
        assert_eq!(Coord::from_algebraic(""), None);
    }

    #[test]
    fn coord_to_algebraic() {
        assert_eq!(Coord::new(1, 1).to_algebraic(), "a1");
        assert_eq!(Coord::new(8, 8).to_algebraic(), "h8");
        assert_eq!(Coord::new(3, 12).to_algebraic(), "c12");
        assert_eq!(format!("{:?}", Coord::new(5, 4)), "Coord(5, 4)");
    }

    #[test]
    fn file_letters() {
        assert_eq!(file_to_char(1), Some('a'));
        assert_eq!(file_to_char(26), Some('z'));
        assert_eq!(file_to_char(27), None);
        assert_eq!(file_from_char('H'), Some(8));
        assert_eq!(file_from_char('1'), None);
    }

    proptest! {
        #[test]
        fn algebraic_is_reversible(file in 1i32..=26, rank in 1i32..=99) {
            let c = Coord::new(file, rank);
            prop_assert_eq!(Coord::from_algebraic(&c.to_algebraic()), Some(c));
        }
    }
}
