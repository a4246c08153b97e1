//! Movement capability parameters.
//!
//! Every piece kind is described as a union of [`Pattern`]s. A pattern names
//! one of two primitives (a fixed-offset leap or a sliding ride) together
//! with its `(m, n)` offset, an optional forward-only restriction and a
//! [`MoveType`] mask. The generators that interpret these parameters live in
//! the rules crate; nothing here knows about boards.

/// Which destinations a pattern may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// Empty cells and cells held by the opponent.
    Any,
    /// Only cells held by the opponent.
    CaptureOnly,
    /// Only empty cells.
    NonCaptureOnly,
}

impl MoveType {
    /// Returns true if a destination holding an opposing piece may be taken.
    #[inline]
    pub const fn allows_capture(self) -> bool {
        matches!(self, MoveType::Any | MoveType::CaptureOnly)
    }

    /// Returns true if an empty destination may be entered.
    #[inline]
    pub const fn allows_quiet(self) -> bool {
        matches!(self, MoveType::Any | MoveType::NonCaptureOnly)
    }
}

/// How far a pattern travels along each of its directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stride {
    /// A single jump to the offset ("leaper").
    Leap,
    /// A ray along the offset ("reader"), `max_steps` long; 0 means unbounded.
    Ride { max_steps: u32 },
    /// A ray whose length is decided by the board's pawn long-move rule.
    Advance,
}

/// One movement primitive with fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub m: i32,
    pub n: i32,
    pub stride: Stride,
    /// Keep only directions that advance toward the opponent.
    pub forward_only: bool,
    pub move_type: MoveType,
}

impl Pattern {
    /// An unrestricted leaper.
    pub const fn leaper(m: i32, n: i32) -> Self {
        Pattern {
            m,
            n,
            stride: Stride::Leap,
            forward_only: false,
            move_type: MoveType::Any,
        }
    }

    /// An unbounded, unrestricted reader.
    pub const fn reader(m: i32, n: i32) -> Self {
        Pattern {
            m,
            n,
            stride: Stride::Ride { max_steps: 0 },
            forward_only: false,
            move_type: MoveType::Any,
        }
    }

    /// Returns the distinct direction vectors derived from `(m, n)`.
    ///
    /// `m == n` yields the four diagonals, `n == 0` (or `m == 0`) the four
    /// orthogonals, and anything else all eight `(±m, ±n)`/`(±n, ±m)`
    /// combinations.
    pub fn directions(&self) -> Vec<(i32, i32)> {
        let (m, n) = (self.m.abs(), self.n.abs());
        if m == 0 && n == 0 {
            return Vec::new();
        }
        if m == n {
            return vec![(m, m), (m, -m), (-m, m), (-m, -m)];
        }
        if m == 0 || n == 0 {
            let d = m.max(n);
            return vec![(d, 0), (-d, 0), (0, d), (0, -d)];
        }
        vec![
            (m, n),
            (m, -n),
            (-m, n),
            (-m, -n),
            (n, m),
            (n, -m),
            (-n, m),
            (-n, -m),
        ]
    }
}
