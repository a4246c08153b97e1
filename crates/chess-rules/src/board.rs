//! Board representation.
//!
//! A [`Board`] owns a dense, coordinate-indexed grid of [`Cell`]s and an
//! arena of [`BoardPiece`]s addressed by [`PieceId`]. Cells refer to pieces by
//! id and pieces record their own coordinate, so neither needs a pointer
//! back to the board. Captured pieces stay in the arena with no coordinate.
//!
//! Cloning a board produces a fully independent copy, which is what the
//! legality filter relies on when it projects candidate moves.

use chess_core::coord::MAX_FILES;
use chess_core::{CastleSide, Color, Coord, Move, MoveFlag, Piece, PieceKind};

use crate::Settings;

/// Handle to a piece in a board's arena.
///
/// Ids stay valid for the lifetime of the board (and of its copies), even
/// after the piece is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

impl PieceId {
    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A piece as it exists on a particular board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPiece {
    pub piece: Piece,
    pub has_moved: bool,
    /// Where the piece stands, or `None` once it has been captured or removed.
    pub coord: Option<Coord>,
}

impl BoardPiece {
    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.piece.kind
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    index: usize,
    coord: Coord,
    occupant: Option<PieceId>,
}

impl Cell {
    /// Sequential index, rank-major from `a1`.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub const fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Everything that identifies a position for repetition purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    placement: Vec<Option<Piece>>,
    side_to_move: Color,
    rook_origins: [[Option<i32>; 2]; 2],
    en_passant: Option<Coord>,
}

/// Complete game state of a rectangular board.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    pieces: Vec<BoardPiece>,
    side_to_move: Color,
    /// Castling rook files per color, indexed by [`CastleSide`].
    rook_origins: [[Option<i32>; 2]; 2],
    /// The pawn that just made a long advance and may be taken en passant.
    en_passant: Option<Coord>,
    halfmove_clock: u32,
    fullmove_number: u32,
    kings: [Option<PieceId>; 2],
    settings: Settings,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= width <= 26` and `height >= 1`.
    pub fn new(width: i32, height: i32, settings: Settings) -> Self {
        assert!(
            (1..=MAX_FILES).contains(&width) && height >= 1,
            "board dimensions {}x{} out of range",
            width,
            height
        );
        let cells = (0..height)
            .flat_map(|r| (0..width).map(move |f| Coord::new(f + 1, r + 1)))
            .enumerate()
            .map(|(index, coord)| Cell {
                index,
                coord,
                occupant: None,
            })
            .collect();
        Board {
            width,
            height,
            cells,
            pieces: Vec::new(),
            side_to_move: Color::White,
            rook_origins: [[None; 2]; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            kings: [None; 2],
            settings,
        }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the rule configuration.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns true if the coordinate lies on this board.
    #[inline]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.within(self.width, self.height)
    }

    fn cell_index(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "{:?} is outside the {}x{} board",
            coord,
            self.width,
            self.height
        );
        ((coord.rank - 1) * self.width + (coord.file - 1)) as usize
    }

    /// Returns the cell at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is not on the board.
    #[inline]
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.cell_index(coord)]
    }

    /// Iterates over all cells, rank-major from `a1`.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the id of the piece standing on `coord`.
    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<PieceId> {
        self.cell(coord).occupant
    }

    /// Returns a piece from the arena.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &BoardPiece {
        &self.pieces[id.0]
    }

    /// Iterates over the pieces currently on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &BoardPiece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.coord.is_some())
            .map(|(i, p)| (PieceId(i), p))
    }

    /// Returns the ids of `color`'s pieces currently on the board.
    pub fn pieces_of(&self, color: Color) -> Vec<PieceId> {
        self.pieces()
            .filter(|(_, p)| p.color() == color)
            .map(|(id, _)| id)
            .collect()
    }

    /// Puts a new piece on `coord`, removing whatever stood there.
    ///
    /// # Panics
    ///
    /// Panics if `piece` is a king and its color already has a king
    /// elsewhere on the board.
    pub fn place(&mut self, coord: Coord, piece: Piece) -> PieceId {
        let index = self.cell_index(coord);
        if let Some(old) = self.cells[index].occupant {
            self.lift(old);
        }
        assert!(
            piece.kind != PieceKind::King || self.king(piece.color).is_none(),
            "{} already has a king",
            piece.color
        );
        let id = PieceId(self.pieces.len());
        self.pieces.push(BoardPiece {
            piece,
            has_moved: false,
            coord: Some(coord),
        });
        self.cells[index].occupant = Some(id);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(id);
        }
        id
    }

    /// Clears `coord`, returning the removed piece's id.
    pub fn empty(&mut self, coord: Coord) -> Option<PieceId> {
        let id = self.piece_at(coord)?;
        self.lift(id);
        Some(id)
    }

    /// Marks a piece as moved or unmoved.
    pub fn set_has_moved(&mut self, id: PieceId, has_moved: bool) {
        self.pieces[id.0].has_moved = has_moved;
    }

    /// Returns an independent deep copy.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Replaces this board's entire state with `other`'s.
    pub fn set(&mut self, other: &Board) {
        self.clone_from(other);
    }

    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub const fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u32) {
        self.fullmove_number = number;
    }

    /// The coordinate of the pawn that may be captured en passant.
    #[inline]
    pub const fn en_passant(&self) -> Option<Coord> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, pawn: Option<Coord>) {
        self.en_passant = pawn;
    }

    /// The registered castling rook file for one of `color`'s slots.
    #[inline]
    pub const fn rook_origin(&self, color: Color, side: CastleSide) -> Option<i32> {
        self.rook_origins[color.index()][side.index()]
    }

    pub fn set_rook_origin(&mut self, color: Color, side: CastleSide, file: Option<i32>) {
        self.rook_origins[color.index()][side.index()] = file;
    }

    /// Returns `color`'s king if it is on the board.
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.kings[color.index()].filter(|&id| self.pieces[id.0].coord.is_some())
    }

    /// Returns the coordinate of `color`'s king.
    pub fn king_coord(&self, color: Color) -> Option<Coord> {
        self.king(color).and_then(|id| self.pieces[id.0].coord)
    }

    /// Returns the key used to detect repeated positions.
    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            placement: self
                .cells
                .iter()
                .map(|c| c.occupant.map(|id| self.pieces[id.0].piece))
                .collect(),
            side_to_move: self.side_to_move,
            rook_origins: self.rook_origins,
            en_passant: self.en_passant,
        }
    }

    /// Takes a piece off the board without touching any counters.
    fn lift(&mut self, id: PieceId) {
        if let Some(coord) = self.pieces[id.0].coord.take() {
            let index = self.cell_index(coord);
            self.cells[index].occupant = None;
        }
    }

    /// Moves a piece to `to`, capturing any occupant.
    fn relocate(&mut self, id: PieceId, to: Coord) {
        let index = self.cell_index(to);
        if let Some(victim) = self.cells[index].occupant {
            if victim != id {
                self.lift(victim);
            }
        }
        self.lift(id);
        self.pieces[id.0].coord = Some(to);
        self.cells[index].occupant = Some(id);
    }

    /// Forgets the castling slot a rook standing on `coord` belongs to.
    fn revoke_rook_origin(&mut self, color: Color, coord: Coord) {
        if coord.rank != color.back_rank(self.height) {
            return;
        }
        for slot in self.rook_origins[color.index()].iter_mut() {
            if *slot == Some(coord.file) {
                *slot = None;
            }
        }
    }

    /// Applies a move without checking it.
    ///
    /// The move must come from the rules' own generators; this is the
    /// primitive both committed moves and speculative projections use.
    pub(crate) fn perform(&mut self, m: Move) {
        let Some(id) = self.piece_at(m.from) else {
            return;
        };
        let piece = self.piece(id).piece;
        let mut irreversible = piece.kind == PieceKind::Pawn;

        match m.flag {
            MoveFlag::Castle(side) => {
                self.perform_castle(id, side, m.to);
            }
            _ => {
                if m.flag == MoveFlag::EnPassant {
                    let victim = Coord::new(m.to.file, m.from.rank);
                    if self.empty(victim).is_some() {
                        irreversible = true;
                    }
                }
                if let Some(victim) = self.piece_at(m.to) {
                    let lost = self.piece(victim).piece;
                    if lost.kind == PieceKind::Rook {
                        self.revoke_rook_origin(lost.color, m.to);
                    }
                    irreversible = true;
                }

                self.relocate(id, m.to);
                self.pieces[id.0].has_moved = true;
                if let Some(kind) = m.flag.promotion_kind() {
                    self.pieces[id.0].piece.kind = kind;
                }

                match piece.kind {
                    PieceKind::King => self.rook_origins[piece.color.index()] = [None; 2],
                    PieceKind::Rook => self.revoke_rook_origin(piece.color, m.from),
                    _ => {}
                }

                let is_pawn = piece.kind == PieceKind::Pawn;
                let long_advance = is_pawn && (m.to.rank - m.from.rank).abs() > 1;
                self.en_passant = long_advance.then_some(m.to);
            }
        }

        if irreversible {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if piece.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        if self.settings.enforce_turns {
            self.side_to_move = piece.color.opposite();
        }
    }

    /// Relocates king and rook of one castling slot atomically.
    fn perform_castle(&mut self, king: PieceId, side: CastleSide, king_to: Coord) {
        let color = self.piece(king).color();
        let back = color.back_rank(self.height);
        let rook = self
            .rook_origin(color, side)
            .and_then(|file| self.piece_at(Coord::new(file, back)));
        let Some(rook) = rook else {
            return;
        };
        let (_, rook_file) = side.destination_files(self.width);

        // Lift both first: in shuffled setups each may land on the other's cell.
        self.lift(king);
        self.lift(rook);
        self.relocate(king, king_to);
        self.relocate(rook, Coord::new(rook_file, back));
        self.pieces[king.0].has_moved = true;
        self.pieces[rook.0].has_moved = true;
        self.rook_origins[color.index()] = [None; 2];
        self.en_passant = None;
    }
}

impl PartialEq for Board {
    /// Boards are equal when they describe the same position under the
    /// same rules; arena history (ids, captured pieces) is ignored.
    fn eq(&self, other: &Self) -> bool {
        let occupants = |b: &Board| -> Vec<Option<(Piece, bool)>> {
            b.cells
                .iter()
                .map(|c| {
                    c.occupant.map(|id| {
                        let p = &b.pieces[id.0];
                        (p.piece, p.has_moved)
                    })
                })
                .collect()
        };
        self.width == other.width
            && self.height == other.height
            && self.side_to_move == other.side_to_move
            && self.rook_origins == other.rook_origins
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.settings == other.settings
            && occupants(self) == occupants(other)
    }
}

impl Eq for Board {}
