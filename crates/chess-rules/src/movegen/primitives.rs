//! The shared movement primitives.
//!
//! Every piece kind is generated by the same two walkers: [`leaper`] jumps
//! to each offset derived from a pattern's `(m, n)`, [`reader`] slides along
//! each of those directions until the step bound, the board edge or the
//! first occupied cell. Both hand every reached cell to [`stroke`], which
//! decides whether the cell is a destination and whether a ray stops there.

use chess_core::{Color, Coord, MoveType, Pattern};

use crate::board::{Board, PieceId};

/// What a walk collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Destinations the piece may move to, before the self-check filter.
    Moves,
    /// Cells the piece attacks: every cell a capture could land on,
    /// including cells held by its own side, whatever is standing there.
    Attacks,
}

/// Judges one reached cell.
///
/// Pushes `dest` onto `out` when it qualifies and returns true when the
/// cell is occupied, i.e. a ray must stop here.
pub fn stroke(
    board: &Board,
    color: Color,
    dest: Coord,
    generation: Generation,
    move_type: MoveType,
    out: &mut Vec<Coord>,
) -> bool {
    let occupant = board.cell(dest).occupant();

    if generation == Generation::Attacks {
        if move_type.allows_capture() {
            out.push(dest);
        }
        return occupant.is_some();
    }

    match occupant {
        Some(id) if board.piece(id).color() != color => {
            if move_type.allows_capture() {
                out.push(dest);
            }
            true
        }
        Some(_) => true,
        None => {
            if move_type.allows_quiet() {
                out.push(dest);
            }
            false
        }
    }
}

/// Directions of `pattern` as seen by `color`, honoring `forward_only`.
fn directions(pattern: &Pattern, color: Color) -> impl Iterator<Item = Coord> {
    let forward_only = pattern.forward_only;
    pattern
        .directions()
        .into_iter()
        .filter(move |&(_, dr)| !forward_only || dr * color.forward() > 0)
        .map(|(df, dr)| Coord::new(df, dr))
}

/// Single jumps along every direction of `pattern`.
pub fn leaper(
    board: &Board,
    id: PieceId,
    pattern: &Pattern,
    generation: Generation,
    out: &mut Vec<Coord>,
) {
    let piece = board.piece(id);
    let Some(from) = piece.coord else {
        return;
    };
    let color = piece.color();
    for offset in directions(pattern, color) {
        let dest = from + offset;
        if board.contains(dest) {
            stroke(board, color, dest, generation, pattern.move_type, out);
        }
    }
}

/// Rays along every direction of `pattern`, at most `max_steps` long
/// (0 = until the edge of the board).
pub fn reader(
    board: &Board,
    id: PieceId,
    pattern: &Pattern,
    max_steps: u32,
    generation: Generation,
    out: &mut Vec<Coord>,
) {
    let piece = board.piece(id);
    let Some(from) = piece.coord else {
        return;
    };
    let color = piece.color();
    for offset in directions(pattern, color) {
        let mut dest = from;
        let mut steps = 0;
        while max_steps == 0 || steps < max_steps {
            dest = dest + offset;
            steps += 1;
            if !board.contains(dest) {
                break;
            }
            if stroke(board, color, dest, generation, pattern.move_type, out) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use chess_core::{Piece, PieceKind};

    fn board() -> Board {
        Board::new(8, 8, Settings::default())
    }

    fn sorted(mut v: Vec<Coord>) -> Vec<Coord> {
        v.sort();
        v
    }

    /// Runs `stroke` for White with a fresh output vector.
    fn judge(
        b: &Board,
        dest: Coord,
        generation: Generation,
        move_type: MoveType,
    ) -> (bool, Vec<Coord>) {
        let mut out = Vec::new();
        let stops = stroke(b, Color::White, dest, generation, move_type, &mut out);
        (stops, out)
    }

    #[test]
    fn stroke_rules() {
        let mut b = board();
        b.place(Coord::new(2, 2), Piece::new(Color::White, PieceKind::Pawn));
        b.place(Coord::new(3, 3), Piece::new(Color::Black, PieceKind::Pawn));
        let (enemy, own, empty) = (Coord::new(3, 3), Coord::new(2, 2), Coord::new(4, 4));

        let (stops, out) = judge(&b, enemy, Generation::Moves, MoveType::Any);
        assert!(stops);
        assert_eq!(out, vec![enemy]);

        let (stops, out) = judge(&b, own, Generation::Moves, MoveType::Any);
        assert!(stops);
        assert!(out.is_empty());

        let (stops, out) = judge(&b, empty, Generation::Moves, MoveType::CaptureOnly);
        assert!(!stops);
        assert!(out.is_empty());

        let (stops, out) = judge(&b, enemy, Generation::Moves, MoveType::NonCaptureOnly);
        assert!(stops);
        assert!(out.is_empty());
    }

    #[test]
    fn stroke_attacks_include_own_pieces() {
        let mut b = board();
        b.place(Coord::new(2, 2), Piece::new(Color::White, PieceKind::Pawn));

        let (stops, out) = judge(&b, Coord::new(2, 2), Generation::Attacks, MoveType::Any);
        assert!(stops);
        assert_eq!(out, vec![Coord::new(2, 2)]);

        let empty = Coord::new(5, 5);
        let (stops, out) = judge(&b, empty, Generation::Attacks, MoveType::CaptureOnly);
        assert!(!stops);
        assert_eq!(out, vec![empty]);
    }

    #[test]
    fn knight_in_corner() {
        let mut b = board();
        let id = b.place(Coord::new(1, 1), Piece::new(Color::White, PieceKind::Knight));
        let mut out = Vec::new();
        leaper(&b, id, &Pattern::leaper(1, 2), Generation::Moves, &mut out);
        assert_eq!(sorted(out), vec![Coord::new(2, 3), Coord::new(3, 2)]);
    }

    #[test]
    fn rook_ray_stops_at_first_piece() {
        let mut b = board();
        let id = b.place(Coord::new(1, 1), Piece::new(Color::White, PieceKind::Rook));
        b.place(Coord::new(1, 4), Piece::new(Color::Black, PieceKind::Knight));
        b.place(Coord::new(3, 1), Piece::new(Color::White, PieceKind::Bishop));
        let rook = Pattern::reader(1, 0);
        let mut out = Vec::new();
        reader(&b, id, &rook, 0, Generation::Moves, &mut out);
        assert_eq!(
            sorted(out),
            vec![
                Coord::new(1, 2),
                Coord::new(1, 3),
                Coord::new(1, 4),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn bounded_reader() {
        let mut b = board();
        let id = b.place(Coord::new(4, 4), Piece::new(Color::White, PieceKind::Queen));
        let bishop = Pattern::reader(1, 1);
        let mut out = Vec::new();
        reader(&b, id, &bishop, 2, Generation::Moves, &mut out);
        assert_eq!(out.len(), 8);
        assert!(out.contains(&Coord::new(6, 6)));
        assert!(!out.contains(&Coord::new(7, 7)));
    }

    #[test]
    fn forward_only_depends_on_color() {
        let mut b = board();
        let white = b.place(Coord::new(4, 4), Piece::new(Color::White, PieceKind::Pawn));
        let black = b.place(Coord::new(4, 6), Piece::new(Color::Black, PieceKind::Pawn));
        let pattern = PieceKind::Pawn.patterns()[1];

        let mut out = Vec::new();
        leaper(&b, white, &pattern, Generation::Attacks, &mut out);
        assert_eq!(sorted(out), vec![Coord::new(3, 5), Coord::new(5, 5)]);

        let mut out = Vec::new();
        leaper(&b, black, &pattern, Generation::Attacks, &mut out);
        assert_eq!(sorted(out), vec![Coord::new(3, 5), Coord::new(5, 5)]);

        let mut out = Vec::new();
        leaper(&b, white, &pattern, Generation::Moves, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn captured_piece_generates_nothing() {
        let mut b = board();
        let id = b.place(Coord::new(4, 4), Piece::new(Color::White, PieceKind::Queen));
        b.empty(Coord::new(4, 4));
        let (rook, knight) = (Pattern::reader(1, 0), Pattern::leaper(1, 2));
        let mut out = Vec::new();
        reader(&b, id, &rook, 0, Generation::Moves, &mut out);
        leaper(&b, id, &knight, Generation::Attacks, &mut out);
        assert!(out.is_empty());
    }
}
