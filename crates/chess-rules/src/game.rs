//! Full game management with history tracking.
//!
//! The [`Game`] struct wraps a [`Board`] with everything that needs more
//! than the current position:
//! - Position history for repetition detection
//! - Move history with coordinate notation
//! - Claimable draws, draws by agreement, time forfeits and resignation

use chess_core::{Color, Move};
use thiserror::Error;

use crate::board::{Board, PositionKey};
use crate::notation::{decode_move, encode_move, NotationError};
use crate::rules::{DrawReason, Outcome};
use crate::setup;

/// Half-moves without a capture or pawn move after which a draw may be claimed.
pub const CLAIMABLE_MOVE_RULE_PLIES: u32 = 100;

/// Occurrences of a position after which a draw may be claimed.
pub const CLAIMABLE_REPETITIONS: usize = 3;

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move as played.
    pub mov: Move,
    /// Coordinate notation for the move.
    pub notation: String,
}

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text could not be read.
    #[error("invalid notation: {0}")]
    InvalidNotation(#[from] NotationError),
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
    /// Cannot claim draw (conditions not met).
    #[error("cannot claim draw: conditions not met")]
    CannotClaimDraw,
}

/// A game with history tracking.
///
/// Unlike [`Board`], which only knows the current position, `Game` keeps
/// the history needed for repetition detection and records results that
/// are not visible on the board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    start: Board,
    /// Position keys for repetition detection, starting position included.
    history: Vec<PositionKey>,
    moves: Vec<GameMove>,
    /// A result decided off the board (agreement, claim, time, resignation).
    declared: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game of standard chess.
    pub fn new() -> Self {
        Self::from_board(setup::standard())
    }

    /// Creates a game starting from `board`.
    pub fn from_board(board: Board) -> Self {
        Game {
            history: vec![board.position_key()],
            start: board.clone(),
            board,
            moves: Vec::new(),
            declared: None,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the starting board.
    pub fn start_board(&self) -> &Board {
        &self.start
    }

    /// Returns all legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.board.side_to_move())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.in_check(self.board.side_to_move())
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the outcome of the game.
    ///
    /// A declared result wins; otherwise the board decides, and an
    /// unfinished board is drawn once the current position has occurred
    /// as often as the repetition rule allows.
    pub fn outcome(&self) -> Outcome {
        if let Some(outcome) = self.declared {
            return outcome;
        }
        let outcome = self.board.outcome();
        if outcome.is_over() {
            return outcome;
        }
        match self.board.settings().repetition_rule {
            Some(limit) if self.position_count() >= limit as usize => {
                Outcome::Draw(DrawReason::Repetition)
            }
            _ => Outcome::InProgress,
        }
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Plays a move given in internal format.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let notation = encode_move(&m);
        if !self.board.play(m) {
            return Err(GameError::IllegalMove(notation));
        }
        self.record(m, notation);
        Ok(())
    }

    /// Plays a move given in coordinate notation (`e2e4`, `e7e8q`, `O-O`).
    pub fn make_move_str(&mut self, text: &str) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let m = decode_move(&self.board, text)?;
        self.make_move(m)
    }

    fn record(&mut self, m: Move, notation: String) {
        self.moves.push(GameMove { mov: m, notation });
        self.history.push(self.board.position_key());

        let outcome = self.outcome();
        if outcome.is_over() {
            tracing::debug!(%outcome, plies = self.moves.len(), "game over");
        }
    }

    /// Counts how many times the current position has occurred.
    pub fn position_count(&self) -> usize {
        let current = self.board.position_key();
        self.history.iter().filter(|&key| *key == current).count()
    }

    /// Returns true if a draw can be claimed (threefold repetition or the
    /// fifty-move rule).
    pub fn can_claim_draw(&self) -> bool {
        !self.is_over()
            && (self.position_count() >= CLAIMABLE_REPETITIONS
                || self.board.halfmove_clock() >= CLAIMABLE_MOVE_RULE_PLIES)
    }

    /// Claims a draw if conditions are met.
    pub fn claim_draw(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let reason = if self.position_count() >= CLAIMABLE_REPETITIONS {
            DrawReason::Repetition
        } else if self.board.halfmove_clock() >= CLAIMABLE_MOVE_RULE_PLIES {
            DrawReason::MoveRule
        } else {
            return Err(GameError::CannotClaimDraw);
        };
        self.declare(Outcome::Draw(reason))
    }

    /// Agrees to a draw.
    pub fn agree_draw(&mut self) -> Result<(), GameError> {
        self.declare(Outcome::Draw(DrawReason::Agreement))
    }

    /// Ends the game because `loser` ran out of time.
    pub fn forfeit_on_time(&mut self, loser: Color) -> Result<(), GameError> {
        self.declare(Outcome::TimeForfeit {
            winner: loser.opposite(),
        })
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<(), GameError> {
        let winner = self.board.side_to_move().opposite();
        self.declare(Outcome::Resignation { winner })
    }

    fn declare(&mut self, outcome: Outcome) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        tracing::debug!(%outcome, plies = self.moves.len(), "game over");
        self.declared = Some(outcome);
        Ok(())
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    fn from_fen(fen: &str) -> Game {
        Game::from_board(Board::from_fen(fen, Settings::default()).unwrap())
    }

    fn play(game: &mut Game, moves: &[&str]) {
        for m in moves {
            game.make_move_str(m).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_over());
        assert!(!game.is_check());
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn make_move_str() {
        let mut game = Game::new();
        game.make_move_str("e2e4").unwrap();
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.move_history()[0].notation, "e2e4");
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(game.start_board().to_fen(), chess_core::FenParser::STARTPOS);
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        assert!(matches!(
            game.make_move_str("e2e5"),
            Err(GameError::InvalidNotation(NotationError::NoMatchingMove(_)))
        ));
        let m = Move::normal(chess_core::Coord::new(5, 2), chess_core::Coord::new(5, 5));
        assert_eq!(
            game.make_move(m),
            Err(GameError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_over());
        assert_eq!(
            game.outcome(),
            Outcome::Checkmate {
                winner: Color::Black
            }
        );
        assert!(matches!(
            game.make_move_str("a2a3"),
            Err(GameError::GameAlreadyOver)
        ));
    }

    #[test]
    fn stalemate() {
        let game = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(game.outcome(), Outcome::Stalemate);
    }

    #[test]
    fn threefold_repetition() {
        let mut game = Game::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 2);
        assert!(!game.can_claim_draw());

        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 3);
        assert!(game.can_claim_draw());

        game.claim_draw().unwrap();
        assert_eq!(game.outcome(), Outcome::Draw(DrawReason::Repetition));
    }

    #[test]
    fn fivefold_repetition_is_automatic() {
        let mut game = Game::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for _ in 0..4 {
            play(&mut game, &shuffle);
        }
        assert_eq!(game.position_count(), 5);
        assert_eq!(game.outcome(), Outcome::Draw(DrawReason::Repetition));
        assert_eq!(game.claim_draw(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = from_fen("8/8/8/8/8/8/8/R3K2k w Q - 99 1");
        assert!(!game.can_claim_draw());
        game.make_move_str("a1a2").unwrap();
        assert!(game.can_claim_draw());
        game.claim_draw().unwrap();
        assert_eq!(game.outcome(), Outcome::Draw(DrawReason::MoveRule));
    }

    #[test]
    fn seventy_five_move_rule_automatic() {
        let game = from_fen("8/8/8/8/8/8/8/R3K2k w Q - 150 1");
        assert_eq!(game.outcome(), Outcome::Draw(DrawReason::MoveRule));
    }

    #[test]
    fn cannot_claim_without_reason() {
        let mut game = Game::new();
        assert_eq!(game.claim_draw(), Err(GameError::CannotClaimDraw));
        assert!(!game.is_over());
    }

    #[test]
    fn insufficient_material() {
        let game = from_fen("8/8/8/8/8/8/8/4K2k w - - 0 1");
        assert_eq!(
            game.outcome(),
            Outcome::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn resign() {
        let mut game = Game::new();
        game.resign().unwrap();
        assert_eq!(
            game.outcome(),
            Outcome::Resignation {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn agree_draw() {
        let mut game = Game::new();
        game.agree_draw().unwrap();
        assert_eq!(game.outcome(), Outcome::Draw(DrawReason::Agreement));
        assert_eq!(game.agree_draw(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn time_forfeit() {
        let mut game = Game::new();
        game.make_move_str("e2e4").unwrap();
        game.forfeit_on_time(Color::Black).unwrap();
        assert_eq!(
            game.outcome(),
            Outcome::TimeForfeit {
                winner: Color::White
            }
        );
        assert_eq!(game.outcome().winner(), Some(Color::White));
    }

    #[test]
    fn castling_through_notation() {
        let mut game = from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        game.make_move_str("O-O").unwrap();
        game.make_move_str("e8c8").unwrap();
        assert_eq!(
            game.to_fen(),
            "2kr3r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 w - - 2 2"
        );
        assert_eq!(game.move_history()[0].notation, "e1g1");
    }
}
