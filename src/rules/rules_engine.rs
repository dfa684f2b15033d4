//! Rules-engine abstraction consumed by the environment.
//!
//! The environment never evaluates chess rules itself. Everything it needs
//! (legality, move application, game termination, the current record) goes
//! through this trait, so a different engine can be plugged in behind it.

use crate::errors::{IllegalActionError, RulesResult};
use crate::rules::chess_types::{GameResult, PieceKind, Square};

/// The squares and promotion of a legal move, independent of the engine's
/// own move representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSquares {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

pub trait RulesEngine: Sized {
    type Move;

    /// Start a game from a position record.
    fn new_game(record: &str) -> RulesResult<Self>;

    fn is_game_over(&self) -> bool;

    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Structural parse of long algebraic move text.
    fn parse_move(&self, text: &str) -> Result<Self::Move, IllegalActionError>;

    /// Play a move; fails without changing the game if the move is illegal.
    fn apply_move(&mut self, mv: Self::Move) -> Result<(), IllegalActionError>;

    fn current_record(&self) -> String;

    /// `None` while the game is still running.
    fn result(&self) -> Option<GameResult>;

    fn move_squares(&self, mv: &Self::Move) -> MoveSquares;
}
