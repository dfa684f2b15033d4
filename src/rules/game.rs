//! Game driver for the bundled rules engine.
//!
//! `Game` owns the live `Position` plus the repetition history needed to
//! detect automatic draws, and implements `RulesEngine` for the environment.

use log::trace;

use crate::errors::{IllegalActionError, RulesResult};
use crate::rules::chess_types::*;
use crate::rules::long_algebraic::{parse_long_algebraic, resolve_move, LongAlgebraicMove};
use crate::rules::move_apply::apply_move;
use crate::rules::move_generation::{
    generate_legal_moves, has_legal_en_passant, has_legal_move, is_king_in_check,
};
use crate::rules::position::{Position, RepetitionKey};
use crate::rules::rules_engine::{MoveSquares, RulesEngine};

const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
const FIVEFOLD: usize = 5;

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<RepetitionKey>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::starting())
    }

    pub fn from_position(mut position: Position) -> Self {
        normalize_en_passant(&mut position);
        let history = vec![position.repetition_key()];
        Self { position, history }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Why the game is over, or `None` while it continues.
    pub fn termination(&self) -> Option<Termination> {
        if !has_legal_move(&self.position) {
            return Some(if is_king_in_check(&self.position, self.position.side_to_move) {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if is_insufficient_material(&self.position) {
            return Some(Termination::InsufficientMaterial);
        }
        if self.position.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
            return Some(Termination::SeventyFiveMoves);
        }

        let current = self.position.repetition_key();
        if self.history.iter().filter(|key| **key == current).count() >= FIVEFOLD {
            return Some(Termination::FivefoldRepetition);
        }

        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for Game {
    type Move = LongAlgebraicMove;

    fn new_game(record: &str) -> RulesResult<Self> {
        Ok(Self::from_position(Position::from_fen(record)?))
    }

    fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }

    fn legal_moves(&self) -> Vec<LongAlgebraicMove> {
        generate_legal_moves(&self.position)
            .iter()
            .map(LongAlgebraicMove::from)
            .collect()
    }

    fn parse_move(&self, text: &str) -> Result<LongAlgebraicMove, IllegalActionError> {
        parse_long_algebraic(text)
    }

    fn apply_move(&mut self, mv: LongAlgebraicMove) -> Result<(), IllegalActionError> {
        let resolved = resolve_move(&self.position, &mv)?;
        let mut next = apply_move(&self.position, &resolved);
        normalize_en_passant(&mut next);

        trace!("applied {mv}: {}", next.to_fen());

        self.history.push(next.repetition_key());
        self.position = next;
        Ok(())
    }

    fn current_record(&self) -> String {
        self.position.to_fen()
    }

    fn result(&self) -> Option<GameResult> {
        self.termination().map(|termination| match termination {
            Termination::Checkmate => match self.position.side_to_move {
                Color::Light => GameResult::SecondPlayerWins,
                Color::Dark => GameResult::FirstPlayerWins,
            },
            _ => GameResult::Draw,
        })
    }

    fn move_squares(&self, mv: &LongAlgebraicMove) -> MoveSquares {
        MoveSquares {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

/// Keep the en-passant square only when the capture is actually playable, so
/// records and repetition keys agree with what a player could do.
fn normalize_en_passant(position: &mut Position) {
    if !has_legal_en_passant(position) {
        position.en_passant_square = None;
    }
}

fn is_insufficient_material(position: &Position) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    for color in [Color::Light, Color::Dark] {
        if heavy_or_pawn
            .iter()
            .any(|piece| position.pieces[color.index()][piece.index()] != 0)
        {
            return false;
        }
    }

    let knights = position.pieces[0][PieceKind::Knight.index()] | position.pieces[1][PieceKind::Knight.index()];
    let bishops = position.pieces[0][PieceKind::Bishop.index()] | position.pieces[1][PieceKind::Bishop.index()];

    if (knights | bishops).count_ones() <= 1 {
        return true;
    }

    knights == 0 && (bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0)
}
