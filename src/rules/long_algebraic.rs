//! Long algebraic (UCI-style) move text, e.g. `e2e4` or `e7e8q`.
//!
//! Parsing is purely structural; whether the move is playable is decided
//! against a position by `resolve_move`.

use std::fmt;

use crate::errors::IllegalActionError;
use crate::rules::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::rules::chess_types::*;
use crate::rules::move_generation::{generate_legal_moves, ChessMove};
use crate::rules::position::Position;
use crate::rules::rules_engine::MoveSquares;

/// A move as written in long algebraic notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongAlgebraicMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl fmt::Display for LongAlgebraicMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = square_to_algebraic(self.from).map_err(|_| fmt::Error)?;
        let to = square_to_algebraic(self.to).map_err(|_| fmt::Error)?;
        write!(f, "{from}{to}")?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_char())?;
        }
        Ok(())
    }
}

impl From<&ChessMove> for LongAlgebraicMove {
    fn from(mv: &ChessMove) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

impl From<MoveSquares> for LongAlgebraicMove {
    fn from(squares: MoveSquares) -> Self {
        Self {
            from: squares.from,
            to: squares.to,
            promotion: squares.promotion,
        }
    }
}

pub fn parse_long_algebraic(text: &str) -> Result<LongAlgebraicMove, IllegalActionError> {
    let unparseable = |reason: &str| IllegalActionError::Unparseable(text.to_owned(), reason.to_owned());

    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(unparseable("expected 4 or 5 ASCII characters"));
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|e| unparseable(&e.to_string()))?;
    let to = algebraic_to_square(&text[2..4]).map_err(|e| unparseable(&e.to_string()))?;
    if from == to {
        return Err(unparseable("from and to squares are the same"));
    }

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_fen_char(ch) {
            Some(piece) if PieceKind::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(unparseable(&format!("invalid promotion piece '{ch}'"))),
        },
    };

    Ok(LongAlgebraicMove { from, to, promotion })
}

/// Match parsed move text against the legal moves of `position`.
pub fn resolve_move(
    position: &Position,
    requested: &LongAlgebraicMove,
) -> Result<ChessMove, IllegalActionError> {
    generate_legal_moves(position)
        .into_iter()
        .find(|mv| LongAlgebraicMove::from(mv) == *requested)
        .ok_or_else(|| IllegalActionError::Illegal(requested.to_string()))
}
