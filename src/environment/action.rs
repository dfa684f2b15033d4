//! Agent action: two squares and an optional promotion piece.

use serde::{Deserialize, Serialize};

use crate::encoding::lookup_tables::{decode_symbol, encode_symbol, file_letter, rank_digit};
use crate::errors::IllegalActionError;
use crate::rules::chess_types::Color;
use crate::rules::rules_engine::MoveSquares;

/// `from` and `to` are (file, rank) pairs in [1, 8]; `prom` is a signed
/// piece value in [-6, 6] with 0 meaning no promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub from: [i32; 2],
    pub to: [i32; 2],
    pub prom: i32,
}

impl Action {
    pub fn new(from: [i32; 2], to: [i32; 2], prom: i32) -> Self {
        Self { from, to, prom }
    }

    /// Build the action that plays `squares` for `mover`; the promotion
    /// value carries the mover's sign.
    pub fn from_move_squares(squares: MoveSquares, mover: Color) -> Self {
        let prom = squares
            .promotion
            .and_then(|piece| encode_symbol(piece.fen_char()).ok())
            .map(|value| match mover {
                Color::Light => value.abs(),
                Color::Dark => -value.abs(),
            })
            .unwrap_or(0);

        Self {
            from: square_coords(squares.from),
            to: square_coords(squares.to),
            prom,
        }
    }

    /// Long algebraic text for the rules engine: from square, to square and,
    /// when `prom` is non-zero, the promotion piece's symbol.
    pub fn to_move_text(&self) -> Result<String, IllegalActionError> {
        let mut text = String::with_capacity(5);
        text.push_str(&square_text(self.from)?);
        text.push_str(&square_text(self.to)?);

        if self.prom != 0 {
            let symbol = decode_symbol(self.prom)
                .map_err(|_| IllegalActionError::OutOfSpec(format!("promotion value {}", self.prom)))?;
            text.push(symbol);
        }

        Ok(text)
    }

    /// Whether `prom` carries `mover`'s sign: positive for the first player,
    /// negative for the second, or zero for no promotion.
    pub fn promotion_signed_for(&self, mover: Color) -> bool {
        match mover {
            Color::Light => self.prom >= 0,
            Color::Dark => self.prom <= 0,
        }
    }

    /// Every field flattened, keyed by its wire name.
    pub fn field_values(&self) -> Vec<(&'static str, Vec<i32>)> {
        vec![
            ("from", self.from.to_vec()),
            ("to", self.to.to_vec()),
            ("prom", vec![self.prom]),
        ]
    }
}

fn square_coords(square: u8) -> [i32; 2] {
    [i32::from(square % 8) + 1, i32::from(square / 8) + 1]
}

fn square_text(coords: [i32; 2]) -> Result<String, IllegalActionError> {
    match (file_letter(coords[0]), rank_digit(coords[1])) {
        (Some(file), Some(rank)) => Ok(format!("{file}{rank}")),
        _ => Err(IllegalActionError::OutOfSpec(format!(
            "square ({}, {})",
            coords[0], coords[1]
        ))),
    }
}
