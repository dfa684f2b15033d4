//! Splits a position record into its six logical fields.

use crate::encoding::board_codec::{decode_grid, BoardGrid};
use crate::errors::{EncodingError, EncodingResult};

pub const RECORD_FIELD_COUNT: usize = 6;

/// The six fields of a position record, lightly typed.
///
/// Castling characters are kept as written; unexpected letters pass through
/// untouched and are simply ignored by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFields {
    pub board: BoardGrid,
    pub side_to_move: String,
    pub castling: Vec<char>,
    pub en_passant: String,
    pub half_moves: u32,
    pub full_moves: u32,
}

pub fn decompose(record: &str) -> EncodingResult<PositionFields> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    if tokens.len() != RECORD_FIELD_COUNT {
        return Err(EncodingError::MalformedRecord(format!(
            "expected {RECORD_FIELD_COUNT} fields, found {}",
            tokens.len()
        )));
    }

    Ok(PositionFields {
        board: decode_grid(record)?,
        side_to_move: tokens[1].to_owned(),
        castling: tokens[2].chars().collect(),
        en_passant: tokens[3].to_owned(),
        half_moves: parse_counter("half-move clock", tokens[4])?,
        full_moves: parse_counter("full-move counter", tokens[5])?,
    })
}

fn parse_counter(name: &str, token: &str) -> EncodingResult<u32> {
    token
        .parse::<u32>()
        .map_err(|_| EncodingError::MalformedRecord(format!("{name} '{token}' is not a non-negative integer")))
}
