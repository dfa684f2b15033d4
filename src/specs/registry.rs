//! Declared shapes and value ranges of every observation and action field.
//!
//! The registry is consulted by validation and tests; the encoder itself does
//! not check its output against it.

use std::sync::OnceLock;

use crate::specs::array_spec::ArraySpec;

pub const SQUARE_COORD_MIN: i32 = 1;
pub const SQUARE_COORD_MAX: i32 = 8;
pub const PIECE_VALUE_MIN: i32 = -6;
pub const PIECE_VALUE_MAX: i32 = 6;
pub const EN_PASSANT_COORD_MIN: i32 = 0;
pub const MOVE_COUNTER_MAX: i32 = 1_000_000;

static OBSERVATION_SPEC: OnceLock<Vec<ArraySpec>> = OnceLock::new();
static ACTION_SPEC: OnceLock<Vec<ArraySpec>> = OnceLock::new();

/// Specs for `board`, `color`, `castling`, `enPassant`, `halfMoves`,
/// `fullMoves`, `selfColor`, in that order.
pub fn observation_spec() -> &'static [ArraySpec] {
    OBSERVATION_SPEC.get_or_init(|| {
        vec![
            ArraySpec::new("board", &[8, 8], PIECE_VALUE_MIN, PIECE_VALUE_MAX),
            ArraySpec::scalar("color", 0, 1),
            ArraySpec::new("castling", &[4], 0, 1),
            ArraySpec::new("enPassant", &[2], EN_PASSANT_COORD_MIN, SQUARE_COORD_MAX),
            ArraySpec::scalar("halfMoves", 0, MOVE_COUNTER_MAX),
            ArraySpec::scalar("fullMoves", 0, MOVE_COUNTER_MAX),
            ArraySpec::scalar("selfColor", 0, 1),
        ]
    })
}

/// Specs for `from`, `to`, `prom`, in that order.
pub fn action_spec() -> &'static [ArraySpec] {
    ACTION_SPEC.get_or_init(|| {
        vec![
            ArraySpec::new("from", &[2], SQUARE_COORD_MIN, SQUARE_COORD_MAX),
            ArraySpec::new("to", &[2], SQUARE_COORD_MIN, SQUARE_COORD_MAX),
            ArraySpec::scalar("prom", PIECE_VALUE_MIN, PIECE_VALUE_MAX),
        ]
    })
}

pub fn find_spec<'a>(specs: &'a [ArraySpec], name: &str) -> Option<&'a ArraySpec> {
    specs.iter().find(|spec| spec.name == name)
}
