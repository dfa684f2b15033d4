//! Fixed symbol and coordinate tables shared by the codec and the encoder.
//!
//! Both directions of every mapping read the same table, so the encode and
//! decode paths cannot drift apart.

use crate::errors::{EncodingError, EncodingResult};

/// Empty-square symbol used in a board grid.
pub const EMPTY_SYMBOL: char = '.';

/// Board symbol to signed piece value. Sign is the side (positive = first
/// player), magnitude the piece (pawn 1 .. king 6), 0 the empty square.
pub const PIECE_SYMBOLS: [(char, i32); 13] = [
    ('p', -1),
    ('n', -2),
    ('b', -3),
    ('r', -4),
    ('q', -5),
    ('k', -6),
    (EMPTY_SYMBOL, 0),
    ('P', 1),
    ('N', 2),
    ('B', 3),
    ('R', 4),
    ('Q', 5),
    ('K', 6),
];

/// File letters `a..h` to coordinates `1..8`.
pub const FILE_LETTERS: [(char, i32); 8] = [
    ('a', 1),
    ('b', 2),
    ('c', 3),
    ('d', 4),
    ('e', 5),
    ('f', 6),
    ('g', 7),
    ('h', 8),
];

/// Rank digits `1..8` to coordinates `1..8`.
pub const RANK_DIGITS: [(char, i32); 8] = [
    ('1', 1),
    ('2', 2),
    ('3', 3),
    ('4', 4),
    ('5', 5),
    ('6', 6),
    ('7', 7),
    ('8', 8),
];

/// Castling letters in the order of the encoded castling vector.
pub const CASTLING_LETTERS: [char; 4] = ['K', 'Q', 'k', 'q'];

#[inline]
fn forward(table: &[(char, i32)], symbol: char) -> Option<i32> {
    table.iter().find(|(ch, _)| *ch == symbol).map(|(_, value)| *value)
}

#[inline]
fn reverse(table: &[(char, i32)], value: i32) -> Option<char> {
    table.iter().find(|(_, v)| *v == value).map(|(ch, _)| *ch)
}

pub fn encode_symbol(symbol: char) -> EncodingResult<i32> {
    forward(&PIECE_SYMBOLS, symbol).ok_or(EncodingError::UnknownSymbol(symbol))
}

pub fn decode_symbol(value: i32) -> EncodingResult<char> {
    reverse(&PIECE_SYMBOLS, value).ok_or(EncodingError::UnknownValue(value))
}

#[inline]
pub fn is_piece_symbol(symbol: char) -> bool {
    forward(&PIECE_SYMBOLS, symbol).is_some()
}

pub fn file_index(letter: char) -> Option<i32> {
    forward(&FILE_LETTERS, letter)
}

pub fn file_letter(index: i32) -> Option<char> {
    reverse(&FILE_LETTERS, index)
}

pub fn rank_index(digit: char) -> Option<i32> {
    forward(&RANK_DIGITS, digit)
}

pub fn rank_digit(index: i32) -> Option<char> {
    reverse(&RANK_DIGITS, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_round_trips() {
        for (symbol, value) in PIECE_SYMBOLS {
            assert_eq!(encode_symbol(symbol), Ok(value));
            assert_eq!(decode_symbol(encode_symbol(symbol).expect("known symbol")), Ok(symbol));
        }
    }

    #[test]
    fn piece_table_is_a_bijection_onto_minus_six_to_six() {
        let mut values: Vec<i32> = PIECE_SYMBOLS.iter().map(|(_, v)| *v).collect();
        values.sort_unstable();
        assert_eq!(values, (-6..=6).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_symbols_and_values_are_rejected() {
        assert_eq!(encode_symbol('x'), Err(EncodingError::UnknownSymbol('x')));
        assert_eq!(encode_symbol('1'), Err(EncodingError::UnknownSymbol('1')));
        assert_eq!(decode_symbol(7), Err(EncodingError::UnknownValue(7)));
        assert_eq!(decode_symbol(-7), Err(EncodingError::UnknownValue(-7)));
    }

    #[test]
    fn coordinate_tables() {
        assert_eq!(file_index('a'), Some(1));
        assert_eq!(file_index('h'), Some(8));
        assert_eq!(file_index('i'), None);
        assert_eq!(file_letter(5), Some('e'));
        assert_eq!(rank_index('3'), Some(3));
        assert_eq!(rank_index('9'), None);
        assert_eq!(rank_digit(0), None);
    }
}
