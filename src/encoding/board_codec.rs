//! Board field codec: record text -> symbol grid -> signed integer matrix.
//!
//! Rows are ordered rank 8 to rank 1 and columns file a to file h, the same
//! order the record lists them in.

use crate::encoding::lookup_tables::{decode_symbol, encode_symbol, is_piece_symbol, EMPTY_SYMBOL};
use crate::errors::{EncodingError, EncodingResult};

pub const BOARD_SIZE: usize = 8;

/// 8x8 grid of piece symbols (`.` for empty).
pub type BoardGrid = [[char; BOARD_SIZE]; BOARD_SIZE];

/// 8x8 grid of signed piece values in [-6, 6].
pub type EncodedBoard = [[i32; BOARD_SIZE]; BOARD_SIZE];

/// Expand the board field (first token) of a record into a symbol grid.
pub fn decode_grid(record: &str) -> EncodingResult<BoardGrid> {
    let board_field = record
        .split_whitespace()
        .next()
        .ok_or_else(|| malformed("empty record"))?;

    let ranks: Vec<&str> = board_field.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(malformed(&format!(
            "board field has {} ranks, expected {BOARD_SIZE}",
            ranks.len()
        )));
    }

    let mut grid = [[EMPTY_SYMBOL; BOARD_SIZE]; BOARD_SIZE];
    for (row, rank_text) in ranks.iter().enumerate() {
        let mut column = 0usize;
        let mut previous_was_digit = false;

        for ch in rank_text.chars() {
            let is_digit = ch.is_ascii_digit();
            let run = match ch {
                '1'..='8' if !previous_was_digit => ch as usize - '0' as usize,
                '1'..='8' => return Err(malformed("two consecutive empty-square runs")),
                _ if ch != EMPTY_SYMBOL && is_piece_symbol(ch) => 1,
                _ => return Err(malformed(&format!("unrecognized board character '{ch}'"))),
            };

            if column + run > BOARD_SIZE {
                return Err(malformed(&format!("rank {} overflows 8 squares", BOARD_SIZE - row)));
            }
            if !is_digit {
                grid[row][column] = ch;
            }
            column += run;
            previous_was_digit = is_digit;
        }

        if column != BOARD_SIZE {
            return Err(malformed(&format!(
                "rank {} has {column} squares, expected {BOARD_SIZE}",
                BOARD_SIZE - row
            )));
        }
    }

    Ok(grid)
}

/// Map every grid symbol through the piece table.
pub fn encode_grid(grid: &BoardGrid) -> EncodingResult<EncodedBoard> {
    let mut encoded = [[0i32; BOARD_SIZE]; BOARD_SIZE];
    for (row, symbols) in grid.iter().enumerate() {
        for (column, &symbol) in symbols.iter().enumerate() {
            encoded[row][column] = encode_symbol(symbol)?;
        }
    }
    Ok(encoded)
}

/// Reverse lookup of a whole encoded board.
pub fn decode_board(encoded: &EncodedBoard) -> EncodingResult<BoardGrid> {
    let mut grid = [[EMPTY_SYMBOL; BOARD_SIZE]; BOARD_SIZE];
    for (row, values) in encoded.iter().enumerate() {
        for (column, &value) in values.iter().enumerate() {
            grid[row][column] = decode_symbol(value)?;
        }
    }
    Ok(grid)
}

fn malformed(reason: &str) -> EncodingError {
    EncodingError::MalformedRecord(reason.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: [&str; 8]) -> BoardGrid {
        let mut grid = [[EMPTY_SYMBOL; 8]; 8];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                grid[r][c] = ch;
            }
        }
        grid
    }

    #[test]
    fn decodes_a_midgame_board() {
        let fen = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
        let expected = grid_from_rows([
            "r.bqkb.r",
            "pppp.Qpp",
            "..n..n..",
            "....p...",
            "..B.P...",
            "........",
            "PPPP.PPP",
            "RNB.K.NR",
        ]);
        assert_eq!(decode_grid(fen), Ok(expected));
    }

    #[test]
    fn encodes_the_starting_board() {
        let grid = decode_grid(crate::rules::chess_types::STARTING_POSITION_FEN).expect("startpos should decode");
        let encoded = encode_grid(&grid).expect("startpos should encode");

        assert_eq!(encoded[0], [-4, -2, -3, -5, -6, -3, -2, -4]);
        assert_eq!(encoded[1], [-1; 8]);
        assert_eq!(encoded[4], [0; 8]);
        assert_eq!(encoded[6], [1; 8]);
        assert_eq!(encoded[7], [4, 2, 3, 5, 6, 3, 2, 4]);
        assert_eq!(decode_board(&encoded), Ok(grid));
    }

    #[test]
    fn rejects_boards_that_are_not_eight_by_eight() {
        let bad = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1",
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppxpp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppp.ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr|pppppppp|8|8|8|8|PPPPPPPP|RNBQKBNR w KQkq - 0 1",
        ];
        for record in bad {
            assert!(
                matches!(decode_grid(record), Err(EncodingError::MalformedRecord(_))),
                "{record:?} should be malformed"
            );
        }
    }

    #[test]
    fn encode_grid_rejects_unknown_symbols() {
        let mut grid = [[EMPTY_SYMBOL; 8]; 8];
        grid[3][3] = 'z';
        assert_eq!(encode_grid(&grid), Err(EncodingError::UnknownSymbol('z')));
    }
}
