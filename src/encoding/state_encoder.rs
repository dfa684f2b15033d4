//! Position record -> fixed-shape structured observation.
//!
//! `encode` is a pure function of `(record, self_color)`: it decomposes the
//! record, encodes the board, and turns the remaining fields into small
//! integer tensors an agent can consume directly.

use serde::{Deserialize, Serialize};

use crate::encoding::board_codec::{encode_grid, EncodedBoard};
use crate::encoding::lookup_tables::{file_index, rank_index, CASTLING_LETTERS};
use crate::encoding::position_decomposer::decompose;
use crate::errors::{EncodingError, EncodingResult};

/// Side-to-move token of the first player.
pub const FIRST_PLAYER_TOKEN: &str = "w";

/// Structured observation handed to a learning agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub board: EncodedBoard,
    /// 0 when the first player is to move, 1 otherwise.
    pub color: i32,
    /// Flags for K, Q, k, q in that order.
    pub castling: [i32; 4],
    /// (file, rank) of the en-passant target, (0, 0) when there is none.
    pub en_passant: [i32; 2],
    pub half_moves: i32,
    pub full_moves: i32,
    /// The acting player's own color, copied from the caller.
    pub self_color: i32,
}

impl Observation {
    /// Every field flattened in declaration order, keyed by its wire name.
    pub fn field_values(&self) -> Vec<(&'static str, Vec<i32>)> {
        vec![
            ("board", self.board.iter().flatten().copied().collect()),
            ("color", vec![self.color]),
            ("castling", self.castling.to_vec()),
            ("enPassant", self.en_passant.to_vec()),
            ("halfMoves", vec![self.half_moves]),
            ("fullMoves", vec![self.full_moves]),
            ("selfColor", vec![self.self_color]),
        ]
    }
}

pub fn encode(record: &str, self_color: i32) -> EncodingResult<Observation> {
    if !(0..=1).contains(&self_color) {
        return Err(EncodingError::InvalidColor(self_color));
    }

    let fields = decompose(record)?;

    let mut castling = [0i32; 4];
    for (flag, letter) in castling.iter_mut().zip(CASTLING_LETTERS) {
        *flag = i32::from(fields.castling.contains(&letter));
    }

    Ok(Observation {
        board: encode_grid(&fields.board)?,
        color: if fields.side_to_move == FIRST_PLAYER_TOKEN { 0 } else { 1 },
        castling,
        en_passant: encode_en_passant(&fields.en_passant)?,
        half_moves: counter_to_i32(fields.half_moves)?,
        full_moves: counter_to_i32(fields.full_moves)?,
        self_color,
    })
}

fn encode_en_passant(token: &str) -> EncodingResult<[i32; 2]> {
    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [_] => Ok([0, 0]),
        [file, rank] => match (file_index(*file), rank_index(*rank)) {
            (Some(file), Some(rank)) => Ok([file, rank]),
            _ => Err(EncodingError::MalformedRecord(format!(
                "invalid en-passant square '{token}'"
            ))),
        },
        _ => Err(EncodingError::MalformedRecord(format!(
            "invalid en-passant field '{token}'"
        ))),
    }
}

fn counter_to_i32(value: u32) -> EncodingResult<i32> {
    i32::try_from(value)
        .map_err(|_| EncodingError::MalformedRecord(format!("move counter {value} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::chess_types::STARTING_POSITION_FEN;

    #[test]
    fn encodes_the_starting_record() {
        let observation = encode(STARTING_POSITION_FEN, 0).expect("startpos should encode");

        let expected_board = [
            [-4, -2, -3, -5, -6, -3, -2, -4],
            [-1, -1, -1, -1, -1, -1, -1, -1],
            [0; 8],
            [0; 8],
            [0; 8],
            [0; 8],
            [1, 1, 1, 1, 1, 1, 1, 1],
            [4, 2, 3, 5, 6, 3, 2, 4],
        ];
        assert_eq!(observation.board, expected_board);
        assert_eq!(observation.color, 0);
        assert_eq!(observation.castling, [1, 1, 1, 1]);
        assert_eq!(observation.en_passant, [0, 0]);
        assert_eq!(observation.half_moves, 0);
        assert_eq!(observation.full_moves, 1);
        assert_eq!(observation.self_color, 0);
    }

    #[test]
    fn encodes_side_castling_and_en_passant() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w Kq f6 0 3";
        let observation = encode(fen, 1).expect("record should encode");

        assert_eq!(observation.color, 0);
        assert_eq!(observation.castling, [1, 0, 0, 1]);
        assert_eq!(observation.en_passant, [6, 6]);
        assert_eq!(observation.full_moves, 3);
        assert_eq!(observation.self_color, 1);

        let black = encode("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1", 0).expect("record should encode");
        assert_eq!(black.color, 1);
        assert_eq!(black.castling, [0, 0, 0, 0]);
        assert_eq!(black.en_passant, [5, 3]);
    }

    #[test]
    fn unexpected_castling_letters_are_ignored() {
        let observation = encode("4k3/8/8/8/8/8/8/4K3 w KXz - 0 1", 0).expect("record should encode");
        assert_eq!(observation.castling, [1, 0, 0, 0]);

        let none = encode("4k3/8/8/8/8/8/8/4K3 w - - 0 1", 0).expect("record should encode");
        assert_eq!(none.castling, [0, 0, 0, 0]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let fen = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
        assert_eq!(encode(fen, 1), encode(fen, 1));
    }

    #[test]
    fn rejects_bad_colors_and_en_passant_tokens() {
        assert_eq!(encode(STARTING_POSITION_FEN, 2), Err(EncodingError::InvalidColor(2)));
        assert_eq!(encode(STARTING_POSITION_FEN, -1), Err(EncodingError::InvalidColor(-1)));

        let board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq";
        for ep in ["z3", "e9", "e3x"] {
            let record = format!("{board} {ep} 0 1");
            assert!(matches!(encode(&record, 0), Err(EncodingError::MalformedRecord(_))), "{ep}");
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let observation = encode(STARTING_POSITION_FEN, 1).expect("startpos should encode");
        let json = serde_json::to_value(&observation).expect("observation should serialize");

        assert_eq!(json["enPassant"], serde_json::json!([0, 0]));
        assert_eq!(json["halfMoves"], serde_json::json!(0));
        assert_eq!(json["fullMoves"], serde_json::json!(1));
        assert_eq!(json["selfColor"], serde_json::json!(1));
        assert_eq!(json["board"][0][4], serde_json::json!(-6));

        let back: Observation = serde_json::from_value(json).expect("observation should deserialize");
        assert_eq!(back, observation);
    }
}
