//! Terminal-oriented Unicode rendering of an encoded observation.
//!
//! Used by the episode runner at trace level and handy when a test fails on
//! a board comparison.

use crate::encoding::board_codec::decode_board;
use crate::encoding::lookup_tables::{file_letter, CASTLING_LETTERS, EMPTY_SYMBOL};
use crate::encoding::state_encoder::Observation;
use crate::errors::EncodingResult;

/// Render the board with rank 8 on top, followed by one line of state.
pub fn render_observation(observation: &Observation) -> EncodingResult<String> {
    let grid = decode_board(&observation.board)?;
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");
    for (row, cells) in grid.iter().enumerate() {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');
        for (file, &symbol) in cells.iter().enumerate() {
            out.push(symbol_to_unicode(symbol));
            if file < 7 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(rank);
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");

    let to_move = if observation.color == 0 { "first" } else { "second" };
    let castling: String = CASTLING_LETTERS
        .iter()
        .zip(observation.castling)
        .filter(|(_, flag)| *flag == 1)
        .map(|(letter, _)| *letter)
        .collect();
    let en_passant = match (file_letter(observation.en_passant[0]), observation.en_passant[1]) {
        (Some(file), rank) if rank > 0 => format!("{file}{rank}"),
        _ => "-".to_owned(),
    };

    out.push_str(&format!(
        "to move: {to_move}  castling: {}  en passant: {en_passant}  clocks: {}/{}",
        if castling.is_empty() { "-" } else { castling.as_str() },
        observation.half_moves,
        observation.full_moves
    ));

    Ok(out)
}

fn symbol_to_unicode(symbol: char) -> char {
    match symbol {
        'P' => '♙',
        'N' => '♘',
        'B' => '♗',
        'R' => '♖',
        'Q' => '♕',
        'K' => '♔',
        'p' => '♟',
        'n' => '♞',
        'b' => '♝',
        'r' => '♜',
        'q' => '♛',
        'k' => '♚',
        EMPTY_SYMBOL => '·',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::render_observation;
    use crate::encoding::state_encoder::encode;
    use crate::rules::chess_types::STARTING_POSITION_FEN;

    #[test]
    fn renders_the_starting_position() {
        let observation = encode(STARTING_POSITION_FEN, 0).expect("startpos should encode");
        let text = render_observation(&observation).expect("render should succeed");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
        assert_eq!(
            lines[10],
            "to move: first  castling: KQkq  en passant: -  clocks: 0/1"
        );
    }

    #[test]
    fn shows_en_passant_target() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let observation = encode(fen, 1).expect("position should encode");
        let text = render_observation(&observation).expect("render should succeed");
        assert!(text.ends_with("to move: first  castling: KQkq  en passant: f6  clocks: 0/3"));
    }
}
