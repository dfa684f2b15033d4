//! Bitboard position model for the bundled rules engine.
//!
//! `Position` stores piece bitboards, occupancy caches, turn/state flags and
//! clocks. It is a value type: applying a move produces a new `Position`.

use crate::rules::chess_types::*;
use crate::rules::fen::{generate_fen, parse_fen};
use crate::errors::RulesResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// The parts of a position that decide whether two positions repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    pieces: [[u64; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Position {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn starting() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in [Color::Light, Color::Dark] {
            for piece in PieceKind::ALL {
                if (self.pieces[color.index()][piece.index()] & mask) != 0 {
                    return Some((color, piece));
                }
            }
        }

        None
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all =
            self.occupancy_by_color[Color::Light.index()] | self.occupancy_by_color[Color::Dark.index()];
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::rules::chess_types::{Color, PieceKind};

    #[test]
    fn starting_position_has_thirty_two_pieces() {
        let position = Position::starting();
        assert_eq!(position.occupancy_all.count_ones(), 32);
        assert_eq!(position.piece_on(4), Some((Color::Light, PieceKind::King)));
        assert_eq!(position.piece_on(59), Some((Color::Dark, PieceKind::Queen)));
        assert_eq!(position.piece_on(28), None);
        assert_eq!(position.king_square(Color::Dark), Some(60));
    }
}
