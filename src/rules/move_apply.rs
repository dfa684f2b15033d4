//! Copy-make move application.

use crate::rules::chess_types::*;
use crate::rules::move_generation::{ChessMove, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::rules::position::Position;

/// Apply a pseudo-legal move and return the resulting position.
///
/// Does not check legality; callers filter with `is_king_in_check`.
pub fn apply_move(position: &Position, mv: &ChessMove) -> Position {
    let moving_color = position.side_to_move;
    let enemy_color = moving_color.opposite();
    let from_mask = 1u64 << mv.from;
    let to_mask = 1u64 << mv.to;

    let mut next = position.clone();

    next.pieces[moving_color.index()][mv.piece.index()] &= !from_mask;

    if mv.has_flag(FLAG_EN_PASSANT) {
        let capture_sq = match moving_color {
            Color::Light => mv.to - 8,
            Color::Dark => mv.to + 8,
        };
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
    } else if mv.captured.is_some() {
        for bitboard in next.pieces[enemy_color.index()].iter_mut() {
            *bitboard &= !to_mask;
        }
    }

    let placed = mv.promotion.unwrap_or(mv.piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if mv.has_flag(FLAG_CASTLING) {
        let (rook_from, rook_to) = if mv.to > mv.from {
            (mv.from + 3, mv.from + 1)
        } else {
            (mv.from - 4, mv.from - 1)
        };
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks &= !(1u64 << rook_from);
        *rooks |= 1u64 << rook_to;
    }

    update_castling_rights(&mut next, moving_color, mv);

    next.en_passant_square = if mv.has_flag(FLAG_DOUBLE_PAWN_PUSH) {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if mv.piece == PieceKind::Pawn || mv.captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    next
}

fn update_castling_rights(position: &mut Position, moving_color: Color, mv: &ChessMove) {
    if mv.piece == PieceKind::King {
        position.castling_rights &= match moving_color {
            Color::Light => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            Color::Dark => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        };
    }

    // A rook leaving its corner, or anything landing on a corner, clears
    // that corner's right.
    for square in [mv.from, mv.to] {
        position.castling_rights &= match square {
            0 => !CASTLE_LIGHT_QUEENSIDE,
            7 => !CASTLE_LIGHT_KINGSIDE,
            56 => !CASTLE_DARK_QUEENSIDE,
            63 => !CASTLE_DARK_KINGSIDE,
            _ => !0,
        };
    }
}
