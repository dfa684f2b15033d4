//! Legal move generation.
//!
//! Generates pseudo-legal moves piece by piece, applies each candidate and
//! drops the ones that leave the mover's own king attacked.

use crate::rules::attacks::*;
use crate::rules::chess_types::*;
use crate::rules::move_apply::apply_move;
use crate::rules::position::Position;

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;

/// A fully described move: squares, moved piece, capture and promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: u8,
}

impl ChessMove {
    #[inline]
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

/// All legal moves for the side to move.
pub fn generate_legal_moves(position: &Position) -> Vec<ChessMove> {
    let mover = position.side_to_move;
    generate_pseudo_legal_moves(position)
        .into_iter()
        .filter(|mv| !is_king_in_check(&apply_move(position, mv), mover))
        .collect()
}

/// True when the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    let mover = position.side_to_move;
    generate_pseudo_legal_moves(position)
        .iter()
        .any(|mv| !is_king_in_check(&apply_move(position, mv), mover))
}

/// True when an en-passant capture onto the stored target square is legal.
pub fn has_legal_en_passant(position: &Position) -> bool {
    if position.en_passant_square.is_none() {
        return false;
    }

    let mover = position.side_to_move;
    let mut pseudo = Vec::new();
    generate_pawn_moves(position, &mut pseudo);
    pseudo
        .iter()
        .filter(|mv| mv.has_flag(FLAG_EN_PASSANT))
        .any(|mv| !is_king_in_check(&apply_move(position, mv), mover))
}

pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(64);
    generate_pawn_moves(position, &mut out);
    generate_piece_moves(position, PieceKind::Knight, &mut out);
    generate_piece_moves(position, PieceKind::Bishop, &mut out);
    generate_piece_moves(position, PieceKind::Rook, &mut out);
    generate_piece_moves(position, PieceKind::Queen, &mut out);
    generate_piece_moves(position, PieceKind::King, &mut out);
    generate_castling_moves(position, &mut out);
    out
}

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let theirs = &position.pieces[attacker_color.index()];

    // A pawn of `attacker_color` attacks `square` exactly when a pawn of the
    // other color on `square` would attack it back.
    if pawn_attacks(attacker_color.opposite(), square) & theirs[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & theirs[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if king_attacks(square) & theirs[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = theirs[PieceKind::Queen.index()];
    if bishop_attacks(square, position.occupancy_all) & (theirs[PieceKind::Bishop.index()] | queens) != 0 {
        return true;
    }

    rook_attacks(square, position.occupancy_all) & (theirs[PieceKind::Rook.index()] | queens) != 0
}

fn enemy_piece_on(position: &Position, square: Square) -> Option<PieceKind> {
    match position.piece_on(square) {
        Some((color, piece)) if color != position.side_to_move => Some(piece),
        _ => None,
    }
}

fn generate_piece_moves(position: &Position, piece: PieceKind, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let mut pieces = position.pieces[side.index()][piece.index()];

    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        let reach = match piece {
            PieceKind::Knight => knight_attacks(from),
            PieceKind::Bishop => bishop_attacks(from, position.occupancy_all),
            PieceKind::Rook => rook_attacks(from, position.occupancy_all),
            PieceKind::Queen => queen_attacks(from, position.occupancy_all),
            PieceKind::King => king_attacks(from),
            PieceKind::Pawn => 0,
        };

        let mut targets = reach & !own_occ;
        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            let captured = enemy_piece_on(position, to);
            out.push(ChessMove {
                from,
                to,
                piece,
                captured,
                promotion: None,
                flags: if captured.is_some() { FLAG_CAPTURE } else { 0 },
            });
            targets &= targets - 1;
        }

        pieces &= pieces - 1;
    }
}

fn push_pawn_move(out: &mut Vec<ChessMove>, from: Square, to: Square, captured: Option<PieceKind>, flags: u8) {
    let promotes = to / 8 == 0 || to / 8 == 7;
    if promotes {
        for promo in PieceKind::PROMOTIONS {
            out.push(ChessMove {
                from,
                to,
                piece: PieceKind::Pawn,
                captured,
                promotion: Some(promo),
                flags,
            });
        }
    } else {
        out.push(ChessMove {
            from,
            to,
            piece: PieceKind::Pawn,
            captured,
            promotion: None,
            flags,
        });
    }
}

fn generate_pawn_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let enemy_occ = position.occupancy_by_color[side.opposite().index()];
    let empty = !position.occupancy_all;
    let (forward, start_rank): (i16, u8) = match side {
        Color::Light => (8, 1),
        Color::Dark => (-8, 6),
    };

    let mut pawns = position.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let one_step = i16::from(from) + forward;
        if (0..64).contains(&one_step) {
            let to = one_step as Square;
            if empty & (1u64 << to) != 0 {
                push_pawn_move(out, from, to, None, 0);

                let two_step = one_step + forward;
                if from / 8 == start_rank && empty & (1u64 << two_step) != 0 {
                    push_pawn_move(out, from, two_step as Square, None, FLAG_DOUBLE_PAWN_PUSH);
                }
            }
        }

        let mut captures = pawn_attacks(side, from);
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            captures &= captures - 1;

            if enemy_occ & (1u64 << to) != 0 {
                push_pawn_move(out, from, to, enemy_piece_on(position, to), FLAG_CAPTURE);
            } else if position.en_passant_square == Some(to) && empty & (1u64 << to) != 0 {
                push_pawn_move(
                    out,
                    from,
                    to,
                    Some(PieceKind::Pawn),
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                );
            }
        }
    }
}

fn generate_castling_moves(position: &Position, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let enemy = side.opposite();
    let (king_from, kingside, queenside) = match side {
        Color::Light => (4u8, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => (60u8, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    };

    if position.king_square(side) != Some(king_from) || is_square_attacked(position, king_from, enemy) {
        return;
    }

    let rooks = position.pieces[side.index()][PieceKind::Rook.index()];

    // (right, rook square, squares that must be empty, squares the king crosses)
    let candidates = [
        (kingside, king_from + 3, [king_from + 1, king_from + 2, king_from + 2], [king_from + 1, king_from + 2]),
        (queenside, king_from - 4, [king_from - 1, king_from - 2, king_from - 3], [king_from - 1, king_from - 2]),
    ];

    for (right, rook_sq, must_be_empty, crossed) in candidates {
        if position.castling_rights & right == 0 || rooks & (1u64 << rook_sq) == 0 {
            continue;
        }
        if must_be_empty.iter().any(|&sq| position.occupancy_all & (1u64 << sq) != 0) {
            continue;
        }
        if crossed.iter().any(|&sq| is_square_attacked(position, sq, enemy)) {
            continue;
        }

        out.push(ChessMove {
            from: king_from,
            to: crossed[1],
            piece: PieceKind::King,
            captured: None,
            promotion: None,
            flags: FLAG_CASTLING,
        });
    }
}
