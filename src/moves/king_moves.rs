//! King step table and castling geometry.

use crate::game_state::chess_rules::{
    KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL, KING_HOME_COL, QUEENSIDE_ROOK_COL,
    QUEENSIDE_ROOK_TARGET_COL,
};
use crate::game_state::chess_types::{Color, Square};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index()]
}

/// One square in any direction.
#[inline]
pub const fn is_king_step(from: Square, to: Square) -> bool {
    king_attacks(from) & to.bit() != 0
}

#[inline]
pub const fn king_home_square(color: Color) -> Square {
    Square::new(color.back_row(), KING_HOME_COL)
}

/// `(rook_from, rook_to)` for a castle of `color` on the given side.
#[inline]
pub const fn castling_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    let row = color.back_row();
    if kingside {
        (
            Square::new(row, KINGSIDE_ROOK_COL),
            Square::new(row, KINGSIDE_ROOK_TARGET_COL),
        )
    } else {
        (
            Square::new(row, QUEENSIDE_ROOK_COL),
            Square::new(row, QUEENSIDE_ROOK_TARGET_COL),
        )
    }
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let col = (sq % 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(row - 1, col - 1);
        attacks |= set_if_valid(row - 1, col);
        attacks |= set_if_valid(row - 1, col + 1);
        attacks |= set_if_valid(row, col - 1);
        attacks |= set_if_valid(row, col + 1);
        attacks |= set_if_valid(row + 1, col - 1);
        attacks |= set_if_valid(row + 1, col);
        attacks |= set_if_valid(row + 1, col + 1);

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(row: i32, col: i32) -> u64 {
    if row < 0 || row > 7 || col < 0 || col > 7 {
        return 0;
    }

    let square = (row as usize) * 8 + (col as usize);
    1u64 << square
}
