//! Knight reach table.
//!
//! Knights ignore paths, so a precomputed one-hot table over the row-major
//! square index answers both "can this knight move there" and "does it attack
//! that square".

use crate::game_state::chess_types::Square;

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index()]
}

#[inline]
pub const fn is_knight_move(from: Square, to: Square) -> bool {
    knight_attacks(from) & to.bit() != 0
}

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let col = (sq % 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(row + 2, col + 1);
        attacks |= set_if_valid(row + 1, col + 2);
        attacks |= set_if_valid(row - 1, col + 2);
        attacks |= set_if_valid(row - 2, col + 1);
        attacks |= set_if_valid(row - 2, col - 1);
        attacks |= set_if_valid(row - 1, col - 2);
        attacks |= set_if_valid(row + 1, col - 2);
        attacks |= set_if_valid(row + 2, col - 1);

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

#[cfg(test)]
mod tests {
    use super::{is_knight_move, knight_attacks, KNIGHT_ATTACKS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_attacks_from_center_has_eight_targets() {
        let d4 = Square::new(4, 3);
        assert_eq!(KNIGHT_ATTACKS[d4.index()].count_ones(), 8);
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        let a8 = Square::new(0, 0);
        assert_eq!(knight_attacks(a8).count_ones(), 2);
        assert!(is_knight_move(a8, Square::new(2, 1)));
        assert!(is_knight_move(a8, Square::new(1, 2)));
        assert!(!is_knight_move(a8, Square::new(2, 2)));
    }
}
