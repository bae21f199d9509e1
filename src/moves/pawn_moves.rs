//! Pawn capture tables and push geometry.
//!
//! White pawns advance towards row 0 and Black pawns towards row 7. Pushes
//! need board occupancy and are classified here purely by geometry; the
//! legality engine checks the squares.

use crate::game_state::chess_types::{Color, Square};

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PawnPush {
    Single,
    Double,
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

#[inline]
pub const fn is_pawn_capture_step(color: Color, from: Square, to: Square) -> bool {
    pawn_attacks(color, from) & to.bit() != 0
}

/// Straight-ahead step of one, or two from the start row.
pub fn pawn_push(color: Color, from: Square, to: Square) -> Option<PawnPush> {
    let (row_delta, col_delta) = from.delta_to(to);
    if col_delta != 0 {
        return None;
    }

    let direction = color.pawn_direction();
    if row_delta == direction {
        Some(PawnPush::Single)
    } else if row_delta == 2 * direction && from.row == color.pawn_start_row() {
        Some(PawnPush::Double)
    } else {
        None
    }
}

const fn generate_pawn_attacks(direction: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32 + direction;
        let col = (sq % 8) as i32;
        let mut attacks = 0u64;

        if row >= 0 && row < 8 {
            if col > 0 {
                attacks |= 1u64 << (row as usize * 8 + (col - 1) as usize);
            }
            if col < 7 {
                attacks |= 1u64 << (row as usize * 8 + (col + 1) as usize);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{pawn_attacks, pawn_push, PawnPush, BLACK_PAWN_ATTACKS, WHITE_PAWN_ATTACKS};
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn white_pawn_attacks_from_e2() {
        let e2 = Square::new(6, 4);
        let expected = Square::new(5, 3).bit() | Square::new(5, 5).bit();
        assert_eq!(WHITE_PAWN_ATTACKS[e2.index()], expected);
        assert_eq!(pawn_attacks(Color::White, e2), expected);
    }

    #[test]
    fn black_pawn_attacks_from_a7_stay_on_board() {
        let a7 = Square::new(1, 0);
        assert_eq!(BLACK_PAWN_ATTACKS[a7.index()], Square::new(2, 1).bit());
    }

    #[test]
    fn double_push_only_from_start_row() {
        let e2 = Square::new(6, 4);
        assert_eq!(pawn_push(Color::White, e2, Square::new(4, 4)), Some(PawnPush::Double));
        assert_eq!(pawn_push(Color::White, e2, Square::new(5, 4)), Some(PawnPush::Single));
        assert_eq!(pawn_push(Color::White, Square::new(5, 4), Square::new(3, 4)), None);
        assert_eq!(pawn_push(Color::Black, e2, Square::new(7, 4)), Some(PawnPush::Single));
        assert_eq!(pawn_push(Color::White, e2, Square::new(7, 4)), None);
    }
}
