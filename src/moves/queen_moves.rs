use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::BISHOP_RAYS;
use crate::moves::rook_moves::ROOK_RAYS;

pub const QUEEN_RAYS: [u64; 64] = generate_queen_rays();

/// Rook or bishop line. Also used for a king empowered by Queen's Soul.
#[inline]
pub const fn is_queen_line(from: Square, to: Square) -> bool {
    QUEEN_RAYS[from.index()] & to.bit() != 0
}

const fn generate_queen_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BISHOP_RAYS[sq] | ROOK_RAYS[sq];
        sq += 1;
    }

    table
}
