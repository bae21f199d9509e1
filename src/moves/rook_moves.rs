use crate::game_state::chess_types::Square;

pub const ROOK_RAYS: [u64; 64] = generate_rook_rays();

/// Same row or same column, excluding the origin. Path occupancy is checked
/// separately because it depends on effects.
#[inline]
pub const fn is_rook_line(from: Square, to: Square) -> bool {
    ROOK_RAYS[from.index()] & to.bit() != 0
}

const fn generate_rook_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let sq_i = sq as i32;
        let mut rays = 0u64;

        rays |= trace_ray_const(sq_i, 0, 1);
        rays |= trace_ray_const(sq_i, 0, -1);
        rays |= trace_ray_const(sq_i, 1, 0);
        rays |= trace_ray_const(sq_i, -1, 0);

        table[sq] = rays;
        sq += 1;
    }

    table
}

const fn trace_ray_const(square: i32, row_step: i32, col_step: i32) -> u64 {
    let mut row = (square / 8) + row_step;
    let mut col = (square % 8) + col_step;
    let mut rays = 0u64;

    while row >= 0 && row < 8 && col >= 0 && col < 8 {
        let target = (row * 8 + col) as usize;
        rays |= 1u64 << target;
        row += row_step;
        col += col_step;
    }

    rays
}
