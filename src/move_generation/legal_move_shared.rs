use crate::effects::effect_registry::EffectRegistry;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Unit step from `from` towards `to` on each axis.
#[inline]
pub fn step_towards(from: Square, to: Square) -> (i32, i32) {
    let (row_delta, col_delta) = from.delta_to(to);
    (row_delta.signum(), col_delta.signum())
}

/// Squares strictly between `from` and `to` along a rook or bishop line.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let (row_step, col_step) = step_towards(from, to);
    let mut out = Vec::new();
    let mut current = from.offset(row_step, col_step);
    while let Some(square) = current {
        if square == to {
            break;
        }
        out.push(square);
        current = square.offset(row_step, col_step);
    }
    out
}

/// Walks the squares between `from` and `to`. Frozen and barricaded squares
/// always block; occupied squares block unless `can_jump` (Ladder).
pub fn is_path_clear(
    board: &Board,
    effects: &EffectRegistry,
    from: Square,
    to: Square,
    can_jump: bool,
) -> bool {
    squares_between(from, to).into_iter().all(|square| {
        !effects.is_blocked(square) && (can_jump || board.is_empty(square))
    })
}

#[inline]
pub fn owner_can_jump(effects: &EffectRegistry, color: Color) -> bool {
    effects.player(color).can_jump()
}
