//! Attack detection and king-safety simulation.
//!
//! Attack rays honour the same path rules as movement: frozen and barricaded
//! squares stop a ray, and only the attacker's own Ladder lets it pass over
//! pieces. A frozen attacker still attacks.

use crate::effects::effect_registry::EffectRegistry;
use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{is_path_clear, owner_can_jump};
use crate::move_generation::legal_move_validator::MovePlan;
use crate::moves::bishop_moves::is_bishop_line;
use crate::moves::king_moves::is_king_step;
use crate::moves::knight_moves::is_knight_move;
use crate::moves::pawn_moves::is_pawn_capture_step;
use crate::moves::queen_moves::is_queen_line;
use crate::moves::rook_moves::is_rook_line;

pub fn can_piece_attack_square(
    board: &Board,
    effects: &EffectRegistry,
    from: Square,
    piece: Piece,
    target: Square,
) -> bool {
    if from == target {
        return false;
    }

    let sliding_clear = || {
        is_path_clear(board, effects, from, target, owner_can_jump(effects, piece.color))
    };

    match piece.kind {
        PieceKind::Pawn => is_pawn_capture_step(piece.color, from, target),
        PieceKind::Knight => is_knight_move(from, target),
        PieceKind::Bishop => is_bishop_line(from, target) && sliding_clear(),
        PieceKind::Rook => is_rook_line(from, target) && sliding_clear(),
        PieceKind::Queen => is_queen_line(from, target) && sliding_clear(),
        PieceKind::King => {
            if effects.player(piece.color).king_moves_like_queen() {
                is_queen_line(from, target) && sliding_clear()
            } else {
                is_king_step(from, target)
            }
        }
    }
}

/// True when any piece of `defender`'s opponent can reach `square`.
pub fn is_square_under_attack(
    board: &Board,
    effects: &EffectRegistry,
    square: Square,
    defender: Color,
) -> bool {
    board
        .pieces_of(defender.opposite())
        .into_iter()
        .any(|(from, piece)| can_piece_attack_square(board, effects, from, piece, square))
}

/// A side without a king on the board is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, effects: &EffectRegistry, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_under_attack(board, effects, king_sq, color)
}

/// Plays `plan` on a scratch copy of the board and reports whether the
/// mover's king would be attacked afterwards.
pub fn would_leave_king_in_check(game_state: &GameState, plan: &MovePlan) -> bool {
    let mut scratch = game_state.board;

    if let Some(victim) = plan.en_passant_victim {
        scratch.remove_piece(victim);
    }
    scratch.remove_piece(plan.from);
    scratch.place_piece(plan.to, plan.piece);
    if let Some((rook_from, rook_to)) = plan.castling_rook {
        if let Some(rook) = scratch.remove_piece(rook_from) {
            scratch.place_piece(rook_to, rook);
        }
    }

    is_king_in_check(&scratch, &game_state.effects, plan.piece.color)
}
