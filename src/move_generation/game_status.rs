//! Check, checkmate and stalemate evaluation for the side to move.

use tracing::debug;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_valid_moves;

pub fn evaluate_status(game_state: &GameState) -> GameStatus {
    let side = game_state.side_to_move;
    let in_check = is_king_in_check(&game_state.board, &game_state.effects, side);

    match (has_valid_moves(game_state, side), in_check) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Active,
        (false, true) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    }
}

/// Re-evaluates and stores the status.
pub fn refresh_status(game_state: &mut GameState) -> GameStatus {
    let status = evaluate_status(game_state);
    if status != game_state.status {
        debug!(side = %game_state.side_to_move, %status, "status changed");
    }
    game_state.status = status;
    status
}
