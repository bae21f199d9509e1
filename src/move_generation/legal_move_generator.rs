//! Exhaustive legal move enumeration.
//!
//! Probes every `(from, to)` pair for the given side through the validator,
//! so every effect that vetoes a move is honoured without a separate
//! pseudo-legal generator per piece.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_validator::{validate_move, MovePlan};

pub fn generate_legal_moves(game_state: &GameState, color: Color) -> Vec<MovePlan> {
    let mut legal = Vec::with_capacity(64);
    for (from, _) in game_state.board.pieces_of(color) {
        for to in Square::all() {
            if let Ok(plan) = validate_move(game_state, from, to) {
                legal.push(plan);
            }
        }
    }
    legal
}

/// Stops at the first legal move found.
pub fn has_valid_moves(game_state: &GameState, color: Color) -> bool {
    game_state
        .board
        .pieces_of(color)
        .into_iter()
        .any(|(from, _)| Square::all().any(|to| validate_move(game_state, from, to).is_ok()))
}
