//! Crate root module declarations for the Spell Chess rules engine.
//!
//! This file exposes the rules subsystems (board and game state, per-piece
//! movement tables, legality and status evaluation, timed effects, spell and
//! item actions, the turn controller, configuration, and utility helpers) so a
//! presentation layer, tests, and benches can import stable module paths.

pub mod game_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod graveyard;
    pub mod move_record;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_move_validator;
}

pub mod effects {
    pub mod effect_registry;
    pub mod player_state;
}

pub mod actions {
    pub mod action;
    pub mod items;
    pub mod spells;
}

pub mod turn {
    pub mod controller;
    pub mod dice;
    pub mod journal;
    pub mod turn_state;
}

pub mod config {
    pub mod rules_config;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}

pub use game_errors::GameError;
pub use game_state::chess_types::{Color, GameStatus, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use turn::controller::SpellChess;
