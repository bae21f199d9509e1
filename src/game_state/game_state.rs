//! Owned rules state for one game.
//!
//! `GameState` is the central model of the engine: the piece grid, graveyards,
//! side to move, castling and en-passant state, move history, status, turn
//! counter, and every timed effect. Engine functions borrow it explicitly;
//! nothing in the crate holds it globally.

use crate::effects::effect_registry::EffectRegistry;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::graveyard::Graveyards;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub graveyards: Graveyards,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,

    pub move_history: Vec<MoveRecord>,
    pub status: GameStatus,
    pub turn_counter: u32,

    pub effects: EffectRegistry,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            graveyards: Graveyards::default(),

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_target: None,

            move_history: Vec::new(),
            status: GameStatus::Active,
            turn_counter: 0,

            effects: EffectRegistry::default(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn is_frozen(&self, square: Square) -> bool {
        self.effects.is_frozen(square)
    }

    #[inline]
    pub fn is_barricaded(&self, square: Square) -> bool {
        self.effects.is_barricaded(square)
    }

    /// Frozen or barricaded.
    #[inline]
    pub fn is_blocked(&self, square: Square) -> bool {
        self.effects.is_blocked(square)
    }

    /// First empty square that is neither frozen nor barricaded.
    pub fn find_empty_spot(&self) -> Option<Square> {
        self.board
            .first_empty_square(|square| self.effects.is_blocked(square))
    }

    /// Removes the piece on `square` into `capturer`'s graveyard, tagged with
    /// the square it fell on.
    pub fn capture_piece_at(&mut self, square: Square, capturer: Color) -> Option<Piece> {
        let piece = self.board.remove_piece(square)?;
        self.graveyards.record(capturer, piece, square);
        self.effects.clear_invisibility_at(square);
        Some(piece)
    }
}
