use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

/// Single history entry appended by `apply_move`; carries enough to put the
/// board back for the Time Machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,

    pub promoted_to: Option<Piece>,
    pub en_passant_victim: Option<(Square, Piece)>,
    pub castling_rook: Option<(Square, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
}

impl MoveRecord {
    #[inline]
    pub fn mover(&self) -> Color {
        self.piece.color
    }

    /// Piece standing on `to` right after the move.
    #[inline]
    pub fn landed_piece(&self) -> Piece {
        self.promoted_to.unwrap_or(self.piece)
    }

    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured
            .or_else(|| self.en_passant_victim.map(|(_, piece)| piece))
    }
}
