//! Move validation.
//!
//! `validate_move` turns a `(from, to)` request into a `MovePlan` carrying
//! every side effect the move will have (capture, en-passant victim, castling
//! rook, promotion), or rejects it with a reason. The mover is whoever owns
//! the piece on `from`; turn ownership is enforced by the controller.

use tracing::debug;

use crate::game_errors::{GameError, GameResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{
    is_king_in_check, is_square_under_attack, would_leave_king_in_check,
};
use crate::move_generation::legal_move_shared::{is_path_clear, owner_can_jump, squares_between};
use crate::moves::bishop_moves::is_bishop_line;
use crate::moves::king_moves::{castling_rook_squares, is_king_step, king_home_square};
use crate::moves::knight_moves::is_knight_move;
use crate::moves::pawn_moves::{is_pawn_capture_step, pawn_push, PawnPush};
use crate::moves::queen_moves::is_queen_line;
use crate::moves::rook_moves::is_rook_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub en_passant_victim: Option<Square>,
    pub castling_rook: Option<(Square, Square)>,
    pub promotion: Option<Piece>,
    pub double_step: bool,
}

impl MovePlan {
    fn simple(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            en_passant_victim: None,
            castling_rook: None,
            promotion: None,
            double_step: false,
        }
    }
}

pub fn validate_move(game_state: &GameState, from: Square, to: Square) -> GameResult<MovePlan> {
    let illegal = |reason: &'static str| GameError::IllegalMove { from, to, reason };

    let piece = game_state
        .board
        .piece_at(from)
        .ok_or(GameError::NoPieceAt(from))?;

    if from == to {
        return Err(illegal("the piece must move"));
    }
    if game_state.is_frozen(from) {
        return Err(illegal("the piece is frozen"));
    }
    if game_state.is_frozen(to) {
        return Err(illegal("the destination is frozen"));
    }
    if game_state.is_barricaded(to) {
        return Err(illegal("the destination has a barrier"));
    }

    let target = game_state.board.piece_at(to);
    if let Some(target) = target {
        if target.color == piece.color {
            return Err(illegal("cannot capture your own piece"));
        }
        if target.is_king() {
            return Err(illegal("kings cannot be captured"));
        }
    }

    let plan = plan_piece_move(game_state, from, to, piece, target).map_err(illegal)?;

    if would_leave_king_in_check(game_state, &plan) {
        debug!(%from, %to, "move rejected: king left in check");
        return Err(illegal("the move would leave your king in check"));
    }

    Ok(plan)
}

#[inline]
pub fn is_valid_move(game_state: &GameState, from: Square, to: Square) -> bool {
    validate_move(game_state, from, to).is_ok()
}

/// Every square the piece on `from` may legally move to.
pub fn legal_destinations(game_state: &GameState, from: Square) -> Vec<Square> {
    if game_state.board.is_empty(from) {
        return Vec::new();
    }
    Square::all()
        .filter(|&to| is_valid_move(game_state, from, to))
        .collect()
}

fn plan_piece_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: Piece,
    target: Option<Piece>,
) -> Result<MovePlan, &'static str> {
    let board = &game_state.board;
    let effects = &game_state.effects;
    let can_jump = owner_can_jump(effects, piece.color);
    let path_clear = || is_path_clear(board, effects, from, to, can_jump);

    match piece.kind {
        PieceKind::Pawn => plan_pawn_move(game_state, from, to, piece, target),
        PieceKind::Knight => {
            if is_knight_move(from, to) {
                Ok(MovePlan::simple(from, to, piece, target))
            } else {
                Err("knights move in an L shape")
            }
        }
        PieceKind::Bishop => {
            if !is_bishop_line(from, to) {
                Err("bishops move diagonally")
            } else if !path_clear() {
                Err("the path is blocked")
            } else {
                Ok(MovePlan::simple(from, to, piece, target))
            }
        }
        PieceKind::Rook => {
            if !is_rook_line(from, to) {
                Err("rooks move in straight lines")
            } else if !path_clear() {
                Err("the path is blocked")
            } else {
                Ok(MovePlan::simple(from, to, piece, target))
            }
        }
        PieceKind::Queen => {
            if !is_queen_line(from, to) {
                Err("queens move in straight or diagonal lines")
            } else if !path_clear() {
                Err("the path is blocked")
            } else {
                Ok(MovePlan::simple(from, to, piece, target))
            }
        }
        PieceKind::King => {
            if effects.player(piece.color).king_moves_like_queen() {
                if !is_queen_line(from, to) {
                    Err("an empowered king moves like a queen")
                } else if !path_clear() {
                    Err("the path is blocked")
                } else {
                    Ok(MovePlan::simple(from, to, piece, target))
                }
            } else if is_king_step(from, to) {
                Ok(MovePlan::simple(from, to, piece, target))
            } else if from.row == to.row && from.col.abs_diff(to.col) == 2 {
                let rook = can_castle(game_state, from, to, piece.color)?;
                let mut plan = MovePlan::simple(from, to, piece, None);
                plan.castling_rook = Some(rook);
                Ok(plan)
            } else {
                Err("kings move one square")
            }
        }
    }
}

fn plan_pawn_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: Piece,
    target: Option<Piece>,
) -> Result<MovePlan, &'static str> {
    let color = piece.color;
    let mut plan = MovePlan::simple(from, to, piece, target);

    if let Some(push) = pawn_push(color, from, to) {
        if target.is_some() {
            return Err("pawns cannot capture straight ahead");
        }
        if push == PawnPush::Double {
            let can_jump = owner_can_jump(&game_state.effects, color);
            if !is_path_clear(&game_state.board, &game_state.effects, from, to, can_jump) {
                return Err("the path is blocked");
            }
            plan.double_step = true;
        }
    } else if is_pawn_capture_step(color, from, to) {
        if target.is_none() {
            if game_state.en_passant_target != Some(to) {
                return Err("pawns capture diagonally");
            }
            let victim_sq = Square::new(from.row, to.col);
            match game_state.board.piece_at(victim_sq) {
                Some(victim) if victim.color != color && victim.kind == PieceKind::Pawn => {
                    plan.en_passant_victim = Some(victim_sq);
                }
                _ => return Err("no pawn to capture en passant"),
            }
        }
    } else {
        return Err("pawns move forward");
    }

    if to.row == color.promotion_row() {
        plan.promotion = Some(Piece::new(color, PieceKind::Queen));
    }
    Ok(plan)
}

/// Checks a two-file king shift and returns the rook's `(from, to)`.
pub fn can_castle(
    game_state: &GameState,
    from: Square,
    to: Square,
    color: Color,
) -> Result<(Square, Square), &'static str> {
    if from != king_home_square(color) {
        return Err("the king is not on its home square");
    }

    let kingside = to.col > from.col;
    if game_state.castling_rights & castling_flag(color, kingside) == 0 {
        return Err("castling right has been lost");
    }

    let (rook_from, rook_to) = castling_rook_squares(color, kingside);
    if game_state.board.piece_at(rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
        return Err("no rook to castle with");
    }

    let board = &game_state.board;
    let effects = &game_state.effects;
    if !squares_between(from, rook_from)
        .into_iter()
        .all(|square| board.is_empty(square))
    {
        return Err("pieces stand between king and rook");
    }

    if is_king_in_check(board, effects, color) {
        return Err("cannot castle out of check");
    }

    let mut king_path = squares_between(from, to);
    king_path.push(to);
    for square in king_path {
        if effects.is_blocked(square) {
            return Err("the castling path is blocked");
        }
        if is_square_under_attack(board, effects, square, color) {
            return Err("the king would cross an attacked square");
        }
    }

    Ok((rook_from, rook_to))
}

#[cfg(test)]
mod tests {
    use super::{is_valid_move, legal_destinations, validate_move};
    use crate::game_errors::GameError;
    use crate::game_state::{chess_types::*, game_state::GameState};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn opening_position_offers_twenty_moves_for_white() {
        let game = GameState::new_game();
        let total: usize = game
            .board
            .pieces_of(Color::White)
            .into_iter()
            .map(|(from, _)| legal_destinations(&game, from).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn landing_on_own_piece_is_rejected() {
        let game = GameState::new_game();
        let err = validate_move(&game, sq(7, 0), sq(6, 0)).expect_err("own piece should block");
        assert!(matches!(err, GameError::IllegalMove { reason: "cannot capture your own piece", .. }));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        let pinned =
            GameState::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_valid_move(&pinned, sq(6, 4), sq(6, 0)));
        assert!(is_valid_move(&pinned, sq(6, 4), sq(0, 4)));
    }

    #[test]
    fn frozen_pieces_and_squares_refuse_moves() {
        let mut game = GameState::new_game();
        game.effects
            .cast_freeze(sq(5, 4), Color::Black, 4)
            .expect("anchor should be valid");
        assert!(!is_valid_move(&game, sq(6, 4), sq(4, 4)));
        assert!(!is_valid_move(&game, sq(6, 5), sq(5, 5)));
        assert!(!is_valid_move(&game, sq(7, 6), sq(5, 5)));
        assert!(is_valid_move(&game, sq(7, 6), sq(5, 7)));
    }

    #[test]
    fn barrier_blocks_landing_and_sliding_through() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        game.effects.place_barrier(sq(4, 0), Color::Black, 5);
        assert!(!is_valid_move(&game, sq(7, 0), sq(4, 0)));
        assert!(!is_valid_move(&game, sq(7, 0), sq(0, 0)));
        assert!(is_valid_move(&game, sq(7, 0), sq(5, 0)));
    }

    #[test]
    fn castling_requires_clear_unattacked_path() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let plan = validate_move(&game, sq(7, 4), sq(7, 6)).expect("kingside castle should be legal");
        assert_eq!(plan.castling_rook, Some((sq(7, 7), sq(7, 5))));
        assert!(is_valid_move(&game, sq(7, 4), sq(7, 2)));

        let attacked =
            GameState::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(!is_valid_move(&attacked, sq(7, 4), sq(7, 6)));

        let no_rights =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert!(!is_valid_move(&no_rights, sq(7, 4), sq(7, 6)));
    }

    #[test]
    fn castling_refuses_a_frozen_crossing_square() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        game.effects
            .cast_freeze(sq(6, 5), Color::Black, 4)
            .expect("anchor should be valid");
        assert!(!is_valid_move(&game, sq(7, 4), sq(7, 6)));
        assert!(is_valid_move(&game, sq(7, 4), sq(7, 2)));
    }

    #[test]
    fn queens_soul_lets_the_king_slide() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_valid_move(&game, sq(7, 4), sq(4, 1)));
        game.effects.player_mut(Color::White).queens_soul = Some(1);
        assert!(is_valid_move(&game, sq(7, 4), sq(4, 1)));
    }

    #[test]
    fn ladder_lets_a_rook_jump_its_own_pawn() {
        let mut game = GameState::new_game();
        assert!(!is_valid_move(&game, sq(7, 0), sq(5, 0)));
        game.effects.player_mut(Color::White).ladder = Some(1);
        assert!(is_valid_move(&game, sq(7, 0), sq(5, 0)));
    }

    #[test]
    fn pawn_reaching_last_row_promotes_to_queen() {
        let game = GameState::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let plan = validate_move(&game, sq(1, 0), sq(0, 0)).expect("push should be legal");
        assert_eq!(plan.promotion, Some(Piece::new(Color::White, PieceKind::Queen)));
    }

    #[test]
    fn kings_are_never_captured() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").expect("FEN should parse");
        assert!(!is_valid_move(&game, sq(7, 4), sq(0, 4)));
    }
}
