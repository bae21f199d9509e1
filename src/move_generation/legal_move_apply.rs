use tracing::debug;

use crate::game_errors::GameResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_validator::{validate_move, MovePlan};
use crate::moves::king_moves::castling_rook_squares;

/// Validates and plays `from -> to`, returning the history record appended.
pub fn apply_move(game_state: &mut GameState, from: Square, to: Square) -> GameResult<MoveRecord> {
    let plan = validate_move(game_state, from, to)?;
    Ok(apply_plan(game_state, plan))
}

/// Plays an already validated plan. Captures go to the mover's graveyard.
pub fn apply_plan(game_state: &mut GameState, plan: MovePlan) -> MoveRecord {
    let mover = plan.piece.color;
    let prev_castling_rights = game_state.castling_rights;
    let prev_en_passant_target = game_state.en_passant_target;

    let en_passant_victim = plan.en_passant_victim.and_then(|victim_sq| {
        game_state
            .capture_piece_at(victim_sq, mover)
            .map(|victim| (victim_sq, victim))
    });

    let captured = match plan.captured {
        Some(_) => game_state.capture_piece_at(plan.to, mover),
        None => None,
    };

    game_state.board.remove_piece(plan.from);
    game_state
        .board
        .place_piece(plan.to, plan.promotion.unwrap_or(plan.piece));
    game_state.effects.follow_invisible_piece(plan.from, plan.to);

    if let Some((rook_from, rook_to)) = plan.castling_rook {
        if let Some(rook) = game_state.board.remove_piece(rook_from) {
            game_state.board.place_piece(rook_to, rook);
            game_state.effects.follow_invisible_piece(rook_from, rook_to);
        }
    }

    game_state.en_passant_target = if plan.double_step {
        Some(Square::new((plan.from.row + plan.to.row) / 2, plan.from.col))
    } else {
        None
    };

    update_castling_rights(game_state, &plan);

    let record = MoveRecord {
        from: plan.from,
        to: plan.to,
        piece: plan.piece,
        captured,
        promoted_to: plan.promotion,
        en_passant_victim,
        castling_rook: plan.castling_rook,
        prev_castling_rights,
        prev_en_passant_target,
    };
    debug!(from = %record.from, to = %record.to, piece = %record.piece, "move applied");
    game_state.move_history.push(record.clone());
    record
}

fn update_castling_rights(game_state: &mut GameState, plan: &MovePlan) {
    if plan.piece.kind == PieceKind::King {
        game_state.castling_rights &=
            !(castling_flag(plan.piece.color, true) | castling_flag(plan.piece.color, false));
    }

    // A rook leaving its home square, or anything landing there, ends that right.
    for color in Color::BOTH {
        for kingside in [true, false] {
            let (rook_home, _) = castling_rook_squares(color, kingside);
            if plan.from == rook_home || plan.to == rook_home {
                game_state.castling_rights &= !castling_flag(color, kingside);
            }
        }
    }
}

/// Puts the board back to how it was before `record` was played, including
/// the castling rook, en-passant victim, promotion and graveyard entries.
pub fn reverse_move(game_state: &mut GameState, record: &MoveRecord) {
    let mover = record.mover();

    game_state.board.remove_piece(record.to);
    game_state.board.place_piece(record.from, record.piece);
    game_state.effects.follow_invisible_piece(record.to, record.from);

    if let Some(captured) = record.captured {
        game_state.board.place_piece(record.to, captured);
        game_state
            .graveyards
            .remove_latest_matching(mover, captured, record.to);
    }

    if let Some((victim_sq, victim)) = record.en_passant_victim {
        game_state.board.place_piece(victim_sq, victim);
        game_state
            .graveyards
            .remove_latest_matching(mover, victim, victim_sq);
    }

    if let Some((rook_from, rook_to)) = record.castling_rook {
        if let Some(rook) = game_state.board.remove_piece(rook_to) {
            game_state.board.place_piece(rook_from, rook);
            game_state.effects.follow_invisible_piece(rook_to, rook_from);
        }
    }

    game_state.castling_rights = record.prev_castling_rights;
    game_state.en_passant_target = record.prev_en_passant_target;
}

/// True when the board still shows the result of `record`: the landed piece
/// on `to`, its origin empty, the castling rook in place, the en-passant
/// square clear and any captured piece still in the mover's graveyard.
pub fn can_reverse_move(game_state: &GameState, record: &MoveRecord) -> bool {
    let board = &game_state.board;
    let mover = record.mover();
    let in_graveyard = |piece: Piece, square: Square| {
        game_state
            .graveyards
            .entries(mover)
            .iter()
            .any(|entry| entry.piece == piece && entry.square == square)
    };

    if board.piece_at(record.to) != Some(record.landed_piece()) || !board.is_empty(record.from) {
        return false;
    }
    if let Some(captured) = record.captured {
        if !in_graveyard(captured, record.to) {
            return false;
        }
    }
    if let Some((victim_sq, victim)) = record.en_passant_victim {
        if !board.is_empty(victim_sq) || !in_graveyard(victim, victim_sq) {
            return false;
        }
    }
    if let Some((rook_from, rook_to)) = record.castling_rook {
        let rook = Piece::new(mover, PieceKind::Rook);
        if board.piece_at(rook_to) != Some(rook) || !board.is_empty(rook_from) {
            return false;
        }
    }
    true
}

/// Pops and reverses the most recent history record.
pub fn undo_last_move(game_state: &mut GameState) -> Option<MoveRecord> {
    let record = game_state.move_history.pop()?;
    reverse_move(game_state, &record);
    debug!(from = %record.from, to = %record.to, "move reversed");
    Some(record)
}
