//! Spell handlers.
//!
//! A handler validates everything before it mutates anything, so a returned
//! error leaves the game untouched. Targeting spells called without a target
//! return `AwaitingTarget` and change nothing either.

use tracing::info;

use crate::actions::action::{ActionContext, ActionOutcome, Spell};
use crate::effects::player_state::Invisibility;
use crate::game_errors::{GameError, GameResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::step_towards;
use crate::moves::queen_moves::is_queen_line;

pub fn resolve_spell(
    spell: Spell,
    game_state: &mut GameState,
    ctx: &mut ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let outcome = match spell {
        Spell::ThunderSpell => thunder(game_state, ctx, target)?,
        Spell::Rage => {
            game_state
                .effects
                .player_mut(ctx.caster)
                .arm_rage(ctx.config.rage_turns);
            ActionOutcome::Completed(format!(
                "Rage activated! Next {} rolls will be boosted.",
                ctx.config.rage_turns
            ))
        }
        Spell::Freeze => freeze(game_state, ctx, target)?,
        Spell::Necromancy => necromancy(game_state, ctx)?,
        Spell::Agility => {
            game_state.effects.player_mut(ctx.caster).agility = Some(ctx.config.agility_turns);
            ActionOutcome::Completed("Agility activated! You may move twice this turn.".to_owned())
        }
        Spell::Fireball => fireball(game_state, ctx, target)?,
        Spell::InvisibilityPotion => invisibility(game_state, ctx, target)?,
        Spell::QueensSoul => {
            let turns = ctx.config.queens_soul_turns;
            game_state.effects.player_mut(ctx.caster).queens_soul = Some(turns);
            ActionOutcome::Completed(format!(
                "The King is empowered with the Queen's soul for {turns} turn(s)!"
            ))
        }
    };

    if let ActionOutcome::Completed(message) = &outcome {
        info!(player = %ctx.caster, spell = spell.name(), "{message}");
    }
    Ok(outcome)
}

fn thunder(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let king = match ctx.anchor {
        Some(square) => square,
        None => game_state
            .board
            .king_square(ctx.caster)
            .ok_or(GameError::KingNotFound)?,
    };
    let Some(target) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click a target square to cast thunder in that direction.",
            anchor: Some(king),
        });
    };

    if target == king {
        return Err(GameError::TargetIsCaster);
    }
    if !is_queen_line(king, target) {
        return Err(GameError::NotStraightLine);
    }

    // The bolt keeps travelling past the clicked square until it hits something.
    let (row_step, col_step) = step_towards(king, target);
    let mut current = king.offset(row_step, col_step);
    while let Some(square) = current {
        if let Some(piece) = game_state.piece_at(square) {
            if piece.is_king() {
                return Err(GameError::CannotTargetKing("thunder"));
            }
            game_state.capture_piece_at(square, ctx.caster);
            return Ok(ActionOutcome::Completed(format!(
                "Thunder struck {piece} at {square}!"
            )));
        }
        current = square.offset(row_step, col_step);
    }

    Ok(ActionOutcome::Completed(
        "Thunder traveled but hit nothing.".to_owned(),
    ))
}

fn freeze(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(anchor) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click the top-left square of a 2x2 area to freeze.",
            anchor: None,
        });
    };

    let replaced = game_state
        .effects
        .cast_freeze(anchor, ctx.caster, ctx.config.freeze_turns)?;

    let mut message = format!(
        "Freeze spell activated! 2x2 area frozen for {} turns at {anchor}.",
        ctx.config.freeze_turns / 2
    );
    if let Some(previous) = replaced {
        message.push_str(&format!(
            " The freeze at {} was lifted.",
            previous.anchor()
        ));
    }
    Ok(ActionOutcome::Completed(message))
}

fn necromancy(game_state: &mut GameState, ctx: &ActionContext<'_>) -> GameResult<ActionOutcome> {
    let entry = game_state
        .graveyards
        .latest(ctx.caster)
        .ok_or(GameError::GraveyardEmpty)?;

    if !game_state.board.is_empty(entry.square) {
        return Err(GameError::RevivalSquareOccupied(entry.square));
    }
    if game_state.is_blocked(entry.square) {
        return Err(GameError::RevivalSquareBlocked(entry.square));
    }

    game_state.graveyards.pop_latest(ctx.caster);
    game_state.board.place_piece(entry.square, entry.piece);
    Ok(ActionOutcome::Completed(format!(
        "{} has been revived at {}, the same place it died.",
        entry.piece, entry.square
    )))
}

fn fireball(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(center) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click a target square to cast fireball.",
            anchor: None,
        });
    };

    let mut captured = 0usize;
    for row_delta in -1..=1 {
        for col_delta in -1..=1 {
            let Some(square) = center.offset(row_delta, col_delta) else {
                continue;
            };
            match game_state.piece_at(square) {
                Some(piece) if !piece.is_king() => {
                    game_state.capture_piece_at(square, ctx.caster);
                    captured += 1;
                }
                _ => {}
            }
        }
    }

    Ok(ActionOutcome::Completed(format!(
        "Fireball exploded! {captured} pieces captured."
    )))
}

fn invisibility(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(square) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click one of your pieces to make it invisible.",
            anchor: None,
        });
    };

    let piece = game_state
        .piece_at(square)
        .ok_or(GameError::NoPieceAt(square))?;
    if piece.color != ctx.caster {
        return Err(GameError::MustTargetOwnPiece);
    }
    if piece.is_king() {
        return Err(GameError::CannotTargetKing("invisibility"));
    }

    let turns = ctx.config.invisibility_turns;
    game_state.effects.player_mut(ctx.caster).invisibility = Some(Invisibility {
        square,
        remaining: turns,
    });
    Ok(ActionOutcome::Completed(format!(
        "{piece} at {square} is now invisible for {turns} turns."
    )))
}
