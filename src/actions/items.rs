//! Item handlers.
//!
//! Same contract as the spell handlers: validate first, then mutate, and
//! return `AwaitingTarget` without side effects when a square is still needed.

use tracing::info;

use crate::actions::action::{ActionContext, ActionOutcome, Item};
use crate::game_errors::{GameError, GameResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{can_reverse_move, undo_last_move};
use crate::moves::king_moves::is_king_step;
use crate::turn::turn_state::TurnPhase;

pub fn resolve_item(
    item: Item,
    game_state: &mut GameState,
    ctx: &mut ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let outcome = match item {
        Item::Knife => knife(game_state, ctx, target)?,
        Item::MagicWand => {
            let turns = ctx.config.magic_wand_turns;
            game_state.effects.player_mut(ctx.caster).magic_wand = Some(turns);
            ActionOutcome::Completed(format!(
                "Magic Wand activated! Non-king pieces can use spells for {turns} turns."
            ))
        }
        Item::Barrier => barrier(game_state, ctx, target)?,
        Item::FishingNet => fishing_net(game_state, ctx, target)?,
        Item::TimeMachine => time_machine(game_state)?,
        Item::Skip => skip(ctx),
        Item::LuckyCoin => {
            ctx.turn.spells_used = ctx.turn.spells_used.saturating_sub(1);
            ActionOutcome::Completed("Good fortune! +1 spell use this turn.".to_owned())
        }
        Item::ManaPotion => {
            ctx.turn.spells_used = ctx.turn.spells_used.saturating_sub(1);
            ActionOutcome::Completed("Mana restored! +1 spell use this turn.".to_owned())
        }
        Item::Wontan => wontan(game_state, ctx, target)?,
        Item::Ladder => {
            game_state.effects.player_mut(ctx.caster).ladder = Some(ctx.config.ladder_turns);
            ActionOutcome::Completed(
                "Ladder activated! Your pieces can jump over others this turn.".to_owned(),
            )
        }
    };

    if let ActionOutcome::Completed(message) = &outcome {
        info!(player = %ctx.caster, item = item.name(), "{message}");
    }
    Ok(outcome)
}

/// Enemy, non-king piece on `square`, or the reason it is not a valid target.
fn enemy_target(
    game_state: &GameState,
    caster: Color,
    square: Square,
    what: &'static str,
) -> GameResult<Piece> {
    let piece = game_state
        .piece_at(square)
        .ok_or(GameError::NoPieceAt(square))?;
    if piece.is_king() {
        return Err(GameError::CannotTargetKing(what));
    }
    if piece.color == caster {
        return Err(GameError::MustTargetEnemy);
    }
    Ok(piece)
}

fn knife(
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
    let Some(square) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click an adjacent square to stab.",
            anchor: Some(king),
        });
    };

    if !is_king_step(king, square) {
        return Err(GameError::NotAdjacentToKing);
    }
    let piece = game_state
        .piece_at(square)
        .ok_or(GameError::NoPieceAt(square))?;
    if piece.is_king() {
        return Err(GameError::CannotTargetKing("the knife"));
    }

    game_state.capture_piece_at(square, ctx.caster);
    Ok(ActionOutcome::Completed(format!(
        "Stabbed {piece} at {square}!"
    )))
}

fn barrier(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(square) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click an empty square to place barrier.",
            anchor: None,
        });
    };

    if !game_state.board.is_empty(square) {
        return Err(GameError::SquareOccupied(square));
    }
    if game_state.is_frozen(square) {
        return Err(GameError::SquareFrozen(square));
    }
    if game_state.is_barricaded(square) {
        return Err(GameError::SquareBarricaded(square));
    }

    let turns = ctx.config.barrier_turns;
    game_state.effects.place_barrier(square, ctx.caster, turns);
    Ok(ActionOutcome::Completed(format!(
        "Barrier placed at {square} for {turns} turns."
    )))
}

fn fishing_net(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(square) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click an enemy piece to temporarily capture.",
            anchor: None,
        });
    };

    let piece = enemy_target(game_state, ctx.caster, square, "the fishing net")?;
    let turns = ctx.config.fishing_net_turns;

    game_state.board.remove_piece(square);
    game_state.effects.clear_invisibility_at(square);
    game_state
        .effects
        .hold_capture(piece, square, ctx.caster, turns);
    Ok(ActionOutcome::Completed(format!(
        "{piece} temporarily captured for {turns} turns."
    )))
}

fn time_machine(game_state: &mut GameState) -> GameResult<ActionOutcome> {
    if game_state.move_history.len() < 2 {
        return Err(GameError::InsufficientHistory);
    }

    // Rewound on a copy; a record that no longer matches leaves the state untouched.
    let mut rewound = game_state.clone();
    for _ in 0..2 {
        let reversible = rewound
            .move_history
            .last()
            .is_some_and(|record| can_reverse_move(&rewound, record));
        if !reversible {
            return Err(GameError::HistoryDiverged);
        }
        undo_last_move(&mut rewound);
    }
    *game_state = rewound;
    Ok(ActionOutcome::Completed(
        "Time reversed! Make your new move.".to_owned(),
    ))
}

fn skip(ctx: &mut ActionContext<'_>) -> ActionOutcome {
    let skipped = ctx.turn.phase;
    ctx.turn.phase = skipped.next();
    let message = match skipped {
        TurnPhase::Move => "Move phase skipped. Proceed to spell phase.",
        TurnPhase::Spell => "Spell phase skipped. Proceed to item phase.",
        TurnPhase::Item => "Item phase skipped. Proceed to move phase.",
    };
    ActionOutcome::Completed(message.to_owned())
}

fn wontan(
    game_state: &mut GameState,
    ctx: &ActionContext<'_>,
    target: Option<Square>,
) -> GameResult<ActionOutcome> {
    let Some(square) = target else {
        return Ok(ActionOutcome::AwaitingTarget {
            prompt: "Click an enemy piece to smite.",
            anchor: None,
        });
    };

    let piece = enemy_target(game_state, ctx.caster, square, "wontan")?;
    game_state.capture_piece_at(square, ctx.caster);
    Ok(ActionOutcome::Completed(format!(
        "Wontan smote {piece} at {square}!"
    )))
}

#[cfg(test)]
mod tests {
    use super::resolve_item;
    use crate::actions::action::{ActionContext, ActionOutcome, Item};
    use crate::config::rules_config::RulesConfig;
    use crate::game_errors::GameError;
    use crate::game_state::{chess_types::*, game_state::GameState};
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::turn::turn_state::{TurnPhase, TurnState};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    fn use_item(
        game: &mut GameState,
        turn: &mut TurnState,
        item: Item,
        caster: Color,
        target: Option<Square>,
    ) -> Result<ActionOutcome, GameError> {
        let config = RulesConfig::default();
        let mut ctx = ActionContext {
            turn,
            config: &config,
            caster,
            anchor: None,
        };
        resolve_item(item, game, &mut ctx, target)
    }

    #[test]
    fn knife_only_reaches_adjacent_squares() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").expect("FEN should parse");
        let mut turn = TurnState::default();
        assert_eq!(
            use_item(&mut game, &mut turn, Item::Knife, Color::White, Some(sq(5, 4))),
            Err(GameError::NotAdjacentToKing)
        );
        assert_eq!(
            use_item(&mut game, &mut turn, Item::Knife, Color::White, Some(sq(6, 4))),
            Err(GameError::NoPieceAt(sq(6, 4)))
        );
        let outcome = use_item(&mut game, &mut turn, Item::Knife, Color::White, Some(sq(6, 3)))
            .expect("adjacent pawn should be stabbed");
        assert_eq!(outcome.to_string(), "Stabbed ♟ at (6, 3)!");
        assert!(game.board.is_empty(sq(6, 3)));
    }

    #[test]
    fn barrier_needs_an_open_square() {
        let mut game = GameState::new_game();
        let mut turn = TurnState::default();
        assert_eq!(
            use_item(&mut game, &mut turn, Item::Barrier, Color::White, Some(sq(6, 0))),
            Err(GameError::SquareOccupied(sq(6, 0)))
        );
        game.effects
            .cast_freeze(sq(3, 3), Color::Black, 4)
            .expect("anchor should be valid");
        assert_eq!(
            use_item(&mut game, &mut turn, Item::Barrier, Color::White, Some(sq(3, 3))),
            Err(GameError::SquareFrozen(sq(3, 3)))
        );
        use_item(&mut game, &mut turn, Item::Barrier, Color::White, Some(sq(5, 0)))
            .expect("empty square should accept a barrier");
        assert_eq!(
            use_item(&mut game, &mut turn, Item::Barrier, Color::White, Some(sq(5, 0))),
            Err(GameError::SquareBarricaded(sq(5, 0)))
        );
    }

    #[test]
    fn fishing_net_lifts_enemy_piece_without_graveyard_entry() {
        let mut game = GameState::new_game();
        let mut turn = TurnState::default();
        assert_eq!(
            use_item(&mut game, &mut turn, Item::FishingNet, Color::White, Some(sq(6, 0))),
            Err(GameError::MustTargetEnemy)
        );
        assert_eq!(
            use_item(&mut game, &mut turn, Item::FishingNet, Color::White, Some(sq(0, 4))),
            Err(GameError::CannotTargetKing("the fishing net"))
        );
        use_item(&mut game, &mut turn, Item::FishingNet, Color::White, Some(sq(0, 1)))
            .expect("enemy knight should be netted");
        assert!(game.board.is_empty(sq(0, 1)));
        assert!(game.graveyards.entries(Color::White).is_empty());
        assert_eq!(game.effects.temporary_captures.len(), 1);
        assert_eq!(game.effects.temporary_captures[0].remaining, 3);
    }

    #[test]
    fn time_machine_undoes_two_moves() {
        let mut game = GameState::new_game();
        let mut turn = TurnState::default();
        assert_eq!(
            use_item(&mut game, &mut turn, Item::TimeMachine, Color::White, None),
            Err(GameError::InsufficientHistory)
        );

        let start = game.board;
        apply_move(&mut game, sq(6, 4), sq(4, 4)).expect("e2-e4");
        apply_move(&mut game, sq(1, 3), sq(3, 3)).expect("d7-d5");
        use_item(&mut game, &mut turn, Item::TimeMachine, Color::White, None)
            .expect("two moves should be reversible");
        assert_eq!(game.board, start);
        assert!(game.move_history.is_empty());
        assert_eq!(game.en_passant_target, None);
    }

    #[test]
    fn time_machine_refuses_when_a_moved_piece_was_removed() {
        let mut game = GameState::new_game();
        let mut turn = TurnState::default();
        apply_move(&mut game, sq(6, 4), sq(4, 4)).expect("e2-e4");
        apply_move(&mut game, sq(0, 1), sq(2, 2)).expect("Nb8-c6");
        use_item(&mut game, &mut turn, Item::Wontan, Color::White, Some(sq(2, 2)))
            .expect("wontan should strike the knight");
        let board = game.board;

        assert_eq!(
            use_item(&mut game, &mut turn, Item::TimeMachine, Color::White, None),
            Err(GameError::HistoryDiverged)
        );
        assert_eq!(game.board, board);
        assert_eq!(game.move_history.len(), 2);
        assert_eq!(game.graveyards.entries(Color::White).len(), 1);
    }

    #[test]
    fn skip_and_coins_adjust_turn_state() {
        let mut game = GameState::new_game();
        let mut turn = TurnState {
            spells_used: 1,
            ..TurnState::default()
        };
        use_item(&mut game, &mut turn, Item::Skip, Color::White, None).expect("skip");
        assert_eq!(turn.phase, TurnPhase::Spell);
        use_item(&mut game, &mut turn, Item::LuckyCoin, Color::White, None).expect("coin");
        use_item(&mut game, &mut turn, Item::ManaPotion, Color::White, None).expect("potion");
        assert_eq!(turn.spells_used, 0);
    }

    #[test]
    fn wontan_smites_enemy_non_king() {
        let mut game = GameState::new_game();
        let mut turn = TurnState::default();
        let outcome = use_item(&mut game, &mut turn, Item::Wontan, Color::Black, Some(sq(7, 3)))
            .expect("enemy queen should be smitten");
        assert_eq!(outcome.to_string(), "Wontan smote ♕ at (7, 3)!");
        assert_eq!(game.graveyards.latest(Color::Black).map(|e| e.square), Some(sq(7, 3)));
    }
}
