//! Turn and action controller.
//!
//! `SpellChess` is the value a presentation layer owns: it wraps the game
//! state with per-turn bookkeeping, the dice, the rules config and the message
//! journal. Every command returns a `Result` whose `Display` (success or
//! error) is the status line to show, and every such line is also appended to
//! the journal.

use std::fmt;

use tracing::{info, warn};

use crate::actions::action::{Action, ActionContext, ActionOutcome, Item, Spell};
use crate::actions::items::resolve_item;
use crate::actions::spells::resolve_spell;
use crate::config::rules_config::{ConfigError, RulesConfig};
use crate::effects::effect_registry::ActiveEffect;
use crate::game_errors::{GameError, GameResult};
use crate::game_state::graveyard::GraveEntry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_status::refresh_status;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_validator::{is_valid_move, legal_destinations};
use crate::turn::dice::{Dice, DiceRoll};
use crate::turn::journal::GameJournal;
use crate::turn::turn_state::{PendingTarget, TurnPhase, TurnState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub record: MoveRecord,
    pub status: GameStatus,
    pub side_to_move: Color,
    pub turn_ended: bool,
    pub notices: Vec<String>,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} moved from {} to {}.",
            self.record.piece, self.record.from, self.record.to
        )?;
        if let Some(captured) = self.record.captured_piece() {
            write!(f, " Captured {captured}.")?;
        }
        if !self.turn_ended {
            f.write_str(" Agility: make your second move.")?;
        }
        write_status(f, self.status, self.side_to_move)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub message: &'static str,
    pub status: GameStatus,
    pub side_to_move: Color,
    pub notices: Vec<String>,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)?;
        write_status(f, self.status, self.side_to_move)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected {
        square: Square,
        piece: Piece,
        destinations: Vec<Square>,
    },
    Deselected,
    Moved(MoveReport),
    Action(ActionOutcome),
    Ignored(Square),
}

impl fmt::Display for ClickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickOutcome::Selected {
                square,
                piece,
                destinations,
            } => write!(
                f,
                "Selected {piece} at {square}: {} legal moves.",
                destinations.len()
            ),
            ClickOutcome::Deselected => f.write_str("Selection cleared."),
            ClickOutcome::Moved(report) => report.fmt(f),
            ClickOutcome::Action(outcome) => outcome.fmt(f),
            ClickOutcome::Ignored(square) => write!(f, "Nothing to select at {square}."),
        }
    }
}

fn write_status(f: &mut fmt::Formatter<'_>, status: GameStatus, side: Color) -> fmt::Result {
    match status {
        GameStatus::Active => Ok(()),
        GameStatus::Check => write!(f, " {side} is in check!"),
        GameStatus::Checkmate => write!(f, " Checkmate! {} wins!", side.opposite()),
        GameStatus::Stalemate => f.write_str(" Stalemate! It's a draw!"),
    }
}

#[derive(Debug, Clone)]
pub struct SpellChess {
    state: GameState,
    turn: TurnState,
    config: RulesConfig,
    dice: Dice,
    journal: GameJournal,
}

impl Default for SpellChess {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellChess {
    pub fn new() -> Self {
        Self::build(GameState::new_game(), RulesConfig::default(), Dice::new())
    }

    /// Deterministic dice, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            GameState::new_game(),
            RulesConfig::default(),
            Dice::with_seed(seed),
        )
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self::build(GameState::new_game(), config, Dice::new())
    }

    /// Default rules overlaid with `SPELL_CHESS_<OPTION>` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::with_config(RulesConfig::from_env()?))
    }

    /// Starts from an arbitrary position, e.g. one parsed from FEN.
    pub fn from_state(state: GameState, config: RulesConfig, seed: Option<u64>) -> Self {
        let dice = match seed {
            Some(seed) => Dice::with_seed(seed),
            None => Dice::new(),
        };
        Self::build(state, config, dice)
    }

    fn build(mut state: GameState, config: RulesConfig, dice: Dice) -> Self {
        refresh_status(&mut state);
        Self {
            state,
            turn: TurnState::default(),
            config,
            dice,
            journal: GameJournal::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.state.piece_at(square)
    }

    #[inline]
    pub fn is_frozen(&self, square: Square) -> bool {
        self.state.is_frozen(square)
    }

    #[inline]
    pub fn is_barricaded(&self, square: Square) -> bool {
        self.state.is_barricaded(square)
    }

    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        legal_destinations(&self.state, from)
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn turn_counter(&self) -> u32 {
        self.state.turn_counter
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    #[inline]
    pub fn dice_roll(&self) -> Option<u8> {
        self.turn.dice_roll
    }

    #[inline]
    pub fn graveyard(&self, owner: Color) -> &[GraveEntry] {
        self.state.graveyards.entries(owner)
    }

    pub fn active_effects(&self) -> Vec<ActiveEffect> {
        self.state.effects.active_effects()
    }

    #[inline]
    pub fn pending_target(&self) -> Option<PendingTarget> {
        self.turn.pending
    }

    #[inline]
    pub fn selected_action(&self) -> Option<Action> {
        self.turn.selected_action
    }

    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        self.turn.selected_square
    }

    /// Lifetime casts of `spell` by `player`.
    pub fn spell_uses(&self, player: Color, spell: Spell) -> u8 {
        self.state.effects.player(player).spell_uses(spell)
    }

    #[inline]
    pub fn journal(&self) -> &GameJournal {
        &self.journal
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set_option(name, value)
    }

    pub fn roll_dice(&mut self) -> GameResult<DiceRoll> {
        let result = self.roll_dice_inner();
        self.log(result)
    }

    fn roll_dice_inner(&mut self) -> GameResult<DiceRoll> {
        self.ensure_active()?;
        if let Some(rolled) = self.turn.dice_roll {
            return Err(GameError::DiceAlreadyRolled(rolled));
        }

        let advantage = self.state.effects.player(self.current_player()).has_rage();
        let roll = self.dice.roll(self.config.dice_sides, advantage);
        self.turn.dice_roll = Some(roll.value);
        Ok(roll)
    }

    /// Toggles selection of `spell`; returns what is selected afterwards.
    pub fn select_spell(&mut self, spell: Spell) -> GameResult<Option<Action>> {
        self.toggle_selection(Action::Spell(spell))
    }

    pub fn select_item(&mut self, item: Item) -> GameResult<Option<Action>> {
        self.toggle_selection(Action::Item(item))
    }

    pub fn select_spell_by_key(&mut self, key: &str) -> GameResult<Option<Action>> {
        let spell = Spell::from_key(key).ok_or_else(|| GameError::UnknownSpell(key.to_owned()));
        let spell = self.log(spell)?;
        self.select_spell(spell)
    }

    pub fn select_item_by_key(&mut self, key: &str) -> GameResult<Option<Action>> {
        let item = Item::from_key(key).ok_or_else(|| GameError::UnknownItem(key.to_owned()));
        let item = self.log(item)?;
        self.select_item(item)
    }

    fn toggle_selection(&mut self, action: Action) -> GameResult<Option<Action>> {
        if self.turn.is_targeting() {
            let err = GameError::TargetingInProgress;
            self.log_error(&err);
            return Err(err);
        }
        self.turn.selected_action = if self.turn.selected_action == Some(action) {
            None
        } else {
            Some(action)
        };
        Ok(self.turn.selected_action)
    }

    pub fn use_selected(&mut self, target: Option<Square>) -> GameResult<ActionOutcome> {
        match self.turn.selected_action {
            Some(Action::Spell(spell)) => self.use_spell(spell, target),
            Some(Action::Item(item)) => self.use_item(item, target),
            None => self.log(Err(GameError::NothingSelected)),
        }
    }

    pub fn use_spell(&mut self, spell: Spell, target: Option<Square>) -> GameResult<ActionOutcome> {
        let result = self
            .check_spell(spell)
            .and_then(|()| self.dispatch(Action::Spell(spell), target, None))
            .map(|outcome| self.after_action(Action::Spell(spell), outcome));
        self.log(result)
    }

    pub fn use_item(&mut self, item: Item, target: Option<Square>) -> GameResult<ActionOutcome> {
        let result = self
            .check_item(item)
            .and_then(|()| self.dispatch(Action::Item(item), target, None))
            .map(|outcome| self.after_action(Action::Item(item), outcome));
        self.log(result)
    }

    fn check_spell(&self, spell: Spell) -> GameResult<()> {
        self.ensure_active()?;
        if self.turn.is_targeting() {
            return Err(GameError::TargetingInProgress);
        }
        if self.turn.spells_used >= self.config.spells_per_turn {
            return Err(GameError::SpellCapReached);
        }

        let limit = self.config.spell_lifetime_limit;
        if self.spell_uses(self.current_player(), spell) >= limit {
            return Err(GameError::SpellLimitReached {
                name: spell.name(),
                limit,
            });
        }

        let rolled = self.turn.dice_roll.ok_or(GameError::DiceNotRolled)?;
        let needed = spell.min_roll(&self.config);
        if rolled < needed {
            return Err(GameError::RollTooLow { needed, rolled });
        }
        Ok(())
    }

    fn check_item(&self, item: Item) -> GameResult<()> {
        self.ensure_active()?;
        if self.turn.is_targeting() {
            return Err(GameError::TargetingInProgress);
        }
        if self.turn.items_used >= self.config.items_per_turn {
            return Err(GameError::ItemCapReached);
        }

        if let Some(needed) = item.min_roll(&self.config) {
            let rolled = self.turn.dice_roll.ok_or(GameError::DiceNotRolled)?;
            if rolled < needed {
                return Err(GameError::RollTooLow { needed, rolled });
            }
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        action: Action,
        target: Option<Square>,
        anchor: Option<Square>,
    ) -> GameResult<ActionOutcome> {
        let mut ctx = ActionContext {
            turn: &mut self.turn,
            config: &self.config,
            caster: self.state.side_to_move,
            anchor,
        };
        match action {
            Action::Spell(spell) => resolve_spell(spell, &mut self.state, &mut ctx, target),
            Action::Item(item) => resolve_item(item, &mut self.state, &mut ctx, target),
        }
    }

    /// Arms targeting, or settles the accounting of a completed action.
    /// Status is left alone: the caster is still mid-turn.
    fn after_action(&mut self, action: Action, outcome: ActionOutcome) -> ActionOutcome {
        match &outcome {
            ActionOutcome::AwaitingTarget { anchor, .. } => {
                self.turn.selected_action = Some(action);
                self.turn.pending = Some(PendingTarget {
                    action,
                    anchor: *anchor,
                });
            }
            ActionOutcome::Completed(_) => {
                match action {
                    Action::Spell(spell) => {
                        self.turn.spells_used = self.turn.spells_used.saturating_add(1);
                        let caster = self.current_player();
                        self.state.effects.player_mut(caster).record_spell_use(spell);
                    }
                    Action::Item(_) => {
                        self.turn.items_used = self.turn.items_used.saturating_add(1);
                    }
                }
                self.turn.selected_action = None;
                self.turn.pending = None;
            }
        }
        outcome
    }

    /// Routes a board square to the armed action. A rejected square keeps
    /// the action armed.
    pub fn resolve_target(&mut self, square: Square) -> GameResult<ActionOutcome> {
        let result = self.resolve_target_inner(square);
        self.log(result)
    }

    fn resolve_target_inner(&mut self, square: Square) -> GameResult<ActionOutcome> {
        let pending = self.turn.pending.ok_or(GameError::NoPendingTarget)?;
        let outcome = self.dispatch(pending.action, Some(square), pending.anchor)?;
        Ok(self.after_action(pending.action, outcome))
    }

    pub fn cancel_targeting(&mut self) -> GameResult<&'static str> {
        let result = match self.turn.pending.take() {
            Some(_) => {
                self.turn.selected_action = None;
                Ok("Targeting cancelled.")
            }
            None => Err(GameError::NoPendingTarget),
        };
        self.log(result)
    }

    /// Selection model: pick an own piece, click it again to drop it, click a
    /// legal destination to move. While an action is armed the click is its
    /// target instead.
    pub fn click_square(&mut self, square: Square) -> GameResult<ClickOutcome> {
        if self.turn.is_targeting() {
            return self.resolve_target(square).map(ClickOutcome::Action);
        }
        if let Err(err) = self.ensure_active() {
            return self.log(Err(err));
        }

        if let Some(selected) = self.turn.selected_square {
            if selected == square {
                self.turn.selected_square = None;
                return Ok(ClickOutcome::Deselected);
            }
            if is_valid_move(&self.state, selected, square) {
                return self.try_move(selected, square).map(ClickOutcome::Moved);
            }
        }

        let own_piece = self
            .state
            .piece_at(square)
            .filter(|piece| piece.color == self.current_player());
        let Some(piece) = own_piece else {
            return Ok(match self.turn.selected_square.take() {
                Some(_) => ClickOutcome::Deselected,
                None => ClickOutcome::Ignored(square),
            });
        };

        self.turn.selected_square = Some(square);
        Ok(ClickOutcome::Selected {
            square,
            piece,
            destinations: self.legal_destinations(square),
        })
    }

    /// Plays a move for the side to move. The turn passes automatically
    /// unless Agility still grants another move.
    pub fn try_move(&mut self, from: Square, to: Square) -> GameResult<MoveReport> {
        let result = self.try_move_inner(from, to);
        self.log(result)
    }

    fn try_move_inner(&mut self, from: Square, to: Square) -> GameResult<MoveReport> {
        self.ensure_active()?;
        if self.turn.is_targeting() {
            return Err(GameError::TargetingInProgress);
        }

        let mover = self.current_player();
        let piece = self.state.piece_at(from).ok_or(GameError::NoPieceAt(from))?;
        if piece.color != mover {
            return Err(GameError::NotYourPiece {
                square: from,
                owner: piece.color,
            });
        }

        let record = apply_move(&mut self.state, from, to)?;
        self.turn.moves_made = self.turn.moves_made.saturating_add(1);
        self.turn.selected_square = None;

        let allowed = if self.state.effects.player(mover).has_agility() {
            self.config.max_moves_with_agility
        } else {
            1
        };

        // Status is settled when the turn passes.
        let (turn_ended, notices) = if self.turn.moves_made < allowed {
            (false, Vec::new())
        } else {
            (true, self.process_end_turn())
        };

        Ok(MoveReport {
            record,
            status: self.state.status,
            side_to_move: self.state.side_to_move,
            turn_ended,
            notices,
        })
    }

    pub fn end_turn(&mut self) -> GameResult<TurnReport> {
        let result = self.end_turn_inner("Turn ended.");
        self.log(result)
    }

    /// Cancels targeting when an action is armed, otherwise ends the turn.
    pub fn skip_turn(&mut self) -> GameResult<TurnReport> {
        if self.turn.is_targeting() {
            let message = self.cancel_targeting()?;
            return Ok(TurnReport {
                message,
                status: self.state.status,
                side_to_move: self.state.side_to_move,
                notices: Vec::new(),
            });
        }
        let result = self.end_turn_inner("Turn skipped.");
        self.log(result)
    }

    fn end_turn_inner(&mut self, message: &'static str) -> GameResult<TurnReport> {
        self.ensure_active()?;
        if self.turn.is_targeting() {
            return Err(GameError::TargetingInProgress);
        }
        let notices = self.process_end_turn();
        Ok(TurnReport {
            message,
            status: self.state.status,
            side_to_move: self.state.side_to_move,
            notices,
        })
    }

    /// Decrements effects, hands the turn over and re-evaluates status.
    /// Returns the expiry notices.
    pub fn process_end_turn(&mut self) -> Vec<String> {
        let ending = self.state.side_to_move;
        let notices = self.state.effects.decrement(&mut self.state.board, ending);

        self.state.side_to_move = ending.opposite();
        self.state.turn_counter = self.state.turn_counter.saturating_add(1);
        self.turn.reset();
        let status = refresh_status(&mut self.state);

        for notice in &notices {
            self.journal
                .record(self.state.turn_counter, ending, notice.as_str());
        }
        info!(
            turn = self.state.turn_counter,
            player = %self.state.side_to_move,
            %status,
            "turn passed"
        );
        notices
    }

    /// Back to the opening position with every effect, counter and message
    /// cleared. Configuration is kept.
    pub fn reset(&mut self) {
        self.state = GameState::new_game();
        self.turn.reset();
        self.journal.clear();
        refresh_status(&mut self.state);
        info!("game reset");
    }

    fn ensure_active(&self) -> GameResult<()> {
        if self.state.status.is_over() {
            return Err(GameError::GameOver(self.state.status));
        }
        Ok(())
    }

    /// Journals the status line of a command result.
    fn log<T: fmt::Display>(&mut self, result: GameResult<T>) -> GameResult<T> {
        match &result {
            Ok(value) => {
                self.journal
                    .record(self.state.turn_counter, self.state.side_to_move, value.to_string())
            }
            Err(err) => self.log_error(err),
        }
        result
    }

    fn log_error(&mut self, err: &GameError) {
        let player = self.state.side_to_move;
        let turn = self.state.turn_counter;
        warn!(%player, turn, "{err}");
        self.journal.record(turn, player, err.to_string());
    }
}
