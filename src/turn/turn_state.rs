use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actions::action::Action;
use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Move,
    Spell,
    Item,
}

impl TurnPhase {
    /// Move -> Spell -> Item -> Move.
    pub const fn next(self) -> Self {
        match self {
            TurnPhase::Move => TurnPhase::Spell,
            TurnPhase::Spell => TurnPhase::Item,
            TurnPhase::Item => TurnPhase::Move,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::Move => "Move",
            TurnPhase::Spell => "Spell",
            TurnPhase::Item => "Item",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An armed spell or item waiting for a board click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTarget {
    pub action: Action,
    pub anchor: Option<Square>,
}

/// Per-turn bookkeeping, cleared whenever the turn passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    pub dice_roll: Option<u8>,
    pub spells_used: u8,
    pub items_used: u8,
    pub phase: TurnPhase,
    pub moves_made: u8,
    pub selected_square: Option<Square>,
    pub selected_action: Option<Action>,
    pub pending: Option<PendingTarget>,
}

impl TurnState {
    #[inline]
    pub fn is_targeting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
