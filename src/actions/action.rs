//! Spell and item catalog.
//!
//! Both catalogs are closed enums. `key()` is the stable string identifier a
//! presentation layer uses (`"Thunder_Spell"`, `"Fishing_Net"`, ...); `name()`
//! is the display name used in messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::rules_config::RulesConfig;
use crate::game_state::chess_types::{Color, Square};
use crate::turn::turn_state::TurnState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spell {
    ThunderSpell,
    Rage,
    Freeze,
    Necromancy,
    Agility,
    Fireball,
    InvisibilityPotion,
    QueensSoul,
}

impl Spell {
    pub const ALL: [Spell; 8] = [
        Spell::ThunderSpell,
        Spell::Rage,
        Spell::Freeze,
        Spell::Necromancy,
        Spell::Agility,
        Spell::Fireball,
        Spell::InvisibilityPotion,
        Spell::QueensSoul,
    ];
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Spell::ThunderSpell => "Thunder Spell",
            Spell::Rage => "Rage",
            Spell::Freeze => "Freeze",
            Spell::Necromancy => "Necromancy",
            Spell::Agility => "Agility",
            Spell::Fireball => "Fireball",
            Spell::InvisibilityPotion => "Invisibility Potion",
            Spell::QueensSoul => "Queen's Soul",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Spell::ThunderSpell => "Thunder_Spell",
            Spell::Rage => "Rage",
            Spell::Freeze => "Freeze",
            Spell::Necromancy => "Necromancy",
            Spell::Agility => "Agility",
            Spell::Fireball => "Fireball",
            Spell::InvisibilityPotion => "Invisibility_Potion",
            Spell::QueensSoul => "Queens_Soul",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|spell| spell.key() == key)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Spell::ThunderSpell => {
                "Cast a bolt of thunder from your king in a straight line. Strikes the first piece in that direction."
            }
            Spell::Rage => "On your next 2 turns you roll twice and use the higher roll.",
            Spell::Freeze => "Freezes a 2x2 area chosen by its top-left square. Lasts for 2 turns.",
            Spell::Necromancy => {
                "Bring the most recently captured piece back where it died. Invalid if that square is taken."
            }
            Spell::Agility => "You can make 2 moves this turn.",
            Spell::Fireball => "Captures every non-king piece on the target square and the 8 around it.",
            Spell::InvisibilityPotion => "Make one of your pieces invisible for 2 turns.",
            Spell::QueensSoul => "Your king moves like a queen for 1 turn.",
        }
    }

    pub const fn requires_target(self) -> bool {
        matches!(
            self,
            Spell::ThunderSpell | Spell::Freeze | Spell::Fireball | Spell::InvisibilityPotion
        )
    }

    pub fn min_roll(self, config: &RulesConfig) -> u8 {
        match self {
            Spell::ThunderSpell => config.min_roll_thunder,
            Spell::Rage => config.min_roll_rage,
            Spell::Freeze => config.min_roll_freeze,
            Spell::Necromancy => config.min_roll_necromancy,
            Spell::Agility => config.min_roll_agility,
            Spell::Fireball => config.min_roll_fireball,
            Spell::InvisibilityPotion => config.min_roll_invisibility,
            Spell::QueensSoul => config.min_roll_queens_soul,
        }
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Knife,
    MagicWand,
    Barrier,
    FishingNet,
    TimeMachine,
    Skip,
    LuckyCoin,
    ManaPotion,
    Wontan,
    Ladder,
}

impl Item {
    pub const ALL: [Item; 10] = [
        Item::Knife,
        Item::MagicWand,
        Item::Barrier,
        Item::FishingNet,
        Item::TimeMachine,
        Item::Skip,
        Item::LuckyCoin,
        Item::ManaPotion,
        Item::Wontan,
        Item::Ladder,
    ];
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Item::Knife => "Knife",
            Item::MagicWand => "Magic Wand",
            Item::Barrier => "Barrier",
            Item::FishingNet => "Fishing Net",
            Item::TimeMachine => "Time Machine",
            Item::Skip => "Skip",
            Item::LuckyCoin => "Lucky Coin",
            Item::ManaPotion => "Mana Potion",
            Item::Wontan => "Wontan",
            Item::Ladder => "Ladder",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Item::Knife => "Knife",
            Item::MagicWand => "Magic_Wand",
            Item::Barrier => "Barrier",
            Item::FishingNet => "Fishing_Net",
            Item::TimeMachine => "Time_Machine",
            Item::Skip => "Skip",
            Item::LuckyCoin => "Lucky_Coin",
            Item::ManaPotion => "Mana_Potion",
            Item::Wontan => "Wontan",
            Item::Ladder => "Ladder",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.key() == key)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Item::Knife => "Stab a piece adjacent to your king.",
            Item::MagicWand => "Lets pieces other than the king use spells. Lasts for 3 turns.",
            Item::Barrier => "Place a barrier on an empty square. Lasts for 5 turns.",
            Item::FishingNet => "Temporarily capture an enemy piece for 3 turns, then return it.",
            Item::TimeMachine => "Both players undo their most recent move, then you move again.",
            Item::Skip => "Skip the current phase and proceed to the next one.",
            Item::LuckyCoin => "Gain +1 spell use this turn.",
            Item::ManaPotion => "Replenish 1 spell use.",
            Item::Wontan => "Powerful smite that captures an enemy piece. Needs a roll of 17 or higher.",
            Item::Ladder => "Your pieces can jump over other pieces this turn.",
        }
    }

    pub const fn requires_target(self) -> bool {
        matches!(
            self,
            Item::Knife | Item::Barrier | Item::FishingNet | Item::Wontan
        )
    }

    /// Items without a threshold can be used before rolling.
    pub fn min_roll(self, config: &RulesConfig) -> Option<u8> {
        match self {
            Item::Wontan => Some(config.min_roll_wontan),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Spell(Spell),
    Item(Item),
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Action::Spell(spell) => spell.name(),
            Action::Item(item) => item.name(),
        }
    }

    pub const fn requires_target(self) -> bool {
        match self {
            Action::Spell(spell) => spell.requires_target(),
            Action::Item(item) => item.requires_target(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed(String),
    /// The action needs a board square. `anchor` is the fixed context
    /// captured when it was armed (the caster's king for Thunder and Knife).
    AwaitingTarget {
        prompt: &'static str,
        anchor: Option<Square>,
    },
}

impl ActionOutcome {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Completed(message) => f.write_str(message),
            ActionOutcome::AwaitingTarget { prompt, .. } => f.write_str(prompt),
        }
    }
}

/// Everything a handler may touch besides the game state itself.
pub struct ActionContext<'a> {
    pub turn: &'a mut TurnState,
    pub config: &'a RulesConfig,
    pub caster: Color,
    pub anchor: Option<Square>,
}

#[cfg(test)]
mod tests {
    use super::{Action, Item, Spell};
    use crate::config::rules_config::RulesConfig;

    #[test]
    fn keys_round_trip_through_lookup() {
        for spell in Spell::ALL {
            assert_eq!(Spell::from_key(spell.key()), Some(spell));
        }
        for item in Item::ALL {
            assert_eq!(Item::from_key(item.key()), Some(item));
        }
        assert_eq!(Spell::from_key("Thunder Spell"), None);
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = RulesConfig::default();
        assert_eq!(Spell::Rage.min_roll(&config), 5);
        assert_eq!(Spell::QueensSoul.min_roll(&config), 17);
        assert_eq!(Item::Wontan.min_roll(&config), Some(17));
        assert_eq!(Item::Knife.min_roll(&config), None);
    }

    #[test]
    fn targeting_actions_are_flagged() {
        assert!(Action::Spell(Spell::Freeze).requires_target());
        assert!(!Action::Spell(Spell::Necromancy).requires_target());
        assert!(Action::Item(Item::FishingNet).requires_target());
        assert!(!Action::Item(Item::TimeMachine).requires_target());
    }
}
