//! Per-player buffs and lifetime spell usage.
//!
//! Each buff is an `Option<u8>` countdown: `Some(n)` means active for `n`
//! more of its owner's turns. Countdowns tick only when the owner's turn ends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actions::action::Spell;
use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buff {
    Rage,
    QueensSoul,
    Agility,
    MagicWand,
    Invisibility,
    Ladder,
}

impl Buff {
    pub const fn name(self) -> &'static str {
        match self {
            Buff::Rage => "Rage",
            Buff::QueensSoul => "Queen's Soul",
            Buff::Agility => "Agility",
            Buff::MagicWand => "Magic Wand",
            Buff::Invisibility => "Invisibility",
            Buff::Ladder => "Ladder",
        }
    }
}

impl fmt::Display for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One invisible piece, tracked by the square it currently stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invisibility {
    pub square: Square,
    pub remaining: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rage: Option<u8>,
    pub agility: Option<u8>,
    pub queens_soul: Option<u8>,
    pub magic_wand: Option<u8>,
    pub ladder: Option<u8>,
    pub invisibility: Option<Invisibility>,
    /// Rage was cast this turn; the next owner-turn end does not count down.
    rage_armed: bool,
    spell_uses: [u8; Spell::COUNT],
}

impl PlayerState {
    #[inline]
    pub fn has_rage(&self) -> bool {
        self.rage.is_some()
    }

    #[inline]
    pub fn has_agility(&self) -> bool {
        self.agility.is_some()
    }

    #[inline]
    pub fn king_moves_like_queen(&self) -> bool {
        self.queens_soul.is_some()
    }

    #[inline]
    pub fn has_magic_wand(&self) -> bool {
        self.magic_wand.is_some()
    }

    /// Ladder lets this player's pieces pass over occupied squares.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.ladder.is_some()
    }

    #[inline]
    pub fn invisible_square(&self) -> Option<Square> {
        self.invisibility.map(|inv| inv.square)
    }

    #[inline]
    pub fn spell_uses(&self, spell: Spell) -> u8 {
        self.spell_uses[spell.index()]
    }

    /// Boosts the next `turns` rolls of this player.
    pub fn arm_rage(&mut self, turns: u8) {
        self.rage = Some(turns);
        self.rage_armed = true;
    }

    pub fn record_spell_use(&mut self, spell: Spell) {
        let uses = &mut self.spell_uses[spell.index()];
        *uses = uses.saturating_add(1);
    }

    /// Active buffs with their remaining turns, in display order.
    pub fn buffs(&self) -> Vec<(Buff, u8)> {
        let mut out = Vec::new();
        let countdowns = [
            (Buff::Rage, self.rage),
            (Buff::QueensSoul, self.queens_soul),
            (Buff::Agility, self.agility),
            (Buff::MagicWand, self.magic_wand),
            (Buff::Invisibility, self.invisibility.map(|inv| inv.remaining)),
            (Buff::Ladder, self.ladder),
        ];
        for (buff, remaining) in countdowns {
            if let Some(remaining) = remaining {
                out.push((buff, remaining));
            }
        }
        out
    }

    /// Ends one of this player's turns. Returns a notice per expired buff.
    pub fn tick(&mut self, owner: Color) -> Vec<String> {
        let mut expired = Vec::new();

        if self.rage_armed {
            self.rage_armed = false;
        } else if tick_countdown(&mut self.rage) {
            expired.push(Buff::Rage);
        }
        if tick_countdown(&mut self.queens_soul) {
            expired.push(Buff::QueensSoul);
        }
        if tick_countdown(&mut self.agility) {
            expired.push(Buff::Agility);
        }
        if tick_countdown(&mut self.magic_wand) {
            expired.push(Buff::MagicWand);
        }
        if let Some(inv) = self.invisibility.as_mut() {
            inv.remaining = inv.remaining.saturating_sub(1);
            if inv.remaining == 0 {
                self.invisibility = None;
                expired.push(Buff::Invisibility);
            }
        }
        if tick_countdown(&mut self.ladder) {
            expired.push(Buff::Ladder);
        }

        expired
            .into_iter()
            .map(|buff| format!("{owner} {buff} effect ended"))
            .collect()
    }
}

/// Decrements an optional countdown, clearing it at zero. Returns true when
/// the countdown expired on this tick.
pub fn tick_countdown(slot: &mut Option<u8>) -> bool {
    let Some(remaining) = slot.as_mut() else {
        return false;
    };
    *remaining = remaining.saturating_sub(1);
    if *remaining > 0 {
        return false;
    }
    *slot = None;
    true
}

#[cfg(test)]
mod tests {
    use super::{tick_countdown, Buff, Invisibility, PlayerState};
    use crate::actions::action::Spell;
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn countdown_clears_on_reaching_zero() {
        let mut slot = Some(2);
        assert!(!tick_countdown(&mut slot));
        assert_eq!(slot, Some(1));
        assert!(tick_countdown(&mut slot));
        assert_eq!(slot, None);
        assert!(!tick_countdown(&mut slot));
    }

    #[test]
    fn tick_expires_buffs_and_invisible_square_together() {
        let mut player = PlayerState {
            rage: Some(2),
            ladder: Some(1),
            invisibility: Some(Invisibility {
                square: Square::new(6, 0),
                remaining: 1,
            }),
            ..PlayerState::default()
        };

        let notices = player.tick(Color::White);
        assert_eq!(
            notices,
            vec![
                "White Invisibility effect ended".to_owned(),
                "White Ladder effect ended".to_owned()
            ]
        );
        assert!(player.has_rage());
        assert!(!player.can_jump());
        assert_eq!(player.invisible_square(), None);
        assert_eq!(player.buffs(), vec![(Buff::Rage, 1)]);
    }

    #[test]
    fn rage_skips_the_countdown_of_its_casting_turn() {
        let mut player = PlayerState::default();
        player.arm_rage(2);

        assert!(player.tick(Color::Black).is_empty());
        assert_eq!(player.rage, Some(2));
        assert!(player.tick(Color::Black).is_empty());
        assert_eq!(player.rage, Some(1));
        assert_eq!(
            player.tick(Color::Black),
            vec!["Black Rage effect ended".to_owned()]
        );
        assert!(!player.has_rage());
    }

    #[test]
    fn spell_uses_are_counted_per_spell() {
        let mut player = PlayerState::default();
        player.record_spell_use(Spell::Fireball);
        assert_eq!(player.spell_uses(Spell::Fireball), 1);
        assert_eq!(player.spell_uses(Spell::Rage), 0);
    }
}
