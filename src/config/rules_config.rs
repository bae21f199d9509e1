//! Tunable rule constants.
//!
//! Every threshold, cap and duration the engine consults lives here so a
//! presentation layer (or a test) can change the balance of the game without
//! touching the rules code. Options are addressed by snake_case name, either
//! through `set_option` or `SPELL_CHESS_<OPTION>` environment variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "SPELL_CHESS_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub spells_per_turn: u8,
    pub items_per_turn: u8,
    pub spell_lifetime_limit: u8,
    pub dice_sides: u8,
    pub max_moves_with_agility: u8,

    pub min_roll_thunder: u8,
    pub min_roll_rage: u8,
    pub min_roll_freeze: u8,
    pub min_roll_necromancy: u8,
    pub min_roll_agility: u8,
    pub min_roll_fireball: u8,
    pub min_roll_invisibility: u8,
    pub min_roll_queens_soul: u8,
    pub min_roll_wontan: u8,

    pub rage_turns: u8,
    pub freeze_turns: u8,
    pub agility_turns: u8,
    pub invisibility_turns: u8,
    pub queens_soul_turns: u8,
    pub magic_wand_turns: u8,
    pub barrier_turns: u8,
    pub fishing_net_turns: u8,
    pub ladder_turns: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            spells_per_turn: 3,
            items_per_turn: 3,
            spell_lifetime_limit: 1,
            dice_sides: 20,
            max_moves_with_agility: 2,

            min_roll_thunder: 10,
            min_roll_rage: 5,
            min_roll_freeze: 10,
            min_roll_necromancy: 15,
            min_roll_agility: 11,
            min_roll_fireball: 15,
            min_roll_invisibility: 13,
            min_roll_queens_soul: 17,
            min_roll_wontan: 17,

            rage_turns: 2,
            // Counted in half-turns: two full turns.
            freeze_turns: 4,
            agility_turns: 1,
            invisibility_turns: 2,
            queens_soul_turns: 1,
            magic_wand_turns: 3,
            barrier_turns: 5,
            fishing_net_turns: 3,
            ladder_turns: 1,
        }
    }
}

impl RulesConfig {
    /// Default rules overlaid with any `SPELL_CHESS_<OPTION>` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_iter(std::env::vars())
    }

    pub fn from_env_iter<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            if let Some(option) = key.as_ref().strip_prefix(ENV_PREFIX) {
                config.set_option(&option.to_ascii_lowercase(), value.as_ref())?;
            }
        }
        Ok(config)
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let parsed = value
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_owned(),
                value: value.to_owned(),
            })?;

        if parsed == 0 && matches!(name, "dice_sides" | "max_moves_with_agility") {
            return Err(ConfigError::InvalidValue {
                name: name.to_owned(),
                value: value.to_owned(),
            });
        }

        let slot = self
            .option_slot(name)
            .ok_or_else(|| ConfigError::UnknownOption(name.to_owned()))?;
        *slot = parsed;
        debug!(option = name, value = parsed, "rules option set");
        Ok(())
    }

    fn option_slot(&mut self, name: &str) -> Option<&mut u8> {
        let slot = match name {
            "spells_per_turn" => &mut self.spells_per_turn,
            "items_per_turn" => &mut self.items_per_turn,
            "spell_lifetime_limit" => &mut self.spell_lifetime_limit,
            "dice_sides" => &mut self.dice_sides,
            "max_moves_with_agility" => &mut self.max_moves_with_agility,

            "min_roll_thunder" => &mut self.min_roll_thunder,
            "min_roll_rage" => &mut self.min_roll_rage,
            "min_roll_freeze" => &mut self.min_roll_freeze,
            "min_roll_necromancy" => &mut self.min_roll_necromancy,
            "min_roll_agility" => &mut self.min_roll_agility,
            "min_roll_fireball" => &mut self.min_roll_fireball,
            "min_roll_invisibility" => &mut self.min_roll_invisibility,
            "min_roll_queens_soul" => &mut self.min_roll_queens_soul,
            "min_roll_wontan" => &mut self.min_roll_wontan,

            "rage_turns" => &mut self.rage_turns,
            "freeze_turns" => &mut self.freeze_turns,
            "agility_turns" => &mut self.agility_turns,
            "invisibility_turns" => &mut self.invisibility_turns,
            "queens_soul_turns" => &mut self.queens_soul_turns,
            "magic_wand_turns" => &mut self.magic_wand_turns,
            "barrier_turns" => &mut self.barrier_turns,
            "fishing_net_turns" => &mut self.fishing_net_turns,
            "ladder_turns" => &mut self.ladder_turns,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RulesConfig};

    #[test]
    fn set_option_updates_named_field() {
        let mut config = RulesConfig::default();
        config
            .set_option("min_roll_fireball", "3")
            .expect("known option should be accepted");
        assert_eq!(config.min_roll_fireball, 3);
    }

    #[test]
    fn set_option_rejects_unknown_names_and_bad_values() {
        let mut config = RulesConfig::default();
        assert_eq!(
            config.set_option("mana", "1"),
            Err(ConfigError::UnknownOption("mana".to_owned()))
        );
        assert!(matches!(
            config.set_option("barrier_turns", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config.set_option("dice_sides", "0").is_err());
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn env_overlay_only_reads_prefixed_vars() {
        let vars = vec![
            ("SPELL_CHESS_RAGE_TURNS", "4"),
            ("SPELL_CHESS_SPELLS_PER_TURN", "1"),
            ("HOME", "/root"),
        ];
        let config = RulesConfig::from_env_iter(vars).expect("overlay should parse");
        assert_eq!(config.rage_turns, 4);
        assert_eq!(config.spells_per_turn, 1);
        assert_eq!(config.items_per_turn, 3);
    }

    #[test]
    fn env_overlay_surfaces_unknown_options() {
        let vars = vec![("SPELL_CHESS_NOPE", "4")];
        assert!(RulesConfig::from_env_iter(vars).is_err());
    }
}
