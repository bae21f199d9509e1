//! d20 rolls with Rage advantage.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    pub value: u8,
    pub first: u8,
    /// Present when the roll was made with advantage.
    pub second: Option<u8>,
}

impl DiceRoll {
    #[inline]
    pub fn boosted(&self) -> bool {
        self.second.is_some()
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.boosted() {
            write!(f, "Roll: {} (Rage boost active!)", self.value)
        } else {
            write!(f, "Roll: {}", self.value)
        }
    }
}

/// Seeded from the OS unless a seed is given.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One roll in `1..=sides`; with `advantage`, two rolls keeping the higher.
    pub fn roll(&mut self, sides: u8, advantage: bool) -> DiceRoll {
        let sides = sides.max(1);
        let first = self.rng.random_range(1..=sides);
        if !advantage {
            return DiceRoll {
                value: first,
                first,
                second: None,
            };
        }

        let second = self.rng.random_range(1..=sides);
        DiceRoll {
            value: first.max(second),
            first,
            second: Some(second),
        }
    }
}
