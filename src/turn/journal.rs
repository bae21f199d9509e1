//! Timestamped log of every command message, for the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub at: DateTime<Utc>,
    pub turn: u32,
    pub player: Color,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameJournal {
    entries: Vec<JournalEntry>,
}

impl GameJournal {
    pub fn record(&mut self, turn: u32, player: Color, message: impl Into<String>) {
        self.entries.push(JournalEntry {
            at: Utc::now(),
            turn,
            player,
            message: message.into(),
        });
    }

    #[inline]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[inline]
    pub fn last_message(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.message.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
