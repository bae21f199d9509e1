//! Per-player record of captured pieces and where they fell.
//!
//! A capture is filed under the player who performed it; Necromancy revives
//! from the caster's own list, most recent entry first.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraveEntry {
    pub piece: Piece,
    pub square: Square,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graveyards {
    entries: [Vec<GraveEntry>; 2],
}

impl Graveyards {
    pub fn record(&mut self, capturer: Color, piece: Piece, square: Square) {
        self.entries[capturer.index()].push(GraveEntry { piece, square });
    }

    #[inline]
    pub fn entries(&self, owner: Color) -> &[GraveEntry] {
        &self.entries[owner.index()]
    }

    #[inline]
    pub fn latest(&self, owner: Color) -> Option<GraveEntry> {
        self.entries[owner.index()].last().copied()
    }

    pub fn pop_latest(&mut self, owner: Color) -> Option<GraveEntry> {
        self.entries[owner.index()].pop()
    }

    /// Drops the most recent entry matching `piece` on `square`. Used when a
    /// capture is reversed.
    pub fn remove_latest_matching(&mut self, owner: Color, piece: Piece, square: Square) -> bool {
        let list = &mut self.entries[owner.index()];
        match list
            .iter()
            .rposition(|entry| entry.piece == piece && entry.square == square)
        {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for list in &mut self.entries {
            list.clear();
        }
    }
}
