//! Board-wide timed effects plus both players' buff state.
//!
//! Freeze is a singleton 2x2 block; barriers and temporary captures may
//! coexist. All of them count down once per completed turn in `decrement`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::effects::player_state::{Buff, PlayerState};
use crate::game_errors::{GameError, GameResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::FREEZE_ANCHOR_MAX;
use crate::game_state::chess_types::{Color, Piece, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeEffect {
    pub squares: [Square; 4],
    pub remaining: u8,
    pub total: u8,
    pub caster: Color,
}

impl FreezeEffect {
    /// The 2x2 block whose top-left corner is `anchor`.
    pub fn new(anchor: Square, caster: Color, turns: u8) -> GameResult<Self> {
        if anchor.row > FREEZE_ANCHOR_MAX || anchor.col > FREEZE_ANCHOR_MAX {
            return Err(GameError::InvalidFreezeAnchor(anchor));
        }
        let Square { row, col } = anchor;
        Ok(Self {
            squares: [
                Square::new(row, col),
                Square::new(row, col + 1),
                Square::new(row + 1, col),
                Square::new(row + 1, col + 1),
            ],
            remaining: turns,
            total: turns,
            caster,
        })
    }

    #[inline]
    pub fn anchor(&self) -> Square {
        self.squares[0]
    }

    #[inline]
    pub fn covers(&self, square: Square) -> bool {
        self.squares.contains(&square)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    pub square: Square,
    pub remaining: u8,
    pub caster: Color,
}

/// A piece lifted off the board by the Fishing Net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryCapture {
    pub piece: Piece,
    pub origin: Square,
    pub remaining: u8,
    pub caster: Color,
}

/// Summary line for the effects panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveEffect {
    Freeze { anchor: Square, remaining: u8 },
    Buff { owner: Color, buff: Buff, remaining: u8 },
    Barrier { square: Square, remaining: u8 },
    NetCapture { piece: Piece, remaining: u8 },
}

impl fmt::Display for ActiveEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveEffect::Freeze { anchor, remaining } => {
                write!(f, "Freeze at {anchor}: {remaining} turns remaining")
            }
            ActiveEffect::Buff {
                owner,
                buff,
                remaining,
            } => write!(f, "{owner} {buff}: {remaining} turns"),
            ActiveEffect::Barrier { square, remaining } => {
                write!(f, "Barrier {square}: {remaining} turns")
            }
            ActiveEffect::NetCapture { piece, remaining } => {
                write!(f, "Net Capture {piece}: {remaining} turns")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectRegistry {
    pub freeze: Option<FreezeEffect>,
    pub barriers: Vec<Barrier>,
    pub temporary_captures: Vec<TemporaryCapture>,
    players: [PlayerState; 2],
}

impl EffectRegistry {
    #[inline]
    pub fn is_frozen(&self, square: Square) -> bool {
        self.freeze.is_some_and(|freeze| freeze.covers(square))
    }

    #[inline]
    pub fn is_barricaded(&self, square: Square) -> bool {
        self.barriers.iter().any(|barrier| barrier.square == square)
    }

    #[inline]
    pub fn is_blocked(&self, square: Square) -> bool {
        self.is_frozen(square) || self.is_barricaded(square)
    }

    #[inline]
    pub fn player(&self, color: Color) -> &PlayerState {
        &self.players[color.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, color: Color) -> &mut PlayerState {
        &mut self.players[color.index()]
    }

    /// True when the piece on `square` is under an active Invisibility Potion.
    pub fn is_invisible(&self, square: Square) -> bool {
        self.players
            .iter()
            .any(|player| player.invisible_square() == Some(square))
    }

    /// Installs a freeze, returning the one it replaced.
    pub fn cast_freeze(
        &mut self,
        anchor: Square,
        caster: Color,
        turns: u8,
    ) -> GameResult<Option<FreezeEffect>> {
        let freeze = FreezeEffect::new(anchor, caster, turns)?;
        Ok(self.freeze.replace(freeze))
    }

    pub fn place_barrier(&mut self, square: Square, caster: Color, turns: u8) {
        self.barriers.push(Barrier {
            square,
            remaining: turns,
            caster,
        });
    }

    pub fn hold_capture(&mut self, piece: Piece, origin: Square, caster: Color, turns: u8) {
        self.temporary_captures.push(TemporaryCapture {
            piece,
            origin,
            remaining: turns,
            caster,
        });
    }

    /// Keeps an invisible piece's square in step with the piece.
    pub fn follow_invisible_piece(&mut self, from: Square, to: Square) {
        for player in &mut self.players {
            if let Some(inv) = player.invisibility.as_mut() {
                if inv.square == from {
                    inv.square = to;
                }
            }
        }
    }

    /// The invisible piece on `square` left the board; its effect goes too.
    pub fn clear_invisibility_at(&mut self, square: Square) {
        for player in &mut self.players {
            if player.invisible_square() == Some(square) {
                player.invisibility = None;
            }
        }
    }

    /// One completed turn of `ending`. Board-wide effects tick every turn;
    /// buffs tick only for the player whose turn is ending. Expired net
    /// captures are put back on `board`.
    pub fn decrement(&mut self, board: &mut Board, ending: Color) -> Vec<String> {
        let mut notices = Vec::new();

        if let Some(freeze) = self.freeze.as_mut() {
            freeze.remaining = freeze.remaining.saturating_sub(1);
            if freeze.remaining == 0 {
                notices.push(format!("Freeze at {} ended", freeze.anchor()));
                self.freeze = None;
            }
        }

        notices.extend(self.players[ending.index()].tick(ending));

        self.barriers.retain_mut(|barrier| {
            barrier.remaining = barrier.remaining.saturating_sub(1);
            if barrier.remaining == 0 {
                notices.push(format!("Barrier at {} expired", barrier.square));
                return false;
            }
            true
        });

        let mut released = Vec::new();
        self.temporary_captures.retain_mut(|capture| {
            capture.remaining = capture.remaining.saturating_sub(1);
            if capture.remaining == 0 {
                released.push(*capture);
                return false;
            }
            true
        });
        for capture in released {
            notices.push(self.release_capture(board, capture));
        }

        for notice in &notices {
            info!(player = %ending, "{notice}");
        }
        notices
    }

    fn release_capture(&self, board: &mut Board, capture: TemporaryCapture) -> String {
        let destination = if board.is_empty(capture.origin) {
            Some(capture.origin)
        } else {
            board.first_empty_square(|square| self.is_blocked(square))
        };

        match destination {
            Some(square) => {
                board.place_piece(square, capture.piece);
                format!("{} returned to {}", capture.piece, square)
            }
            None => format!("{} could not return and is lost", capture.piece),
        }
    }

    pub fn active_effects(&self) -> Vec<ActiveEffect> {
        let mut out = Vec::new();

        if let Some(freeze) = self.freeze {
            out.push(ActiveEffect::Freeze {
                anchor: freeze.anchor(),
                remaining: freeze.remaining,
            });
        }
        for owner in Color::BOTH {
            for (buff, remaining) in self.player(owner).buffs() {
                out.push(ActiveEffect::Buff {
                    owner,
                    buff,
                    remaining,
                });
            }
        }
        for barrier in &self.barriers {
            out.push(ActiveEffect::Barrier {
                square: barrier.square,
                remaining: barrier.remaining,
            });
        }
        for capture in &self.temporary_captures {
            out.push(ActiveEffect::NetCapture {
                piece: capture.piece,
                remaining: capture.remaining,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveEffect, EffectRegistry};
    use crate::effects::player_state::{Buff, Invisibility};
    use crate::game_errors::GameError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn freeze_covers_block_for_exactly_four_decrements() {
        let mut effects = EffectRegistry::default();
        let mut board = Board::empty();
        effects
            .cast_freeze(Square::new(3, 3), Color::White, 4)
            .expect("anchor should be valid");

        let block = [
            Square::new(3, 3),
            Square::new(3, 4),
            Square::new(4, 3),
            Square::new(4, 4),
        ];
        let mut ending = Color::White;
        for _ in 0..3 {
            effects.decrement(&mut board, ending);
            ending = ending.opposite();
            assert!(block.iter().all(|&sq| effects.is_frozen(sq)));
        }
        assert!(!effects.is_frozen(Square::new(3, 5)));

        let notices = effects.decrement(&mut board, ending);
        assert!(block.iter().all(|&sq| !effects.is_frozen(sq)));
        assert_eq!(notices, vec!["Freeze at (3, 3) ended".to_owned()]);
    }

    #[test]
    fn freeze_anchor_must_leave_room_for_block() {
        let mut effects = EffectRegistry::default();
        assert_eq!(
            effects.cast_freeze(Square::new(7, 2), Color::White, 4),
            Err(GameError::InvalidFreezeAnchor(Square::new(7, 2)))
        );
        assert!(effects.freeze.is_none());
    }

    #[test]
    fn second_freeze_replaces_the_first() {
        let mut effects = EffectRegistry::default();
        let first = effects
            .cast_freeze(Square::new(0, 0), Color::White, 4)
            .expect("anchor should be valid");
        assert!(first.is_none());
        let replaced = effects
            .cast_freeze(Square::new(5, 5), Color::Black, 4)
            .expect("anchor should be valid");
        assert_eq!(replaced.map(|f| f.caster), Some(Color::White));
        assert!(!effects.is_frozen(Square::new(0, 0)));
        assert!(effects.is_frozen(Square::new(6, 6)));
    }

    #[test]
    fn buffs_tick_only_for_the_ending_player() {
        let mut effects = EffectRegistry::default();
        let mut board = Board::empty();
        effects.player_mut(Color::White).rage = Some(2);

        effects.decrement(&mut board, Color::Black);
        assert_eq!(effects.player(Color::White).rage, Some(2));
        effects.decrement(&mut board, Color::White);
        assert_eq!(effects.player(Color::White).rage, Some(1));
    }

    #[test]
    fn barrier_expires_after_its_turns() {
        let mut effects = EffectRegistry::default();
        let mut board = Board::empty();
        let sq = Square::new(4, 4);
        effects.place_barrier(sq, Color::White, 2);
        assert!(effects.is_blocked(sq));
        effects.decrement(&mut board, Color::White);
        assert!(effects.is_barricaded(sq));
        effects.decrement(&mut board, Color::Black);
        assert!(!effects.is_barricaded(sq));
    }

    #[test]
    fn net_capture_returns_to_origin_or_first_free_square() {
        let mut effects = EffectRegistry::default();
        let mut board = Board::empty();
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        let origin = Square::new(2, 2);
        effects.hold_capture(knight, origin, Color::White, 1);
        board.place_piece(origin, Piece::new(Color::White, PieceKind::Pawn));
        effects.place_barrier(Square::new(0, 0), Color::White, 5);

        let notices = effects.decrement(&mut board, Color::White);
        assert_eq!(board.piece_at(Square::new(0, 1)), Some(knight));
        assert_eq!(notices.last().map(String::as_str), Some("♞ returned to (0, 1)"));
        assert!(effects.temporary_captures.is_empty());
    }

    #[test]
    fn invisible_square_follows_and_clears() {
        let mut effects = EffectRegistry::default();
        effects.player_mut(Color::White).invisibility =
            Some(Invisibility {
                square: Square::new(6, 4),
                remaining: 2,
            });
        effects.follow_invisible_piece(Square::new(6, 4), Square::new(4, 4));
        assert!(effects.is_invisible(Square::new(4, 4)));
        effects.clear_invisibility_at(Square::new(4, 4));
        assert!(!effects.is_invisible(Square::new(4, 4)));
    }

    #[test]
    fn active_effects_lists_everything() {
        let mut effects = EffectRegistry::default();
        effects
            .cast_freeze(Square::new(1, 1), Color::White, 4)
            .expect("anchor should be valid");
        effects.player_mut(Color::Black).ladder = Some(1);
        effects.place_barrier(Square::new(5, 5), Color::Black, 5);

        let summary = effects.active_effects();
        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary[1],
            ActiveEffect::Buff {
                owner: Color::Black,
                buff: Buff::Ladder,
                remaining: 1
            }
        );
        assert_eq!(summary[2].to_string(), "Barrier (5, 5): 5 turns");
    }
}
