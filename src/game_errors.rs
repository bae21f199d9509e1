//! Errors reported by the rules engine.
//!
//! `GameError` is the single error type returned by moves, spells, items, and
//! turn commands. Its `Display` output is the human-readable status line the
//! presentation layer shows; a returned error always means the game state was
//! left untouched (apart from cancelling a pending target, which is not an
//! error path).
//!
//! Grouping when matching:
//! - Move rejections (`NoPieceAt`, `NotYourPiece`, `IllegalMove`).
//! - Turn/accounting rejections (caps, limits, dice, targeting in progress).
//! - Target rejections raised by individual spells and items; these keep a
//!   pending target armed so another square can be chosen.

use thiserror::Error;

use crate::game_state::chess_types::{Color, GameStatus, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("The game is over ({0}).")]
    GameOver(GameStatus),

    #[error("No piece at {0}.")]
    NoPieceAt(Square),

    #[error("The piece at {square} belongs to {owner}.")]
    NotYourPiece { square: Square, owner: Color },

    #[error("Illegal move from {from} to {to}: {reason}.")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: &'static str,
    },

    #[error("Please complete targeting or cancel first.")]
    TargetingInProgress,

    #[error("No spell or item is waiting for a target.")]
    NoPendingTarget,

    #[error("No spell or item selected.")]
    NothingSelected,

    #[error("Spell not found: {0}")]
    UnknownSpell(String),

    #[error("Item not found: {0}")]
    UnknownItem(String),

    #[error("Maximum spells used this turn")]
    SpellCapReached,

    #[error("Maximum items used this turn")]
    ItemCapReached,

    #[error("{name} has reached its usage limit ({limit}).")]
    SpellLimitReached { name: &'static str, limit: u8 },

    #[error("Please roll dice first")]
    DiceNotRolled,

    #[error("Dice already rolled this turn ({0}).")]
    DiceAlreadyRolled(u8),

    #[error("Roll too low. Need {needed} or higher.")]
    RollTooLow { needed: u8, rolled: u8 },

    #[error("King not found")]
    KingNotFound,

    #[error("Cannot target a king with {0}.")]
    CannotTargetKing(&'static str),

    #[error("Must target an enemy piece.")]
    MustTargetEnemy,

    #[error("Must target your own piece.")]
    MustTargetOwnPiece,

    #[error("Target must be adjacent to your king.")]
    NotAdjacentToKing,

    #[error("Thunder must be cast in a straight line (horizontal, vertical, or diagonal).")]
    NotStraightLine,

    #[error("Choose a square away from your king to aim the thunder.")]
    TargetIsCaster,

    #[error("Invalid area at {0}. Must be a valid 2x2 square on the board.")]
    InvalidFreezeAnchor(Square),

    #[error("Square {0} must be empty.")]
    SquareOccupied(Square),

    #[error("Square {0} is frozen.")]
    SquareFrozen(Square),

    #[error("Square {0} already has a barrier.")]
    SquareBarricaded(Square),

    #[error("Graveyard is empty.")]
    GraveyardEmpty,

    #[error("Invalid - the space where the piece died ({0}) is now occupied.")]
    RevivalSquareOccupied(Square),

    #[error("Invalid - the space where the piece died ({0}) is blocked (frozen or has barrier).")]
    RevivalSquareBlocked(Square),

    #[error("Not enough moves to undo")]
    InsufficientHistory,

    #[error("Time cannot be reversed: the board has changed since those moves.")]
    HistoryDiverged,
}

pub type GameResult<T> = Result<T, GameError>;
