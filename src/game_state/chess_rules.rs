//! Canonical rule constants.
//!
//! Static literals used to initialise and validate game setup. Tunable
//! thresholds and durations live in `RulesConfig`.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Board rows/columns.
pub const BOARD_SIZE: u8 = 8;

/// Columns of the king and rooks on the back row.
pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Columns the rook lands on after castling.
pub const KINGSIDE_ROOK_TARGET_COL: u8 = 5;
pub const QUEENSIDE_ROOK_TARGET_COL: u8 = 3;

/// Largest valid top-left anchor coordinate for a 2x2 freeze block.
pub const FREEZE_ANCHOR_MAX: u8 = BOARD_SIZE - 2;
