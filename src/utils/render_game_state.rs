//! Terminal-oriented Unicode board renderer.
//!
//! Draws the grid from row 0 (rank 8) down, marking frozen empty squares
//! with `*` and barriers with `#`. Used for debugging and test diagnostics.

use crate::game_state::{chess_types::Square, game_state::GameState};

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for col in 0..8u8 {
            out.push(square_glyph(game_state, Square::new(row, col)));
            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn square_glyph(game_state: &GameState, square: Square) -> char {
    if game_state.is_barricaded(square) {
        return '#';
    }
    match game_state.piece_at(square) {
        Some(piece) => piece.symbol(),
        None if game_state.is_frozen(square) => '*',
        None => '·',
    }
}
