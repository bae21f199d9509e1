//! FEN parser used to set up positions.
//!
//! Reads the board, side to move, castling and en-passant fields. The clock
//! fields are optional; when a fullmove number is present it seeds the turn
//! counter so that generated FEN round-trips.

use crate::game_state::{board::Board, chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side to move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en passant square in FEN")?;
    let _halfmove_part = parts.next();
    let fullmove_part = parts.next();

    let mut game_state = GameState::new_empty();
    game_state.board = parse_board(board_part)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_target = parse_en_passant_square(en_passant_part)?;

    if let Some(fullmove) = fullmove_part {
        let fullmove: u32 = fullmove
            .parse()
            .map_err(|_| format!("Invalid fullmove number: {fullmove}"))?;
        let black_offset = u32::from(game_state.side_to_move == Color::Black);
        game_state.turn_counter = fullmove.saturating_sub(1) * 2 + black_offset;
    }

    Ok(game_state)
}

fn parse_board(board_part: &str) -> Result<Board, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(format!("FEN board must have 8 ranks, found {}", ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(format!("Invalid empty-square count '{ch}' in FEN"));
                }
                col += skip as u8;
            } else {
                if col >= 8 {
                    return Err(format!("Rank '{rank_str}' has more than 8 files"));
                }
                let piece = piece_from_fen_char(ch)?;
                board.place_piece(Square::new(row as u8, col), piece);
                col += 1;
            }
            if col > 8 {
                return Err(format!("Rank '{rank_str}' has more than 8 files"));
            }
        }
        if col != 8 {
            return Err(format!("Rank '{rank_str}' does not cover 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("Invalid side to move: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("Invalid castling character: {ch}")),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part).map(Some)
}

fn piece_from_fen_char(ch: char) -> Result<Piece, String> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(format!("Invalid piece character in FEN: {ch}")),
    };

    Ok(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::White);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.en_passant_target, None);
        assert_eq!(game_state.turn_counter, 0);
        assert_eq!(
            game_state.piece_at(Square::new(0, 3)),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            game_state.piece_at(Square::new(6, 0)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn clocks_are_optional() {
        let game_state =
            parse_fen("4k3/8/8/8/8/8/8/R3K3 b Q e3").expect("FEN without clocks should parse");
        assert_eq!(game_state.side_to_move, Color::Black);
        assert_eq!(game_state.castling_rights, CASTLE_WHITE_QUEENSIDE);
        assert_eq!(game_state.en_passant_target, Some(Square::new(5, 4)));
        assert_eq!(game_state.board.king_square(Color::White), Some(Square::new(7, 4)));
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/9 w - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/7x w - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 x - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w Z -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w -").is_err());
    }
}
