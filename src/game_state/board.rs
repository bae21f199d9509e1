//! 8x8 piece grid with a king-location cache.
//!
//! `Board` is `Copy` so the legality engine can simulate a move on a scratch
//! copy without touching graveyards or history. Every mutation goes through
//! `place_piece`/`remove_piece`, which keep the king cache equal to the actual
//! king squares.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    king_positions: [Option<Square>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            king_positions: [None; 2],
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    /// Bounds-checked lookup; anything off the board reads as empty.
    #[inline]
    pub fn piece_at_coords(&self, row: i32, col: i32) -> Option<Piece> {
        Square::try_new(row, col).and_then(|sq| self.piece_at(sq))
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Puts `piece` on `square`, returning whatever stood there before.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let displaced = self.remove_piece(square);
        self.squares[square.row as usize][square.col as usize] = Some(piece);
        if piece.is_king() {
            self.king_positions[piece.color.index()] = Some(square);
        }
        displaced
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let removed = self.squares[square.row as usize][square.col as usize].take();
        if let Some(piece) = removed {
            if piece.is_king() && self.king_positions[piece.color.index()] == Some(square) {
                self.king_positions[piece.color.index()] = None;
            }
        }
        removed
    }

    /// Cached king square.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_positions[color.index()]
    }

    /// Linear scan for the king; agrees with `king_square` while the cache
    /// invariant holds.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some(Piece::new(color, PieceKind::King)))
    }

    pub fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// First empty square in row-major order that `is_blocked` does not veto.
    pub fn first_empty_square<F>(&self, is_blocked: F) -> Option<Square>
    where
        F: Fn(Square) -> bool,
    {
        Square::all().find(|&sq| self.is_empty(sq) && !is_blocked(sq))
    }

    pub fn piece_count(&self) -> usize {
        Square::all().filter(|&sq| !self.is_empty(sq)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn king_cache_follows_place_and_remove() {
        let mut board = Board::empty();
        let king = Piece::new(Color::White, PieceKind::King);
        board.place_piece(Square::new(7, 4), king);
        assert_eq!(board.king_square(Color::White), Some(Square::new(7, 4)));

        board.remove_piece(Square::new(7, 4));
        board.place_piece(Square::new(6, 4), king);
        assert_eq!(board.king_square(Color::White), Some(Square::new(6, 4)));
        assert_eq!(board.find_king(Color::White), board.king_square(Color::White));
        assert_eq!(board.king_square(Color::Black), None);
    }

    #[test]
    fn overwriting_a_king_clears_its_cache_entry() {
        let mut board = Board::empty();
        board.place_piece(Square::new(0, 4), Piece::new(Color::Black, PieceKind::King));
        let displaced = board.place_piece(Square::new(0, 4), Piece::new(Color::White, PieceKind::Rook));
        assert_eq!(displaced, Some(Piece::new(Color::Black, PieceKind::King)));
        assert_eq!(board.king_square(Color::Black), None);
    }

    #[test]
    fn out_of_range_coordinates_read_as_empty() {
        let mut board = Board::empty();
        board.place_piece(Square::new(0, 0), Piece::new(Color::Black, PieceKind::Rook));
        assert!(board.piece_at_coords(0, 0).is_some());
        assert!(board.piece_at_coords(-1, 0).is_none());
        assert!(board.piece_at_coords(0, 8).is_none());
    }

    #[test]
    fn first_empty_square_skips_vetoed_squares() {
        let mut board = Board::empty();
        board.place_piece(Square::new(0, 0), Piece::new(Color::Black, PieceKind::Rook));
        let found = board.first_empty_square(|sq| sq == Square::new(0, 1));
        assert_eq!(found, Some(Square::new(0, 2)));
    }

    #[test]
    fn pieces_of_filters_by_color() {
        let mut board = Board::empty();
        board.place_piece(Square::new(0, 0), Piece::new(Color::Black, PieceKind::Rook));
        board.place_piece(Square::new(7, 0), Piece::new(Color::White, PieceKind::Rook));
        board.place_piece(Square::new(7, 4), Piece::new(Color::White, PieceKind::King));
        assert_eq!(board.pieces_of(Color::White).len(), 2);
        assert_eq!(board.pieces_of(Color::Black).len(), 1);
        assert_eq!(board.piece_count(), 3);
    }
}
