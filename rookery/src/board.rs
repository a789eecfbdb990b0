use std::{
    fmt,
    ops::Index,
};

use super::{Bitboard, Color, File, Piece, PieceKind, Rank, Square};

/// Which piece, if any, stands on each square of the board.
///
/// The board only refers to pieces by identity. The pieces themselves (and their
/// per-piece state) are owned by the [`Player`](crate::Player)s; a [`Position`](crate::Position)
/// keeps this map in sync with them on every mutation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use rookery::Board;
    /// let board = Board::new();
    /// assert!(board.occupied().is_empty());
    /// ```
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    pub const fn has(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places `piece` at `square`, replacing anything already there.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C4);
    /// assert_eq!(board.piece_at(Square::C4), Some(Piece::WHITE_KNIGHT));
    /// ```
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::BLACK_ROOK, Square::A8);
    /// assert_eq!(board.take(Square::A8), Some(Piece::BLACK_ROOK));
    /// assert!(!board.has(Square::A8));
    /// ```
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square].take()
    }

    /// Returns `true` if the square holds a piece of the opposite color to `color`.
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.color_at(square) == Some(color.opponent())
    }

    /// Returns `true` if the square holds a piece of `color`.
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        self.color_at(square) == Some(color)
    }

    /// All squares occupied by pieces of `color`.
    pub fn color(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(square, _)| square)
            .collect()
    }

    /// All squares holding `color`'s pieces of `kind`.
    pub fn piece_parts(&self, color: Color, kind: PieceKind) -> Bitboard {
        let piece = Piece::new(color, kind);
        self.iter()
            .filter(|(_, p)| *p == piece)
            .map(|(square, _)| square)
            .collect()
    }

    /// All occupied squares.
    pub fn occupied(&self) -> Bitboard {
        self.iter().map(|(square, _)| square).collect()
    }

    /// Squares that `color` could move a piece onto: empty or held by the enemy.
    pub fn enemy_or_empty(&self, color: Color) -> Bitboard {
        !self.color(color)
    }

    /// The square of `color`'s King, if it is on the board.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.piece_parts(color, PieceKind::King).lsb()
    }

    /// An iterator over every occupied square and the piece on it, from `A1` to `H8`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;

            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }

            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn queries_agree_with_placements() {
        let mut board = Board::new();
        board.place(Piece::WHITE_KING, Square::E1);
        board.place(Piece::BLACK_KING, Square::E8);
        board.place(Piece::BLACK_PAWN, Square::D5);

        assert_eq!(board.king(Color::White), Some(Square::E1));
        assert_eq!(board.king(Color::Black), Some(Square::E8));
        assert_eq!(board.occupied().population(), 3);
        assert_eq!(board.color(Color::Black).population(), 2);
        assert!(board.is_enemy(Square::D5, Color::White));
        assert!(board.is_friendly(Square::D5, Color::Black));
        assert!(!board.is_enemy(Square::D4, Color::White));
        assert!(board.enemy_or_empty(Color::White).get(Square::D5));
        assert!(!board.enemy_or_empty(Color::White).get(Square::E1));
    }

    #[test]
    fn display_puts_rank_eight_on_top() {
        let mut board = Board::new();
        board.place(Piece::BLACK_ROOK, Square::A8);
        let text = board.to_string();
        assert!(text.starts_with("8| r . . . . . . . "));
        assert!(text.ends_with("a b c d e f g h "));
    }
}
