use std::fmt;

use super::{Color, File, Piece, PieceKind, Rank, Square};

/// A piece in play, along with the state that changes as it moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PieceRecord {
    /// Identity of the piece. Only changes when a Pawn is promoted.
    pub piece: Piece,

    /// Where the piece currently stands.
    pub square: Square,

    /// Whether the piece has ever moved. Gates castling and a Pawn's double step.
    pub has_moved: bool,

    /// Set on a Pawn for the single opponent turn following its two-square advance.
    pub en_passant_vulnerable: bool,
}

impl PieceRecord {
    /// Creates a record for a piece that has not moved yet.
    pub const fn new(piece: Piece, square: Square) -> Self {
        Self {
            piece,
            square,
            has_moved: false,
            en_passant_vulnerable: false,
        }
    }

    pub const fn color(&self) -> Color {
        self.piece.color()
    }

    pub const fn kind(&self) -> PieceKind {
        self.piece.kind()
    }
}

/// A player's remaining right to castle on each side of the board.
///
/// A right is lost for good the first time the King or the relevant Rook moves, or
/// when that Rook is captured.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    /// Both sides available.
    pub const fn all() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }

    /// Neither side available.
    pub const fn none() -> Self {
        Self {
            kingside: false,
            queenside: false,
        }
    }

    pub const fn any(&self) -> bool {
        self.kingside || self.queenside
    }

    /// Revokes whichever right is tied to a Rook starting on `square`, from `color`'s
    /// point of view. Squares that aren't a Rook's home corner are ignored.
    pub fn revoke_for_rook_square(&mut self, color: Color, square: Square) {
        if square == Square::H1.rank_relative_to(color) {
            self.kingside = false;
        } else if square == Square::A1.rank_relative_to(color) {
            self.queenside = false;
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kingside, self.queenside) {
            (true, true) => write!(f, "O-O, O-O-O"),
            (true, false) => write!(f, "O-O"),
            (false, true) => write!(f, "O-O-O"),
            (false, false) => write!(f, "-"),
        }
    }
}

/// One side of the game: the pieces it still has, and what it may still castle.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Player {
    color: Color,

    /// Every live piece this player owns.
    pieces: Vec<PieceRecord>,

    castling_rights: CastlingRights,

    /// Enemy pieces this player has taken, in the order they were taken.
    captured: Vec<Piece>,
}

impl Player {
    /// Creates a player with no pieces and no castling rights.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::with_capacity(16),
            castling_rights: CastlingRights::none(),
            captured: Vec::new(),
        }
    }

    /// Creates a player with the standard sixteen pieces on their starting squares.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Color, Player, PieceKind, Square};
    /// let black = Player::standard(Color::Black);
    /// assert_eq!(black.pieces().len(), 16);
    /// assert_eq!(black.king_square(), Some(Square::E8));
    /// assert_eq!(black.record_at(Square::D8).unwrap().kind(), PieceKind::Queen);
    /// ```
    pub fn standard(color: Color) -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut player = Self::new(color);
        for (file, kind) in File::iter().zip(back_rank) {
            let pawn_square = Square::new(file, Rank::second(color));
            let back_square = Square::new(file, Rank::first(color));
            player
                .pieces
                .push(PieceRecord::new(Piece::new(color, Pawn), pawn_square));
            player
                .pieces
                .push(PieceRecord::new(Piece::new(color, kind), back_square));
        }
        player.castling_rights = CastlingRights::all();

        player
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn pieces(&self) -> &[PieceRecord] {
        &self.pieces
    }

    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// The record of this player's piece on `square`, if any.
    pub fn record_at(&self, square: Square) -> Option<&PieceRecord> {
        self.pieces.iter().find(|record| record.square == square)
    }

    pub(crate) fn record_at_mut(&mut self, square: Square) -> Option<&mut PieceRecord> {
        self.pieces.iter_mut().find(|record| record.square == square)
    }

    /// The square of this player's King, if they have one.
    pub fn king_square(&self) -> Option<Square> {
        self.pieces
            .iter()
            .find(|record| record.piece.is_king())
            .map(|record| record.square)
    }

    /// The Pawn (if any) that may currently be captured en passant.
    pub fn en_passant_vulnerable(&self) -> Option<&PieceRecord> {
        self.pieces
            .iter()
            .find(|record| record.en_passant_vulnerable)
    }

    pub(crate) fn add(&mut self, record: PieceRecord) {
        self.pieces.push(record);
    }

    /// Removes and returns the record of the piece on `square`.
    pub(crate) fn remove_at(&mut self, square: Square) -> Option<PieceRecord> {
        let index = self
            .pieces
            .iter()
            .position(|record| record.square == square)?;
        Some(self.pieces.swap_remove(index))
    }

    pub(crate) fn record_capture(&mut self, piece: Piece) {
        self.captured.push(piece);
    }

    pub(crate) fn castling_rights_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling_rights
    }

    pub(crate) fn clear_en_passant(&mut self) {
        for record in &mut self.pieces {
            record.en_passant_vulnerable = false;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standard_setup_has_one_king_and_eight_pawns() {
        for color in Color::iter() {
            let player = Player::standard(color);
            let kings = player.pieces().iter().filter(|r| r.piece.is_king()).count();
            let pawns = player.pieces().iter().filter(|r| r.piece.is_pawn()).count();
            assert_eq!(kings, 1);
            assert_eq!(pawns, 8);
            assert!(player.pieces().iter().all(|r| !r.has_moved));
            assert_eq!(player.castling_rights(), CastlingRights::all());
        }
    }

    #[test]
    fn only_corner_squares_revoke_castling() {
        let mut rights = CastlingRights::all();
        rights.revoke_for_rook_square(Color::Black, Square::H1);
        assert_eq!(rights, CastlingRights::all());

        rights.revoke_for_rook_square(Color::Black, Square::H8);
        assert!(!rights.kingside);
        assert!(rights.queenside);

        rights.revoke_for_rook_square(Color::Black, Square::A8);
        assert!(!rights.any());
    }

    #[test]
    fn removing_a_piece_drops_its_record() {
        let mut player = Player::standard(Color::White);
        let removed = player.remove_at(Square::B1).unwrap();
        assert_eq!(removed.piece, Piece::WHITE_KNIGHT);
        assert!(player.record_at(Square::B1).is_none());
        assert_eq!(player.pieces().len(), 15);
        assert!(player.remove_at(Square::B1).is_none());
    }
}
