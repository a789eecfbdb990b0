use std::fmt;

use anyhow::{bail, Context, Result};

use super::{classify_move, PieceKind, Position, Square};

/// The different kinds of moves that can be made during a chess game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// A single piece moves to an empty square.
    Quiet,

    /// A Pawn's first move, advancing two squares. Leaves it open to en passant.
    PawnPushTwo,

    /// A piece moves onto a square held by an opponent's piece, removing it.
    Capture,

    /// A Pawn captures an enemy Pawn that has just advanced two squares beside it,
    /// landing on the square that Pawn passed over.
    EnPassantCapture,

    /// The King and the Rook on the King's side slide past each other.
    KingsideCastle,

    /// The King and the Rook on the Queen's side slide past each other.
    QueensideCastle,

    /// A Pawn reaches its last rank and becomes another kind of piece.
    Promote(PieceKind),

    /// A Pawn captures onto its last rank and becomes another kind of piece.
    PromoCapt(PieceKind),
}

/// A proposed transition from one square to another.
///
/// Moves are plain values. They do not know whether they are legal; see
/// [`is_legal`](crate::is_legal).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    pub const fn from(&self) -> Square {
        self.from
    }

    pub const fn to(&self) -> Square {
        self.to
    }

    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    pub const fn parts(&self) -> (Square, Square, MoveKind) {
        (self.from, self.to, self.kind)
    }

    /// Returns `true` if this move removes an enemy piece from the board.
    pub const fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassantCapture | MoveKind::PromoCapt(_)
        )
    }

    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassantCapture)
    }

    pub const fn is_castle(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::KingsideCastle | MoveKind::QueensideCastle
        )
    }

    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::PawnPushTwo)
    }

    /// The kind a Pawn becomes after this move, if it is a promotion.
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promote(promotion) | MoveKind::PromoCapt(promotion) => Some(promotion),
            _ => None,
        }
    }

    /// The square of the piece this move captures.
    ///
    /// This is the destination for every capture except en passant, where the captured
    /// Pawn sits one square behind the destination.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Move, MoveKind, Square};
    /// let exd6 = Move::new(Square::E5, Square::D6, MoveKind::EnPassantCapture);
    /// assert_eq!(exd6.captured_square(), Some(Square::D5));
    ///
    /// let quiet = Move::new(Square::G1, Square::F3, MoveKind::Quiet);
    /// assert_eq!(quiet.captured_square(), None);
    /// ```
    pub fn captured_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassantCapture => Square::from_coords(
                self.to.file().index() as i8,
                self.from.rank().index() as i8,
            ),
            _ if self.is_capture() => Some(self.to),
            _ => None,
        }
    }

    /// Parses a move in coordinate notation (`e2e4`, `e7e8q`) against `position`.
    ///
    /// The [`MoveKind`] is inferred from the pieces on the board, so the returned move is
    /// only meaningful for `position`. No legality checks are performed.
    pub fn from_uci(position: &Position, uci: &str) -> Result<Self> {
        let uci = uci.trim();
        let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..4)) else {
            bail!("Move strings must be at least 4 characters long. Got {uci:?}");
        };

        let from = Square::from_uci(from).context(format!("Invalid source in {uci:?}"))?;
        let to = Square::from_uci(to).context(format!("Invalid destination in {uci:?}"))?;

        let promotion = match uci.get(4..) {
            None | Some("") => None,
            Some(promotion) => Some(promotion.parse::<PieceKind>()?),
        };

        classify_move(position, from, to, promotion)
            .with_context(|| format!("No piece at {from} to move in {uci:?}"))
    }

    /// Formats this move in coordinate notation.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Move, MoveKind, PieceKind, Square};
    /// let e7e8n = Move::new(Square::E7, Square::E8, MoveKind::Promote(PieceKind::Knight));
    /// assert_eq!(e7e8n.to_uci(), "e7e8n");
    /// ```
    pub fn to_uci(&self) -> String {
        match self.promotion() {
            Some(promotion) => format!("{}{}{promotion}", self.from, self.to),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.to_uci(), self.kind)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_respects_width() {
        let e2e4 = Move::new(Square::E2, Square::E4, MoveKind::PawnPushTwo);
        assert_eq!(format!("{e2e4:>6}|"), "  e2e4|");

        let promo = Move::new(Square::A7, Square::A8, MoveKind::Promote(PieceKind::Queen));
        assert_eq!(format!("{promo:<6}|"), "a7a8q |");
    }
}
