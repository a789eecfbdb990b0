use std::{error::Error, fmt};

use super::{Color, PieceKind, Square, Status};

/// Why a requested move was refused. The game is left unchanged whenever one is returned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Rejection {
    /// The game has already ended in checkmate or stalemate.
    GameOver { status: Status },

    /// There is no piece on the source square.
    NoPieceAtSource { square: Square },

    /// The piece on the source square belongs to the side not on move.
    NotYourPiece { square: Square, owner: Color },

    /// The piece can't legally reach the destination.
    IllegalDestination { from: Square, to: Square },

    /// A Pawn reached its last rank, but no promotion piece was chosen.
    PromotionChoiceRequired { from: Square, to: Square },

    /// The chosen promotion piece is not a Knight, Bishop, Rook, or Queen.
    InvalidPromotionChoice { choice: PieceKind },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver { status } => write!(f, "the game is over by {status}"),
            Self::NoPieceAtSource { square } => write!(f, "there is no piece on {square}"),
            Self::NotYourPiece { square, owner } => write!(
                f,
                "the piece on {square} belongs to {}, who is not on move",
                owner.name()
            ),
            Self::IllegalDestination { from, to } => {
                write!(f, "the piece on {from} cannot legally move to {to}")
            }
            Self::PromotionChoiceRequired { from, to } => {
                write!(f, "{from}{to} promotes a pawn. choose [n | b | r | q]")
            }
            Self::InvalidPromotionChoice { choice } => write!(
                f,
                "pawns may only promote to [n | b | r | q]. found {}",
                choice.name()
            ),
        }
    }
}

impl Error for Rejection {}
