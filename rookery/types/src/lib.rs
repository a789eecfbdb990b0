/// A set of squares, packed into a `u64`.
pub mod bitboard;
/// Enums for piece kinds, colors, and a struct for a chess piece's identity.
pub mod piece;
/// Squares on a chessboard (including files and ranks).
pub mod square;
/// Constants shared by the rules engine.
pub mod utils;

pub use bitboard::*;
pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
