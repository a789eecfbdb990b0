pub use types::*;

/// The square-to-piece map, kept in sync with the players' piece records.
pub mod board;
/// Rejection reasons for moves the game refuses to make.
pub mod error;
/// The turn controller, and the entry point for playing a game.
///
/// You probably want to look here.
pub mod game;
/// Checks, legal moves, and the checkmate/stalemate verdict.
pub mod legality;
/// Movement rules for each kind of piece, and attack detection.
pub mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
pub mod moves;
/// Utility functions for move generation correctness and performance testing.
pub mod perft;
/// Each side's pieces and castling rights.
pub mod player;
/// A full description of the board between turns.
pub mod position;
/// En passant, castling, and promotion.
pub mod special;

pub use board::*;
pub use error::*;
pub use game::{apply_move, legal_moves, new_game, Game};
pub use legality::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use player::*;
pub use position::*;
pub use special::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::error::*;
    pub use crate::game::{apply_move, legal_moves, new_game, Game};
    pub use crate::legality::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::player::*;
    pub use crate::position::*;
    pub use crate::special::*;
    pub use types::prelude::*;
}
