use std::fmt;

use super::{
    castling_moves, classify_move, en_passant_target, is_attacked, is_promotion,
    pseudo_legal_moves, Bitboard, Color, Move, MoveList, PieceKind, Position, Square,
};

/// Where a side stands at the start of its turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Status {
    /// Not in check, and at least one legal move.
    #[default]
    Ongoing,

    /// In check, with at least one legal move to escape it.
    Check,

    /// In check, and no legal move. The game is lost.
    Checkmate,

    /// Not in check, but no legal move. The game is drawn.
    Stalemate,
}

impl Status {
    /// Returns `true` if no further moves may be made.
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }

    pub const fn is_check(&self) -> bool {
        matches!(self, Self::Check | Self::Checkmate)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Ongoing => "ongoing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        };
        write!(f, "{status}")
    }
}

/// Returns `true` if `side`'s King is attacked by any enemy piece.
///
/// A side without a King is never in check.
pub fn in_check(position: &Position, side: Color) -> bool {
    position
        .king_square(side)
        .is_some_and(|king| is_attacked(king, side.opponent(), position.board()))
}

/// Returns `true` if making `mv` does not leave the mover's own King attacked.
///
/// The move is applied to a scratch copy of `position`, which is then inspected and
/// discarded. `position` itself is never changed.
///
/// Only King safety is checked here; whether the piece can reach `mv.to()` at all is
/// the move generator's concern.
pub fn is_legal(position: &Position, mv: Move) -> bool {
    let Some(side) = position.board().color_at(mv.from()) else {
        return false;
    };

    let scratch = position.clone().with_move_made(mv);
    !in_check(&scratch, side)
}

/// All squares the piece on `from` may legally move to.
///
/// Empty if there is no piece on `from`. This does not care whose turn it is.
///
/// # Example
/// ```
/// # use rookery::*;
/// let pos = Position::new();
/// let dests = legal_destinations(&pos, Square::E2);
/// assert_eq!(dests, Bitboard::from_squares([Square::E3, Square::E4]));
/// ```
pub fn legal_destinations(position: &Position, from: Square) -> Bitboard {
    let mut moves = MoveList::default();
    legal_moves_from(position, from, &mut moves);
    moves.iter().map(|mv| mv.to()).collect()
}

/// Appends every legal move of the piece on `from` to `moves`.
///
/// A promotion appears once per promotion choice.
pub fn legal_moves_from(position: &Position, from: Square, moves: &mut MoveList) {
    let Some(record) = position.record_at(from) else {
        return;
    };
    let color = record.color();
    let ep_target = en_passant_target(position, color);

    for to in pseudo_legal_moves(record, position.board(), ep_target) {
        if is_promotion(record.piece, to) {
            for promotion in PieceKind::promotions() {
                push_if_legal(position, from, to, Some(promotion), moves);
            }
        } else {
            push_if_legal(position, from, to, None, moves);
        }
    }

    // Castling has already been checked for safety of every square the King touches
    if record.piece.is_king() {
        moves.extend(castling_moves(position, color));
    }
}

fn push_if_legal(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    moves: &mut MoveList,
) {
    if let Some(mv) = classify_move(position, from, to, promotion) {
        if is_legal(position, mv) {
            moves.push(mv);
        }
    }
}

/// Every legal move for the side to move.
///
/// # Example
/// ```
/// # use rookery::*;
/// assert_eq!(legal_move_list(&Position::new()).len(), 20);
/// ```
pub fn legal_move_list(position: &Position) -> MoveList {
    let mut moves = MoveList::default();
    let side = position.side_to_move();

    for record in position.player(side).pieces() {
        legal_moves_from(position, record.square, &mut moves);
    }

    moves
}

/// Returns `true` if `side` has at least one legal move.
pub fn has_legal_move(position: &Position, side: Color) -> bool {
    let mut moves = MoveList::default();
    position.player(side).pieces().iter().any(|record| {
        moves.clear();
        legal_moves_from(position, record.square, &mut moves);
        !moves.is_empty()
    })
}

/// Determines whether `side` is in check, checkmated, stalemated, or none of those.
pub fn status(position: &Position, side: Color) -> Status {
    match (in_check(position, side), has_legal_move(position, side)) {
        (true, true) => Status::Check,
        (true, false) => Status::Checkmate,
        (false, true) => Status::Ongoing,
        (false, false) => Status::Stalemate,
    }
}
