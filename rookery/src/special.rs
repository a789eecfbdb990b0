use arrayvec::ArrayVec;

use super::{is_attacked, Color, File, Move, MoveKind, Piece, PieceKind, Position, Rank, Square};

/// Where the King and Rook start and end for one kind of castling.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Looks up the squares involved when `color` castles with `kind`.
///
/// Returns `None` if `kind` is not a castling move.
///
/// # Example
/// ```
/// # use rookery::*;
/// let castle = castling_squares(Color::Black, MoveKind::QueensideCastle).unwrap();
/// assert_eq!(castle.king_to, Square::C8);
/// assert_eq!(castle.rook_from, Square::A8);
/// assert_eq!(castle.rook_to, Square::D8);
/// ```
pub const fn castling_squares(color: Color, kind: MoveKind) -> Option<CastlingSquares> {
    let (king_to, rook_from, rook_to) = match kind {
        MoveKind::KingsideCastle => (Square::G1, Square::H1, Square::F1),
        MoveKind::QueensideCastle => (Square::C1, Square::A1, Square::D1),
        _ => return None,
    };

    Some(CastlingSquares {
        king_from: Square::E1.rank_relative_to(color),
        king_to: king_to.rank_relative_to(color),
        rook_from: rook_from.rank_relative_to(color),
        rook_to: rook_to.rank_relative_to(color),
    })
}

/// The square a `color` Pawn may capture onto en passant, if any.
///
/// This is the square directly behind the enemy Pawn that advanced two squares on the
/// immediately preceding turn.
pub fn en_passant_target(position: &Position, color: Color) -> Option<Square> {
    let opponent = color.opponent();
    let pawn = position.player(opponent).en_passant_vulnerable()?;
    pawn.square.backward_by(opponent, 1)
}

/// Returns `true` if `color` may castle with `kind` right now.
///
/// All of the following must hold:
/// 1. The King and that Rook are on their home squares and have never moved.
/// 2. Every square strictly between them is empty.
/// 3. The King is not currently in check.
/// 4. No square the King crosses or lands on is attacked.
pub fn can_castle(position: &Position, color: Color, kind: MoveKind) -> bool {
    let Some(castle) = castling_squares(color, kind) else {
        return false;
    };

    let rights = position.castling_rights(color);
    let has_right = match kind {
        MoveKind::KingsideCastle => rights.kingside,
        _ => rights.queenside,
    };
    if !has_right {
        return false;
    }

    let unmoved = |square: Square, piece: Piece| {
        position
            .record_at(square)
            .is_some_and(|record| record.piece == piece && !record.has_moved)
    };
    if !unmoved(castle.king_from, Piece::new(color, PieceKind::King))
        || !unmoved(castle.rook_from, Piece::new(color, PieceKind::Rook))
    {
        return false;
    }

    let board = position.board();
    if squares_between(castle.king_from, castle.rook_from).any(|square| board.has(square)) {
        return false;
    }

    let opponent = color.opponent();
    if is_attacked(castle.king_from, opponent, board) {
        return false;
    }

    // The destination is included, since the King may not castle into check either
    let mut crossed = squares_between(castle.king_from, castle.king_to).chain([castle.king_to]);
    !crossed.any(|square| is_attacked(square, opponent, board))
}

/// Every castling move currently available to `color`.
pub fn castling_moves(position: &Position, color: Color) -> ArrayVec<Move, 2> {
    [MoveKind::KingsideCastle, MoveKind::QueensideCastle]
        .into_iter()
        .filter(|&kind| can_castle(position, color, kind))
        .filter_map(|kind| {
            let castle = castling_squares(color, kind)?;
            Some(Move::new(castle.king_from, castle.king_to, kind))
        })
        .collect()
}

/// Returns `true` if `piece` landing on `to` must be promoted.
pub fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.is_pawn() && to.rank() == Rank::eighth(piece.color())
}

/// Tags a move from `from` to `to` with its [`MoveKind`], as seen on `position`.
///
/// Returns `None` if there is no piece on `from`. No legality checks are performed, so a
/// piece may be "moved" anywhere. A promotion without a `promotion` choice is tagged as a
/// plain push or capture, which will never match a generated legal move.
///
/// # Example
/// ```
/// # use rookery::*;
/// let pos = Position::new();
/// let e2e4 = classify_move(&pos, Square::E2, Square::E4, None).unwrap();
/// assert_eq!(e2e4.kind(), MoveKind::PawnPushTwo);
/// assert!(classify_move(&pos, Square::E4, Square::E5, None).is_none());
/// ```
pub fn classify_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Option<Move> {
    let record = position.record_at(from)?;
    let (color, kind) = record.piece.parts();
    let is_capture = position.board().is_enemy(to, color);
    let home = Square::E1.rank_relative_to(color);

    let kind = match kind {
        PieceKind::Pawn if is_promotion(record.piece, to) => match (promotion, is_capture) {
            (Some(promotion), true) => MoveKind::PromoCapt(promotion),
            (Some(promotion), false) => MoveKind::Promote(promotion),
            (None, true) => MoveKind::Capture,
            (None, false) => MoveKind::Quiet,
        },

        PieceKind::Pawn if from.forward_by(color, 2) == Some(to) => MoveKind::PawnPushTwo,

        PieceKind::Pawn
            if from.file() != to.file()
                && !is_capture
                && en_passant_target(position, color) == Some(to) =>
        {
            MoveKind::EnPassantCapture
        }

        PieceKind::King if from == home && to.rank() == home.rank() => match to.file() {
            File::G => MoveKind::KingsideCastle,
            File::C => MoveKind::QueensideCastle,
            _ if is_capture => MoveKind::Capture,
            _ => MoveKind::Quiet,
        },

        _ if is_capture => MoveKind::Capture,

        _ => MoveKind::Quiet,
    };

    Some(Move::new(from, to, kind))
}

/// Squares strictly between two squares on the same rank.
fn squares_between(a: Square, b: Square) -> impl Iterator<Item = Square> {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    Square::iter().filter(move |&square| {
        square.rank() == low.rank() && square > low && square < high
    })
}
