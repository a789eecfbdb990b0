use super::{
    Bitboard, Board, Color, Move, Piece, PieceKind, PieceRecord, Rank, Square, BISHOP_DELTAS,
    KING_DELTAS, KNIGHT_DELTAS, MAX_NUM_MOVES, PAWN_CAPTURE_FILES, QUEEN_DELTAS, ROOK_DELTAS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Computes every destination `record`'s piece could reach by the basic movement rules.
///
/// The result ignores whether the move would leave the mover's King in check, and does
/// not include castling. Capturing a King is never excluded here: a position where that
/// is possible has already been ruled out by legality checks.
///
/// `ep_target` is the square an enemy Pawn just passed over, if any. Only Pawns use it.
///
/// # Example
/// ```
/// # use rookery::*;
/// let pos = Position::new();
/// let knight = pos.record_at(Square::G1).unwrap();
/// let moves = pseudo_legal_moves(knight, pos.board(), None);
/// assert_eq!(moves, Bitboard::from_squares([Square::F3, Square::H3]));
/// ```
pub fn pseudo_legal_moves(
    record: &PieceRecord,
    board: &Board,
    ep_target: Option<Square>,
) -> Bitboard {
    let (color, kind) = record.piece.parts();
    let square = record.square;

    match kind {
        PieceKind::Pawn => pawn_moves(record, board, ep_target),
        _ => attacks_from(&record.piece, square, board) & board.enemy_or_empty(color),
    }
}

/// Fetch the squares `piece` at `square` attacks, given the pieces on `board`.
///
/// Sliding rays stop at, and include, the first occupied square regardless of its color.
///
/// Note: For Pawns, this is only the two forward diagonals, whether or not anything stands
/// on them. A Pawn's threat of pushing never attacks a square, so pushes are left out.
pub fn attacks_from(piece: &Piece, square: Square, board: &Board) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(square, piece.color()),
        PieceKind::Knight => step_attacks(square, &KNIGHT_DELTAS),
        PieceKind::Bishop => ray_attacks(square, &BISHOP_DELTAS, board),
        PieceKind::Rook => ray_attacks(square, &ROOK_DELTAS, board),
        PieceKind::Queen => ray_attacks(square, &QUEEN_DELTAS, board),
        PieceKind::King => step_attacks(square, &KING_DELTAS),
    }
}

/// Every square attacked by at least one of `color`'s pieces.
pub fn attacks_by(color: Color, board: &Board) -> Bitboard {
    board
        .iter()
        .filter(|(_, piece)| piece.color() == color)
        .fold(Bitboard::EMPTY_BOARD, |attacks, (square, piece)| {
            attacks | attacks_from(&piece, square, board)
        })
}

/// Computes a [`Bitboard`] of all of `attacker_color`'s pieces that attack `square`.
pub fn attackers_of(square: Square, attacker_color: Color, board: &Board) -> Bitboard {
    board
        .iter()
        .filter(|(from, piece)| {
            piece.color() == attacker_color && attacks_from(piece, *from, board).get(square)
        })
        .map(|(from, _)| from)
        .collect()
}

/// Returns `true` if any of `attacker_color`'s pieces attack `square`.
pub fn is_attacked(square: Square, attacker_color: Color, board: &Board) -> bool {
    board.iter().any(|(from, piece)| {
        piece.color() == attacker_color && attacks_from(&piece, from, board).get(square)
    })
}

/// Pushes, double pushes, diagonal captures, and en passant for a single Pawn.
fn pawn_moves(record: &PieceRecord, board: &Board, ep_target: Option<Square>) -> Bitboard {
    let color = record.color();
    let square = record.square;
    let mut moves = Bitboard::EMPTY_BOARD;

    // Pushes may only land on empty squares, and the double step needs both squares clear
    if let Some(one) = square.forward_by(color, 1).filter(|&to| !board.has(to)) {
        moves |= one;

        let can_double_step = !record.has_moved && square.rank() == Rank::second(color);
        if let Some(two) = square.forward_by(color, 2).filter(|&to| !board.has(to)) {
            if can_double_step {
                moves |= two;
            }
        }
    }

    // The en passant square was just passed over, so it must still be empty
    for to in pawn_attacks(square, color) {
        if board.is_enemy(to, color) || (ep_target == Some(to) && !board.has(to)) {
            moves |= to;
        }
    }

    moves
}

/// The two forward diagonals of a `color` Pawn on `square`.
pub fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    PAWN_CAPTURE_FILES
        .iter()
        .filter_map(|&df| square.offset(df, color.forward()))
        .collect()
}

/// Single steps in each of `deltas` that stay on the board.
fn step_attacks(square: Square, deltas: &[(i8, i8)]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .collect()
}

/// Walks each of `deltas` until leaving the board or hitting a piece, which is included.
fn ray_attacks(square: Square, deltas: &[(i8, i8)], board: &Board) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for &(df, dr) in deltas {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            attacks |= next;
            if board.has(next) {
                break;
            }
            current = next;
        }
    }

    attacks
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks if `moves` and `legal_moves` contain all the same elements, ignoring order
    fn lists_match(moves: Bitboard, legal_moves: &[Square]) {
        assert_eq!(
            moves.population() as usize,
            legal_moves.len(),
            "\nMoves: {:?}\nLegal: {:?}",
            moves.iter().collect::<Vec<_>>(),
            legal_moves
        );

        for mv in moves {
            assert!(
                legal_moves.contains(&mv),
                "{} not found in {:?}",
                mv,
                legal_moves
            );
        }
    }

    #[test]
    fn rook_blockers() {
        let legal_moves = [
            Square::D2,
            Square::D3,
            Square::D5,
            Square::D6,
            Square::A4,
            Square::B4,
            Square::C4,
            Square::E4,
            Square::F4,
            Square::G4,
            Square::H4,
        ];

        // . . . . . . . .
        // . . . . . . . .
        // . . . p . . . .
        // . . . . . . . .
        // . . . R . . . .
        // . . . . . . . .
        // . . . P . . . .
        // . . . . . . . .
        let mut board = Board::new();
        board.place(Piece::WHITE_ROOK, Square::D4);
        board.place(Piece::BLACK_PAWN, Square::D6);
        board.place(Piece::WHITE_PAWN, Square::D2);

        let record = PieceRecord::new(Piece::WHITE_ROOK, Square::D4);
        let attacks = attacks_from(&record.piece, record.square, &board);
        lists_match(attacks, &legal_moves);

        // Own Pawn on D2 can't be captured
        let moves = pseudo_legal_moves(&record, &board, None);
        let mut without_own = legal_moves.to_vec();
        without_own.retain(|&sq| sq != Square::D2);
        lists_match(moves, &without_own);
    }

    #[test]
    fn knight_in_corner() {
        let board = Board::new();
        let attacks = attacks_from(&Piece::BLACK_KNIGHT, Square::A8, &board);
        lists_match(attacks, &[Square::B6, Square::C7]);
    }

    #[test]
    fn pawn_attacks_ignore_occupancy() {
        let board = Board::new();
        lists_match(
            attacks_from(&Piece::WHITE_PAWN, Square::A2, &board),
            &[Square::B3],
        );
        lists_match(
            attacks_from(&Piece::BLACK_PAWN, Square::E7, &board),
            &[Square::D6, Square::F6],
        );
    }

    #[test]
    fn blocked_pawn_cannot_double_step() {
        let mut board = Board::new();
        board.place(Piece::WHITE_PAWN, Square::E2);
        board.place(Piece::BLACK_KNIGHT, Square::E4);

        let pawn = PieceRecord::new(Piece::WHITE_PAWN, Square::E2);
        lists_match(pseudo_legal_moves(&pawn, &board, None), &[Square::E3]);

        board.place(Piece::BLACK_KNIGHT, Square::E3);
        lists_match(pseudo_legal_moves(&pawn, &board, None), &[]);
    }

    #[test]
    fn moved_pawn_cannot_double_step() {
        let mut board = Board::new();
        board.place(Piece::BLACK_PAWN, Square::C7);

        let mut pawn = PieceRecord::new(Piece::BLACK_PAWN, Square::C7);
        lists_match(
            pseudo_legal_moves(&pawn, &board, None),
            &[Square::C6, Square::C5],
        );

        pawn.has_moved = true;
        lists_match(pseudo_legal_moves(&pawn, &board, None), &[Square::C6]);
    }

    #[test]
    fn en_passant_target_must_be_empty() {
        let mut board = Board::new();
        board.place(Piece::WHITE_PAWN, Square::E5);
        board.place(Piece::BLACK_PAWN, Square::D5);

        let pawn = PieceRecord::new(Piece::WHITE_PAWN, Square::E5);
        lists_match(
            pseudo_legal_moves(&pawn, &board, Some(Square::D6)),
            &[Square::E6, Square::D6],
        );

        board.place(Piece::WHITE_KNIGHT, Square::D6);
        lists_match(
            pseudo_legal_moves(&pawn, &board, Some(Square::D6)),
            &[Square::E6],
        );
    }

    #[test]
    fn attackers_are_found_through_open_lines_only() {
        let mut board = Board::new();
        board.place(Piece::WHITE_KING, Square::E1);
        board.place(Piece::BLACK_ROOK, Square::E8);
        board.place(Piece::BLACK_BISHOP, Square::A5);
        board.place(Piece::BLACK_KNIGHT, Square::F3);

        let attackers = attackers_of(Square::E1, Color::Black, &board);
        lists_match(attackers, &[Square::E8, Square::A5, Square::F3]);

        board.place(Piece::WHITE_PAWN, Square::E4);
        board.place(Piece::WHITE_PAWN, Square::C3);
        let attackers = attackers_of(Square::E1, Color::Black, &board);
        lists_match(attackers, &[Square::F3]);
        assert!(is_attacked(Square::E1, Color::Black, &board));
        assert!(!is_attacked(Square::E1, Color::White, &board));
    }
}
