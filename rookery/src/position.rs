use std::fmt;

use anyhow::{bail, Result};

use super::{
    castling_squares, en_passant_target, in_check, is_promotion, Board, CastlingRights, Color, Move, Piece,
    PieceKind, PieceRecord, Player, Rank, Square, FIFTY_MOVE_LIMIT,
};

/// Everything needed to decide which moves are legal: both players' pieces, the board
/// derived from them, whose turn it is, and the move counters.
///
/// The players' piece records are authoritative. The [`Board`] mirrors them so that
/// occupancy lookups are a single array access, and every mutation updates both.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    players: [Player; Color::COUNT],

    /// Square-to-piece map, derived from `players`.
    board: Board,

    side_to_move: Color,

    /// Half-moves since the last capture or Pawn move.
    halfmove: usize,

    /// Starts at 1 and increments after Black moves.
    fullmove: usize,
}

impl Position {
    /// Creates the standard starting position, with White to move.
    pub fn new() -> Self {
        Self::from_players(
            Player::standard(Color::White),
            Player::standard(Color::Black),
            Color::White,
        )
    }

    /// Starts building a custom position. See [`PositionBuilder`].
    pub fn builder() -> PositionBuilder {
        PositionBuilder::default()
    }

    fn from_players(white: Player, black: Player, side_to_move: Color) -> Self {
        let mut pos = Self {
            players: [white, black],
            board: Board::new(),
            side_to_move,
            halfmove: 0,
            fullmove: 1,
        };
        pos.board = pos.occupancy_from_players();
        pos
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color]
    }

    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// Returns `true` once fifty full moves have passed without a capture or a Pawn move.
    pub const fn can_draw_by_fifty(&self) -> bool {
        self.halfmove >= FIFTY_MOVE_LIMIT
    }

    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        self.players[color].castling_rights()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.players[color].king_square()
    }

    /// The record of whichever piece stands on `square`.
    pub fn record_at(&self, square: Square) -> Option<&PieceRecord> {
        let color = self.board.color_at(square)?;
        self.players[color].record_at(square)
    }

    /// The square passed over by a Pawn that may be captured en passant right now.
    pub fn ep_square(&self) -> Option<Square> {
        en_passant_target(self, self.side_to_move)
    }

    /// Rebuilds the square-to-piece map from the players' records alone.
    ///
    /// This always agrees with [`Position::board`].
    pub fn occupancy_from_players(&self) -> Board {
        let mut board = Board::new();
        for player in &self.players {
            for record in player.pieces() {
                board.place(record.piece, record.square);
            }
        }
        board
    }

    /// Consumes `self` and returns the [`Position`] after applying `mv`.
    pub fn with_move_made(mut self, mv: Move) -> Self {
        self.make_move(mv);
        self
    }

    /// Applies the move. No enforcement of legality.
    ///
    /// The mover is whoever owns the piece at `mv.from()`, and the turn passes to their
    /// opponent. If there is no piece there, nothing happens.
    pub fn make_move(&mut self, mv: Move) {
        let (from, to, _) = mv.parts();

        let Some(color) = self.board.color_at(from) else {
            return;
        };
        let opponent = color.opponent();
        let Some(mut record) = self.players[color].remove_at(from) else {
            return;
        };
        self.board.take(from);

        self.halfmove += 1;
        if color == Color::Black {
            self.fullmove += 1;
        }

        // Anything landed on is taken, even if the move wasn't tagged as a capture
        let captured_square = mv
            .captured_square()
            .or_else(|| self.board.is_enemy(to, color).then_some(to));

        if let Some(captured_square) = captured_square {
            if let Some(captured) = self.players[opponent].remove_at(captured_square) {
                self.board.take(captured_square);

                if captured.piece.is_rook() {
                    self.players[opponent]
                        .castling_rights_mut()
                        .revoke_for_rook_square(opponent, captured_square);
                }

                self.players[color].record_capture(captured.piece);
                self.halfmove = 0;
            }
        }

        // The King is moved below, so only the Rook is handled here
        if let Some(castle) = castling_squares(color, mv.kind()) {
            if let Some(rook) = self.players[color].record_at_mut(castle.rook_from) {
                rook.square = castle.rook_to;
                rook.has_moved = true;
            }
            if let Some(rook) = self.board.take(castle.rook_from) {
                self.board.place(rook, castle.rook_to);
            }
        }

        match record.kind() {
            PieceKind::Pawn => self.halfmove = 0,
            PieceKind::Rook => self.players[color]
                .castling_rights_mut()
                .revoke_for_rook_square(color, from),
            PieceKind::King => *self.players[color].castling_rights_mut() = CastlingRights::none(),
            _ => {}
        }

        debug_assert!(
            !is_promotion(record.piece, to) || mv.promotion().is_some(),
            "{mv:?} leaves a Pawn on its last rank"
        );
        if let Some(promotion) = mv.promotion() {
            record.piece = record.piece.promoted(promotion);
        }

        // The opponent's window to be captured en passant closes now, used or not
        self.players[opponent].clear_en_passant();

        record.square = to;
        record.has_moved = true;
        record.en_passant_vulnerable = mv.is_pawn_double_push();

        self.board.place(record.piece, to);
        self.players[color].add(record);

        self.side_to_move = opponent;

        debug_assert_eq!(self.board, self.occupancy_from_players());
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board.to_string();
        let ep = self
            .ep_square()
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));
        let details = [
            format!("          Side: {}", self.side_to_move.name()),
            format!("White castling: {}", self.castling_rights(Color::White)),
            format!("Black castling: {}", self.castling_rights(Color::Black)),
            format!("            EP: {ep}"),
            format!("     Half-move: {}", self.halfmove),
            format!("     Full-move: {}", self.fullmove),
        ];

        for (i, line) in board.lines().enumerate() {
            match details.get(i) {
                Some(detail) => writeln!(f, "{line}    {detail}")?,
                None => writeln!(f, "{line}")?,
            }
        }

        Ok(())
    }
}

/// Builds a [`Position`] piece by piece.
///
/// Pieces are unmoved unless placed with [`PositionBuilder::moved_piece`]. Castling
/// rights are derived from the placements: a side may castle if its King and the
/// relevant Rook both stand unmoved on their home squares.
///
/// # Example
/// ```
/// # use rookery::{Color, Piece, Position, Square};
/// let pos = Position::builder()
///     .piece(Piece::WHITE_KING, Square::E1)
///     .piece(Piece::WHITE_ROOK, Square::H1)
///     .piece(Piece::BLACK_KING, Square::E8)
///     .side_to_move(Color::White)
///     .build()
///     .unwrap();
/// assert!(pos.castling_rights(Color::White).kingside);
/// assert!(!pos.castling_rights(Color::White).queenside);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PositionBuilder {
    pieces: Vec<PieceRecord>,
    side_to_move: Color,
    en_passant: Option<Square>,
}

impl PositionBuilder {
    /// Places an unmoved `piece` on `square`.
    pub fn piece(mut self, piece: Piece, square: Square) -> Self {
        self.pieces.push(PieceRecord::new(piece, square));
        self
    }

    /// Places a `piece` on `square` that is treated as having moved already.
    pub fn moved_piece(mut self, piece: Piece, square: Square) -> Self {
        let mut record = PieceRecord::new(piece, square);
        record.has_moved = true;
        self.pieces.push(record);
        self
    }

    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Marks the Pawn on `square` as having just advanced two squares, so the side to
    /// move may capture it en passant.
    pub fn en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    /// Validates the placements and builds the [`Position`].
    ///
    /// Fails if two pieces share a square, either side doesn't have exactly one King, a
    /// Pawn stands on the first or last rank, the en passant Pawn is missing or out of
    /// place, or the side that just moved is left in check.
    pub fn build(self) -> Result<Position> {
        let mut white = Player::new(Color::White);
        let mut black = Player::new(Color::Black);
        let mut board = Board::new();

        for mut record in self.pieces {
            let (color, kind) = record.piece.parts();

            if board.has(record.square) {
                bail!("Two pieces were placed on {}", record.square);
            }

            if kind == PieceKind::Pawn {
                let rank = record.square.rank();
                if rank == Rank::ONE || rank == Rank::EIGHT {
                    bail!("Pawns may not stand on {}", record.square);
                }
                // A Pawn off its starting rank must have moved to get there
                record.has_moved |= rank != Rank::second(color);
            }

            if self.en_passant == Some(record.square) {
                if kind != PieceKind::Pawn || color == self.side_to_move {
                    bail!(
                        "En passant square {} must hold a Pawn of the side that just moved",
                        record.square
                    );
                }
                let double_step_rank = Square::A4.rank_relative_to(color).rank();
                if record.square.rank() != double_step_rank {
                    bail!(
                        "A Pawn on {} cannot have just advanced two squares",
                        record.square
                    );
                }
                record.en_passant_vulnerable = true;
            }

            board.place(record.piece, record.square);
            match color {
                Color::White => white.add(record),
                Color::Black => black.add(record),
            }
        }

        if let Some(square) = self.en_passant {
            let Some(color) = board.color_at(square) else {
                bail!("No Pawn on en passant square {square}");
            };

            // The squares the Pawn just left and passed over must both be empty
            for steps in [1, 2] {
                if let Some(behind) = square.backward_by(color, steps) {
                    if board.has(behind) {
                        bail!(
                            "Pawn on {square} cannot have just advanced two squares past {behind}"
                        );
                    }
                }
            }
        }

        for player in [&mut white, &mut black] {
            let color = player.color();
            let kings = player
                .pieces()
                .iter()
                .filter(|record| record.piece.is_king())
                .count();
            if kings != 1 {
                bail!("{} must have exactly one King. Found {kings}", color.name());
            }

            let unmoved = |square: Square, kind: PieceKind| {
                player.record_at(square).is_some_and(|record| {
                    record.piece == Piece::new(color, kind) && !record.has_moved
                })
            };

            let king_home = unmoved(Square::E1.rank_relative_to(color), PieceKind::King);
            let rights = CastlingRights {
                kingside: king_home
                    && unmoved(Square::H1.rank_relative_to(color), PieceKind::Rook),
                queenside: king_home
                    && unmoved(Square::A1.rank_relative_to(color), PieceKind::Rook),
            };
            *player.castling_rights_mut() = rights;
        }

        let pos = Position::from_players(white, black, self.side_to_move);

        if in_check(&pos, pos.side_to_move().opponent()) {
            bail!(
                "{} is in check, but it is {}'s turn",
                pos.side_to_move().opponent().name(),
                pos.side_to_move().name()
            );
        }

        Ok(pos)
    }
}
