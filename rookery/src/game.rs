use std::{fmt, ops::Deref};

use log::{debug, trace, warn};

use super::{
    classify_move, is_promotion, legal_destinations, legal_move_list, legality, Bitboard, Move,
    MoveList, PieceKind, Position, PositionBuilder, Rejection, Square, Status,
};

/// A game in progress: the current [`Position`] and its [`Status`] for the side to move.
///
/// All mutation goes through [`Game::apply_move`] (or [`Game::play`]), which only accepts
/// legal moves. Read-only access to the position is available through `Deref`.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    position: Position,
    status: Status,

    /// Every move applied so far, in order.
    history: Vec<Move>,
}

impl Game {
    /// Starts a new game from the standard position, with White to move.
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Starts a game from an arbitrary position.
    ///
    /// The game may already be over, if the side to move has no legal moves.
    pub fn from_position(position: Position) -> Self {
        let status = legality::status(&position, position.side_to_move());
        Self {
            position,
            status,
            history: Vec::with_capacity(128),
        }
    }

    /// Starts building a custom position. Pass the result to [`Game::from_position`].
    pub fn builder() -> PositionBuilder {
        Position::builder()
    }

    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The status of the side to move.
    pub const fn status(&self) -> Status {
        self.status
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The squares the piece on `square` may legally move to.
    ///
    /// Empty if the square is empty, holds a piece of the side not on move, or the game
    /// is over.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let game = Game::new();
    /// assert_eq!(game.legal_moves(Square::B1).population(), 2);
    /// assert!(game.legal_moves(Square::B8).is_empty());
    /// assert!(game.legal_moves(Square::E4).is_empty());
    /// ```
    pub fn legal_moves(&self, square: Square) -> Bitboard {
        if self.status.is_game_over() || self.board().color_at(square) != Some(self.side_to_move())
        {
            return Bitboard::EMPTY_BOARD;
        }

        legal_destinations(&self.position, square)
    }

    /// Every legal [`Move`] for the side to move, with one entry per promotion choice.
    pub fn legal_move_list(&self) -> MoveList {
        if self.status.is_game_over() {
            return MoveList::default();
        }

        legal_move_list(&self.position)
    }

    /// Moves the piece on `from` to `to`, if that is legal.
    ///
    /// `promotion` is required when a Pawn reaches its last rank, and ignored otherwise.
    /// On failure, the game is unchanged and the reason is returned.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::new();
    /// game.apply_move(Square::E2, Square::E4, None).unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    ///
    /// let err = game.apply_move(Square::D2, Square::D4, None).unwrap_err();
    /// assert!(matches!(err, Rejection::NotYourPiece { .. }));
    /// ```
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), Rejection> {
        let mv = self
            .validate(from, to, promotion)
            .inspect_err(|rejection| trace!("Rejected {from}{to}: {rejection}"))?;

        self.make_move(mv);
        Ok(())
    }

    /// Applies `mv` if it is one of the legal moves in this position.
    pub fn play(&mut self, mv: Move) -> Result<(), Rejection> {
        self.apply_move(mv.from(), mv.to(), mv.promotion())
    }

    /// Returns the [`Game`] after moving `from` to `to`, leaving `self` untouched.
    pub fn after_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Self, Rejection> {
        let mut next = self.clone();
        next.apply_move(from, to, promotion)?;
        Ok(next)
    }

    /// Checks every precondition of a move, in order, and builds it.
    fn validate(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, Rejection> {
        if self.status.is_game_over() {
            return Err(Rejection::GameOver {
                status: self.status,
            });
        }

        let Some(piece) = self.board().piece_at(from) else {
            return Err(Rejection::NoPieceAtSource { square: from });
        };

        if piece.color() != self.side_to_move() {
            return Err(Rejection::NotYourPiece {
                square: from,
                owner: piece.color(),
            });
        }

        if !legal_destinations(&self.position, from).get(to) {
            return Err(Rejection::IllegalDestination { from, to });
        }

        let promotion = if is_promotion(piece, to) {
            match promotion {
                None => return Err(Rejection::PromotionChoiceRequired { from, to }),
                Some(choice) if !choice.is_promotion_choice() => {
                    warn!("Pawn on {from} cannot promote to a {}", choice.name());
                    return Err(Rejection::InvalidPromotionChoice { choice });
                }
                choice => choice,
            }
        } else {
            if let Some(choice) = promotion {
                trace!(
                    "Ignoring promotion to {} on non-promoting move {from}{to}",
                    choice.name()
                );
            }
            None
        };

        classify_move(&self.position, from, to, promotion)
            .ok_or(Rejection::NoPieceAtSource { square: from })
    }

    fn make_move(&mut self, mv: Move) {
        let mover = self.side_to_move();
        self.position.make_move(mv);
        self.history.push(mv);

        let previous = self.status;
        self.status = legality::status(&self.position, self.side_to_move());

        debug!("{} played {mv:?}", mover.name());
        if self.status != previous {
            debug!(
                "Status for {}: {previous} -> {}",
                self.side_to_move().name(),
                self.status
            );
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Game {
    type Target = Position;
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.position)?;
        write!(f, "Status: {}", self.status)
    }
}

/// Starts a new game from the standard position, with White to move.
pub fn new_game() -> Game {
    Game::new()
}

/// The squares the piece on `square` may legally move to. See [`Game::legal_moves`].
pub fn legal_moves(game: &Game, square: Square) -> Bitboard {
    game.legal_moves(square)
}

/// Returns the [`Game`] after moving `from` to `to`. See [`Game::apply_move`].
pub fn apply_move(
    game: &Game,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Game, Rejection> {
    game.after_move(from, to, promotion)
}

/// The status of the side to move.
pub fn status(game: &Game) -> Status {
    game.status()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Color, MoveKind, Piece};

    #[test]
    fn rejections_leave_the_game_unchanged() {
        let mut game = Game::new();
        let before = game.clone();

        assert_eq!(
            game.apply_move(Square::E4, Square::E5, None),
            Err(Rejection::NoPieceAtSource { square: Square::E4 })
        );
        assert_eq!(
            game.apply_move(Square::E7, Square::E5, None),
            Err(Rejection::NotYourPiece {
                square: Square::E7,
                owner: Color::Black
            })
        );
        assert_eq!(
            game.apply_move(Square::E2, Square::E5, None),
            Err(Rejection::IllegalDestination {
                from: Square::E2,
                to: Square::E5
            })
        );

        assert_eq!(game, before);
    }

    fn promotion_game() -> Game {
        let pos = Game::builder()
            .piece(Piece::WHITE_KING, Square::A1)
            .piece(Piece::WHITE_PAWN, Square::C7)
            .piece(Piece::BLACK_KING, Square::H8)
            .piece(Piece::BLACK_ROOK, Square::D8)
            .build()
            .unwrap();
        Game::from_position(pos)
    }

    #[test]
    fn promotion_requires_a_valid_choice() {
        let mut game = promotion_game();

        assert_eq!(
            game.apply_move(Square::C7, Square::C8, None),
            Err(Rejection::PromotionChoiceRequired {
                from: Square::C7,
                to: Square::C8
            })
        );
        assert_eq!(
            game.apply_move(Square::C7, Square::D8, Some(PieceKind::King)),
            Err(Rejection::InvalidPromotionChoice {
                choice: PieceKind::King
            })
        );
        assert_eq!(
            game.apply_move(Square::C7, Square::C8, Some(PieceKind::Pawn)),
            Err(Rejection::InvalidPromotionChoice {
                choice: PieceKind::Pawn
            })
        );

        game.apply_move(Square::C7, Square::D8, Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(game.board().piece_at(Square::D8), Some(Piece::WHITE_KNIGHT));
        assert_eq!(game.player(Color::White).captured(), &[Piece::BLACK_ROOK]);
        assert!(game.player(Color::Black).record_at(Square::D8).is_none());
    }

    #[test]
    fn promotion_choice_is_ignored_on_ordinary_moves() {
        let mut game = Game::new();
        game.apply_move(Square::G1, Square::F3, Some(PieceKind::Queen))
            .unwrap();
        assert_eq!(game.board().piece_at(Square::F3), Some(Piece::WHITE_KNIGHT));
    }

    #[test]
    fn finished_games_accept_no_moves() {
        let pos = Game::builder()
            .piece(Piece::BLACK_KING, Square::A8)
            .piece(Piece::WHITE_QUEEN, Square::B6)
            .piece(Piece::WHITE_KING, Square::H1)
            .side_to_move(Color::Black)
            .build()
            .unwrap();
        let mut game = Game::from_position(pos);

        assert_eq!(game.status(), Status::Stalemate);
        assert!(game.legal_move_list().is_empty());
        assert_eq!(
            game.apply_move(Square::A8, Square::A7, None),
            Err(Rejection::GameOver {
                status: Status::Stalemate
            })
        );
    }

    #[test]
    fn free_functions_do_not_mutate() {
        let game = new_game();
        let next = apply_move(&game, Square::D2, Square::D4, None).unwrap();
        assert_eq!(game, Game::new());
        assert_eq!(next.side_to_move(), Color::Black);
        let d2d4 = Move::new(Square::D2, Square::D4, MoveKind::PawnPushTwo);
        assert_eq!(next.history(), &[d2d4]);
        assert_eq!(legal_moves(&next, Square::D7).population(), 2);
        assert_eq!(status(&next), Status::Ongoing);
    }
}
