use rookery::{
    en_passant_target, in_check, pseudo_legal_moves, Color, Game, Move, Piece, PieceKind,
    Position, Rejection, Square, Status,
};

/// Plays a line of coordinate moves, panicking on the first one that is refused.
fn play_line(game: &mut Game, line: &str) {
    for uci in line.split_whitespace() {
        let mv = Move::from_uci(game, uci).unwrap();
        game.play(mv)
            .unwrap_or_else(|err| panic!("{uci} was rejected: {err}\n{game:?}"));
    }
}

#[test]
fn double_step_opens_en_passant_window() {
    let mut game = Game::new();
    game.apply_move(Square::E2, Square::E4, None).unwrap();

    assert_eq!(game.board().piece_at(Square::E4), Some(Piece::WHITE_PAWN));
    assert!(!game.board().has(Square::E2));

    let pawn = game.player(Color::White).record_at(Square::E4).unwrap();
    assert!(pawn.en_passant_vulnerable);
    assert!(pawn.has_moved);

    assert!(!in_check(&game, Color::Black));
    assert_eq!(game.status(), Status::Ongoing);
    assert_eq!(game.ep_square(), Some(Square::E3));
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play_line(&mut game, "f2f3 e7e5 g2g4 d8h4");

    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.status(), Status::Checkmate);
    assert!(game.legal_move_list().is_empty());
    assert_eq!(
        game.apply_move(Square::E1, Square::F2, None),
        Err(Rejection::GameOver {
            status: Status::Checkmate
        })
    );
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = Game::new();
    play_line(&mut game, "e2e4 a7a6 e4e5 d7d5");

    assert!(game.legal_moves(Square::E5).get(Square::D6));
    game.apply_move(Square::E5, Square::D6, None).unwrap();

    assert_eq!(game.board().piece_at(Square::D6), Some(Piece::WHITE_PAWN));
    assert!(!game.board().has(Square::D5));
    assert!(game.player(Color::Black).record_at(Square::D5).is_none());
    assert_eq!(game.player(Color::White).captured(), &[Piece::BLACK_PAWN]);
}

#[test]
fn en_passant_window_closes_after_one_turn() {
    let mut game = Game::new();
    play_line(&mut game, "e2e4 a7a6 e4e5 d7d5");

    let pawn = game.player(Color::Black).record_at(Square::D5).unwrap();
    assert!(pawn.en_passant_vulnerable);

    play_line(&mut game, "g1f3 a6a5");

    let pawn = game.player(Color::Black).record_at(Square::D5).unwrap();
    assert!(!pawn.en_passant_vulnerable);
    assert_eq!(
        game.apply_move(Square::E5, Square::D6, None),
        Err(Rejection::IllegalDestination {
            from: Square::E5,
            to: Square::D6
        })
    );
}

#[test]
fn bare_kings_are_never_stalemated() {
    let pos = Game::builder()
        .piece(Piece::WHITE_KING, Square::B6)
        .piece(Piece::BLACK_KING, Square::A8)
        .side_to_move(Color::Black)
        .build()
        .unwrap();
    let game = Game::from_position(pos);

    assert_eq!(game.status(), Status::Ongoing);
    assert_eq!(game.legal_moves(Square::A8), Square::B8.bitboard());
}

#[test]
fn king_boxed_in_without_check_is_stalemate() {
    let pos = Game::builder()
        .piece(Piece::WHITE_KING, Square::B6)
        .piece(Piece::WHITE_PAWN, Square::A7)
        .piece(Piece::BLACK_KING, Square::A8)
        .side_to_move(Color::Black)
        .build()
        .unwrap();
    let game = Game::from_position(pos);

    assert!(!in_check(&game, Color::Black));
    assert_eq!(game.status(), Status::Stalemate);
}

#[test]
fn cannot_castle_through_a_bishops_diagonal() {
    let pos = Game::builder()
        .piece(Piece::WHITE_KING, Square::E1)
        .piece(Piece::WHITE_ROOK, Square::H1)
        .piece(Piece::BLACK_BISHOP, Square::C4)
        .piece(Piece::BLACK_KING, Square::E8)
        .build()
        .unwrap();
    let mut game = Game::from_position(pos);

    assert!(!game.legal_moves(Square::E1).get(Square::G1));
    assert!(!game.legal_moves(Square::E1).get(Square::F1));
    assert_eq!(
        game.apply_move(Square::E1, Square::G1, None),
        Err(Rejection::IllegalDestination {
            from: Square::E1,
            to: Square::G1
        })
    );
}

#[test]
fn castling_moves_both_pieces_and_revokes_rights() {
    let mut game = Game::new();
    play_line(&mut game, "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");

    assert!(game.legal_moves(Square::E1).get(Square::G1));
    game.apply_move(Square::E1, Square::G1, None).unwrap();

    assert_eq!(game.board().piece_at(Square::G1), Some(Piece::WHITE_KING));
    assert_eq!(game.board().piece_at(Square::F1), Some(Piece::WHITE_ROOK));
    assert!(!game.board().has(Square::H1));
    assert!(!game.castling_rights(Color::White).any());
    assert!(game.castling_rights(Color::Black).any());
}

#[test]
fn rook_move_revokes_only_its_side() {
    let mut game = Game::new();
    play_line(&mut game, "h2h4 a7a5 h1h3 a8a6");

    let white = game.castling_rights(Color::White);
    assert!(!white.kingside && white.queenside);
    let black = game.castling_rights(Color::Black);
    assert!(black.kingside && !black.queenside);
}

#[test]
fn underpromotion_replaces_the_pawn() {
    let pos = Game::builder()
        .piece(Piece::WHITE_KING, Square::E1)
        .piece(Piece::BLACK_PAWN, Square::B2)
        .piece(Piece::BLACK_KING, Square::E8)
        .side_to_move(Color::Black)
        .build()
        .unwrap();
    let mut game = Game::from_position(pos);

    game.apply_move(Square::B2, Square::B1, Some(PieceKind::Rook))
        .unwrap();

    assert_eq!(game.board().piece_at(Square::B1), Some(Piece::BLACK_ROOK));
    let record = game.player(Color::Black).record_at(Square::B1).unwrap();
    assert_eq!(record.kind(), PieceKind::Rook);
    assert_eq!(game.status(), Status::Check);
}

#[test]
fn board_always_matches_the_players_records() {
    let mut game = Game::new();

    for ply in 0..120 {
        let moves = game.legal_move_list();
        if moves.is_empty() {
            break;
        }

        let mover = game.side_to_move();
        let mv = moves[(ply * 7 + 3) % moves.len()];
        game.play(mv).unwrap();

        assert_eq!(game.board(), &game.occupancy_from_players(), "after {mv:?}");
        assert!(!in_check(&game, mover), "{mv:?} left the mover in check");
        no_shared_squares(&game);
        no_friendly_destinations(&game);
    }
}

/// Asserts that no two piece records, of either side, stand on the same square.
fn no_shared_squares(pos: &Position) {
    let records = [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| pos.player(color).pieces())
        .collect::<Vec<_>>();

    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            assert_ne!(a.square, b.square, "{a:?} and {b:?} share a square\n{pos:?}");
        }
    }
}

/// Asserts that no piece of either side can move onto a square its own side holds.
fn no_friendly_destinations(pos: &Position) {
    for color in [Color::White, Color::Black] {
        let ep_target = en_passant_target(pos, color);
        for record in pos.player(color).pieces() {
            let moves = pseudo_legal_moves(record, pos.board(), ep_target);
            assert!(
                (moves & pos.board().color(color)).is_empty(),
                "{record:?} can land on a friendly piece\n{pos:?}"
            );
        }
    }
}

#[test]
fn en_passant_past_a_friendly_piece_is_refused() {
    let built = Game::builder()
        .piece(Piece::WHITE_KING, Square::E1)
        .piece(Piece::WHITE_PAWN, Square::E5)
        .piece(Piece::WHITE_KNIGHT, Square::D6)
        .piece(Piece::BLACK_PAWN, Square::D5)
        .piece(Piece::BLACK_KING, Square::H8)
        .en_passant(Square::D5)
        .build();
    assert!(built.is_err());

    // Without the marker, the Knight simply blocks the diagonal
    let mut game = Game::from_position(
        Game::builder()
            .piece(Piece::WHITE_KING, Square::E1)
            .piece(Piece::WHITE_PAWN, Square::E5)
            .piece(Piece::WHITE_KNIGHT, Square::D6)
            .piece(Piece::BLACK_PAWN, Square::D5)
            .piece(Piece::BLACK_KING, Square::H8)
            .build()
            .unwrap(),
    );
    assert!(!game.legal_moves(Square::E5).get(Square::D6));
    assert_eq!(
        game.apply_move(Square::E5, Square::D6, None),
        Err(Rejection::IllegalDestination {
            from: Square::E5,
            to: Square::D6
        })
    );
    assert_eq!(game.player(Color::White).pieces().len(), 3);
    no_shared_squares(&game);
}

#[test]
fn every_listed_move_is_accepted() {
    let mut game = Game::new();
    play_line(&mut game, "e2e4 d7d5 e4d5 g8f6 f1b5 c7c6");

    for mv in game.legal_move_list() {
        let mut next = game.clone();
        assert!(next.play(mv).is_ok(), "{mv:?} was listed but rejected");
    }
}
