use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use log::info;

use rookery::{Bitboard, Color, File, Game, Move, Rank, Square};

/// Replays a line of moves from the starting position, then lists the legal moves.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Moves to play first, in coordinate notation (e.g. "e2e4 e7e5 g1f3")
    #[arg(short, long, default_value_t = String::new())]
    moves: String,

    /// Only list moves of the piece on this square, and highlight its destinations
    #[arg(short, long)]
    square: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new();
    for uci in args.moves.split_whitespace() {
        let mv = Move::from_uci(&game, uci)?;
        game.play(mv)
            .with_context(|| format!("Failed to play {uci:?}"))?;
        info!("Played {mv}");
    }

    let (moves, highlights) = match args.square.as_deref() {
        Some(square) => {
            let square = Square::from_uci(square)?;
            if !game.board().has(square) {
                bail!("There is no piece on {square}");
            }
            let moves = game
                .legal_move_list()
                .into_iter()
                .filter(|mv| mv.from() == square)
                .collect::<Vec<_>>();
            (moves, game.legal_moves(square))
        }
        None => (
            game.legal_move_list().into_iter().collect(),
            Bitboard::EMPTY_BOARD,
        ),
    };

    print_board(&game, highlights);
    println!();
    println!(
        "{} to move ({}). {} legal move(s):",
        game.side_to_move().name(),
        game.status(),
        moves.len()
    );

    let listed = moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{listed}");

    Ok(())
}

fn print_board(game: &Game, highlights: Bitboard) {
    for rank in Rank::iter().rev() {
        print!("{} ", rank.to_string().cyan());

        for file in File::iter() {
            let square = Square::new(file, rank);
            let symbol = match game.board().piece_at(square) {
                Some(piece) if piece.color() == Color::White => {
                    piece.to_string().bright_red().bold()
                }
                Some(piece) => piece.to_string().bright_blue().bold(),
                None => String::from("·").bright_black(),
            };

            if highlights.get(square) {
                print!(" {} ", symbol.on_green());
            } else {
                print!(" {symbol} ");
            }
        }

        println!();
    }

    print!("  ");
    for file in File::iter() {
        print!(" {} ", file.to_string().cyan());
    }
    println!();
}
