use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use colored::*;
use log::debug;

use rookery::{perft_full, splitperft, Game, Move};

/// Counts the positions reachable from a line of moves, and how fast they were counted.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of half-moves to search
    #[arg(short, long, default_value_t = 4)]
    depth: usize,

    /// Moves to play from the starting position before counting
    #[arg(short, long, default_value_t = String::new())]
    moves: String,

    /// Print the node count below each legal first move
    #[arg(short, long)]
    split: bool,

    /// Also tally captures, castles, checks, and so on
    #[arg(short, long)]
    full: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new();
    for uci in args.moves.split_whitespace() {
        let mv = Move::from_uci(&game, uci)?;
        game.play(mv)?;
    }
    debug!("Computing PERFT({}) of the following position:\n{game:?}", args.depth);

    let now = Instant::now();
    let total_nodes = if args.split {
        let mut total_nodes = 0;
        for (mv, nodes) in splitperft(&game, args.depth) {
            println!("{mv:>8} {nodes:>width$}", width = args.depth * 2 + 1);
            total_nodes += nodes;
        }
        println!(); // Empty line between last splitperft and total_nodes
        total_nodes
    } else if args.full {
        let res = perft_full(&game, args.depth);
        println!("{res}\n");
        res.nodes
    } else {
        rookery::perft(&game, args.depth)
    };
    let elapsed = now.elapsed();

    // Math
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!("Elapsed Time:          {elapsed:.1?}");
    println!("Total Nodes:           {}", total_nodes.to_string().green().bold());
    println!("Nodes / Sec:           {nps:.0}");
    println!("M Nodes / Sec:         {m_nps:.1}");

    Ok(())
}
