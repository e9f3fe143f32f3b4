//! Play command - the minimax engine playing both sides

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::{
    cli::output::{print_json, print_section},
    search::{MinimaxEngine, SearchConfig},
    tictactoe::{Game, GameOutcome, GameState, Move, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Let the engine play a full game against itself")]
pub struct PlayArgs {
    /// Which mark moves first (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first: String,

    /// Search the root moves in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Print the game record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct GameRecord {
    first: Player,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

/// Play one engine-vs-engine game from the empty board
pub fn self_play(first: Player, engine: &MinimaxEngine) -> crate::Result<Game> {
    let mut game = Game::from_state(GameState::new_game_with(first));
    while !game.is_over() {
        let mv = engine.decide(game.current())?;
        game.play_move(mv)?;
    }
    Ok(game)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let first = Player::parse(&args.first)?;
    let engine = MinimaxEngine::new(SearchConfig::new().with_parallel_root(args.parallel));
    let game = self_play(first, &engine)?;
    let outcome = game.outcome();
    info!(moves = game.moves().len(), outcome = ?outcome, "self-play finished");

    if args.json {
        return print_json(&GameRecord {
            first,
            moves: game.moves(),
            outcome,
        });
    }

    print_section("Self-play");
    for state in game.states().iter().skip(1) {
        if let Some(mv) = state.last_move() {
            println!("{mv}");
        }
        println!("{state}");
        println!();
    }
    match outcome {
        Some(outcome) => println!("Result: {outcome}"),
        None => println!("Result: unfinished"),
    }
    Ok(())
}
