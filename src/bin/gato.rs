//! gato CLI - explore the Tic-Tac-Toe state space and the minimax player
//!
//! Subcommands:
//! - `decide`: best move and per-move scores for a position
//! - `tree`: expand the symmetry-reduced game tree and export it
//! - `symmetry`: canonical form and stabilizer of a board
//! - `play`: engine self-play

use anyhow::Result;
use clap::{Parser, Subcommand};
use gato::cli::commands::{decide, play, symmetry, tree};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gato")]
#[command(version, about = "Tic-Tac-Toe state space and minimax toolkit", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose the best move for a position
    Decide(decide::DecideArgs),

    /// Expand the symmetry-reduced game tree
    Tree(tree::TreeArgs),

    /// Analyze the D4 symmetries of a board
    Symmetry(symmetry::SymmetryArgs),

    /// Let the engine play against itself
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "gato=debug" } else { "gato=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decide(args) => decide::execute(args),
        Commands::Tree(args) => tree::execute(args),
        Commands::Symmetry(args) => symmetry::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
