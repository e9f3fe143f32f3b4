//! Symmetry command - canonical form, images and stabilizer of a board

use anyhow::Result;
use clap::Parser;

use super::parse_state;
use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    tictactoe::D4Transform,
};

#[derive(Parser, Debug)]
#[command(about = "Analyze the D4 symmetries of a board")]
pub struct SymmetryArgs {
    /// Board to analyze (defaults to the empty board)
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Print all eight transformed boards
    #[arg(long)]
    pub visualize: bool,
}

pub fn execute(args: SymmetryArgs) -> Result<()> {
    let state = parse_state(args.board.as_deref())?;
    let board = state.board();
    let context = board.canonical_context();
    let stabilizer = board.stabilizer();

    print_section("Symmetry Analysis");
    println!("Original board:");
    println!("{board}");
    println!("\nCanonical form:");
    println!("{}", context.board);
    println!();

    if context.board == *board {
        println!("Already in canonical form");
    } else {
        print_kv("Reached by", &context.transform.to_string());
    }
    print_kv("Stabilizer size", &stabilizer.len().to_string());
    print_kv("Orbit size", &(D4Transform::ALL.len() / stabilizer.len()).to_string());
    let names: Vec<String> = stabilizer.iter().map(ToString::to_string).collect();
    print_kv("Stabilizer", &names.join(", "));

    if args.visualize {
        print_subsection("All eight images");
        for transform in D4Transform::all() {
            let image = board.transform(&transform);
            let note = if image == context.board { " (canonical)" } else { "" };
            println!("{transform}{note}");
            println!("{image}");
            println!();
        }
    }
    Ok(())
}
