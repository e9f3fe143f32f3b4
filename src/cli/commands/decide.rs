//! Decide command - best move and per-move scores for a position

use anyhow::Result;
use clap::Parser;

use super::parse_state;
use crate::{
    cli::output::{
        format_number, print_json, print_kv, print_section, print_subsection, score_label,
    },
    search::{MinimaxEngine, Pruning, Score, SearchConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Choose the best move for a position")]
pub struct DecideArgs {
    /// Board to analyze, row-major (e.g. "X.O.XO..." or "X.O.XO..._X")
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Plain minimax without alpha-beta cut-offs
    #[arg(long)]
    pub no_pruning: bool,

    /// Search the root moves in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Disable the transposition table
    #[arg(long)]
    pub no_transposition: bool,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

impl DecideArgs {
    pub fn search_config(&self) -> SearchConfig {
        let pruning = if self.no_pruning {
            Pruning::None
        } else {
            Pruning::AlphaBeta
        };
        SearchConfig::new()
            .with_pruning(pruning)
            .with_parallel_root(self.parallel)
            .with_transposition(!self.no_transposition)
    }
}

fn outcome_label(score: Score, plies: Option<usize>) -> String {
    match plies {
        Some(plies) => format!("{} in {plies}", score_label(score)),
        None => score_label(score).to_string(),
    }
}

pub fn execute(args: DecideArgs) -> Result<()> {
    let state = parse_state(args.board.as_deref())?;
    let decision = MinimaxEngine::new(args.search_config()).evaluate(&state)?;

    if args.json {
        return print_json(&decision);
    }

    print_section("Minimax Decision");
    println!("{state}");
    println!();
    print_kv("Best move", &decision.mv.to_string());
    print_kv("Outcome", &outcome_label(decision.score, decision.plies));
    print_kv("Nodes searched", &format_number(decision.nodes));

    print_subsection("Candidate moves (generation order)");
    for child in &decision.children {
        let marker = if child.mv == decision.mv { "*" } else { " " };
        println!(
            "  {marker} {:<20} {}",
            child.mv.to_string(),
            outcome_label(child.score, child.plies)
        );
    }
    Ok(())
}
