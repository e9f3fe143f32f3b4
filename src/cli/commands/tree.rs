//! Tree command - expand the reduced game tree and report its shape

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;

use super::parse_state;
use crate::{
    cli::output::{format_number, print_json, print_kv, print_section, print_subsection},
    tictactoe::GameTree,
};

#[derive(Parser, Debug)]
#[command(about = "Expand the symmetry-reduced game tree")]
pub struct TreeArgs {
    /// Root position (defaults to the empty board)
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Stop this many plies below the root
    #[arg(long, short = 'd')]
    pub depth: Option<usize>,

    /// Export every node to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: TreeArgs) -> Result<()> {
    let state = parse_state(args.board.as_deref())?;
    let mut tree = GameTree::new(state);
    let root = tree.root();
    tree.expand_all(root, args.depth);
    let stats = tree.stats();

    if args.json {
        print_json(&stats)?;
    } else {
        print_section("Game Tree");
        println!("{state}");
        println!();
        print_kv("Nodes", &format_number(stats.total));
        print_kv("X wins", &format_number(stats.x_wins));
        print_kv("O wins", &format_number(stats.o_wins));
        print_kv("Draws", &format_number(stats.draws));
        if stats.unexpanded > 0 {
            print_kv("Unexpanded", &format_number(stats.unexpanded));
        }

        print_subsection("Nodes by marks on the board");
        for (marks, count) in stats.by_move_count.iter().enumerate() {
            if *count > 0 {
                println!("  {marks}: {}", format_number(*count));
            }
        }
    }

    if let Some(path) = args.export {
        export_tree(&tree, &path)?;
        if !args.json {
            println!("\nGame tree exported to: {}", path.display());
        }
    }
    Ok(())
}

/// Write one CSV row per node, in creation order.
///
/// Parents are always created before their children, so the `Parent` column
/// only refers to earlier rows.
pub fn export_tree(tree: &GameTree, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "# Tic-Tac-Toe Game Tree (symmetry reduced)")?;
    writeln!(file, "# Total nodes: {}", tree.len())?;
    writeln!(file, "Id,Parent,Depth,Board,ToMove,Position,Outcome")?;

    let mut depths: Vec<usize> = Vec::with_capacity(tree.len());
    for (id, node) in tree.iter() {
        let depth = node.parent().map_or(0, |p| depths[p.index()] + 1);
        depths.push(depth);

        let state = node.state();
        let parent = node.parent().map(|p| p.index().to_string()).unwrap_or_default();
        let mv = state
            .last_move()
            .map(|m| m.position().to_string())
            .unwrap_or_default();
        let outcome = match state.outcome() {
            Some(outcome) => outcome.to_string(),
            None => String::new(),
        };
        writeln!(
            file,
            "{},{parent},{depth},{},{},{mv},{outcome}",
            id.index(),
            state.board().encode(),
            state.to_move(),
        )?;
    }
    Ok(())
}
