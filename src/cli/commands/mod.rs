//! Subcommands of the `gato` binary

use anyhow::{Context, Result};

use crate::tictactoe::GameState;

pub mod decide;
pub mod play;
pub mod symmetry;
pub mod tree;

/// Parse a `--board` argument, defaulting to the empty board
pub(crate) fn parse_state(board: Option<&str>) -> Result<GameState> {
    match board {
        Some(text) => GameState::parse(text).with_context(|| format!("invalid board '{text}'")),
        None => Ok(GameState::new_game()),
    }
}
