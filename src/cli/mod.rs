//! Command-line interface for exploring the game tree and the minimax player

pub mod commands;
pub mod output;
