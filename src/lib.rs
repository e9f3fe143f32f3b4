//! Tic-Tac-Toe state space with D4 symmetry reduction and a minimax player
//!
//! This crate provides:
//! - Board representation, move validation and win detection
//! - Canonical forms under the eight symmetries of the square
//! - A lazily expanded game tree with per-parent symmetry deduplication
//! - A minimax decision procedure with optional alpha-beta pruning,
//!   transposition caching and parallel root search

pub mod cli;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{Decision, MinimaxEngine, SearchConfig, decide};
pub use tictactoe::{Board, Cell, GameState, GameTree, Move, Player};
