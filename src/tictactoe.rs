//! Tic-Tac-Toe rules, symmetry reduction and the expandable game tree

pub mod board;
pub mod game;
pub mod game_tree;
pub mod lines;
pub mod state;
pub mod symmetry;
mod validation;

pub use board::{Board, CELLS, Cell, PieceCount, Player, SIZE, coords_of, position_of};
pub use game::{Game, GameOutcome, Move};
pub use game_tree::{GameTree, StateId, StateNode, TreeStats, successors};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use state::GameState;
pub use symmetry::{CanonicalContext, D4Transform};
