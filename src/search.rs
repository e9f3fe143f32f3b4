//! Adversarial search over the symmetry-reduced game tree

pub mod config;
pub mod minimax;
pub mod transposition;

pub use config::{Pruning, SearchConfig};
pub use minimax::{ChildScore, DRAW, Decision, LOSS, MinimaxEngine, Score, WIN, decide};
pub use transposition::{TranspositionKey, TranspositionTable};
