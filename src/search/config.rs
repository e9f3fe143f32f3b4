//! Configuration for the minimax engine.

use serde::{Deserialize, Serialize};

/// Pruning strategy. Both choose the same move; alpha-beta visits fewer nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pruning {
    /// Plain minimax: every child of every node is scored
    None,
    /// Alpha-beta cutoffs
    #[default]
    AlphaBeta,
}

/// Configuration for a [`MinimaxEngine`](super::MinimaxEngine).
///
/// # Examples
///
/// ```
/// use gato::search::{Pruning, SearchConfig};
///
/// let config = SearchConfig::new()
///     .with_pruning(Pruning::None)
///     .with_parallel_root(true)
///     .with_transposition(false);
/// assert!(config.parallel_root);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Pruning applied below the root
    pub pruning: Pruning,
    /// Score each root child on its own rayon task
    pub parallel_root: bool,
    /// Reuse exact scores of symmetry-equivalent positions within a search
    pub transposition: bool,
}

impl SearchConfig {
    /// Alpha-beta, sequential, with a transposition table
    pub fn new() -> Self {
        Self {
            pruning: Pruning::default(),
            parallel_root: false,
            transposition: true,
        }
    }

    /// Set the pruning strategy.
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Enable or disable parallel evaluation of root children.
    pub fn with_parallel_root(mut self, parallel: bool) -> Self {
        self.parallel_root = parallel;
        self
    }

    /// Enable or disable the transposition table.
    pub fn with_transposition(mut self, enabled: bool) -> Self {
        self.transposition = enabled;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
