//! Compute-once score cache keyed by symmetry class

use std::collections::{HashMap, hash_map::Entry};

use crate::tictactoe::{Board, GameState, Player};

use super::minimax::Score;

/// Cache key: the canonical board plus the player to move.
///
/// Symmetric positions share a key, and the canonical board is an exact
/// representative, so distinct classes never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranspositionKey {
    pub board: Board,
    pub to_move: Player,
}

impl TranspositionKey {
    pub fn of(state: &GameState) -> Self {
        TranspositionKey {
            board: state.board().canonical(),
            to_move: state.to_move(),
        }
    }
}

/// Exact minimax scores for one search.
///
/// Scores are relative to the player to move at the root of that search, so a
/// table must not be shared between searches from different roots.
#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    scores: HashMap<TranspositionKey, Score>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TranspositionKey) -> Option<Score> {
        self.scores.get(key).copied()
    }

    /// Record the score for `key` unless one is already present.
    ///
    /// Returns the stored score, which is the first one written.
    pub fn insert(&mut self, key: TranspositionKey, score: Score) -> Score {
        match self.scores.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(score),
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
