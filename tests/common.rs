//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};

use gato::tictactoe::{Board, GameState};

/// Every position reachable from the empty board with X moving first,
/// in breadth-first order.
pub fn reachable_states() -> Vec<GameState> {
    let start = GameState::new_game();
    let mut seen: HashSet<Board> = HashSet::from([*start.board()]);
    let mut queue = VecDeque::from([start]);
    let mut states = Vec::new();

    while let Some(state) = queue.pop_front() {
        states.push(state);
        for pos in state.legal_positions() {
            let next = state.apply_at(pos).expect("legal position");
            if seen.insert(*next.board()) {
                queue.push_back(next);
            }
        }
    }
    states
}

/// One representative (the canonical board) per symmetry class of
/// reachable positions.
pub fn canonical_states() -> Vec<GameState> {
    let mut seen = HashSet::new();
    reachable_states()
        .into_iter()
        .filter(|state| seen.insert(state.board().canonical()))
        .map(|state| {
            GameState::from_board(state.board().canonical(), state.to_move())
                .expect("canonical form of a reachable position is reachable")
        })
        .collect()
}
