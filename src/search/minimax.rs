//! Minimax decision procedure with optional alpha-beta pruning

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use super::{
    config::{Pruning, SearchConfig},
    transposition::{TranspositionKey, TranspositionTable},
};
use crate::{
    error::{Error, Result},
    tictactoe::{CELLS, GameState, GameTree, Move, Player, StateId},
};

/// Outcome of a position from the root player's point of view
pub type Score = i32;

/// The root player completes a line
pub const WIN: Score = 1;
/// The board fills without a line
pub const DRAW: Score = 0;
/// The opponent completes a line
pub const LOSS: Score = -1;

/// Search values grade wins and losses by distance: a win `d` plies below the
/// root is worth `HORIZON - d`, a loss `d - HORIZON`, a draw 0. Games never
/// last more than `CELLS` plies, so the sign is always the outcome.
const HORIZON: Score = CELLS as Score + 1;

/// Bound outside every reachable value
const INFINITY: Score = HORIZON + 1;

/// Split a search value into the outcome and the plies needed to force it
fn outcome_of(value: Score) -> (Score, Option<usize>) {
    match value.signum() {
        0 => (DRAW, None),
        sign => (sign, Some((HORIZON - value.abs()) as usize)),
    }
}

/// Exact result of one root move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChildScore {
    pub mv: Move,
    pub score: Score,
    /// Plies from the root until the forced win or loss; `None` for a draw
    pub plies: Option<usize>,
}

/// Result of a search: the chosen move and how the alternatives scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub mv: Move,
    pub score: Score,
    pub plies: Option<usize>,
    /// One entry per generated child, in generation order
    pub children: Vec<ChildScore>,
    /// Nodes scored during the search
    pub nodes: usize,
}

/// Minimax engine choosing a move for the player to act.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxEngine {
    config: SearchConfig,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the player to move in `state`.
    ///
    /// Wins are preferred over draws over losses; the quickest win and the
    /// slowest loss rank first. Among moves that are still equal the one
    /// generated first wins, so the result does not depend on pruning or
    /// parallelism.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMoveAvailable`] when the state is terminal or full.
    pub fn decide(&self, state: &GameState) -> Result<Move> {
        Ok(self.evaluate(state)?.mv)
    }

    /// Search from `state` in a fresh tree and report every root score.
    pub fn evaluate(&self, state: &GameState) -> Result<Decision> {
        let mut tree = GameTree::new(*state);
        let root = tree.root();
        self.evaluate_in(&mut tree, root)
    }

    /// Search from node `id` of an existing tree, expanding it as needed.
    ///
    /// Already expanded nodes are reused. With `parallel_root` the subtrees
    /// below the root children are searched in private trees and are not
    /// attached to `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] when `id` was not issued by `tree`, and
    /// [`Error::NoMoveAvailable`] when the node's state is terminal or full.
    #[tracing::instrument(level = "debug", skip(self, tree))]
    pub fn evaluate_in(&self, tree: &mut GameTree, id: StateId) -> Result<Decision> {
        let state = *tree
            .get(id)
            .ok_or(Error::UnknownNode { index: id.index() })?
            .state();
        if state.is_over() {
            return Err(Error::NoMoveAvailable);
        }

        let root_player = state.to_move();
        let root_moves = state.move_count();
        let children = tree.expand(id).to_vec();

        let (values, nodes): (Vec<Score>, usize) = if self.config.parallel_root {
            let child_states: Vec<GameState> =
                children.iter().map(|&c| *tree.state(c)).collect();
            let results: Vec<(Score, usize)> = child_states
                .par_iter()
                .map(|child| {
                    let mut subtree = GameTree::new(*child);
                    let root = subtree.root();
                    let mut search = Search::new(root_player, root_moves, self.config);
                    let value = search.value(&mut subtree, root, -INFINITY, INFINITY);
                    trace!(
                        board = %child.board().encode(),
                        value,
                        nodes = search.nodes,
                        "root child scored"
                    );
                    (value, search.nodes)
                })
                .collect();
            let nodes = results.iter().map(|(_, n)| n).sum::<usize>();
            (results.into_iter().map(|(v, _)| v).collect(), nodes)
        } else {
            // Each root child gets the full window so every root value is exact.
            let mut search = Search::new(root_player, root_moves, self.config);
            let values = children
                .iter()
                .map(|&child| search.value(tree, child, -INFINITY, INFINITY))
                .collect();
            (values, search.nodes)
        };

        let mut scored = Vec::with_capacity(children.len());
        let mut best: Option<(Score, ChildScore)> = None;
        for (&child, &value) in children.iter().zip(&values) {
            let mv = tree.state(child).last_move().ok_or(Error::NoMoveAvailable)?;
            let (score, plies) = outcome_of(value);
            let entry = ChildScore { mv, score, plies };
            scored.push(entry);
            if best.is_none_or(|(top, _)| value > top) {
                best = Some((value, entry));
            }
        }
        let (_, best) = best.ok_or(Error::NoMoveAvailable)?;

        let decision = Decision {
            mv: best.mv,
            score: best.score,
            plies: best.plies,
            children: scored,
            nodes: nodes + 1,
        };
        debug!(
            mv = %decision.mv,
            score = decision.score,
            plies = ?decision.plies,
            nodes = decision.nodes,
            "minimax decision"
        );
        Ok(decision)
    }
}

/// Best move for `state` with the default configuration
pub fn decide(state: &GameState) -> Result<Move> {
    MinimaxEngine::default().decide(state)
}

/// State of one recursive search
struct Search {
    root_player: Player,
    /// Marks on the board at the root; a node's depth is its mark count minus this
    root_moves: usize,
    config: SearchConfig,
    table: TranspositionTable,
    nodes: usize,
}

impl Search {
    fn new(root_player: Player, root_moves: usize, config: SearchConfig) -> Self {
        Search {
            root_player,
            root_moves,
            config,
            table: TranspositionTable::new(),
            nodes: 0,
        }
    }

    fn terminal_value(&self, state: &GameState) -> Option<Score> {
        let depth = (state.move_count() - self.root_moves) as Score;
        match state.winner() {
            Some(winner) if winner == self.root_player => Some(HORIZON - depth),
            Some(_) => Some(depth - HORIZON),
            None if state.is_full() => Some(DRAW),
            None => None,
        }
    }

    /// Fail-soft alpha-beta. Without pruning the window is never narrowed,
    /// so every returned value is exact.
    fn value(&mut self, tree: &mut GameTree, id: StateId, alpha: Score, beta: Score) -> Score {
        self.nodes += 1;
        let state = *tree.state(id);
        if let Some(value) = self.terminal_value(&state) {
            return value;
        }

        // A position's depth follows from its mark count, so cached values
        // stay valid wherever the position recurs in this search.
        let key = self.config.transposition.then(|| TranspositionKey::of(&state));
        if let Some(value) = key.as_ref().and_then(|k| self.table.get(k)) {
            return value;
        }

        let pruning = self.config.pruning == Pruning::AlphaBeta;
        let maximizing = state.to_move() == self.root_player;
        let (mut alpha, mut beta) = (alpha, beta);
        let (alpha_in, beta_in) = (alpha, beta);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        let children = tree.expand(id).to_vec();
        for child in children {
            let value = if pruning {
                self.value(tree, child, alpha, beta)
            } else {
                self.value(tree, child, -INFINITY, INFINITY)
            };
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if pruning && alpha >= beta {
                break;
            }
        }

        // Only exact values are cached; a cut-off result is just a bound.
        let exact = !pruning || (alpha_in < best && best < beta_in);
        if let (Some(key), true) = (key, exact) {
            self.table.insert(key, best);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engines() -> Vec<MinimaxEngine> {
        let mut engines = Vec::new();
        for pruning in [Pruning::None, Pruning::AlphaBeta] {
            for parallel in [false, true] {
                for transposition in [false, true] {
                    engines.push(MinimaxEngine::new(
                        SearchConfig::new()
                            .with_pruning(pruning)
                            .with_parallel_root(parallel)
                            .with_transposition(transposition),
                    ));
                }
            }
        }
        engines
    }

    #[test]
    fn empty_board_is_a_draw_and_picks_the_first_opening() {
        let decision = MinimaxEngine::default()
            .evaluate(&GameState::new_game())
            .unwrap();
        assert_eq!(decision.mv, Move::new(0, 0, Player::X));
        assert_eq!(decision.score, DRAW);
        assert_eq!(decision.children.len(), 3);
        assert!(decision.children.iter().all(|c| c.score == DRAW));
        assert_eq!(decision.plies, None);
    }

    #[test]
    fn completes_the_diagonal() {
        // X . O
        // . X O
        // . . .
        let state = GameState::parse("X.O.XO...").unwrap();
        for engine in engines() {
            let decision = engine.evaluate(&state).unwrap();
            assert_eq!(decision.mv, Move::new(2, 2, Player::X));
            assert_eq!(decision.score, WIN);
            assert!(
                decision
                    .children
                    .iter()
                    .filter(|c| c.mv.position() != 8)
                    .all(|c| c.score == LOSS)
            );
        }
    }

    #[test]
    fn immediate_win_beats_a_slower_forced_win() {
        // X O O
        // . X .
        // . . .
        let state = GameState::parse("XOO.X...._X").unwrap();
        for engine in engines() {
            let decision = engine.evaluate(&state).unwrap();
            assert_eq!(decision.mv, Move::new(2, 2, Player::X), "{:?}", engine.config());
            assert_eq!(decision.score, WIN);
            assert_eq!(decision.plies, Some(1));

            // (0, 1) forks and still wins, two moves later
            let fork = decision.children[0];
            assert_eq!(fork.mv, Move::new(0, 1, Player::X));
            assert_eq!((fork.score, fork.plies), (WIN, Some(3)));
        }
    }

    #[test]
    fn values_split_into_outcome_and_distance() {
        assert_eq!(outcome_of(0), (DRAW, None));
        assert_eq!(outcome_of(HORIZON - 1), (WIN, Some(1)));
        assert_eq!(outcome_of(4 - HORIZON), (LOSS, Some(4)));
    }

    #[test]
    fn blocks_an_immediate_threat() {
        // X X .
        // . O .
        // . . .
        let state = GameState::parse("XX..O....").unwrap();
        assert_eq!(state.to_move(), Player::O);
        let decision = MinimaxEngine::default().evaluate(&state).unwrap();
        assert_eq!(decision.mv, Move::new(2, 0, Player::O));
        assert_eq!(decision.score, DRAW);
    }

    #[test]
    fn finished_positions_have_no_move() {
        let full = GameState::parse("XOXXOOOXX").unwrap();
        assert_eq!(decide(&full).unwrap_err(), Error::NoMoveAvailable);

        let won = GameState::parse("XXXOO....").unwrap();
        assert_eq!(decide(&won).unwrap_err(), Error::NoMoveAvailable);
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let state = GameState::parse("X........").unwrap();
        let plain = MinimaxEngine::new(
            SearchConfig::new()
                .with_pruning(Pruning::None)
                .with_transposition(false),
        )
        .evaluate(&state)
        .unwrap();
        let pruned = MinimaxEngine::new(SearchConfig::new().with_transposition(false))
            .evaluate(&state)
            .unwrap();
        assert_eq!(plain.mv, pruned.mv);
        assert_eq!(plain.children, pruned.children);
        assert!(pruned.nodes < plain.nodes);
    }

    #[test]
    fn ids_from_another_tree_are_rejected() {
        let mut big = GameTree::new(GameState::new_game());
        let root = big.root();
        let foreign = big.expand(root)[2];

        let mut small = GameTree::new(GameState::new_game());
        let err = MinimaxEngine::default()
            .evaluate_in(&mut small, foreign)
            .unwrap_err();
        assert_eq!(err, Error::UnknownNode { index: 3 });
        assert!(small.get(foreign).is_none());
    }

    #[test]
    fn search_in_an_existing_tree_attaches_children() {
        let mut tree = GameTree::new(GameState::parse("XX..O....").unwrap());
        let root = tree.root();
        let engine = MinimaxEngine::new(SearchConfig::new().with_transposition(false));
        let decision = engine.evaluate_in(&mut tree, root).unwrap();

        assert_eq!(tree.child_count(root), decision.children.len());
        assert!(tree.len() > 1 + decision.children.len());
        let chosen = tree
            .node(root)
            .children()
            .unwrap()
            .iter()
            .copied()
            .find(|&c| tree.state(c).last_move() == Some(decision.mv))
            .unwrap();
        assert_eq!(tree.parent(chosen), Some(root));
    }
}
