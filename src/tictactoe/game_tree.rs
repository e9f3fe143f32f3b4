//! Lazily expanded game tree with per-parent symmetry deduplication

use serde::Serialize;
use tracing::trace;

use super::{
    board::{Board, CELLS, Player},
    game::Move,
    state::GameState,
};

/// States with fewer marks than this are logged when expanded
const TRACE_DEPTH: usize = 5;

/// Enumerate the successors of `state`, one per symmetry class.
///
/// Empty cells are scanned in row-major order and the player to move is
/// placed on each. A candidate is kept only if its canonical form differs
/// from every candidate kept before it, so the result is deterministic and no
/// two successors are symmetry-equivalent. Returns an empty list once play
/// has stopped.
pub fn successors(state: &GameState) -> Vec<GameState> {
    if state.is_over() {
        return Vec::new();
    }

    if state.move_count() < TRACE_DEPTH {
        trace!(board = %state.board().encode(), to_move = %state.to_move(), "expanding state");
    }

    let mut seen: Vec<Board> = Vec::with_capacity(CELLS);
    let mut children = Vec::with_capacity(CELLS);
    for pos in state.board().empty_positions() {
        let child = state.apply_at(pos);
        debug_assert!(child.is_ok(), "empty cell {pos} rejected a move");
        let Ok(child) = child else {
            continue;
        };
        let key = child.board().canonical();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        children.push(child);
    }
    children
}

/// Index of a node in a [`GameTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A node: the state, a back-reference to its parent, and its children once
/// expanded.
#[derive(Debug, Clone)]
pub struct StateNode {
    state: GameState,
    parent: Option<StateId>,
    children: Option<Vec<StateId>>,
}

impl StateNode {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Children, or `None` if the node has not been expanded yet
    pub fn children(&self) -> Option<&[StateId]> {
        self.children.as_deref()
    }
}

/// Game tree rooted at a single state.
///
/// Nodes live in an arena owned by the tree; the parent link is an index and
/// is only used for traceback. Children are created on first expansion and
/// never change afterwards.
///
/// Accessors taking a [`StateId`] panic when given an id issued by another
/// tree; use [`GameTree::get`] to check first.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<StateNode>,
}

impl GameTree {
    pub fn new(root: GameState) -> Self {
        GameTree {
            nodes: vec![StateNode {
                state: root,
                parent: None,
                children: None,
            }],
        }
    }

    pub fn root(&self) -> StateId {
        StateId(0)
    }

    /// Number of nodes created so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order; a parent always precedes its children
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &StateNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (StateId(i), node))
    }

    /// The node for `id`, or `None` if this tree never issued it
    pub fn get(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: StateId) -> &StateNode {
        &self.nodes[id.0]
    }

    pub fn state(&self, id: StateId) -> &GameState {
        &self.nodes[id.0].state
    }

    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].parent
    }

    /// Number of expanded children (zero before expansion)
    pub fn child_count(&self, id: StateId) -> usize {
        self.nodes[id.0].children.as_ref().map_or(0, Vec::len)
    }

    /// Expand `id` if needed and return its children.
    ///
    /// Expansion happens at most once per node; later calls return the same
    /// children. Nodes where play has stopped get an empty child list.
    pub fn expand(&mut self, id: StateId) -> &[StateId] {
        if self.nodes[id.0].children.is_none() {
            let states = successors(&self.nodes[id.0].state);
            let mut ids = Vec::with_capacity(states.len());
            for state in states {
                ids.push(StateId(self.nodes.len()));
                self.nodes.push(StateNode {
                    state,
                    parent: Some(id),
                    children: None,
                });
            }
            self.nodes[id.0].children = Some(ids);
        }
        self.nodes[id.0].children.as_deref().unwrap_or(&[])
    }

    /// Expand the whole subtree under `id`, stopping `max_depth` plies below
    /// it when a limit is given.
    pub fn expand_all(&mut self, id: StateId, max_depth: Option<usize>) {
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            if max_depth.is_some_and(|limit| depth >= limit) {
                continue;
            }
            let children = self.expand(current).to_vec();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }

    /// Nodes from the root down to `id`, inclusive
    pub fn path_from_root(&self, id: StateId) -> Vec<StateId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Moves played from the root to reach `id`
    pub fn line(&self, id: StateId) -> Vec<Move> {
        self.path_from_root(id)
            .into_iter()
            .skip(1)
            .filter_map(|node| self.state(node).last_move())
            .collect()
    }

    /// Summarize the nodes created so far
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in &self.nodes {
            let state = &node.state;
            stats.by_move_count[state.move_count()] += 1;
            match state.winner() {
                Some(Player::X) => stats.x_wins += 1,
                Some(Player::O) => stats.o_wins += 1,
                None if state.is_full() => stats.draws += 1,
                None => {}
            }
            if node.children.is_none() && !state.is_over() {
                stats.unexpanded += 1;
            }
        }
        stats.total = self.nodes.len();
        stats
    }
}

/// Node counts for a (partially) expanded tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub total: usize,
    /// Nodes indexed by the number of marks on the board
    pub by_move_count: [usize; CELLS + 1],
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Nodes where play continues but no expansion has happened yet
    pub unexpanded: usize,
}
