//! Moves, outcomes and a game session with history

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{Player, SIZE, coords_of},
    state::GameState,
};

/// A move: the mark `player` placed at column `x`, row `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub player: Player,
}

impl Move {
    pub fn new(x: usize, y: usize, player: Player) -> Self {
        Move { x, y, player }
    }

    /// Build a move from a row-major position (0-8)
    pub fn at(pos: usize, player: Player) -> Self {
        let (x, y) = coords_of(pos);
        Move { x, y, player }
    }

    /// Row-major position (0-8)
    pub fn position(&self) -> usize {
        self.y * SIZE + self.x
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at (x={}, y={})", self.player, self.x, self.y)
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// A game in progress with its full history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HistoryRecord")]
pub struct Game {
    states: Vec<GameState>,
}

/// Serialized form of a [`Game`], replayed move by move when read back
#[derive(Deserialize)]
struct HistoryRecord {
    states: Vec<GameState>,
}

impl TryFrom<HistoryRecord> for Game {
    type Error = crate::Error;

    fn try_from(record: HistoryRecord) -> Result<Self, crate::Error> {
        let Some((first, rest)) = record.states.split_first() else {
            return Err(crate::Error::EmptyHistory);
        };
        let mut game = Game::from_state(*first);
        for state in rest {
            let broken = || crate::Error::UnreachablePosition {
                reason: "history does not follow from its moves".to_string(),
            };
            let mv = state.last_move().ok_or_else(broken)?;
            if game.play_move(mv)? != state {
                return Err(broken());
            }
        }
        Ok(game)
    }
}

impl Game {
    /// Start a game on an empty board with X to move
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    /// Continue a game from an arbitrary position
    pub fn from_state(state: GameState) -> Self {
        Game {
            states: vec![state],
        }
    }

    /// The current position
    pub fn current(&self) -> &GameState {
        // `states` always holds at least the starting position
        &self.states[self.states.len() - 1]
    }

    /// Play at column `x`, row `y` for the player to move
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the game has ended and
    /// [`crate::Error::IllegalMove`] for an occupied or out-of-range cell.
    pub fn play(&mut self, x: usize, y: usize) -> Result<&GameState, crate::Error> {
        let next = self.current().apply_move(x, y)?;
        self.states.push(next);
        Ok(self.current())
    }

    /// Play a move chosen elsewhere (e.g. by the engine)
    ///
    /// # Errors
    ///
    /// As [`Game::play`], plus [`crate::Error::WrongPlayer`] when the move's
    /// mark is not the player to move.
    pub fn play_move(&mut self, mv: Move) -> Result<&GameState, crate::Error> {
        let to_move = self.current().to_move();
        if mv.player != to_move {
            return Err(crate::Error::WrongPlayer {
                expected: to_move,
                got: mv.player,
            });
        }
        self.play(mv.x, mv.y)
    }

    /// Moves played so far, in order
    pub fn moves(&self) -> Vec<Move> {
        self.states.iter().filter_map(|s| s.last_move()).collect()
    }

    /// Every position from the start to the current one
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.current().outcome()
    }

    pub fn is_over(&self) -> bool {
        self.current().is_over()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
