//! Game state: a board plus whose turn it is and whether play has ended

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Player, coords_of},
    game::{GameOutcome, Move},
    lines::LineAnalyzer,
};
use crate::error::{Error, Result};

/// A position in the game.
///
/// `terminal` is set exactly when the move that produced this state completed
/// a line; a full board without a line is over but not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct GameState {
    board: Board,
    to_move: Player,
    terminal: bool,
    last_move: Option<Move>,
}

/// Serialized form of a [`GameState`], validated when read back
#[derive(Deserialize)]
struct StateRecord {
    board: Board,
    to_move: Player,
    terminal: bool,
    last_move: Option<Move>,
}

impl TryFrom<StateRecord> for GameState {
    type Error = Error;

    fn try_from(record: StateRecord) -> Result<Self> {
        let mut state = GameState::from_board(record.board, record.to_move)?;
        if state.terminal != record.terminal {
            return Err(Error::UnreachablePosition {
                reason: "terminal flag disagrees with the board".to_string(),
            });
        }
        if let Some(mv) = record.last_move {
            let placed = record.board.cell(mv.x, mv.y)?;
            if mv.player != record.to_move.opponent() || placed != mv.player.to_cell() {
                return Err(Error::UnreachablePosition {
                    reason: format!("last move {mv} is not on the board"),
                });
            }
            state.last_move = Some(mv);
        }
        Ok(state)
    }
}

impl GameState {
    /// Empty board with X to move
    pub fn new_game() -> Self {
        Self::new_game_with(Player::X)
    }

    /// Empty board with `first_player` to move
    pub fn new_game_with(first_player: Player) -> Self {
        GameState {
            board: Board::new(),
            to_move: first_player,
            terminal: false,
            last_move: None,
        }
    }

    /// Wrap an existing board, checking that it can arise in play.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreachablePosition`] when the piece counts disagree
    /// with `to_move`, both players have lines, or the player with a line is
    /// not the one who moved last.
    pub fn from_board(board: Board, to_move: Player) -> Result<Self> {
        let winner = super::validation::check_position(&board, to_move)?;
        Ok(GameState {
            board,
            to_move,
            terminal: winner.is_some(),
            last_move: None,
        })
    }

    /// Parse a position such as `"X.O.X...."` or `"X.O.X...._O"`.
    ///
    /// Without a `_X`/`_O` suffix the player to move is inferred from the
    /// piece counts assuming X opened.
    ///
    /// # Errors
    ///
    /// Propagates board parsing errors and [`GameState::from_board`] checks.
    pub fn parse(s: &str) -> Result<Self> {
        let (board_part, suffix) = match s.rsplit_once('_') {
            Some((board, player)) => (board, Some(Player::parse(player)?)),
            None => (s, None),
        };
        let board = Board::from_string(board_part)?;
        let to_move = match suffix {
            Some(player) => player,
            None => {
                let count = board.piece_count();
                if count.x > count.o {
                    Player::O
                } else {
                    Player::X
                }
            }
        };
        Self::from_board(board, to_move)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player about to move
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The player who made the last move
    pub fn last_mover(&self) -> Player {
        self.to_move.opponent()
    }

    /// Whether the last move completed a line
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Whether play has stopped (a line or a full board)
    pub fn is_over(&self) -> bool {
        self.terminal || self.is_full()
    }

    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    /// The move that produced this state, if it was reached by playing
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn winner(&self) -> Option<Player> {
        self.terminal.then(|| self.last_mover())
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(GameOutcome::Win(winner))
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Empty positions in scan order, or none once play has stopped
    pub fn legal_positions(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.empty_positions()
    }

    /// Play at column `x`, row `y` for the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if play has stopped, otherwise
    /// [`Error::IllegalMove`] for out-of-range coordinates or an occupied cell.
    #[must_use = "apply_move returns the successor state; the original is unchanged"]
    pub fn apply_move(&self, x: usize, y: usize) -> Result<GameState> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let player = self.to_move;
        let board = self.board.place(x, y, player)?;
        Ok(GameState {
            board,
            to_move: player.opponent(),
            terminal: LineAnalyzer::causes_win(board.cells(), x, y, player),
            last_move: Some(Move::new(x, y, player)),
        })
    }

    /// Play by row-major position (0-8)
    #[must_use = "apply_at returns the successor state; the original is unchanged"]
    pub fn apply_at(&self, pos: usize) -> Result<GameState> {
        let (x, y) = coords_of(pos);
        self.apply_move(x, y)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.outcome() {
            Some(outcome) => write!(f, "({outcome})"),
            None => write!(f, "({} to move)", self.to_move),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveRejection;

    #[test]
    fn deserialized_states_are_validated() {
        let state = GameState::new_game().apply_move(1, 1).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<GameState>(&json).unwrap(), state);

        let wrong_turn = json.replace(r#""to_move":"O""#, r#""to_move":"X""#);
        assert_ne!(wrong_turn, json);
        assert!(serde_json::from_str::<GameState>(&wrong_turn).is_err());

        let wrong_flag = json.replace(r#""terminal":false"#, r#""terminal":true"#);
        assert!(serde_json::from_str::<GameState>(&wrong_flag).is_err());

        let moved_elsewhere = json.replace(r#""x":1,"y":1"#, r#""x":0,"y":0"#);
        assert_ne!(moved_elsewhere, json);
        assert!(serde_json::from_str::<GameState>(&moved_elsewhere).is_err());
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new_game();
        assert_eq!(state.to_move(), Player::X);
        assert_eq!(state.move_count(), 0);
        assert!(!state.is_terminal());
        assert_eq!(state.last_move(), None);

        let o_first = GameState::new_game_with(Player::O);
        let next = o_first.apply_move(1, 1).unwrap();
        assert_eq!(next.board().get(4), crate::tictactoe::Cell::O);
        assert_eq!(next.to_move(), Player::X);
    }

    #[test]
    fn test_player_alternation() {
        let mut state = GameState::new_game();
        for (i, pos) in [0, 1, 2].into_iter().enumerate() {
            let mover = state.to_move();
            state = state.apply_at(pos).unwrap();
            assert_eq!(state.last_move(), Some(Move::at(pos, mover)));
            assert_eq!(state.move_count(), i + 1);
        }
        assert_eq!(state.to_move(), Player::O);
    }

    #[test]
    fn test_win_detection_diagonal() {
        let mut state = GameState::new_game();
        for pos in [0, 1, 4, 2] {
            state = state.apply_at(pos).unwrap();
            assert!(!state.is_terminal());
        }
        state = state.apply_move(2, 2).unwrap();

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::X));
        assert_eq!(state.outcome(), Some(GameOutcome::Win(Player::X)));
        assert!(state.legal_positions().is_empty());
    }

    #[test]
    fn test_apply_move_errors() {
        let state = GameState::new_game().apply_move(0, 0).unwrap();

        assert_eq!(
            state.apply_move(0, 0).unwrap_err(),
            Error::IllegalMove {
                x: 0,
                y: 0,
                reason: MoveRejection::Occupied
            }
        );
        assert_eq!(
            state.apply_move(0, 3).unwrap_err(),
            Error::IllegalMove {
                x: 0,
                y: 3,
                reason: MoveRejection::OutOfRange
            }
        );
        assert!(matches!(
            state.apply_at(11),
            Err(Error::IllegalMove {
                reason: MoveRejection::OutOfRange,
                ..
            })
        ));
    }

    #[test]
    fn test_full_board_is_game_over() {
        let state = GameState::parse("XOXXOOOXX").unwrap();
        assert!(state.is_full());
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(state.apply_move(0, 0).unwrap_err(), Error::GameOver);
    }

    #[test]
    fn test_parse_infers_turn() {
        let state = GameState::parse("XO.......").unwrap();
        assert_eq!(state.to_move(), Player::X);

        let state = GameState::parse("X........").unwrap();
        assert_eq!(state.to_move(), Player::O);

        let state = GameState::parse("O........_X").unwrap();
        assert_eq!(state.to_move(), Player::X);

        assert!(matches!(
            GameState::parse("X........_Q"),
            Err(Error::InvalidPlayerString { .. })
        ));
    }

    #[test]
    fn test_parse_marks_winning_position_terminal() {
        let state = GameState::parse("XXXOO....").unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::X));
        assert_eq!(state.apply_move(2, 2).unwrap_err(), Error::GameOver);
    }

    #[test]
    fn test_display() {
        let state = GameState::parse("X...O....").unwrap();
        assert_eq!(state.to_string(), "X . .\n. O .\n. . .\n(X to move)");
    }
}
