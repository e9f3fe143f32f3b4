//! Error types for the gato crate

use std::fmt;

use thiserror::Error;

use crate::tictactoe::Player;

/// Why a move was rejected by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// The target cell already holds a mark
    Occupied,
    /// A coordinate lies outside `0..3`
    OutOfRange,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::Occupied => write!(f, "cell is already occupied"),
            MoveRejection::OutOfRange => write!(f, "coordinates must be in 0..3"),
        }
    }
}

/// Main error type for the gato crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move at (x={x}, y={y}): {reason}")]
    IllegalMove {
        x: usize,
        y: usize,
        reason: MoveRejection,
    },

    #[error("game already over")]
    GameOver,

    #[error("{got} cannot move: it is {expected}'s turn")]
    WrongPlayer { expected: Player, got: Player },

    #[error("no move available: the position is terminal or full")]
    NoMoveAvailable,

    #[error("node {index} does not belong to this game tree")]
    UnknownNode { index: usize },

    #[error("game history is empty")]
    EmptyHistory,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must differ by at most 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid player '{player}' in '{context}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String, context: String },

    #[error("unreachable position: {reason}")]
    UnreachablePosition { reason: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
