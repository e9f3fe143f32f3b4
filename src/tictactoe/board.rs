//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, MoveRejection, Result};

/// Side length of the board
pub const SIZE: usize = 3;

/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

/// A cell on the Tic-Tac-Toe board
///
/// The derived ordering (`Empty < X < O`) is what canonicalization compares.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player, identified by the mark they place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }

    /// Parse "X" or "O" (case-insensitive)
    pub fn parse(s: &str) -> Result<Player> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(Error::InvalidPlayerString {
                player: other.to_string(),
                context: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Convert `(x, y)` coordinates (column, row) to a row-major position.
///
/// # Errors
///
/// Returns [`Error::IllegalMove`] when either coordinate is outside `0..3`.
pub fn position_of(x: usize, y: usize) -> Result<usize> {
    if x >= SIZE || y >= SIZE {
        return Err(Error::IllegalMove {
            x,
            y,
            reason: MoveRejection::OutOfRange,
        });
    }
    Ok(y * SIZE + x)
}

/// Convert a row-major position (0-8) to `(x, y)` coordinates.
pub fn coords_of(pos: usize) -> (usize, usize) {
    (pos % SIZE, pos / SIZE)
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceCount {
    pub x: usize,
    pub o: usize,
}

/// A 3x3 grid of marks.
///
/// `move_count` always equals the number of occupied cells; every constructor
/// maintains this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    cells: [Cell; CELLS],
    move_count: u8,
}

/// Serialized form of a [`Board`], validated when read back
#[derive(Deserialize)]
struct BoardRecord {
    cells: [Cell; CELLS],
    move_count: u8,
}

impl TryFrom<BoardRecord> for Board {
    type Error = Error;

    fn try_from(record: BoardRecord) -> Result<Self> {
        let board = Board::from_cells(record.cells)?;
        if board.move_count != record.move_count {
            return Err(Error::UnreachablePosition {
                reason: format!(
                    "move count {} does not match {} occupied cells",
                    record.move_count, board.move_count
                ),
            });
        }
        Ok(board)
    }
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
            move_count: 0,
        }
    }

    /// Build a board from raw cells, checking that the players alternate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPieceCounts`] when the X and O counts differ by
    /// more than one.
    pub fn from_cells(cells: [Cell; CELLS]) -> Result<Self> {
        let count = Self::count_cells(&cells);
        if count.x.abs_diff(count.o) > 1 {
            return Err(Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        Ok(Self::from_cells_unchecked(cells))
    }

    /// Build a board whose cells come from a transform of a valid board.
    pub(crate) fn from_cells_unchecked(cells: [Cell; CELLS]) -> Self {
        let move_count = cells.iter().filter(|&&c| c != Cell::Empty).count() as u8;
        Board { cells, move_count }
    }

    /// Parse a board from 9 cell characters.
    ///
    /// Whitespace and `/` row separators are ignored, so `"X.O/.X./..O"` and
    /// `"X.O .X. ..O"` both parse.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string does not contain exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts differ by more than one
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| *c != '/' && *c != '\n' && *c != '\t')
            .collect();
        // A space is a legal empty cell only when the string is exactly 9 chars.
        let chars: Vec<char> = if chars.len() == CELLS {
            chars
        } else {
            chars.into_iter().filter(|c| !c.is_whitespace()).collect()
        };
        Self::from_cells(Self::parse_cells(&chars, s)?)
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELLS]> {
        if chars.len() != CELLS {
            return Err(Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }
        Ok(cells)
    }

    fn count_cells(cells: &[Cell; CELLS]) -> PieceCount {
        let mut count = PieceCount::default();
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Count X and O pieces
    pub fn piece_count(&self) -> PieceCount {
        Self::count_cells(&self.cells)
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of marks placed so far (ply depth)
    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Get cell at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell> {
        Ok(self.cells[position_of(x, y)?])
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        self.move_count() == CELLS
    }

    /// Empty positions in row-major scan order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `player`'s mark at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the coordinates are out of range or
    /// the cell is already occupied.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, x: usize, y: usize, player: Player) -> Result<Board> {
        let pos = position_of(x, y)?;
        if !self.is_empty(pos) {
            return Err(Error::IllegalMove {
                x,
                y,
                reason: MoveRejection::Occupied,
            });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        next.move_count += 1;
        Ok(next)
    }

    /// Place a mark by row-major position
    #[must_use = "place_at returns a new board; the original is unchanged"]
    pub fn place_at(&self, pos: usize, player: Player) -> Result<Board> {
        let (x, y) = coords_of(pos);
        self.place(x, y, player)
    }

    /// Compact 9-character encoding, e.g. `"X.O.X...."`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(SIZE).enumerate() {
            let line: Vec<String> = cells.iter().map(|c| c.to_char().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
            if row < SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
