//! Winning line analysis for Tic-Tac-Toe

use super::board::{CELLS, Cell, Player, SIZE};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check whether a mark by `player` at column `x`, row `y` completes a line.
    ///
    /// Only the row, the column and whichever diagonals pass through the cell
    /// are inspected; the cell itself is not read, so this works both before
    /// and after the mark is written.
    pub fn causes_win(cells: &[Cell; CELLS], x: usize, y: usize, player: Player) -> bool {
        let target = player.to_cell();
        let at = |col: usize, row: usize| cells[(row % SIZE) * SIZE + col % SIZE] == target;

        // Row
        if at(x + 1, y) && at(x + 2, y) {
            return true;
        }
        // Column
        if at(x, y + 1) && at(x, y + 2) {
            return true;
        }
        // Main diagonal
        if x == y && at(x + 1, y + 1) && at(x + 2, y + 2) {
            return true;
        }
        // Anti-diagonal
        x + y == SIZE - 1 && at(x + 2, y + 1) && at(x + 1, y + 2)
    }

    /// Check if a player has three in a row anywhere
    pub fn has_won(cells: &[Cell; CELLS], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }
}
