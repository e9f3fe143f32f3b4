//! Reachability checks for positions built outside of play

use super::{
    board::{Board, Player},
    lines::LineAnalyzer,
};
use crate::error::{Error, Result};

/// Check that `board` with `to_move` next can arise from alternating play.
///
/// Returns the winner, if any; a winner is always the player who moved last.
pub(crate) fn check_position(board: &Board, to_move: Player) -> Result<Option<Player>> {
    let count = board.piece_count();
    let diff = count.x as isize - count.o as isize;
    let unreachable = |reason: String| Error::UnreachablePosition { reason };

    // Either side may have opened, so the mover is level or one behind.
    let counts_ok = match to_move {
        Player::X => diff == 0 || diff == -1,
        Player::O => diff == 0 || diff == 1,
    };
    if !counts_ok {
        return Err(unreachable(format!(
            "piece counts (X={}, O={}) are inconsistent with {to_move} to move",
            count.x, count.o
        )));
    }

    let x_wins = LineAnalyzer::has_won(board.cells(), Player::X);
    let o_wins = LineAnalyzer::has_won(board.cells(), Player::O);
    let winner = match (x_wins, o_wins) {
        (true, true) => {
            return Err(unreachable(
                "both players cannot have winning lines".to_string(),
            ));
        }
        (true, false) => Some(Player::X),
        (false, true) => Some(Player::O),
        (false, false) => None,
    };

    if winner == Some(to_move) {
        return Err(unreachable(format!(
            "{to_move} has a line but is also the player to move"
        )));
    }

    Ok(winner)
}
