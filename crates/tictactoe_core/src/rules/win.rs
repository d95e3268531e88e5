//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Square, WinningLine};

/// Checks if there is a winner on the board.
///
/// Returns the player and the first completed line in scan order,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<(Player, WinningLine)> {
    for line in WinningLine::ALL {
        let [a, b, c] = line.cells();
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return sq.player().map(|player| (player, line));
        }
    }

    None
}
