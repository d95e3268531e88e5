//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here knows about turns or
//! history, so the same checks serve the controller, the invariants and
//! the computer player.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, Outcome};
use tracing::instrument;

/// Evaluates a board.
///
/// The first completed line in scan order wins; otherwise a full board is
/// a draw and anything else is still in progress.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = check_winner(board) {
        return Outcome::Winner { player, line };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, WinningLine};

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_winner_reports_line() {
        let board: Board = "..O.O.O..".parse().unwrap();
        assert_eq!(
            evaluate(&board),
            Outcome::Winner {
                player: Player::O,
                line: WinningLine::AntiDiagonal,
            }
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_winning_last_move_beats_draw() {
        // Full board where X completes the left column.
        let board: Board = "XOXXOOXXO".parse().unwrap();
        assert_eq!(evaluate(&board).winner(), Some(Player::X));
        assert_eq!(evaluate(&board).line(), Some(WinningLine::LeftColumn));
    }
}
