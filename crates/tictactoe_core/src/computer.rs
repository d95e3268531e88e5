//! Computer opponent: take a win, else block, else play anywhere.
//!
//! No lookahead. Lines are scanned in the rules engine's order, so the
//! choice is deterministic except for the final random fallback.

use super::{Board, Player, Position, Square, WinningLine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Picks a move for `computer` on `board`.
///
/// Returns `None` only when the board has no empty square; callers are
/// expected not to ask once the game is over.
#[instrument(level = "debug", skip(board, rng), fields(board = %board))]
pub fn choose_move<R: Rng>(
    board: &Board,
    computer: Player,
    opponent: Player,
    rng: &mut R,
) -> Option<Position> {
    if let Some(pos) = completing_cell(board, computer) {
        debug!(%pos, "Taking the win");
        return Some(pos);
    }

    if let Some(pos) = completing_cell(board, opponent) {
        debug!(%pos, "Blocking");
        return Some(pos);
    }

    let open = board.empty_positions();
    if open.is_empty() {
        return None;
    }
    let pos = open[rng.random_range(0..open.len())];
    debug!(%pos, candidates = open.len(), "Random move");
    Some(pos)
}

/// First empty cell that would give `mark` three in a row.
pub fn completing_cell(board: &Board, mark: Player) -> Option<Position> {
    WinningLine::ALL.iter().find_map(|line| {
        let cells = line.cells();
        let held = cells
            .iter()
            .filter(|pos| board.get(**pos) == Square::Occupied(mark))
            .count();
        let mut open = cells.iter().filter(|pos| board.is_empty(**pos));
        match (held, open.next(), open.next()) {
            (2, Some(pos), None) => Some(*pos),
            _ => None,
        }
    })
}

/// Seeded computer player.
///
/// Keeping the seed makes a game reproducible from its log line.
#[derive(Debug, Clone)]
pub struct ComputerPlayer {
    rng: StdRng,
    seed: u64,
}

impl ComputerPlayer {
    /// Player whose random fallback is driven by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Player with a fresh random seed.
    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    /// Seed in use.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Move for `mark` on `board`.
    pub fn choose(&mut self, board: &Board, mark: Player) -> Option<Position> {
        choose_move(board, mark, mark.opponent(), &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_blocks_opponent() {
        let mut computer = ComputerPlayer::new(7);
        assert_eq!(
            computer.choose(&board("XX......."), Player::O),
            Some(Position::TopRight)
        );
    }

    #[test]
    fn test_prefers_win_over_block() {
        let mut computer = ComputerPlayer::new(7);
        assert_eq!(
            computer.choose(&board("OO.XX...."), Player::O),
            Some(Position::TopRight)
        );
    }

    #[test]
    fn test_win_found_in_later_line() {
        // X threatens 2, but O completes the middle row at 5.
        let mut computer = ComputerPlayer::new(7);
        assert_eq!(
            computer.choose(&board("XX.OO...."), Player::O),
            Some(Position::MiddleRight)
        );
    }

    #[test]
    fn test_first_line_in_scan_order_wins_ties() {
        // X threatens both 2 (top row) and 6 (left column).
        assert_eq!(completing_cell(&board("XX.X....."), Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_random_move_is_empty_cell() {
        let b = board("X...O....");
        for seed in 0..32 {
            let pos = ComputerPlayer::new(seed).choose(&b, Player::X).unwrap();
            assert!(b.is_empty(pos), "seed {} picked {:?}", seed, pos);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let b = Board::new();
        let first = ComputerPlayer::new(42).choose(&b, Player::O);
        let second = ComputerPlayer::new(42).choose(&b, Player::O);
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut computer = ComputerPlayer::new(1);
        assert_eq!(computer.choose(&board("XOXXOOOXX"), Player::O), None);
    }

    #[test]
    fn test_blocked_line_is_not_a_threat() {
        assert_eq!(completing_cell(&board("XXO......"), Player::X), None);
    }
}
