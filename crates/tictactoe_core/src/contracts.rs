//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! A failed precondition is a rejected command; a failed postcondition is a
//! bug in the engine.

use super::action::{Move, MoveError};
use super::controller::TurnController;
use super::invariants::{HistoryInvariants, InvariantSet, InvariantViolation};
use super::{Board, MoveHistory, Player, Position, rules};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell index names a square.
pub struct CellInRange;

impl CellInRange {
    /// Returns the position for `cell`.
    pub fn check(cell: usize) -> Result<Position, MoveError> {
        Position::from_index(cell).ok_or(MoveError::OutOfRange(cell))
    }
}

/// Precondition: a starting symbol has been chosen, so someone is to move.
pub struct TurnDetermined;

impl TurnDetermined {
    /// Returns the mark to move.
    pub fn check(controller: &TurnController) -> Result<Player, MoveError> {
        controller.to_move().ok_or(MoveError::SymbolNotSelected)
    }
}

/// Precondition: the board in play has neither a winner nor a full grid.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects finished boards.
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if rules::evaluate(board).is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects occupied squares.
    pub fn check(board: &Board, pos: Position) -> Result<(), MoveError> {
        if !board.is_empty(pos) {
            Err(MoveError::SquareOccupied(pos))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a cell chosen through the controller.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions and returns the move that would be played.
    #[instrument(skip(controller))]
    pub fn check(controller: &TurnController, cell: usize) -> Result<Move, MoveError> {
        let position = CellInRange::check(cell)?;
        let player = TurnDetermined::check(controller)?;
        let action = Move::new(player, position);
        MoveContract::pre(controller.history(), &action)?;
        Ok(action)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for committing a move to the history.
///
/// Preconditions:
/// - Board in play is not finished
/// - Square must be empty
///
/// Postconditions:
/// - History invariants hold
/// - Exactly one snapshot follows the previous cursor, and the cursor is on it
pub struct MoveContract;

impl Contract<MoveHistory, Move> for MoveContract {
    fn pre(history: &MoveHistory, action: &Move) -> Result<(), MoveError> {
        let board = history.current();
        GameNotOver::check(board)?;
        SquareIsEmpty::check(board, action.position)?;
        Ok(())
    }

    fn post(before: &MoveHistory, after: &MoveHistory) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match HistoryInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if after.len() != before.cursor() + 2 || after.cursor() != before.cursor() + 1 {
            violations.push(InvariantViolation::new(
                "Commit truncates after the cursor and appends one snapshot",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Move postcondition failed");
            Err(violations)
        }
    }
}
