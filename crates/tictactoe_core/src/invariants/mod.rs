//! First-class invariants over the move history.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 3-tuples
impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_marks;
pub mod cursor_in_bounds;
pub mod single_step;

pub use alternating_marks::AlternatingMarksInvariant;
pub use cursor_in_bounds::CursorInBoundsInvariant;
pub use single_step::SingleStepInvariant;

/// All history invariants as a composable set.
pub type HistoryInvariants = (
    CursorInBoundsInvariant,
    SingleStepInvariant,
    AlternatingMarksInvariant,
);

/// The single cell that differs between two boards, if exactly one was
/// filled and nothing else changed.
pub(crate) fn added_mark(
    before: &crate::Board,
    after: &crate::Board,
) -> Option<(crate::Position, crate::Player)> {
    let mut added = None;
    for pos in crate::Position::ALL {
        match (before.get(pos), after.get(pos)) {
            (a, b) if a == b => {}
            (crate::Square::Empty, crate::Square::Occupied(player)) if added.is_none() => {
                added = Some((pos, player));
            }
            _ => return None,
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, MoveHistory};

    fn history(boards: &[&str]) -> MoveHistory {
        let mut history = MoveHistory::new();
        for b in boards {
            history.commit(b.parse::<Board>().unwrap());
        }
        history
    }

    #[test]
    fn test_invariant_set_holds_for_empty_history() {
        assert!(HistoryInvariants::check_all(&MoveHistory::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let history = history(&["X........", "X...O....", "X.X.O...."]);
        assert!(HistoryInvariants::check_all(&history).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut history = history(&["X........"]);
        // Two marks at once, and the same player twice in a row.
        history.snapshots.push("XXX......".parse().unwrap());
        history.cursor = 5;

        let violations = HistoryInvariants::check_all(&history).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.description == CursorInBoundsInvariant::description()));
        assert!(violations.iter().any(|v| v.description == SingleStepInvariant::description()));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (CursorInBoundsInvariant, SingleStepInvariant);
        assert!(TwoInvariants::check_all(&history(&["....X...."])).is_ok());
    }

    #[test]
    fn test_added_mark() {
        let before: Board = "X........".parse().unwrap();
        let after: Board = "X...O....".parse().unwrap();
        assert_eq!(
            added_mark(&before, &after),
            Some((crate::Position::Center, crate::Player::O))
        );
        assert_eq!(added_mark(&before, &before), None);
        assert_eq!(added_mark(&after, &before), None);
    }
}
