//! Cursor invariant: the history is non-empty and the cursor points into it.

use super::super::MoveHistory;
use super::Invariant;

/// Invariant: `0 <= cursor < len`, which also rules out an empty history.
pub struct CursorInBoundsInvariant;

impl Invariant<MoveHistory> for CursorInBoundsInvariant {
    fn holds(history: &MoveHistory) -> bool {
        history.cursor < history.snapshots.len()
    }

    fn description() -> &'static str {
        "History cursor points at an existing snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_history_holds() {
        assert!(CursorInBoundsInvariant::holds(&MoveHistory::new()));
    }

    #[test]
    fn test_empty_history_violates() {
        let mut history = MoveHistory::new();
        history.snapshots.clear();
        assert!(!CursorInBoundsInvariant::holds(&history));
    }

    #[test]
    fn test_cursor_past_end_violates() {
        let mut history = MoveHistory::new();
        history.cursor = 1;
        assert!(!CursorInBoundsInvariant::holds(&history));
    }
}
