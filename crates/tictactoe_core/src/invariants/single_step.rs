//! Single-step invariant: each snapshot adds exactly one mark.

use super::super::{Board, MoveHistory};
use super::{Invariant, added_mark};

/// Invariant: history starts empty and every successor fills exactly one
/// previously empty square, changing nothing else.
pub struct SingleStepInvariant;

impl Invariant<MoveHistory> for SingleStepInvariant {
    fn holds(history: &MoveHistory) -> bool {
        let snapshots = &history.snapshots;

        if snapshots.first().is_some_and(|first| *first != Board::new()) {
            return false;
        }

        snapshots
            .windows(2)
            .all(|pair| added_mark(&pair[0], &pair[1]).is_some())
    }

    fn description() -> &'static str {
        "Each snapshot fills exactly one empty square of its predecessor"
    }
}
