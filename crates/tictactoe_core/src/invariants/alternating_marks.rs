//! Alternating marks invariant: successive snapshots add X, O, X, ... or O, X, O, ...

use super::super::MoveHistory;
use super::{Invariant, added_mark};

/// Invariant: the marks added by consecutive snapshots alternate.
///
/// Either mark may open the game, so only the alternation is checked.
/// Transitions that are not a single added mark are left to
/// [`super::SingleStepInvariant`].
pub struct AlternatingMarksInvariant;

impl Invariant<MoveHistory> for AlternatingMarksInvariant {
    fn holds(history: &MoveHistory) -> bool {
        let mut previous = None;
        for pair in history.snapshots.windows(2) {
            let Some((_, player)) = added_mark(&pair[0], &pair[1]) else {
                continue;
            };
            if previous == Some(player) {
                return false;
            }
            previous = Some(player);
        }
        true
    }

    fn description() -> &'static str {
        "Marks alternate between X and O"
    }
}
