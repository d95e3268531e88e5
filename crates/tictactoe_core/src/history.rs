//! Board snapshots with a movable cursor.
//!
//! The history always holds at least the initial empty board. Committing a
//! board while the cursor sits in the past discards the snapshots after the
//! cursor first, so jumping back and playing starts a new branch.

use super::Board;
use tracing::{debug, instrument};

/// Ordered board snapshots plus the index of the one in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    pub(crate) snapshots: Vec<Board>,
    pub(crate) cursor: usize,
}

impl MoveHistory {
    /// History holding only the empty board.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
            cursor: 0,
        }
    }

    /// Snapshot the cursor points at.
    pub fn current(&self) -> &Board {
        self.assert_well_formed();
        &self.snapshots[self.cursor]
    }

    /// Index of the snapshot in play.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the initial empty board.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true for a well-formed history.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.snapshots.get(index)
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Moves the cursor. Out-of-range indices leave it where it is.
    #[instrument(skip(self), fields(len = self.snapshots.len()))]
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.snapshots.len() {
            debug!("Jump target outside history");
            return false;
        }
        self.cursor = index;
        true
    }

    /// Drops snapshots after the cursor, appends `board` and moves the
    /// cursor onto it.
    #[instrument(skip(self, board), fields(cursor = self.cursor, board = %board))]
    pub fn commit(&mut self, board: Board) {
        let discarded = self.snapshots.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!(discarded, "Discarding redo branch");
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(board);
        self.cursor = self.snapshots.len() - 1;
        self.assert_well_formed();
    }

    /// Back to the single empty board.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn assert_well_formed(&self) {
        assert!(!self.snapshots.is_empty(), "move history is empty");
        assert!(
            self.cursor < self.snapshots.len(),
            "history cursor {} past end {}",
            self.cursor,
            self.snapshots.len()
        );
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}
