//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a command was rejected.
///
/// Rejections never change game state; they are ordinary user misuse,
/// not faults.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Cell index outside 0-8.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// No starting symbol has been chosen yet.
    #[display("No symbol selected yet")]
    SymbolNotSelected,

    /// A symbol was already chosen for this game.
    #[display("Symbol already selected")]
    SymbolAlreadySelected,

    /// The player mode is already set, a symbol was already chosen, or
    /// `Unset` was requested.
    #[display("Player mode cannot be changed to {}", _0)]
    ModeLocked(super::PlayerMode),

    /// A human tried to move while the computer is due.
    #[display("Waiting for the computer to move")]
    ComputersTurn,

    /// History index outside the recorded snapshots.
    #[display("No movement #{} in history", _0)]
    NoSuchMove(usize),
}

impl std::error::Error for MoveError {}
