//! Game outcome and winning lines.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// One of the eight winning triples.
///
/// Declaration order is the scan order of the rules engine and the
/// computer player, and [`WinningLine::id`] is the position in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinningLine {
    /// Cells 0, 1, 2.
    TopRow,
    /// Cells 3, 4, 5.
    MiddleRow,
    /// Cells 6, 7, 8.
    BottomRow,
    /// Cells 0, 3, 6.
    LeftColumn,
    /// Cells 1, 4, 7.
    CenterColumn,
    /// Cells 2, 5, 8.
    RightColumn,
    /// Cells 0, 4, 8.
    MainDiagonal,
    /// Cells 2, 4, 6.
    AntiDiagonal,
}

/// Shape of a winning line, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Horizontal line.
    Row,
    /// Vertical line.
    Column,
    /// Top-left to bottom-right or top-right to bottom-left.
    Diagonal,
}

impl WinningLine {
    /// All lines in scan order.
    pub const ALL: [WinningLine; 8] = [
        WinningLine::TopRow,
        WinningLine::MiddleRow,
        WinningLine::BottomRow,
        WinningLine::LeftColumn,
        WinningLine::CenterColumn,
        WinningLine::RightColumn,
        WinningLine::MainDiagonal,
        WinningLine::AntiDiagonal,
    ];

    /// Line id, 0-7.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Line for an id, `None` outside 0-7.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// The three cells of this line.
    pub fn cells(self) -> [Position; 3] {
        use Position::*;
        match self {
            WinningLine::TopRow => [TopLeft, TopCenter, TopRight],
            WinningLine::MiddleRow => [MiddleLeft, Center, MiddleRight],
            WinningLine::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            WinningLine::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            WinningLine::CenterColumn => [TopCenter, Center, BottomCenter],
            WinningLine::RightColumn => [TopRight, MiddleRight, BottomRight],
            WinningLine::MainDiagonal => [TopLeft, Center, BottomRight],
            WinningLine::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// Whether this is a row, column or diagonal.
    pub fn kind(self) -> LineKind {
        match self.id() {
            0..=2 => LineKind::Row,
            3..=5 => LineKind::Column,
            _ => LineKind::Diagonal,
        }
    }
}

/// Outcome of the board currently in play.
///
/// Always recomputed from a board, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line yet and at least one empty square.
    InProgress,
    /// `player` holds all three cells of `line`.
    Winner {
        /// The winning mark.
        player: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// Board full without a line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<WinningLine> {
        match self {
            Outcome::Winner { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// True once the game has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Winner { player, .. } => write!(f, "Winner: {}", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
