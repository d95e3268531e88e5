//! Turn controller: the owned game state and every command that changes it.
//!
//! Whose turn it is is never stored. It follows from the starting mark and
//! the parity of the history cursor, so jumping through history always
//! lands on the right player.

use super::action::{Move, MoveError};
use super::contracts::LegalMove;
#[cfg(debug_assertions)]
use super::contracts::{Contract, MoveContract};
use super::{Board, MoveHistory, Outcome, Player, PlayerMode, rules};
use tracing::{debug, info, instrument};

/// State change notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player mode chosen.
    ModeSelected(PlayerMode),
    /// Starting mark chosen.
    SymbolSelected {
        /// Mark that moves first.
        first: Player,
        /// Computer's mark in single-player games.
        computer: Option<Player>,
    },
    /// A move was committed.
    MovePlayed {
        /// The move.
        action: Move,
        /// History index of the resulting snapshot.
        move_index: usize,
    },
    /// The cursor moved to an earlier (or later) snapshot.
    Jumped {
        /// New history index.
        move_index: usize,
        /// Mark to move at that snapshot.
        to_move: Option<Player>,
    },
    /// The last move finished the game.
    GameOver(Outcome),
    /// Everything was cleared for a new game.
    Reset,
}

/// Callback invoked after every accepted state transition.
pub type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Owns the move history and enforces turns.
pub struct TurnController {
    history: MoveHistory,
    mode: PlayerMode,
    starting_mark: Option<Player>,
    version: u64,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("history", &self.history)
            .field("mode", &self.mode)
            .field("starting_mark", &self.starting_mark)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TurnController {
    /// Fresh controller: empty board, no mode, no symbol.
    pub fn new() -> Self {
        Self {
            history: MoveHistory::new(),
            mode: PlayerMode::Unset,
            starting_mark: None,
            version: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ─────────────────────────────────────────────────────────
    //  Reads
    // ─────────────────────────────────────────────────────────

    /// Board at the history cursor.
    pub fn current_board(&self) -> &Board {
        self.history.current()
    }

    /// Outcome of the board at the cursor.
    pub fn current_outcome(&self) -> Outcome {
        rules::evaluate(self.current_board())
    }

    /// The full history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Number of snapshots, including the empty start.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the snapshot in play.
    pub fn current_move_index(&self) -> usize {
        self.history.cursor()
    }

    /// Current player mode.
    pub fn player_mode(&self) -> PlayerMode {
        self.mode
    }

    /// Mark chosen to move first, if any.
    pub fn starting_mark(&self) -> Option<Player> {
        self.starting_mark
    }

    /// Mark to move at the cursor; `None` until a symbol is selected.
    pub fn to_move(&self) -> Option<Player> {
        let first = self.starting_mark?;
        if self.history.cursor() % 2 == 0 {
            Some(first)
        } else {
            Some(first.opponent())
        }
    }

    /// The computer's mark: the one not selected, in single-player games.
    pub fn computer_mark(&self) -> Option<Player> {
        match self.mode {
            PlayerMode::SinglePlayer => self.starting_mark.map(Player::opponent),
            _ => None,
        }
    }

    /// True when the computer should move on the board in play.
    pub fn computer_due(&self) -> bool {
        match (self.computer_mark(), self.to_move()) {
            (Some(computer), Some(next)) => {
                computer == next && !self.current_outcome().is_over()
            }
            _ => false,
        }
    }

    /// Counter bumped by every accepted transition.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ─────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────

    /// Places the mark to move at `cell`.
    ///
    /// Rejected commands leave every piece of state untouched.
    #[instrument(skip(self), fields(version = self.version, cursor = self.history.cursor()))]
    pub fn apply_move(&mut self, cell: usize) -> Result<Move, MoveError> {
        let action = LegalMove::check(self, cell).inspect_err(|e| {
            debug!(reason = %e, "Move rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.history.clone();

        let next = self.current_board().with_mark(action.position, action.player);
        self.history.commit(next);

        #[cfg(debug_assertions)]
        if let Err(violations) = MoveContract::post(&before, &self.history) {
            panic!("move postcondition violated: {:?}", violations);
        }

        let move_index = self.history.cursor();
        info!(%action, move_index, "Move played");
        self.bump(GameEvent::MovePlayed { action, move_index });

        let outcome = self.current_outcome();
        if outcome.is_over() {
            info!(%outcome, "Game over");
            self.notify(GameEvent::GameOver(outcome));
        }

        Ok(action)
    }

    /// Moves the cursor to `move_index`. Out-of-range indices change nothing.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, move_index: usize) -> Result<(), MoveError> {
        if !self.history.jump_to(move_index) {
            return Err(MoveError::NoSuchMove(move_index));
        }
        let to_move = self.to_move();
        debug!(?to_move, "Jumped through history");
        self.bump(GameEvent::Jumped {
            move_index,
            to_move,
        });
        Ok(())
    }

    /// Clears history, mode and symbol.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.history.reset();
        self.mode = PlayerMode::Unset;
        self.starting_mark = None;
        info!("Game reset");
        self.bump(GameEvent::Reset);
    }

    /// Chooses the mark that moves first. Only once per game.
    #[instrument(skip(self))]
    pub fn select_symbol(&mut self, mark: Player) -> Result<(), MoveError> {
        if self.starting_mark.is_some() {
            return Err(MoveError::SymbolAlreadySelected);
        }
        self.starting_mark = Some(mark);
        let computer = self.computer_mark();
        info!(first = %mark, ?computer, "Symbol selected");
        self.bump(GameEvent::SymbolSelected {
            first: mark,
            computer,
        });
        Ok(())
    }

    /// Chooses single- or two-player. Only once per game, and only before a
    /// symbol is selected.
    #[instrument(skip(self))]
    pub fn set_player_mode(&mut self, mode: PlayerMode) -> Result<(), MoveError> {
        if mode == PlayerMode::Unset
            || self.mode != PlayerMode::Unset
            || self.starting_mark.is_some()
        {
            return Err(MoveError::ModeLocked(mode));
        }
        self.mode = mode;
        info!(%mode, "Player mode selected");
        self.bump(GameEvent::ModeSelected(mode));
        Ok(())
    }

    fn bump(&mut self, event: GameEvent) {
        self.version += 1;
        self.notify(event);
    }

    fn notify(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}
