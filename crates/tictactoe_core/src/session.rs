//! Game session: the controller, the computer player and the one pending
//! computer move.
//!
//! Every command re-syncs the pending move afterwards. A pending ticket
//! whose version no longer matches the controller is cancelled,
//! and a new one is scheduled when the computer is due. A ticket that
//! fires anyway after the state moved on is discarded in
//! [`GameSession::fire`].

use super::action::{Move, MoveError};
use super::computer::ComputerPlayer;
use super::config::SessionConfig;
use super::controller::{GameEvent, TurnController};
use super::scheduler::{Cancel, Scheduler, TurnTicket};
use super::{Board, Outcome, Player, PlayerMode};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

struct Pending<H> {
    ticket: TurnTicket,
    handle: H,
}

/// A game as seen by the presentation layer.
pub struct GameSession<S: Scheduler> {
    controller: TurnController,
    computer: ComputerPlayer,
    scheduler: S,
    delay: Duration,
    pending: Option<Pending<S::Handle>>,
}

impl<S: Scheduler> GameSession<S> {
    /// Session configured from `config`, scheduling through `scheduler`.
    #[instrument(skip(scheduler))]
    pub fn new(config: &SessionConfig, scheduler: S) -> Self {
        let computer = match config.seed() {
            Some(seed) => ComputerPlayer::new(*seed),
            None => ComputerPlayer::from_random(),
        };
        info!(seed = computer.seed(), delay_ms = *config.computer_delay_ms(), "Session created");
        Self::with_computer(computer, config.computer_delay(), scheduler)
    }

    /// Session with an explicit computer player and delay.
    pub fn with_computer(computer: ComputerPlayer, delay: Duration, scheduler: S) -> Self {
        Self {
            controller: TurnController::new(),
            computer,
            scheduler,
            delay,
            pending: None,
        }
    }

    /// Registers a listener for state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.controller.subscribe(listener);
    }

    // ─────────────────────────────────────────────────────────
    //  Reads
    // ─────────────────────────────────────────────────────────

    /// The underlying controller.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Board at the history cursor.
    pub fn current_board(&self) -> &Board {
        self.controller.current_board()
    }

    /// Outcome of the board at the cursor.
    pub fn current_outcome(&self) -> Outcome {
        self.controller.current_outcome()
    }

    /// Number of snapshots, including the empty start.
    pub fn history_len(&self) -> usize {
        self.controller.history_len()
    }

    /// Index of the snapshot in play.
    pub fn current_move_index(&self) -> usize {
        self.controller.current_move_index()
    }

    /// Mark to move, if a symbol was selected.
    pub fn to_move(&self) -> Option<Player> {
        self.controller.to_move()
    }

    /// Current player mode.
    pub fn player_mode(&self) -> PlayerMode {
        self.controller.player_mode()
    }

    /// Computer's mark in single-player games.
    pub fn computer_mark(&self) -> Option<Player> {
        self.controller.computer_mark()
    }

    /// Ticket of the computer move waiting to fire, if any.
    pub fn pending_ticket(&self) -> Option<TurnTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// The scheduler, for drivers that need to inspect it.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // ─────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────

    /// Human move at `cell`. Rejected while the computer is due.
    pub fn apply_move(&mut self, cell: usize) -> Result<Move, MoveError> {
        if self.controller.computer_due() {
            debug!(cell, "Human move while computer is due");
            return Err(MoveError::ComputersTurn);
        }
        let result = self.controller.apply_move(cell);
        self.sync();
        result
    }

    /// Moves the history cursor.
    pub fn jump_to(&mut self, move_index: usize) -> Result<(), MoveError> {
        let result = self.controller.jump_to(move_index);
        self.sync();
        result
    }

    /// Starts over.
    pub fn reset_game(&mut self) {
        self.controller.reset_game();
        self.sync();
    }

    /// Chooses the mark that moves first.
    pub fn select_symbol(&mut self, mark: Player) -> Result<(), MoveError> {
        let result = self.controller.select_symbol(mark);
        self.sync();
        result
    }

    /// Chooses single- or two-player.
    pub fn set_player_mode(&mut self, mode: PlayerMode) -> Result<(), MoveError> {
        let result = self.controller.set_player_mode(mode);
        self.sync();
        result
    }

    /// Delivers a ticket whose delay elapsed.
    ///
    /// Plays the computer's move when `ticket` is the pending one and the
    /// state it was issued for is still current. Anything else is ignored.
    #[instrument(skip(self), fields(version = self.controller.version()))]
    pub fn fire(&mut self, ticket: TurnTicket) -> Option<Move> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                debug!("Ignoring ticket that is not pending");
                return None;
            }
        }
        // Fired; the handle has nothing left to cancel.
        self.pending = None;

        if ticket.version() != self.controller.version() || !self.controller.computer_due() {
            warn!("Discarding stale computer move");
            self.sync();
            return None;
        }

        let played = self.play_computer_move();
        self.sync();
        played
    }

    fn play_computer_move(&mut self) -> Option<Move> {
        let mark = self.controller.computer_mark()?;
        let position = self.computer.choose(self.controller.current_board(), mark)?;
        match self.controller.apply_move(position.to_index()) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!(error = %e, %position, "Computer move rejected");
                None
            }
        }
    }

    fn sync(&mut self) {
        let version = self.controller.version();

        if let Some(pending) = self.pending.take_if(|p| p.ticket.version() != version) {
            debug!(stale = pending.ticket.version(), version, "Cancelling computer move");
            pending.handle.cancel();
        }

        if self.pending.is_none() && self.controller.computer_due() {
            let ticket = TurnTicket::new(version);
            debug!(version, delay_ms = self.delay.as_millis() as u64, "Scheduling computer move");
            let handle = self.scheduler.schedule(self.delay, ticket);
            self.pending = Some(Pending { ticket, handle });
        }
    }
}

impl<S: Scheduler> Drop for GameSession<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.cancel();
        }
    }
}
