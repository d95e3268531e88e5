//! Seam for deferring the computer's move.
//!
//! The core never sleeps. It hands a [`TurnTicket`] to a [`Scheduler`] and
//! gets back a handle it can cancel; whoever drives the clock passes the
//! ticket back to [`crate::GameSession::fire`] once the delay has elapsed.

use std::time::Duration;

/// Identifies the game state a computer move was scheduled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct TurnTicket {
    version: u64,
}

impl TurnTicket {
    /// Controller version when the ticket was issued.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A scheduled callback that can be withdrawn before it fires.
pub trait Cancel {
    /// Withdraws the callback. Calling this after it fired is harmless.
    fn cancel(self);
}

/// Runs "deliver this ticket after a delay".
pub trait Scheduler {
    /// Handle for withdrawing a scheduled ticket.
    type Handle: Cancel;

    /// Arranges for `ticket` to be handed back after `delay`.
    fn schedule(&mut self, delay: Duration, ticket: TurnTicket) -> Self::Handle;
}
