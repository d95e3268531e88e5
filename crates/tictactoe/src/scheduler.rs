//! Tokio-backed scheduler for the computer's move.

use std::time::Duration;
use tictactoe_core::{Cancel, Scheduler, TurnTicket};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::trace;

/// Sleeps on a tokio task, then sends the ticket back over a channel.
pub struct TokioScheduler {
    ticket_tx: mpsc::UnboundedSender<TurnTicket>,
}

impl TokioScheduler {
    /// Scheduler delivering fired tickets to `ticket_tx`.
    pub fn new(ticket_tx: mpsc::UnboundedSender<TurnTicket>) -> Self {
        Self { ticket_tx }
    }
}

/// Abort handle of a sleeping ticket task.
pub struct TaskHandle(AbortHandle);

impl Cancel for TaskHandle {
    fn cancel(self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TaskHandle;

    fn schedule(&mut self, delay: Duration, ticket: TurnTicket) -> Self::Handle {
        let tx = self.ticket_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(version = ticket.version(), "Ticket fired");
            // Receiver gone means the game loop has exited.
            let _ = tx.send(ticket);
        });
        TaskHandle(task.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticket_delivered_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        let _handle = scheduler.schedule(Duration::from_millis(5), TurnTicket::new(3));
        let ticket = rx.recv().await.unwrap();
        assert_eq!(ticket.version(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_ticket_never_arrives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        scheduler
            .schedule(Duration::from_millis(20), TurnTicket::new(1))
            .cancel();
        let _keep = scheduler.schedule(Duration::from_millis(40), TurnTicket::new(2));

        let ticket = rx.recv().await.unwrap();
        assert_eq!(ticket.version(), 2);
    }
}
