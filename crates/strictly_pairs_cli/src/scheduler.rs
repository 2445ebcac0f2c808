//! Tokio timer scheduler.

use std::time::Duration;
use strictly_pairs::{ResolutionTicket, Scheduler};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Delivers tickets over a channel after sleeping on the tokio timer.
///
/// The receiving end belongs to the loop that owns the session, so the
/// session is only ever touched from one task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<ResolutionTicket>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ResolutionTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self), fields(generation = ticket.generation))]
    fn schedule(&self, delay: Duration, ticket: ResolutionTicket) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!("Ticket receiver dropped, discarding resolution");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_pairs::CardId;

    #[tokio::test]
    async fn test_ticket_arrives_after_delay() {
        let (scheduler, mut rx) = TokioScheduler::new();
        let ticket = ResolutionTicket::new(1, CardId::from("a-1"), CardId::from("a-2"));
        let started = tokio::time::Instant::now();
        scheduler.schedule(Duration::from_millis(20), ticket.clone());

        let received = rx.recv().await.expect("ticket delivered");
        assert_eq!(received, ticket);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_shorter_delay_arrives_first() {
        let (scheduler, mut rx) = TokioScheduler::new();
        let slow = ResolutionTicket::new(1, CardId::from("a-1"), CardId::from("a-2"));
        let fast = ResolutionTicket::new(2, CardId::from("b-1"), CardId::from("b-2"));
        scheduler.schedule(Duration::from_millis(200), slow);
        scheduler.schedule(Duration::from_millis(5), fast.clone());

        assert_eq!(rx.recv().await.expect("delivered"), fast);
    }
}
