//! Deferred resolution: the after-delay capability the session depends on.

use crate::action::ResolutionTicket;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default pause between revealing the second card and resolving the pair.
pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(1000);

/// Delivers a ticket back to the session's driver once `delay` has elapsed.
///
/// Implementations must not call into the session themselves; whoever owns
/// the session passes delivered tickets to `GameSession::resolve_selection`.
pub trait Scheduler {
    /// Schedules `ticket` for delivery after `delay`.
    fn schedule(&self, delay: Duration, ticket: ResolutionTicket);
}

/// A scheduled ticket with the delay it asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    /// Requested delay.
    pub delay: Duration,
    /// Ticket to deliver.
    pub ticket: ResolutionTicket,
}

/// Scheduler that queues tickets in memory until someone fires them.
///
/// No time passes: tests and synchronous drivers call [`ManualScheduler::pop`]
/// or [`ManualScheduler::drain`] when they want the delay to have elapsed.
/// Clones share one queue.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<VecDeque<Scheduled>>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pending ticket.
    pub fn pop(&self) -> Option<ResolutionTicket> {
        self.lock().pop_front().map(|s| s.ticket)
    }

    /// Takes every pending entry, oldest first.
    pub fn drain(&self) -> Vec<Scheduled> {
        self.lock().drain(..).collect()
    }

    /// Number of pending tickets.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Scheduled>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    #[instrument(skip(self), fields(generation = ticket.generation))]
    fn schedule(&self, delay: Duration, ticket: ResolutionTicket) {
        debug!(delay_ms = delay.as_millis() as u64, "Queued resolution");
        self.lock().push_back(Scheduled { delay, ticket });
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&self, delay: Duration, ticket: ResolutionTicket) {
        (**self).schedule(delay, ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardId;

    #[test]
    fn test_clones_share_queue_in_order() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.clone();

        handle.schedule(
            DEFAULT_RESOLVE_DELAY,
            ResolutionTicket::new(1, CardId::from("a-1"), CardId::from("b-1")),
        );
        handle.schedule(
            Duration::ZERO,
            ResolutionTicket::new(2, CardId::from("c-1"), CardId::from("d-1")),
        );

        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.pop().map(|t| t.generation), Some(1));
        let rest = scheduler.drain();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].delay, Duration::ZERO);
        assert_eq!(scheduler.pending(), 0);
    }
}
