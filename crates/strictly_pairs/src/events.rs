//! Outbound notifications: state snapshots and semantic game events.

use crate::phases::Phase;
use crate::state::SessionState;
use crate::types::{CardId, ContentId, Theme};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Everything a view needs to render the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Generation of the session that produced this snapshot.
    pub generation: u64,
    /// Theme in use.
    pub theme: Theme,
    /// Derived phase.
    pub phase: Phase,
    /// Full state.
    pub state: SessionState,
}

/// Event emitted by a session after it mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The state changed; carries a full snapshot.
    StateChanged(SessionSnapshot),
    /// A card turned face up.
    CardFlipped {
        /// The flipped card.
        card_id: CardId,
    },
    /// Two selected cards formed a pair.
    PairMatched {
        /// Shared content.
        content_id: ContentId,
        /// First selected card.
        first: CardId,
        /// Second selected card.
        second: CardId,
    },
    /// Two selected cards did not match and turned back.
    PairMismatched {
        /// First selected card.
        first: CardId,
        /// Second selected card.
        second: CardId,
    },
    /// The level was won.
    GameWon {
        /// Level won.
        level: u32,
        /// Misses spent.
        moves: u32,
    },
    /// The level was lost.
    GameLost {
        /// Level lost.
        level: u32,
        /// Pairs found before running out.
        matches: u32,
        /// Pairs that were needed.
        pairs_needed: u32,
    },
}

impl SessionEvent {
    /// Short name of the event kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::StateChanged(_) => "state_changed",
            SessionEvent::CardFlipped { .. } => "card_flipped",
            SessionEvent::PairMatched { .. } => "pair_matched",
            SessionEvent::PairMismatched { .. } => "pair_mismatched",
            SessionEvent::GameWon { .. } => "game_won",
            SessionEvent::GameLost { .. } => "game_lost",
        }
    }
}

/// Subscriber to session events (presentation, feedback).
pub trait SessionObserver: Send {
    /// Called synchronously after each mutation, in emission order.
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent) + Send,
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}

/// Observer that keeps every event; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Kinds of the recorded events, in order, skipping state changes.
    pub fn semantic_kinds(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .filter(|e| !matches!(e, SessionEvent::StateChanged(_)))
            .map(SessionEvent::kind)
            .collect()
    }

    /// Latest snapshot seen.
    pub fn last_snapshot(&self) -> Option<SessionSnapshot> {
        self.events().into_iter().rev().find_map(|e| match e {
            SessionEvent::StateChanged(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SessionObserver for EventRecorder {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_tag() {
        let event = SessionEvent::CardFlipped {
            card_id: CardId::from("3-1"),
        };
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["event"], "card_flipped");
        assert_eq!(json["card_id"], "3-1");
    }

    #[test]
    fn test_recorder_clones_share_log() {
        let recorder = EventRecorder::new();
        let mut handle = recorder.clone();
        handle.on_event(&SessionEvent::GameWon { level: 2, moves: 4 });

        assert_eq!(recorder.semantic_kinds(), vec!["game_won"]);
        recorder.clear();
        assert!(handle.events().is_empty());
    }

    #[test]
    fn test_closures_are_observers() {
        let mut seen = 0;
        {
            let mut observer = |_: &SessionEvent| seen += 1;
            observer.on_event(&SessionEvent::GameWon { level: 1, moves: 0 });
        }
        assert_eq!(seen, 1);
    }
}
