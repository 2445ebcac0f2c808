//! Feedback cues derived from semantic session events.

use std::io::Write;
use std::time::Duration;
use strictly_pairs::{SessionEvent, SessionObserver};
use tracing::{debug, info};

/// Delay before the win and lose cues, so they follow the last flip.
pub const OUTCOME_CUE_DELAY: Duration = Duration::from_millis(300);

/// A named feedback cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Cue {
    /// A card turned face up.
    Flip,
    /// A pair matched.
    Match,
    /// A pair missed.
    NoMatch,
    /// Level won.
    Win,
    /// Level lost.
    Lose,
}

impl Cue {
    /// Cue for `event`, if it has one.
    pub fn for_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::CardFlipped { .. } => Some(Cue::Flip),
            SessionEvent::PairMatched { .. } => Some(Cue::Match),
            SessionEvent::PairMismatched { .. } => Some(Cue::NoMatch),
            SessionEvent::GameWon { .. } => Some(Cue::Win),
            SessionEvent::GameLost { .. } => Some(Cue::Lose),
            SessionEvent::StateChanged(_) => None,
        }
    }

    /// How long to wait before playing the cue.
    pub fn delay(self) -> Duration {
        match self {
            Cue::Win | Cue::Lose => OUTCOME_CUE_DELAY,
            _ => Duration::ZERO,
        }
    }
}

/// Something that can play cues.
pub trait CueSink: Send {
    /// Plays `cue`, honouring [`Cue::delay`] if it can.
    fn play(&mut self, cue: Cue);
}

/// Collects cues in order.
impl CueSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Logs every cue and rings the terminal bell on win and lose.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring() {
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|_| err.flush()) {
            debug!(error = %e, "Failed to ring terminal bell");
        }
    }
}

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        info!(%cue, "Feedback cue");
        if !matches!(cue, Cue::Win | Cue::Lose) {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(cue.delay()).await;
                    TerminalBell::ring();
                });
            }
            Err(_) => TerminalBell::ring(),
        }
    }
}

/// Observer that turns session events into cues for a [`CueSink`].
#[derive(Debug, Default)]
pub struct FeedbackCues<K> {
    sink: K,
}

impl<K: CueSink> FeedbackCues<K> {
    /// Creates an observer playing into `sink`.
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// The sink cues are played into.
    pub fn sink(&self) -> &K {
        &self.sink
    }
}

impl<K: CueSink> SessionObserver for FeedbackCues<K> {
    fn on_event(&mut self, event: &SessionEvent) {
        if let Some(cue) = Cue::for_event(event) {
            debug!(%cue, event = event.kind(), "Playing cue");
            self.sink.play(cue);
        }
    }
}
