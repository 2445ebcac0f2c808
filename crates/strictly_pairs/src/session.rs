//! The game-session state machine.
//!
//! A [`GameSession`] owns the authoritative [`SessionState`] and is the only
//! thing that mutates it. Selections arrive through [`GameSession::select_card`];
//! completing a pair hands a [`ResolutionTicket`] to the injected [`Scheduler`],
//! and the driver feeds the ticket back through
//! [`GameSession::resolve_selection`] once the delay has elapsed. Every
//! (re)initialization bumps the session generation so tickets issued for a
//! replaced board are rejected instead of applied.

use crate::action::{Resolution, ResolutionTicket, SelectOutcome, SelectionError};
use crate::config::SessionConfig;
use crate::content::ContentSource;
use crate::contracts::{Contract, SelectionContract, assert_invariants, assert_selection};
use crate::difficulty::LevelSpec;
use crate::error::{SessionError, StaleResolution};
use crate::events::{SessionEvent, SessionObserver, SessionSnapshot};
use crate::pairing::build_cards;
use crate::rules;
use crate::scheduler::Scheduler;
use crate::state::SessionState;
use crate::types::{CardContent, CardId, Theme};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A playable pairs session.
pub struct GameSession<C, S> {
    content: C,
    scheduler: S,
    theme: Theme,
    resolve_delay: Duration,
    rng: StdRng,
    generation: u64,
    state: SessionState,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<C, S> std::fmt::Debug for GameSession<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("theme", &self.theme)
            .field("generation", &self.generation)
            .field("phase", &self.state.phase())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<C: ContentSource, S: Scheduler> GameSession<C, S> {
    /// Starts a session at `config.level`, fetching content for it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the content source fails or supplies
    /// fewer distinct items than the level needs.
    #[instrument(skip(content, scheduler), fields(level = config.level(), theme = %config.theme()))]
    pub async fn start(config: SessionConfig, content: C, scheduler: S) -> Result<Self, SessionError> {
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        let theme = *config.theme();
        let state = prepare_level(&content, theme, *config.level(), &mut rng).await?;

        info!(
            level = state.level(),
            pairs_needed = state.pairs_needed(),
            max_moves = state.max_moves(),
            "Session started"
        );

        Ok(Self {
            content,
            scheduler,
            theme,
            resolve_delay: config.resolve_delay(),
            rng,
            generation: 1,
            state,
            observers: Vec::new(),
        })
    }

    /// Deals a fresh board for `level`, replacing the current one.
    ///
    /// The new board is built completely before it replaces the old state;
    /// on failure the current session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content cannot be obtained.
    #[instrument(skip(self), fields(generation = self.generation, theme = %self.theme))]
    pub async fn initialize(&mut self, level: u32) -> Result<(), SessionError> {
        let state = prepare_level(&self.content, self.theme, level, &mut self.rng)
            .await
            .inspect_err(|e| warn!(error = %e, "Level initialization failed; keeping current state"))?;

        self.generation += 1;
        self.state = state;
        info!(
            generation = self.generation,
            level = self.state.level(),
            pairs_needed = self.state.pairs_needed(),
            max_moves = self.state.max_moves(),
            "Level initialized"
        );

        assert_invariants(&self.state);
        self.emit_state();
        Ok(())
    }

    /// Same as [`GameSession::initialize`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content cannot be obtained.
    pub async fn restart(&mut self, level: u32) -> Result<(), SessionError> {
        self.initialize(level).await
    }

    /// Replays the current level with a fresh board.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content cannot be obtained.
    pub async fn try_again(&mut self) -> Result<(), SessionError> {
        self.initialize(self.state.level()).await
    }

    /// Advances to the next level. Only allowed once the level is won;
    /// otherwise nothing happens and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content cannot be obtained.
    pub async fn next_level(&mut self) -> Result<bool, SessionError> {
        if !self.state.is_won() {
            debug!(phase = %self.state.phase(), "Next level requested before winning");
            return Ok(false);
        }
        self.initialize(self.state.level().saturating_add(1)).await?;
        Ok(true)
    }

    /// Starts over from level 1.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content cannot be obtained.
    pub async fn new_game(&mut self) -> Result<(), SessionError> {
        self.initialize(1).await
    }

    /// Switches theme and starts over from level 1 with it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if content for the new theme cannot be
    /// obtained; the previous theme and board are kept.
    #[instrument(skip(self), fields(from = %self.theme))]
    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), SessionError> {
        let previous = std::mem::replace(&mut self.theme, theme);
        if let Err(e) = self.initialize(1).await {
            self.theme = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl<C, S: Scheduler> GameSession<C, S> {
    /// Turns a card face up.
    ///
    /// Ignored (state untouched) while a pair is resolving, once two cards
    /// are up, after the level ended, or for unknown, face-up and matched
    /// cards. The second accepted card schedules the pair's resolution.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn select_card(&mut self, card_id: &CardId) -> SelectOutcome {
        if let Err(reason) = SelectionContract::pre(&self.state, card_id) {
            debug!(%reason, "Selection ignored");
            return SelectOutcome::Ignored(reason);
        }
        let before = cfg!(debug_assertions).then(|| self.state.clone());

        if let Some(card) = self.state.card_mut(card_id) {
            card.is_flipped = true;
        }
        self.state.push_selected(card_id.clone());
        debug!(selected = self.state.selected().len(), "Card flipped");
        self.emit(SessionEvent::CardFlipped {
            card_id: card_id.clone(),
        });

        let outcome = match self.state.selected() {
            [first, second] => {
                let ticket = ResolutionTicket::new(self.generation, first.clone(), second.clone());
                self.state.set_resolving(true);
                self.scheduler.schedule(self.resolve_delay, ticket.clone());
                debug!(delay_ms = self.resolve_delay.as_millis() as u64, "Resolution scheduled");
                SelectOutcome::AwaitingResolution(ticket)
            }
            _ => SelectOutcome::Flipped(card_id.clone()),
        };

        if let Some(before) = &before {
            assert_selection(before, &self.state);
        }
        self.emit_state();
        outcome
    }

    /// Turns the card at grid position `index` face up.
    pub fn select_index(&mut self, index: usize) -> SelectOutcome {
        match self.state.cards().get(index).map(|c| c.card_id.clone()) {
            Some(card_id) => self.select_card(&card_id),
            None => {
                debug!(index, "Selection outside the board ignored");
                SelectOutcome::Ignored(SelectionError::NoCardAtIndex(index))
            }
        }
    }

    /// Resolves the pending pair named by `ticket`.
    ///
    /// A match marks both cards matched and may win the level; a miss turns
    /// both back and spends a move, which may lose it. Winning is checked
    /// first, so a final match never counts as a loss.
    ///
    /// # Errors
    ///
    /// Returns [`StaleResolution`] (and changes nothing) if the ticket was
    /// issued by a replaced board or does not name the pending pair.
    #[instrument(skip(self, ticket), fields(generation = self.generation, ticket_generation = ticket.generation))]
    pub fn resolve_selection(&mut self, ticket: ResolutionTicket) -> Result<Resolution, StaleResolution> {
        let pending = matches!(
            self.state.selected(),
            [first, second] if *first == ticket.first && *second == ticket.second
        );
        if ticket.generation != self.generation || !self.state.is_resolving() || !pending {
            return Err(StaleResolution::new(ticket, self.generation));
        }

        let ResolutionTicket { first, second, .. } = ticket;
        self.state.take_selected();

        let matched_content = match (self.state.card(&first), self.state.card(&second)) {
            (Some(a), Some(b)) if rules::is_match(a, b) => Some(a.content_id.clone()),
            _ => None,
        };

        for id in [&first, &second] {
            if let Some(card) = self.state.card_mut(id) {
                if matched_content.is_some() {
                    card.is_matched = true;
                } else {
                    card.is_flipped = false;
                }
            }
        }
        match matched_content {
            Some(_) => self.state.record_match(),
            None => self.state.record_miss(),
        }
        self.state.set_resolving(false);

        let won = rules::is_won(self.state.matches(), self.state.pairs_needed());
        let lost = rules::is_lost(self.state.moves(), self.state.max_moves(), won);
        if won {
            self.state.set_won();
        } else if lost {
            self.state.set_lost();
        }

        debug!(
            matched = matched_content.is_some(),
            moves = self.state.moves(),
            matches = self.state.matches(),
            "Selection resolved"
        );

        let resolution = match matched_content {
            Some(content_id) => {
                self.emit(SessionEvent::PairMatched {
                    content_id: content_id.clone(),
                    first,
                    second,
                });
                if won { Resolution::Won } else { Resolution::Match(content_id) }
            }
            None => {
                self.emit(SessionEvent::PairMismatched { first, second });
                if lost { Resolution::Lost } else { Resolution::Mismatch }
            }
        };

        if won {
            info!(level = self.state.level(), moves = self.state.moves(), "Level won");
            self.emit(SessionEvent::GameWon {
                level: self.state.level(),
                moves: self.state.moves(),
            });
        } else if lost {
            info!(
                level = self.state.level(),
                matches = self.state.matches(),
                pairs_needed = self.state.pairs_needed(),
                "Level lost"
            );
            self.emit(SessionEvent::GameLost {
                level: self.state.level(),
                matches: self.state.matches(),
                pairs_needed: self.state.pairs_needed(),
            });
        }

        assert_invariants(&self.state);
        self.emit_state();
        Ok(resolution)
    }
}

impl<C, S> GameSession<C, S> {
    /// Registers an observer and immediately sends it the current snapshot.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        let mut observer: Box<dyn SessionObserver> = Box::new(observer);
        observer.on_event(&SessionEvent::StateChanged(self.snapshot()));
        self.observers.push(observer);
    }

    /// Full snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            theme: self.theme,
            phase: self.state.phase(),
            state: self.state.clone(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Generation of the current board; bumps on every (re)initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Theme in use.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The injected content source.
    pub fn content(&self) -> &C {
        &self.content
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn emit_state(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let event = SessionEvent::StateChanged(self.snapshot());
        self.emit(event);
    }
}

/// Fetches content for `level` and deals a complete board, or fails without side effects.
async fn prepare_level<C: ContentSource + ?Sized>(
    content: &C,
    theme: Theme,
    level: u32,
    rng: &mut StdRng,
) -> Result<SessionState, SessionError> {
    let spec = LevelSpec::for_level(level);
    let requested = spec.pairs_needed as usize;

    let fetched = content.fetch_content(requested, theme).await?;
    let distinct = take_distinct(fetched, requested);
    if distinct.len() < requested {
        warn!(requested, supplied = distinct.len(), "Content source under-supplied");
        return Err(SessionError::ContentUnavailable {
            requested,
            supplied: distinct.len(),
        });
    }

    let cards = build_cards(&distinct, rng);
    Ok(SessionState::new(spec, cards))
}

/// Keeps the first `limit` items with distinct content ids.
fn take_distinct(items: Vec<CardContent>, limit: usize) -> Vec<CardContent> {
    let mut seen = HashSet::with_capacity(limit);
    items
        .into_iter()
        .filter(|item| seen.insert(item.content_id.clone()))
        .take(limit)
        .collect()
}
