//! Session controller.
//!
//! The controller is the surface the view talks to. It owns the live
//! `Session`, the RNG used for dealing, the deferred-task queue and the
//! event bus, and turns discrete intents into state changes:
//!
//! - `start` / `restart`: deal a fresh deck into a new session
//! - `select_card`: run the resolver, schedule mismatch reverts
//! - `tick`: fire due reverts and report elapsed time
//!
//! Every state-leaving transition (restart, win) cancels pending tasks, and
//! each task carries the generation of the session that queued it, so a
//! revert can never touch a deck dealt after it was scheduled.
//!
//! ```
//! use std::time::Duration;
//! use rust_concentration::cards::{CardId, Deck};
//! use rust_concentration::core::{GameConfig, ManualClock};
//! use rust_concentration::session::{SessionController, SessionStatus};
//!
//! let clock = ManualClock::new();
//! let mut game = SessionController::with_clock(GameConfig::default(), clock.clone()).unwrap();
//! game.start_with_deck(Deck::arranged(["x", "y", "x", "y"]).unwrap());
//!
//! game.select_card(CardId::new(0)).unwrap();
//! game.select_card(CardId::new(2)).unwrap();
//! game.select_card(CardId::new(1)).unwrap();
//! game.select_card(CardId::new(3)).unwrap();
//!
//! assert_eq!(game.status(), SessionStatus::Won);
//! assert_eq!(game.moves_taken(), 2);
//! ```

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::scheduler::Scheduler;
use super::state::{Session, SessionStatus};
use crate::cards::{Card, CardId, CardStatus, Deck};
use crate::core::error::Result;
use crate::core::{format_elapsed, Clock, GameConfig, GameRng, SystemClock};
use crate::events::{EventBus, SessionEvent, Subscriber, SubscriptionId};
use crate::rules::{resolve, revert_mismatch, Rating, Resolution};

/// Deferred flip-back of a mismatched pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RevertTask {
    generation: u64,
    pair: [CardId; 2],
}

/// Read-only view of the live session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cards: Vector<Card>,
    pub selection: Vec<CardId>,
    pub moves_taken: u32,
    pub pairs_matched: u32,
    pub total_pairs: u32,
    pub status: SessionStatus,
    pub rating: Rating,
    pub elapsed: Duration,
}

/// Drives game sessions on behalf of the view.
pub struct SessionController<C: Clock = SystemClock> {
    config: GameConfig,
    clock: C,
    rng: GameRng,
    session: Session,
    scheduler: Scheduler<RevertTask>,
    events: EventBus,
    generation: u64,
    /// Lowest rating announced so far this session.
    shown_rating: Rating,
}

impl SessionController<SystemClock> {
    /// Create a controller on the system clock and deal the first deck.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> SessionController<C> {
    /// Create a controller with an injected clock and deal the first deck.
    ///
    /// Fails with `InvalidConfig` if the configuration can't produce a board.
    pub fn with_clock(config: GameConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let deck = Deck::build(&config.symbols, &mut rng)?;
        info!(
            seed = rng.seed(),
            pairs = deck.pair_count(),
            revert_delay_ms = config.revert_delay_ms,
            "session controller created"
        );

        let shown_rating = config.rating.rate(0);
        Ok(Self {
            config,
            clock,
            rng,
            session: Session::new(deck, 0),
            scheduler: Scheduler::new(),
            events: EventBus::new(),
            generation: 0,
            shown_rating,
        })
    }

    // === Commands ===

    /// Deal a fresh deck into a new session.
    ///
    /// Discards the current session and cancels all of its pending work.
    pub fn start(&mut self) -> Result<()> {
        let deck = Deck::build(&self.config.symbols, &mut self.rng)?;
        self.install(deck);
        Ok(())
    }

    /// Abandon the current session and start over.
    pub fn restart(&mut self) -> Result<()> {
        info!(
            generation = self.generation,
            status = ?self.session.status(),
            moves = self.session.moves_taken(),
            "restart"
        );
        self.start()
    }

    /// Start a new session on a fixed deck instead of a random deal.
    pub fn start_with_deck(&mut self, deck: Deck) {
        self.install(deck);
    }

    fn install(&mut self, deck: Deck) {
        self.scheduler.cancel_all();
        self.generation += 1;
        self.session = Session::new(deck, self.generation);
        self.shown_rating = self.config.rating.rate(0);

        info!(
            generation = self.generation,
            pairs = self.session.total_pairs(),
            "deck dealt"
        );
        self.events.publish(&SessionEvent::Dealt {
            cards: self.session.deck().snapshot(),
            total_pairs: self.session.total_pairs(),
        });
    }

    /// Select (flip) a card.
    ///
    /// Inapplicable selections come back as `Resolution::Ignored` with no
    /// state change. An unknown id fails with `InvalidArgument`.
    pub fn select_card(&mut self, card: CardId) -> Result<Resolution> {
        let now = self.clock.now();
        let resolution = resolve(&mut self.session, card, now)?;

        let mut events = Vec::new();
        match resolution {
            Resolution::Ignored(_) => {}
            Resolution::Opened { card, started } => {
                if started {
                    events.push(SessionEvent::TimerStarted);
                }
                events.push(SessionEvent::CardChanged {
                    card,
                    status: CardStatus::Selected,
                });
            }
            Resolution::Mismatched { pair } => {
                events.push(SessionEvent::CardChanged {
                    card: pair[1],
                    status: CardStatus::Selected,
                });
                self.push_move_events(&mut events);

                let due = now + self.config.revert_delay();
                let task = self.scheduler.schedule(
                    due,
                    RevertTask {
                        generation: self.session.generation(),
                        pair,
                    },
                );
                debug!(%task, due_ms = due.as_millis() as u64, "revert scheduled");
            }
            Resolution::Matched { pair, won } => {
                for card in pair {
                    events.push(SessionEvent::CardChanged {
                        card,
                        status: CardStatus::Matched,
                    });
                }
                self.push_move_events(&mut events);
                events.push(SessionEvent::MatchProgressChanged {
                    pairs_matched: self.session.pairs_matched(),
                    total_pairs: self.session.total_pairs(),
                });

                if won {
                    self.scheduler.cancel_all();
                    let elapsed = self.session.elapsed(now);
                    let rating = self.rating();
                    info!(
                        moves = self.session.moves_taken(),
                        elapsed = %format_elapsed(elapsed),
                        stars = rating.stars(),
                        "game won"
                    );
                    events.push(SessionEvent::GameWon {
                        final_moves: self.session.moves_taken(),
                        elapsed,
                        rating,
                    });
                }
            }
        }

        self.events.publish_all(&events);
        Ok(resolution)
    }

    fn push_move_events(&mut self, events: &mut Vec<SessionEvent>) {
        events.push(SessionEvent::MovesChanged {
            moves: self.session.moves_taken(),
        });

        let rating = self.rating();
        if rating < self.shown_rating {
            self.shown_rating = rating;
            events.push(SessionEvent::RatingChanged { rating });
        }
    }

    /// Advance to the clock's current time.
    ///
    /// Fires due mismatch reverts and, while the session is running,
    /// reports the elapsed time. Returns how many reverts were applied.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut events = Vec::new();
        let mut applied = 0;

        for task in self.scheduler.take_due(now) {
            if task.generation != self.session.generation() {
                trace!(generation = task.generation, "stale revert dropped");
                continue;
            }
            if revert_mismatch(&mut self.session, task.pair) {
                applied += 1;
                for card in task.pair {
                    events.push(SessionEvent::CardChanged {
                        card,
                        status: CardStatus::Hidden,
                    });
                }
            }
        }

        if self.session.status() == SessionStatus::Running {
            events.push(SessionEvent::TimerTicked {
                elapsed: self.session.elapsed(now),
            });
        }

        self.events.publish_all(&events);
        applied
    }

    // === Subscriptions ===

    /// Register a callback for session events.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.events.subscribe(callback)
    }

    /// Register a [`Subscriber`] implementation.
    pub fn subscribe_with(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Snapshot of the cards in board order.
    #[must_use]
    pub fn deck(&self) -> Vector<Card> {
        self.session.deck().snapshot()
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.session.card(id)
    }

    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        self.session.selection()
    }

    #[must_use]
    pub fn moves_taken(&self) -> u32 {
        self.session.moves_taken()
    }

    #[must_use]
    pub fn pairs_matched(&self) -> u32 {
        self.session.pairs_matched()
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.session.total_pairs()
    }

    /// Current star rating, computed from moves taken.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.config.rating.rate(self.session.moves_taken())
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed(self.clock.now())
    }

    /// Elapsed time as the timer displays it.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }

    /// When the next tick has work to do, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn has_pending_revert(&self) -> bool {
        !self.scheduler.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cards: self.deck(),
            selection: self.selection().to_vec(),
            moves_taken: self.moves_taken(),
            pairs_matched: self.pairs_matched(),
            total_pairs: self.total_pairs(),
            status: self.status(),
            rating: self.rating(),
            elapsed: self.elapsed(),
        }
    }
}

impl<C: Clock> std::fmt::Debug for SessionController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("generation", &self.generation)
            .field("status", &self.session.status())
            .field("moves_taken", &self.session.moves_taken())
            .field("pairs_matched", &self.session.pairs_matched())
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameError, ManualClock};

    fn controller(layout: &[&str]) -> (SessionController<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = GameConfig::default().with_seed(1);
        let mut game = SessionController::with_clock(config, clock.clone()).unwrap();
        game.start_with_deck(Deck::arranged(layout.iter().copied()).unwrap());
        (game, clock)
    }

    fn id(i: u32) -> CardId {
        CardId::new(i)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let game = SessionController::new(GameConfig::default().with_seed(4)).unwrap();
        assert_eq!(game.status(), SessionStatus::Idle);
        assert_eq!(game.deck().len(), 16);
        assert_eq!(game.total_pairs(), 8);
        assert_eq!(game.rating(), Rating::ThreeStars);
    }

    #[test]
    fn test_invalid_config() {
        let err = SessionController::new(GameConfig::new(Vec::<&str>::new())).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn test_mismatch_reverts_after_delay() {
        let (mut game, clock) = controller(&["x", "y", "x", "y"]);
        game.select_card(id(0)).unwrap();
        game.select_card(id(1)).unwrap();

        assert_eq!(game.next_deadline(), Some(Duration::from_millis(800)));

        clock.advance(Duration::from_millis(799));
        assert_eq!(game.tick(), 0);
        assert_eq!(game.selection(), &[id(0), id(1)]);

        clock.advance(Duration::from_millis(1));
        assert_eq!(game.tick(), 1);
        assert!(game.selection().is_empty());
        assert!(game.card(id(0)).unwrap().is_hidden());
        assert!(game.card(id(1)).unwrap().is_hidden());
        assert!(!game.has_pending_revert());
    }

    #[test]
    fn test_restart_cancels_pending_revert() {
        let (mut game, clock) = controller(&["x", "y", "x", "y"]);
        game.select_card(id(0)).unwrap();
        game.select_card(id(1)).unwrap();

        game.restart().unwrap();
        assert!(!game.has_pending_revert());
        assert_eq!(game.status(), SessionStatus::Idle);
        assert_eq!(game.moves_taken(), 0);

        clock.advance(Duration::from_secs(5));
        assert_eq!(game.tick(), 0);
    }

    #[test]
    fn test_elapsed_display() {
        let (mut game, clock) = controller(&["x", "y", "x", "y"]);
        clock.advance(Duration::from_secs(10));
        game.select_card(id(0)).unwrap();
        clock.advance(Duration::from_secs(65));

        assert_eq!(game.elapsed(), Duration::from_secs(65));
        assert_eq!(game.elapsed_display(), "1 minutes and 5 seconds");
    }

    #[test]
    fn test_snapshot() {
        let (mut game, _clock) = controller(&["x", "y", "x", "y"]);
        game.select_card(id(3)).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cards.len(), 4);
        assert_eq!(snapshot.selection, vec![id(3)]);
        assert_eq!(snapshot.status, SessionStatus::Running);
        assert_eq!(snapshot.rating, Rating::ThreeStars);

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
