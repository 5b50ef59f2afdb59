//! # rust-concentration
//!
//! Session engine for the memory-matching ("concentration") card game: a
//! grid of face-down cards, the player flips two at a time, matching pairs
//! stay face up, and the game counts moves, time and stars until every pair
//! is found.
//!
//! ## Design Principles
//!
//! 1. **Rules Only**: No rendering, styling or asset handling. The view
//!    sends intents (`select_card`, `restart`) and renders events.
//!
//! 2. **Injected Time**: The engine asks a `Clock` for time and never
//!    sleeps. Deferred work runs when the host calls `tick`.
//!
//! 3. **Disposable Sessions**: Every deal is a new `Session`. Nothing,
//!    including pending timers, survives a restart.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors, clock
//! - `cards`: Card identity and deck generation
//! - `rules`: Selection resolver and star rating
//! - `session`: Session state, deferred tasks, controller
//! - `events`: Session events and subscriptions

pub mod core;
pub mod cards;
pub mod rules;
pub mod session;
pub mod events;

// Re-export commonly used types
pub use crate::core::{
    format_elapsed, Clock, GameConfig, GameError, GameRng, ManualClock, Result, Stopwatch,
    SystemClock,
};

pub use crate::cards::{Card, CardId, CardStatus, Deck, Symbol};

pub use crate::rules::{rating, IgnoreReason, Rating, RatingThresholds, Resolution};

pub use crate::session::{Session, SessionController, SessionSnapshot, SessionStatus};

pub use crate::events::{EventBus, SessionEvent, Subscriber, SubscriptionId};
