//! Core engine types: RNG, configuration, errors, time.
//!
//! These are the board-agnostic building blocks. Boards are described by a
//! `GameConfig` rather than by changing the core.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{format_elapsed, Clock, ManualClock, Stopwatch, SystemClock};
pub use config::{GameConfig, CLASSIC_SYMBOLS, DEFAULT_REVERT_DELAY_MS};
pub use error::{GameError, Result};
pub use rng::GameRng;
