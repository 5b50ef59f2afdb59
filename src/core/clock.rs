//! Time capability.
//!
//! The session never reads wall-clock time directly. It asks an injected
//! [`Clock`] for "now" as a `Duration` since some fixed origin, which keeps
//! the engine testable without real waits.
//!
//! ```
//! use std::time::Duration;
//! use rust_concentration::core::{Clock, ManualClock, Stopwatch};
//!
//! let clock = ManualClock::new();
//! let mut watch = Stopwatch::new();
//!
//! watch.start(clock.now());
//! clock.advance(Duration::from_secs(75));
//! assert_eq!(watch.elapsed(clock.now()), Duration::from_secs(75));
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock {
    /// Time elapsed since this clock's origin.
    fn now(&self) -> Duration;
}

/// Monotonic system clock. Its origin is the moment it was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven clock.
///
/// Clones share the same time, so a host (or a test) can keep one handle
/// and advance it while the session holds another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Elapsed-time measurement for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<Duration>,
    stopped_at: Option<Duration>,
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring. Restarting a running stopwatch is a no-op.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.stopped_at = None;
        }
    }

    /// Freeze the measurement at `now`.
    pub fn stop(&mut self, now: Duration) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Elapsed time as of `now` (or as of the stop, once stopped).
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        match (self.started_at, self.stopped_at) {
            (None, _) => Duration::ZERO,
            (Some(start), Some(stop)) => stop.saturating_sub(start),
            (Some(start), None) => now.saturating_sub(start),
        }
    }
}

/// Render elapsed time the way the game's timer shows it.
///
/// ```
/// use std::time::Duration;
/// use rust_concentration::core::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(83)), "1 minutes and 23 seconds");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{} minutes and {} seconds", secs / 60, secs % 60)
}
