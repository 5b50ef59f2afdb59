//! Game sessions.
//!
//! - `state`: the authoritative `Session` (deck, selection, counters)
//! - `scheduler`: cancellable deferred tasks
//! - `controller`: start/restart/select/tick and event fan-out

pub mod controller;
pub mod scheduler;
pub mod state;

pub use controller::{SessionController, SessionSnapshot};
pub use scheduler::{Scheduler, TaskId};
pub use state::{Selection, Session, SessionStatus};
