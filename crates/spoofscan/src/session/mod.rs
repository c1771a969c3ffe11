//! Scanning session lifecycle: idle, running, results, fatal.

mod driver;
mod state;

pub use driver::{Session, BATCH_CANCELLED};
pub use state::{transition, SessionEvent, SessionPhase, SessionState};
