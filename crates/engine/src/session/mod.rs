mod controller;
mod state;

// Public API of the session subsystem.
pub use controller::{SessionController, SubmitOutcome};
pub use state::{BossMeter, SessionPhase, SessionProgress};
