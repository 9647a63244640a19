#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod session;
pub mod timer;

pub use quiz_core::Clock;

pub use error::EngineError;
pub use event::EngineEvent;
pub use session::{BossMeter, SessionController, SessionPhase, SessionProgress, SubmitOutcome};
pub use timer::{TimerFire, TimerKind, TimerService};
