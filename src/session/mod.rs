//! Session lifecycle and engine events.

#[allow(clippy::module_inception)]
pub mod session;
pub mod event;

pub use session::{Session, SessionPhase};
pub use event::{EngineEvent, WinEvent};
