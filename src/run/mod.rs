//! Run orchestration.
//!
//! ## Key Types
//!
//! - `RunStateMachine`: Owns a run and drives the node state machine
//! - `RunState`: Progress, resources, roster and modifiers
//! - `RunPhase`: Current screen of the state machine
//! - `RunObserver` / `Notification`: Synchronous presentation callbacks
//!
//! GM / debug commands are implemented in `debug` as extra methods on
//! `RunStateMachine`.

mod debug;
pub mod machine;
pub mod observer;
pub mod state;

pub use machine::RunStateMachine;
pub use observer::{Notification, RunObserver};
pub use state::{RunInfo, RunOutcome, RunPhase, RunState};
