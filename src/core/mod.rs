//! Core engine types: RNG, configuration, errors, tag counting.
//!
//! Everything here is independent of the concrete game content and is
//! shared by the generators and the run state machine.

pub mod config;
pub mod error;
pub mod rng;
pub mod tags;

pub use config::RunConfig;
pub use error::ContentError;
pub use rng::RandomSource;
pub use tags::{TagCounts, ACTIVE_TAG_THRESHOLD};
