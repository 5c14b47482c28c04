//! Reward batches offered after a won battle.

pub mod generator;

pub use generator::{RewardGenerator, RewardKind, RewardOption, REWARD_SLOTS};
