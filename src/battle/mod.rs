//! Battle resolution.
//!
//! `BattleScorer` turns a team, its modifiers and the node context into a
//! `BattleReport`. It is a pure function of its inputs, so every scenario
//! can be tested exhaustively without seeding anything.

pub mod scorer;

pub use scorer::{enemy_baseline, BattleBreakdown, BattleContext, BattleOutcome, BattleReport, BattleScorer};
