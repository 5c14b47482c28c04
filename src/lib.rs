//! # xianxia-run
//!
//! Run-progression engine for a turn-structured roguelike. A player walks a
//! seeded map of typed encounter nodes (battle, elite, boss, shop, event),
//! building a roster of disciples plus hexes and artifacts, while a
//! deterministic scorer resolves battles and weighted generators produce
//! rewards and shop stock.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: One `RandomSource` per run, consumed strictly in
//!    command order. Same seed + same commands = same run.
//!
//! 2. **Never fails**: Commands validate their input and are no-ops when it
//!    is invalid or resources are short. Only content loading returns errors.
//!
//! 3. **Content is injected**: Definitions come from an immutable
//!    `ContentProvider` handed to the state machine, never from globals.
//!
//! ## Modules
//!
//! - `core`: RNG, run configuration, errors, tag counting
//! - `content`: Definitions and the content provider
//! - `map`: Node types, map generation, map preview
//! - `battle`: Deterministic battle scoring
//! - `rewards`: Post-battle reward batches
//! - `shop`: Shop stock and the pity table
//! - `run`: Run state, the state machine and observers

pub mod core;
pub mod content;
pub mod map;
pub mod battle;
pub mod rewards;
pub mod shop;
pub mod run;

// Re-export commonly used types
pub use crate::core::{ContentError, RandomSource, RunConfig, TagCounts};

pub use crate::content::{
    ArtifactDef, BaseStats, ContentId, ContentProvider, ContentTables, DiscipleDef, EventDef,
    EventOption, HexDef, ResourceDelta, ResourceKind, SynergyDef,
};

pub use crate::map::{MapGenerator, MapNode, MapPreview, NodeType, RunMap};

pub use crate::battle::{BattleContext, BattleOutcome, BattleReport, BattleScorer};

pub use crate::rewards::{RewardGenerator, RewardKind, RewardOption};

pub use crate::shop::{PitySnapshot, ShopGenerator, ShopItem, ShopSnapshot};

pub use crate::run::{
    Notification, RunInfo, RunObserver, RunOutcome, RunPhase, RunState, RunStateMachine,
};
