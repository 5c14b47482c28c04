//! Game content: definitions and the provider that serves them.
//!
//! ## Key Types
//!
//! - `ContentId`: Identifier shared by every category
//! - `DiscipleDef`, `HexDef`, `ArtifactDef`, `SynergyDef`, `EventDef`: static data
//! - `ContentTables`: Raw tables as loaded from JSON
//! - `ContentProvider`: Validated tables with id lookup and built-in fallbacks

pub mod definition;
pub mod registry;

pub use definition::{
    ArtifactDef, BaseStats, ContentId, DiscipleDef, EffectText, EventDef, EventOption, HexDef,
    ResourceDelta, ResourceKind, SynergyDef, SynergyEffects, SynergyTier, Tags,
};
pub use registry::{ContentProvider, ContentTables};
