//! Content provider for definition lookup.
//!
//! The `ContentProvider` owns every definition table for a run. It is built
//! once from `ContentTables` (usually parsed from JSON), validated, and then
//! shared read-only with the run state machine.
//!
//! Empty categories are replaced by a single built-in entry so a run can
//! always proceed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{ArtifactDef, ContentId, DiscipleDef, EventDef, HexDef, SynergyDef};
use crate::core::ContentError;

/// Raw content tables as loaded by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    pub disciples: Vec<DiscipleDef>,
    pub hexes: Vec<HexDef>,
    pub artifacts: Vec<ArtifactDef>,
    pub synergies: Vec<SynergyDef>,
    pub events: Vec<EventDef>,
}

/// Validated, immutable content with id lookup.
///
/// ## Example
///
/// ```
/// use xianxia_run::content::{ContentProvider, ContentTables, ContentId};
///
/// let provider = ContentProvider::new(ContentTables::default()).unwrap();
///
/// // Every category falls back to one built-in entry.
/// assert_eq!(provider.disciples().len(), 1);
/// assert!(provider.disciple(ContentId::new(0)).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct ContentProvider {
    tables: ContentTables,
    disciple_index: FxHashMap<ContentId, usize>,
    hex_index: FxHashMap<ContentId, usize>,
    artifact_index: FxHashMap<ContentId, usize>,
}

impl ContentProvider {
    /// Validate tables, substitute defaults for empty categories and index ids.
    pub fn new(mut tables: ContentTables) -> Result<Self, ContentError> {
        fill_default(&mut tables.disciples, "disciples", DiscipleDef::fallback);
        fill_default(&mut tables.hexes, "hexes", HexDef::fallback);
        fill_default(&mut tables.artifacts, "artifacts", ArtifactDef::fallback);
        fill_default(&mut tables.synergies, "synergies", SynergyDef::fallback);
        fill_default(&mut tables.events, "events", EventDef::fallback);

        for d in &tables.disciples {
            check_number("disciple", d.id, "shopWeight", d.shop_weight)?;
            check_number("disciple", d.id, "hp", d.base_stats.hp)?;
            check_number("disciple", d.id, "atk", d.base_stats.atk)?;
        }
        for h in &tables.hexes {
            check_number("hex", h.id, "weight", h.weight)?;
        }

        let disciple_index = index_by_id("disciple", tables.disciples.iter().map(|d| d.id))?;
        let hex_index = index_by_id("hex", tables.hexes.iter().map(|h| h.id))?;
        let artifact_index = index_by_id("artifact", tables.artifacts.iter().map(|a| a.id))?;
        index_by_id("event", tables.events.iter().map(|e| e.id))?;

        Ok(Self {
            tables,
            disciple_index,
            hex_index,
            artifact_index,
        })
    }

    /// Parse JSON tables and build a provider.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let tables: ContentTables = serde_json::from_str(json)?;
        Self::new(tables)
    }

    /// Provider made only of built-in defaults.
    #[must_use]
    pub fn builtin() -> Self {
        let tables = ContentTables {
            disciples: vec![DiscipleDef::fallback()],
            hexes: vec![HexDef::fallback()],
            artifacts: vec![ArtifactDef::fallback()],
            synergies: vec![SynergyDef::fallback()],
            events: vec![EventDef::fallback()],
        };
        let single = |id: ContentId| std::iter::once((id, 0)).collect::<FxHashMap<_, _>>();
        Self {
            disciple_index: single(tables.disciples[0].id),
            hex_index: single(tables.hexes[0].id),
            artifact_index: single(tables.artifacts[0].id),
            tables,
        }
    }

    /// All disciples, in table order. Never empty.
    #[must_use]
    pub fn disciples(&self) -> &[DiscipleDef] {
        &self.tables.disciples
    }

    /// All hexes, in table order. Never empty.
    #[must_use]
    pub fn hexes(&self) -> &[HexDef] {
        &self.tables.hexes
    }

    /// All artifacts, in table order. Never empty.
    #[must_use]
    pub fn artifacts(&self) -> &[ArtifactDef] {
        &self.tables.artifacts
    }

    /// All synergies, in table order. Never empty.
    #[must_use]
    pub fn synergies(&self) -> &[SynergyDef] {
        &self.tables.synergies
    }

    /// All events, in table order. Never empty.
    #[must_use]
    pub fn events(&self) -> &[EventDef] {
        &self.tables.events
    }

    /// Look up a disciple by id.
    #[must_use]
    pub fn disciple(&self, id: ContentId) -> Option<&DiscipleDef> {
        self.disciple_index.get(&id).map(|&i| &self.tables.disciples[i])
    }

    /// Look up a hex by id.
    #[must_use]
    pub fn hex(&self, id: ContentId) -> Option<&HexDef> {
        self.hex_index.get(&id).map(|&i| &self.tables.hexes[i])
    }

    /// Look up an artifact by id.
    #[must_use]
    pub fn artifact(&self, id: ContentId) -> Option<&ArtifactDef> {
        self.artifact_index.get(&id).map(|&i| &self.tables.artifacts[i])
    }

    /// The underlying tables.
    #[must_use]
    pub fn tables(&self) -> &ContentTables {
        &self.tables
    }
}

impl Default for ContentProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

fn fill_default<T>(list: &mut Vec<T>, category: &'static str, fallback: fn() -> T) {
    if list.is_empty() {
        tracing::warn!(
            target: "xianxia_run::content",
            category,
            "content.category.fallback"
        );
        list.push(fallback());
    }
}

fn check_number(category: &'static str, id: ContentId, field: &'static str, value: f64) -> Result<(), ContentError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ContentError::InvalidNumber {
            category,
            id: id.raw(),
            field,
            value,
        })
    }
}

fn index_by_id(
    category: &'static str,
    ids: impl Iterator<Item = ContentId>,
) -> Result<FxHashMap<ContentId, usize>, ContentError> {
    let mut index = FxHashMap::default();
    for (i, id) in ids.enumerate() {
        if index.insert(id, i).is_some() {
            return Err(ContentError::DuplicateId { category, id: id.raw() });
        }
    }
    Ok(index)
}
