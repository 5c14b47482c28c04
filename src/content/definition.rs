//! Content definitions - static game data.
//!
//! These mirror the content tables a host loads (disciples, hexes,
//! artifacts, synergies, events). They are immutable for the duration of a
//! run; the run state holds clones of the definitions it has acquired.
//!
//! JSON keys follow the content files' camelCase convention
//! (`baseStats`, `shopWeight`, `stackRule`, `previewTag`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Trait tags carried by a disciple or matched by a hex.
pub type Tags = SmallVec<[String; 4]>;

/// Identifier of a content entry.
///
/// Ids are unique within a category. Reward payloads carry a bare id and
/// are resolved against the category named by the reward kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub u32);

impl ContentId {
    /// Create a new content ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Free-text effect description with numeric parameters (display only).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectText {
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

/// Base combat stats of a disciple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: f64,
    pub atk: f64,
    #[serde(default)]
    pub speed: f64,
}

/// A recruitable unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscipleDef {
    pub id: ContentId,
    pub name: String,
    pub rarity: u32,
    #[serde(default)]
    pub tags: Tags,
    pub base_stats: BaseStats,
    /// Weight in reward and shop draws.
    pub shop_weight: f64,
    #[serde(default)]
    pub skill: EffectText,
}

impl DiscipleDef {
    /// Create a disciple with no skill text.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, rarity: u32, stats: BaseStats, shop_weight: f64) -> Self {
        Self {
            id: ContentId::new(id),
            name: name.into(),
            rarity,
            tags: Tags::new(),
            base_stats: stats,
            shop_weight,
            skill: EffectText::default(),
        }
    }

    /// Add a trait tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// True if this disciple carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Built-in entry used when the disciple pool is empty.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(0, "外门弟子", 1, BaseStats { hp: 120.0, atk: 20.0, speed: 10.0 }, 1.0).with_tag("剑")
    }
}

/// A passive run-wide modifier matched against team tags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexDef {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub rarity: u32,
    /// Weight in reward draws.
    pub weight: f64,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub stack_rule: String,
}

impl HexDef {
    /// Create a hex with no descriptive text.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, rarity: u32, weight: f64) -> Self {
        Self {
            id: ContentId::new(id),
            name: name.into(),
            category: String::new(),
            rarity,
            weight,
            desc: String::new(),
            tags: Tags::new(),
            stack_rule: String::new(),
        }
    }

    /// Add a matched tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Built-in entry used when the hex pool is empty.
    #[must_use]
    pub fn fallback() -> Self {
        let mut hex = Self::new(0, "剑意", 1, 1.0).with_tag("剑");
        hex.stack_rule = "stack".to_string();
        hex
    }
}

/// A passive item granting flat bonuses scaled by rarity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDef {
    pub id: ContentId,
    pub name: String,
    /// Weight in reward draws, power and hp bonus multiplier.
    pub rarity: u32,
    #[serde(default)]
    pub recipe: Vec<String>,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub effect: EffectText,
}

impl ArtifactDef {
    /// Create an artifact with no descriptive text.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, rarity: u32) -> Self {
        Self {
            id: ContentId::new(id),
            name: name.into(),
            rarity,
            recipe: Vec::new(),
            trigger: String::new(),
            effect: EffectText::default(),
        }
    }

    /// Built-in entry used when the artifact pool is empty.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(0, "铁剑", 1)
    }
}

/// Flat bonuses granted by a synergy tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyEffects {
    #[serde(default)]
    pub attack_bonus: f64,
    #[serde(default)]
    pub hp_bonus: f64,
}

/// One threshold of a synergy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynergyTier {
    /// Members sharing the tag required for this tier.
    pub count: u32,
    #[serde(default)]
    pub effects: SynergyEffects,
    #[serde(default)]
    pub desc: String,
}

/// Tiered bonus unlocked by team members sharing a tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynergyDef {
    /// The tag this synergy counts.
    #[serde(rename = "id")]
    pub tag: String,
    #[serde(default)]
    pub name: String,
    pub tiers: Vec<SynergyTier>,
}

impl SynergyDef {
    /// Create a synergy with no tiers.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.clone(),
            tag,
            tiers: Vec::new(),
        }
    }

    /// Add a tier (builder pattern).
    #[must_use]
    pub fn with_tier(mut self, count: u32, attack_bonus: f64, hp_bonus: f64) -> Self {
        self.tiers.push(SynergyTier {
            count,
            effects: SynergyEffects { attack_bonus, hp_bonus },
            desc: String::new(),
        });
        self
    }

    /// Built-in entry used when the synergy table is empty.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new("剑").with_tier(2, 10.0, 50.0)
    }
}

/// Resource touched by an event option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Gold,
    Life,
    /// Any other kind; applying it changes nothing.
    #[default]
    #[serde(other)]
    Nothing,
}

/// An amount of one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDelta {
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
    #[serde(default)]
    pub amount: u32,
}

impl ResourceDelta {
    #[must_use]
    pub const fn gold(amount: u32) -> Self {
        Self { kind: ResourceKind::Gold, amount }
    }

    #[must_use]
    pub const fn life(amount: u32) -> Self {
        Self { kind: ResourceKind::Life, amount }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self { kind: ResourceKind::Nothing, amount: 0 }
    }
}

/// One choice offered by an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOption {
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub cost: ResourceDelta,
    #[serde(default)]
    pub reward: ResourceDelta,
    #[serde(default)]
    pub preview_tag: String,
}

impl EventOption {
    #[must_use]
    pub fn new(desc: impl Into<String>, cost: ResourceDelta, reward: ResourceDelta) -> Self {
        Self {
            desc: desc.into(),
            cost,
            reward,
            preview_tag: String::new(),
        }
    }
}

/// A narrative event with resource trade-off options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub options: Vec<EventOption>,
}

impl EventDef {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ContentId::new(id),
            name: name.into(),
            desc: String::new(),
            options: Vec::new(),
        }
    }

    /// Add an option (builder pattern).
    #[must_use]
    pub fn with_option(mut self, option: EventOption) -> Self {
        self.options.push(option);
        self
    }

    /// Built-in entry used when the event pool is empty.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(0, "山间静修")
            .with_option(EventOption::new("打坐调息", ResourceDelta::none(), ResourceDelta::gold(3)))
    }
}
