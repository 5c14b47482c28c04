//! Shop stock generation with pity.
//!
//! ## Pity
//!
//! Every tag the player is investing in (shared by at least two team
//! members) carries a miss-streak counter. A shop visit that offers no item
//! with the tag increments its counter; a visit that does resets it to 0.
//!
//! Candidates lacking a streaked tag get their weight multiplied by
//! `1 + 0.2 * streak` (largest streak among the tags they lack). Counters
//! live as long as the generator, which is rebuilt on every new run.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::content::{ContentId, DiscipleDef, Tags};
use crate::core::RandomSource;

/// Items in every shop snapshot.
pub const SHOP_SIZE: usize = 5;
/// Weight growth per act index.
pub const ACT_WEIGHT_BONUS: f64 = 0.1;
/// Weight growth per point of pity.
pub const PITY_WEIGHT_BONUS: f64 = 0.2;
/// Cheapest possible item.
pub const MIN_PRICE: u32 = 2;

/// One purchasable disciple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: ContentId,
    pub name: String,
    pub price: u32,
    pub tags: Tags,
}

impl ShopItem {
    /// True if this item carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Current shop stock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSnapshot {
    pub items: Vec<ShopItem>,
}

/// Read-only copy of the pity table, ordered by tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitySnapshot(pub BTreeMap<String, u32>);

impl PitySnapshot {
    /// Streak for `tag` (0 if untracked).
    #[must_use]
    pub fn get(&self, tag: &str) -> u32 {
        self.0.get(tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PitySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        for (i, (tag, streak)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}:{streak}")?;
        }
        Ok(())
    }
}

/// Price of a disciple of the given rarity.
#[must_use]
pub fn price_for_rarity(rarity: u32) -> u32 {
    rarity.saturating_mul(2).max(MIN_PRICE)
}

/// Weighted shop stock generator owning the pity table.
#[derive(Clone, Debug, Default)]
pub struct ShopGenerator {
    pity: FxHashMap<String, u32>,
}

impl ShopGenerator {
    /// Create a generator with an empty pity table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pity-boosted weight of one candidate.
    #[must_use]
    pub fn candidate_weight(&self, disciple: &DiscipleDef, act_index: usize, active_tags: &[String]) -> f64 {
        let miss_count = active_tags
            .iter()
            .filter(|tag| !disciple.has_tag(tag))
            .map(|tag| self.pity(tag))
            .max()
            .unwrap_or(0);

        let act_bonus = 1.0 + ACT_WEIGHT_BONUS * act_index as f64;
        let pity_bonus = 1.0 + PITY_WEIGHT_BONUS * f64::from(miss_count);
        disciple.shop_weight * act_bonus * pity_bonus
    }

    /// Draw `SHOP_SIZE` items with replacement, then update pity for every
    /// active tag.
    ///
    /// An empty pool yields an empty snapshot; pity still advances.
    pub fn generate_shop(
        &mut self,
        rng: &mut RandomSource,
        disciples: &[DiscipleDef],
        act_index: usize,
        active_tags: &[String],
    ) -> ShopSnapshot {
        let weights: Vec<f64> = disciples
            .iter()
            .map(|d| self.candidate_weight(d, act_index, active_tags))
            .collect();

        let mut items = Vec::with_capacity(SHOP_SIZE);
        for _ in 0..SHOP_SIZE {
            let Some(index) = rng.pick_weighted_index(&weights) else {
                break;
            };
            let disciple = &disciples[index];
            items.push(ShopItem {
                id: disciple.id,
                name: disciple.name.clone(),
                price: price_for_rarity(disciple.rarity),
                tags: disciple.tags.clone(),
            });
        }

        for tag in active_tags {
            let offered = items.iter().any(|item| item.has_tag(tag));
            let streak = self.pity.entry(tag.clone()).or_insert(0);
            if offered {
                *streak = 0;
            } else {
                *streak += 1;
            }
        }

        tracing::debug!(
            target: "xianxia_run::shop",
            act_index,
            items = items.len(),
            pity = %self.pity_snapshot(),
            "shop.generated"
        );

        ShopSnapshot { items }
    }

    /// Current streak for `tag`.
    #[must_use]
    pub fn pity(&self, tag: &str) -> u32 {
        self.pity.get(tag).copied().unwrap_or(0)
    }

    /// Copy of the pity table.
    #[must_use]
    pub fn pity_snapshot(&self) -> PitySnapshot {
        PitySnapshot(self.pity.iter().map(|(k, &v)| (k.clone(), v)).collect())
    }
}
