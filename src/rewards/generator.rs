//! Post-battle reward generation.

use serde::{Deserialize, Serialize};

use crate::content::{ArtifactDef, ContentId, DiscipleDef, HexDef};
use crate::core::RandomSource;

/// Category of a reward payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Disciple,
    Hex,
    Artifact,
}

/// One selectable reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardOption {
    pub kind: RewardKind,
    pub display_name: String,
    /// Id resolved against the category named by `kind`.
    pub payload_id: ContentId,
}

/// Slot order of every reward batch.
pub const REWARD_SLOTS: [RewardKind; 3] = [RewardKind::Disciple, RewardKind::Hex, RewardKind::Artifact];

/// Weighted selection of reward batches.
///
/// Stateless: all randomness comes from the caller's `RandomSource`, one
/// draw per slot, in slot order.
#[derive(Clone, Copy, Debug, Default)]
pub struct RewardGenerator;

impl RewardGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Draw one option per slot: disciple by `shop_weight`, hex by `weight`,
    /// artifact by `rarity`.
    ///
    /// A slot whose pool is empty is skipped without drawing.
    pub fn generate(
        &self,
        rng: &mut RandomSource,
        disciples: &[DiscipleDef],
        hexes: &[HexDef],
        artifacts: &[ArtifactDef],
    ) -> Vec<RewardOption> {
        let mut rewards = Vec::with_capacity(REWARD_SLOTS.len());

        for kind in REWARD_SLOTS {
            let picked = match kind {
                RewardKind::Disciple => rng
                    .pick_weighted(disciples, |d| d.shop_weight)
                    .map(|d| (d.name.clone(), d.id)),
                RewardKind::Hex => rng.pick_weighted(hexes, |h| h.weight).map(|h| (h.name.clone(), h.id)),
                RewardKind::Artifact => rng
                    .pick_weighted(artifacts, |a| f64::from(a.rarity))
                    .map(|a| (a.name.clone(), a.id)),
            };
            if let Some((display_name, payload_id)) = picked {
                rewards.push(RewardOption {
                    kind,
                    display_name,
                    payload_id,
                });
            }
        }

        tracing::debug!(target: "xianxia_run::rewards", ?rewards, "rewards.generated");
        rewards
    }

    /// Same draws as [`generate`](Self::generate), with the first option's
    /// kind overwritten to `Hex`. The payload id is left as drawn.
    pub fn generate_forced_hex(
        &self,
        rng: &mut RandomSource,
        disciples: &[DiscipleDef],
        hexes: &[HexDef],
        artifacts: &[ArtifactDef],
    ) -> Vec<RewardOption> {
        let mut rewards = self.generate(rng, disciples, hexes, artifacts);
        if let Some(first) = rewards.first_mut() {
            first.kind = RewardKind::Hex;
        }
        rewards
    }
}
