//! Deterministic battle scoring.
//!
//! A battle is not simulated blow by blow. The team's power and hp are
//! summed, modifiers are layered on, and the result is compared against an
//! enemy baseline that grows with act and node type:
//!
//! ```text
//! score = 1.2 * power + 0.4 * hp - (enemy_power + 0.3 * enemy_hp)
//! ```
//!
//! The team wins iff `score >= 0`. No randomness is involved.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::content::{ArtifactDef, DiscipleDef, HexDef, SynergyDef};
use crate::core::TagCounts;
use crate::map::NodeType;

/// Power contributed per point of disciple hp.
pub const HP_TO_POWER: f64 = 0.2;
/// Power per rarity of a hex whose tags match the team.
pub const HEX_POWER_PER_RARITY: f64 = 5.0;
/// Power per artifact rarity.
pub const ARTIFACT_POWER_PER_RARITY: f64 = 8.0;
/// Hp per artifact rarity.
pub const ARTIFACT_HP_PER_RARITY: f64 = 10.0;

const POWER_WEIGHT: f64 = 1.2;
const HP_WEIGHT: f64 = 0.4;
const ENEMY_HP_WEIGHT: f64 = 0.3;

/// Win or loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    #[must_use]
    pub fn is_win(self) -> bool {
        self == BattleOutcome::Win
    }
}

/// Numbers behind a battle result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleBreakdown {
    pub power: f64,
    pub hp: f64,
    pub enemy_power: f64,
    pub enemy_hp: f64,
    pub score: f64,
}

/// Result of one battle resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Human-readable numeric breakdown.
    pub detail: String,
    pub breakdown: BattleBreakdown,
}

/// Everything a battle depends on besides the synergy table.
#[derive(Clone, Copy, Debug)]
pub struct BattleContext<'a> {
    pub team: &'a Vector<DiscipleDef>,
    pub hexes: &'a Vector<HexDef>,
    pub artifacts: &'a Vector<ArtifactDef>,
    pub act_index: usize,
    pub node_type: NodeType,
}

/// Enemy power and hp for a node.
#[must_use]
pub fn enemy_baseline(act_index: usize, node_type: NodeType) -> (f64, f64) {
    let act = act_index as f64;
    let (power_bonus, hp_bonus) = match node_type {
        NodeType::Boss => (80.0, 200.0),
        NodeType::Elite => (40.0, 100.0),
        _ => (0.0, 0.0),
    };
    (60.0 + 40.0 * act + power_bonus, 300.0 + 120.0 * act + hp_bonus)
}

/// Stateless scorer over a synergy table.
#[derive(Clone, Copy, Debug)]
pub struct BattleScorer<'a> {
    synergies: &'a [SynergyDef],
}

impl<'a> BattleScorer<'a> {
    #[must_use]
    pub fn new(synergies: &'a [SynergyDef]) -> Self {
        Self { synergies }
    }

    /// Resolve a battle.
    #[must_use]
    pub fn score(&self, ctx: &BattleContext<'_>) -> BattleReport {
        let tag_counts = TagCounts::from_tag_sets(ctx.team.iter().map(|d| d.tags.iter()));

        let mut power: f64 = ctx
            .team
            .iter()
            .map(|d| d.base_stats.atk + d.base_stats.hp * HP_TO_POWER)
            .sum();
        let mut hp: f64 = ctx.team.iter().map(|d| d.base_stats.hp).sum();

        // Tiers stack: every satisfied tier applies.
        for synergy in self.synergies {
            let count = tag_counts.count(&synergy.tag);
            for tier in synergy.tiers.iter().filter(|t| count >= t.count) {
                power += tier.effects.attack_bonus;
                hp += tier.effects.hp_bonus;
            }
        }

        for hex in ctx.hexes.iter() {
            if hex.tags.iter().any(|tag| tag_counts.contains(tag)) {
                power += HEX_POWER_PER_RARITY * f64::from(hex.rarity);
            }
        }

        for artifact in ctx.artifacts.iter() {
            power += ARTIFACT_POWER_PER_RARITY * f64::from(artifact.rarity);
            hp += ARTIFACT_HP_PER_RARITY * f64::from(artifact.rarity);
        }

        let (enemy_power, enemy_hp) = enemy_baseline(ctx.act_index, ctx.node_type);
        let score = POWER_WEIGHT * power + HP_WEIGHT * hp - (enemy_power + ENEMY_HP_WEIGHT * enemy_hp);
        let outcome = if score >= 0.0 { BattleOutcome::Win } else { BattleOutcome::Loss };

        tracing::debug!(
            target: "xianxia_run::battle",
            power,
            hp,
            enemy_power,
            enemy_hp,
            score,
            ?outcome,
            "battle.scored"
        );

        BattleReport {
            outcome,
            detail: format!(
                "Team power {power:.0} hp {hp:.0} | Enemy power {enemy_power:.0} hp {enemy_hp:.0} | Score {score:.0}"
            ),
            breakdown: BattleBreakdown {
                power,
                hp,
                enemy_power,
                enemy_hp,
                score,
            },
        }
    }
}
