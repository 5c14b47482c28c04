//! Seeded map generation.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// Acts in a run.
pub const ACT_COUNT: usize = 3;

/// Nodes in each act.
pub const NODES_PER_ACT: usize = 5;

/// Per-act template before randomization.
const ACT_TEMPLATE: [NodeType; NODES_PER_ACT] = [
    NodeType::Battle,
    NodeType::Event,
    NodeType::Shop,
    NodeType::Battle,
    NodeType::Elite,
];

/// Encounter kind of a map node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Battle,
    Event,
    Shop,
    Elite,
    Boss,
}

impl NodeType {
    /// True for nodes resolved by the battle scorer.
    #[must_use]
    pub fn is_combat(self) -> bool {
        matches!(self, NodeType::Battle | NodeType::Elite | NodeType::Boss)
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NodeType::Battle => "Battle",
            NodeType::Event => "Event",
            NodeType::Shop => "Shop",
            NodeType::Elite => "Elite",
            NodeType::Boss => "Boss",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One encounter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl MapNode {
    #[must_use]
    pub const fn new(node_type: NodeType) -> Self {
        Self { node_type }
    }
}

/// The run's node topology: `ACT_COUNT` acts of `NODES_PER_ACT` nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMap {
    acts: [[MapNode; NODES_PER_ACT]; ACT_COUNT],
}

impl RunMap {
    /// Node at `(act, index)`, if in bounds.
    #[must_use]
    pub fn node(&self, act: usize, index: usize) -> Option<MapNode> {
        self.acts.get(act).and_then(|nodes| nodes.get(index)).copied()
    }

    /// Nodes of one act.
    #[must_use]
    pub fn act(&self, act: usize) -> Option<&[MapNode]> {
        self.acts.get(act).map(|nodes| nodes.as_slice())
    }

    /// Iterate acts in order.
    pub fn acts(&self) -> impl Iterator<Item = &[MapNode]> {
        self.acts.iter().map(|nodes| nodes.as_slice())
    }
}

/// Builds maps from a seed.
///
/// ## Example
///
/// ```
/// use xianxia_run::map::{MapGenerator, NodeType};
///
/// let map = MapGenerator::generate(42);
/// assert_eq!(map.node(2, 4).unwrap().node_type, NodeType::Boss);
/// assert_eq!(map, MapGenerator::generate(42));
/// ```
pub struct MapGenerator;

impl MapGenerator {
    /// Generate a map from a fresh source seeded with `seed`.
    #[must_use]
    pub fn generate(seed: i64) -> RunMap {
        Self::generate_with(&mut RandomSource::new(seed))
    }

    /// Generate a map drawing from an existing source.
    ///
    /// Consumes exactly one draw per act: above 0.5 swaps nodes 1 and 2.
    pub fn generate_with(rng: &mut RandomSource) -> RunMap {
        let mut acts = [[MapNode::new(NodeType::Battle); NODES_PER_ACT]; ACT_COUNT];

        for (act, nodes) in acts.iter_mut().enumerate() {
            for (slot, node_type) in nodes.iter_mut().zip(ACT_TEMPLATE) {
                *slot = MapNode::new(node_type);
            }
            if act == ACT_COUNT - 1 {
                nodes[NODES_PER_ACT - 1] = MapNode::new(NodeType::Boss);
            }
            if rng.next_f64() > 0.5 {
                nodes.swap(1, 2);
            }
        }

        tracing::debug!(target: "xianxia_run::map", ?acts, "map.generated");
        RunMap { acts }
    }
}
