//! Map preview for presentation.

use super::generator::{NodeType, RunMap};

/// One node in the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewNode {
    pub act: usize,
    pub index: usize,
    pub node_type: NodeType,
    pub is_current: bool,
}

/// Ordered node labels with the current position marked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapPreview {
    pub nodes: Vec<PreviewNode>,
}

impl MapPreview {
    /// Build a preview of `map` with `(act, index)` as the current node.
    #[must_use]
    pub fn new(map: &RunMap, act: usize, index: usize) -> Self {
        let nodes = map
            .acts()
            .enumerate()
            .flat_map(|(a, nodes)| {
                nodes.iter().enumerate().map(move |(i, node)| PreviewNode {
                    act: a,
                    index: i,
                    node_type: node.node_type,
                    is_current: a == act && i == index,
                })
            })
            .collect();
        Self { nodes }
    }

    /// The marked node, if the position was in bounds.
    #[must_use]
    pub fn current(&self) -> Option<&PreviewNode> {
        self.nodes.iter().find(|n| n.is_current)
    }
}

/// One line per act, current node in brackets:
/// `Act 1: Battle > [Event] > Shop > Battle > Elite`.
impl std::fmt::Display for MapPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last_act = None;
        for node in &self.nodes {
            if last_act != Some(node.act) {
                if last_act.is_some() {
                    writeln!(f)?;
                }
                write!(f, "Act {}: ", node.act + 1)?;
                last_act = Some(node.act);
            } else {
                f.write_str(" > ")?;
            }
            if node.is_current {
                write!(f, "[{}]", node.node_type)?;
            } else {
                write!(f, "{}", node.node_type)?;
            }
        }
        Ok(())
    }
}
