//! Run map: node types, seeded generation and presentation preview.

pub mod generator;
pub mod preview;

pub use generator::{MapGenerator, MapNode, NodeType, RunMap, ACT_COUNT, NODES_PER_ACT};
pub use preview::{MapPreview, PreviewNode};
