//! Run state: progress, resources and acquisitions.
//!
//! Uses `im` persistent vectors so presentation snapshots of the roster
//! and modifiers clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::content::{ArtifactDef, DiscipleDef, HexDef};
use crate::core::{RunConfig, TagCounts};
use crate::map::{NodeType, ACT_COUNT, NODES_PER_ACT};

/// Phase of the run state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    Menu,
    Map,
    Battle,
    Boss,
    Reward,
    Shop,
    Event,
    Result,
    Revive,
}

impl RunPhase {
    /// True while a run is in play (not at the menu or the result screen).
    #[must_use]
    pub fn is_in_run(self) -> bool {
        !matches!(self, RunPhase::Menu | RunPhase::Result)
    }
}

/// How a finished run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Advanced past the final node.
    Cleared,
    /// Life ran out with no revive left (or revive declined).
    Defeated,
}

/// Presentation snapshot of run progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    pub act: usize,
    pub node: usize,
    pub life: u32,
    pub gold: u32,
    pub node_type: NodeType,
    pub revive_used: bool,
    pub roster_size: usize,
}

/// Mutable state of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub(crate) act_index: usize,
    pub(crate) node_index: usize,
    pub(crate) life: u32,
    pub(crate) gold: u32,
    pub(crate) revive_used: bool,
    pub(crate) roster: Vector<DiscipleDef>,
    pub(crate) hexes: Vector<HexDef>,
    pub(crate) artifacts: Vector<ArtifactDef>,
}

impl RunState {
    /// Fresh state at act 0, node 0 with the given starting roster.
    #[must_use]
    pub fn new(config: &RunConfig, roster: Vector<DiscipleDef>) -> Self {
        Self {
            act_index: 0,
            node_index: 0,
            life: config.starting_life,
            gold: config.starting_gold,
            revive_used: false,
            roster,
            hexes: Vector::new(),
            artifacts: Vector::new(),
        }
    }

    #[must_use]
    pub fn act_index(&self) -> usize {
        self.act_index
    }

    #[must_use]
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    #[must_use]
    pub fn life(&self) -> u32 {
        self.life
    }

    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    #[must_use]
    pub fn revive_used(&self) -> bool {
        self.revive_used
    }

    #[must_use]
    pub fn roster(&self) -> &Vector<DiscipleDef> {
        &self.roster
    }

    #[must_use]
    pub fn hexes(&self) -> &Vector<HexDef> {
        &self.hexes
    }

    #[must_use]
    pub fn artifacts(&self) -> &Vector<ArtifactDef> {
        &self.artifacts
    }

    /// Tag counts across the roster.
    #[must_use]
    pub fn tag_counts(&self) -> TagCounts {
        TagCounts::from_tag_sets(self.roster.iter().map(|d| d.tags.iter()))
    }

    /// Tags shared by at least two roster members.
    #[must_use]
    pub fn active_tags(&self) -> Vec<String> {
        self.tag_counts().active()
    }

    /// Step to the next node, rolling over into the next act.
    ///
    /// Returns `false` (leaving the position unchanged) when already at the
    /// last node of the last act.
    pub(crate) fn advance(&mut self) -> bool {
        if self.node_index < NODES_PER_ACT - 1 {
            self.node_index += 1;
            true
        } else if self.act_index < ACT_COUNT - 1 {
            self.act_index += 1;
            self.node_index = 0;
            true
        } else {
            false
        }
    }
}
