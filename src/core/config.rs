//! Run configuration.
//!
//! `RunConfig` holds the tunables a host may change between runs: starting
//! resources, shop refresh cost, battle gold and the seed. Formula constants
//! for scoring and shop weighting live next to their algorithms instead.

use serde::{Deserialize, Serialize};

/// Tunables for a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Life at run start. Reaching 0 triggers the revive prompt.
    pub starting_life: u32,

    /// Gold at run start.
    pub starting_gold: u32,

    /// How many disciples from the front of the content pool join at start.
    pub starting_roster: usize,

    /// Gold charged by a non-forced shop refresh.
    pub refresh_cost: u32,

    /// Flat gold granted on every battle win.
    pub win_gold_base: u32,

    /// Extra gold per act index granted on a battle win.
    pub win_gold_per_act: u32,

    /// Fixed run seed. `None` derives one from the clock at run start.
    pub seed: Option<i64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_life: 5,
            starting_gold: 20,
            starting_roster: 2,
            refresh_cost: 5,
            win_gold_base: 5,
            win_gold_per_act: 2,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Use a fixed seed for every run started with this config.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override starting life.
    pub fn with_starting_life(mut self, life: u32) -> Self {
        self.starting_life = life;
        self
    }

    /// Override starting gold.
    pub fn with_starting_gold(mut self, gold: u32) -> Self {
        self.starting_gold = gold;
        self
    }

    /// Override the shop refresh cost.
    pub fn with_refresh_cost(mut self, cost: u32) -> Self {
        self.refresh_cost = cost;
        self
    }

    /// Gold granted for winning a battle in the given act.
    #[must_use]
    pub fn win_gold(&self, act_index: usize) -> u32 {
        self.win_gold_base + self.win_gold_per_act * act_index as u32
    }
}
