//! GM / debug commands.
//!
//! Shortcuts for playtesting. They go through the same internals as the
//! player commands, so observers and logs see them like any other change.

use super::machine::RunStateMachine;
use super::observer::Notification;
use super::state::RunPhase;
use crate::shop::PitySnapshot;

impl RunStateMachine {
    /// Grant gold.
    pub fn add_gold(&mut self, amount: u32) {
        self.grant_gold(amount);
    }

    /// Grant life.
    pub fn add_life(&mut self, amount: u32) {
        self.grant_life(amount);
    }

    /// Replace the reward batch with one whose first option is a hex and
    /// open the reward screen. Requires an active run and does nothing
    /// while the revive prompt is open.
    pub fn force_hex_reward(&mut self) {
        if !self.has_active_run() || self.phase() == RunPhase::Revive {
            return;
        }
        self.current_rewards = self.rewards.generate_forced_hex(
            &mut self.rng,
            self.content.disciples(),
            self.content.hexes(),
            self.content.artifacts(),
        );
        self.set_phase(RunPhase::Reward);
    }

    /// Push the run forward one step.
    ///
    /// Starts a run if none is active; enters the node when on the map;
    /// otherwise advances and enters the next node. Does nothing while the
    /// revive prompt is open.
    pub fn go_next_node(&mut self) {
        if !self.has_active_run() {
            self.start_new_run();
            self.enter_current_node();
            return;
        }
        if self.phase() == RunPhase::Revive {
            return;
        }
        if self.phase() != RunPhase::Map {
            self.advance_node();
        }
        self.enter_current_node();
    }

    /// Regenerate the shop without charging gold.
    pub fn refresh_shop_forced(&mut self) {
        self.refresh_shop(true);
    }

    /// Report the pity table as a notification and return it.
    pub fn show_pity_snapshot(&mut self) -> PitySnapshot {
        let snapshot = self.pity_snapshot();
        self.notify(Notification::PityStatus(snapshot.clone()));
        snapshot
    }
}
