//! The run state machine.
//!
//! `RunStateMachine` owns everything mutable about a run (progress,
//! resources, roster, modifiers, the RNG and the pity table) and exposes
//! player commands. Commands never fail: invalid input or missing resources
//! leave state untouched, optionally with a [`Notification`].
//!
//! ## Flow
//!
//! ```text
//! Menu --start_new_run--> Map --enter_current_node--> Battle | Boss | Shop | Event | Revive | Result
//! Battle/Boss --to_reward--> Reward (won) or Map (lost)
//! Reward/Shop/Event --choose_*/advance_node--> Map ... --> Result
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use xianxia_run::{ContentProvider, RunConfig, RunPhase, RunStateMachine};
//!
//! let mut machine = RunStateMachine::new(Arc::new(ContentProvider::builtin()), RunConfig::default());
//! machine.start_new_run_with_seed(42);
//! assert_eq!(machine.phase(), RunPhase::Map);
//!
//! machine.enter_current_node();
//! assert_ne!(machine.phase(), RunPhase::Map);
//! ```

use std::sync::Arc;

use im::Vector;

use super::observer::{Notification, RunObserver};
use super::state::{RunInfo, RunOutcome, RunPhase, RunState};
use crate::battle::{BattleContext, BattleReport, BattleScorer};
use crate::content::{ContentProvider, DiscipleDef, EventDef, ResourceKind};
use crate::core::rng::time_seed;
use crate::core::{RandomSource, RunConfig};
use crate::map::{MapGenerator, MapNode, MapPreview, NodeType, RunMap};
use crate::rewards::{RewardGenerator, RewardKind, RewardOption};
use crate::shop::{PitySnapshot, ShopGenerator, ShopSnapshot};

/// Orchestrates one run at a time.
pub struct RunStateMachine {
    pub(crate) content: Arc<ContentProvider>,
    config: RunConfig,
    phase: RunPhase,
    seed: i64,
    pub(crate) rng: RandomSource,
    map: RunMap,
    pub(crate) run: RunState,
    pub(crate) rewards: RewardGenerator,
    pub(crate) shop: ShopGenerator,
    battle_report: Option<BattleReport>,
    pub(crate) current_rewards: Vec<RewardOption>,
    pub(crate) current_shop: ShopSnapshot,
    current_event: Option<EventDef>,
    outcome: Option<RunOutcome>,
    observer: Option<Box<dyn RunObserver>>,
}

impl RunStateMachine {
    /// Create a machine at the menu. No run is active until
    /// [`start_new_run`](Self::start_new_run).
    #[must_use]
    pub fn new(content: Arc<ContentProvider>, config: RunConfig) -> Self {
        let seed = config.seed.unwrap_or(1);
        let run = RunState::new(&config, Vector::new());
        Self {
            content,
            config,
            phase: RunPhase::Menu,
            seed,
            rng: RandomSource::new(seed),
            map: MapGenerator::generate(seed),
            run,
            rewards: RewardGenerator::new(),
            shop: ShopGenerator::new(),
            battle_report: None,
            current_rewards: Vec::new(),
            current_shop: ShopSnapshot::default(),
            current_event: None,
            outcome: None,
            observer: None,
        }
    }

    /// Attach an observer (builder pattern).
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn RunObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn RunObserver>>) {
        self.observer = observer;
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// True while a run is in play.
    #[must_use]
    pub fn has_active_run(&self) -> bool {
        self.phase.is_in_run()
    }

    /// Seed of the current (or last) run.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn content(&self) -> &ContentProvider {
        &self.content
    }

    #[must_use]
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    #[must_use]
    pub fn map(&self) -> &RunMap {
        &self.map
    }

    /// Node at the current position.
    ///
    /// Falls back to a plain battle if the position is out of bounds, which
    /// only happens if progress and map disagree.
    #[must_use]
    pub fn current_node(&self) -> MapNode {
        match self.map.node(self.run.act_index, self.run.node_index) {
            Some(node) => node,
            None => {
                tracing::error!(
                    target: "xianxia_run::run",
                    act = self.run.act_index,
                    node = self.run.node_index,
                    "run.node.out_of_bounds"
                );
                debug_assert!(false, "run position out of map bounds");
                MapNode::new(NodeType::Battle)
            }
        }
    }

    #[must_use]
    pub fn run_info(&self) -> RunInfo {
        RunInfo {
            act: self.run.act_index,
            node: self.run.node_index,
            life: self.run.life,
            gold: self.run.gold,
            node_type: self.current_node().node_type,
            revive_used: self.run.revive_used,
            roster_size: self.run.roster.len(),
        }
    }

    #[must_use]
    pub fn map_preview(&self) -> MapPreview {
        MapPreview::new(&self.map, self.run.act_index, self.run.node_index)
    }

    /// Latest battle resolution, if any battle was fought this run.
    #[must_use]
    pub fn battle_report(&self) -> Option<&BattleReport> {
        self.battle_report.as_ref()
    }

    #[must_use]
    pub fn current_rewards(&self) -> &[RewardOption] {
        &self.current_rewards
    }

    #[must_use]
    pub fn shop_snapshot(&self) -> &ShopSnapshot {
        &self.current_shop
    }

    #[must_use]
    pub fn current_event(&self) -> Option<&EventDef> {
        self.current_event.as_ref()
    }

    /// How the last run ended, once in `Result`.
    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn pity_snapshot(&self) -> PitySnapshot {
        self.shop.pity_snapshot()
    }

    /// Multi-line summary of the run for the result screen.
    #[must_use]
    pub fn result_summary(&self) -> String {
        let headline = match self.outcome {
            Some(RunOutcome::Cleared) => "Cleared".to_string(),
            Some(RunOutcome::Defeated) => format!(
                "Fell at act {} node {}",
                self.run.act_index + 1,
                self.run.node_index + 1
            ),
            None => format!("In progress: act {} node {}", self.run.act_index + 1, self.run.node_index + 1),
        };
        let join = |names: Vec<&str>| if names.is_empty() { "-".to_string() } else { names.join(", ") };
        let tags = self.run.active_tags();

        format!(
            "Result: {headline}\nTeam: {}\nSynergies: {}\nHexes: {}\nArtifacts: {}\nGold: {} Life: {}",
            join(self.run.roster.iter().map(|d| d.name.as_str()).collect()),
            join(tags.iter().map(String::as_str).collect()),
            join(self.run.hexes.iter().map(|h| h.name.as_str()).collect()),
            join(self.run.artifacts.iter().map(|a| a.name.as_str()).collect()),
            self.run.gold,
            self.run.life,
        )
    }

    // === Commands ===

    /// Start a run with the configured seed, or a clock-derived one.
    pub fn start_new_run(&mut self) {
        let seed = self.config.seed.unwrap_or_else(time_seed);
        self.start_new_run_with_seed(seed);
    }

    /// Reset all run state from `seed` and go to `Map`.
    pub fn start_new_run_with_seed(&mut self, seed: i64) {
        let roster: Vector<DiscipleDef> = self
            .content
            .disciples()
            .iter()
            .take(self.config.starting_roster.max(1))
            .cloned()
            .collect();

        self.seed = seed;
        self.rng = RandomSource::new(seed);
        self.map = MapGenerator::generate_with(&mut self.rng);
        self.run = RunState::new(&self.config, roster);
        self.shop = ShopGenerator::new();
        self.battle_report = None;
        self.current_rewards.clear();
        self.current_shop = ShopSnapshot::default();
        self.current_event = None;
        self.outcome = None;

        tracing::info!(target: "xianxia_run::run", seed, "run.started");
        self.notify(Notification::RunStarted { seed });
        self.set_phase(RunPhase::Map);
    }

    /// Return to the menu, abandoning the run.
    ///
    /// Run data stays readable through the queries until the next run
    /// starts, but no command resumes it.
    pub fn go_to_menu(&mut self) {
        self.set_phase(RunPhase::Menu);
    }

    /// Resolve the node at the current position. Only acts from `Map`.
    pub fn enter_current_node(&mut self) {
        if self.phase != RunPhase::Map {
            return;
        }
        self.resolve_current_node();
    }

    /// Leave a battle screen: to `Reward` after a win, onward after a loss.
    pub fn to_reward(&mut self) {
        if !matches!(self.phase, RunPhase::Battle | RunPhase::Boss) {
            return;
        }
        if self.battle_report.as_ref().is_some_and(|r| r.outcome.is_win()) {
            self.set_phase(RunPhase::Reward);
        } else {
            self.advance_node();
        }
    }

    /// Take reward `index` and move on. Invalid index is a no-op.
    pub fn choose_reward(&mut self, index: usize) {
        if self.phase != RunPhase::Reward {
            return;
        }
        let Some(reward) = self.current_rewards.get(index).cloned() else {
            return;
        };

        match reward.kind {
            RewardKind::Disciple => {
                if let Some(disciple) = self.content.disciple(reward.payload_id).cloned() {
                    let name = disciple.name.clone();
                    self.run.roster.push_back(disciple);
                    self.notify(Notification::Recruited { name });
                }
            }
            RewardKind::Hex => {
                if let Some(hex) = self.content.hex(reward.payload_id).cloned() {
                    let name = hex.name.clone();
                    self.run.hexes.push_back(hex);
                    self.notify(Notification::HexAcquired { name });
                }
            }
            RewardKind::Artifact => {
                if let Some(artifact) = self.content.artifact(reward.payload_id).cloned() {
                    let name = artifact.name.clone();
                    self.run.artifacts.push_back(artifact);
                    self.notify(Notification::ArtifactAcquired { name });
                }
            }
        }

        self.advance_node();
    }

    /// Buy shop item `index`. Stays in `Shop`.
    pub fn buy_shop_item(&mut self, index: usize) {
        if self.phase != RunPhase::Shop {
            return;
        }
        let Some(item) = self.current_shop.items.get(index).cloned() else {
            return;
        };
        if self.run.gold < item.price {
            self.reject_for_gold(item.price);
            return;
        }

        self.run.gold -= item.price;
        self.notify(Notification::GoldSpent {
            amount: item.price,
            total: self.run.gold,
        });
        if let Some(disciple) = self.content.disciple(item.id).cloned() {
            self.run.roster.push_back(disciple);
            self.notify(Notification::Recruited { name: item.name });
        }
    }

    /// Regenerate the shop. Costs `refresh_cost` gold unless forced.
    ///
    /// A paid refresh only acts from `Shop`; a forced one from any in-run
    /// phase.
    pub fn refresh_shop(&mut self, force: bool) {
        if !self.has_active_run() || (!force && self.phase != RunPhase::Shop) {
            return;
        }
        let cost = self.config.refresh_cost;
        if !force {
            if self.run.gold < cost {
                self.reject_for_gold(cost);
                return;
            }
            self.run.gold -= cost;
            self.notify(Notification::GoldSpent {
                amount: cost,
                total: self.run.gold,
            });
        }
        self.generate_shop();
    }

    /// Apply event option `index` (cost, then reward) and move on.
    pub fn choose_event_option(&mut self, index: usize) {
        if self.phase != RunPhase::Event {
            return;
        }
        let Some(option) = self
            .current_event
            .as_ref()
            .and_then(|event| event.options.get(index))
            .cloned()
        else {
            return;
        };

        let amount = option.cost.amount;
        match option.cost.kind {
            ResourceKind::Gold => {
                self.run.gold = self.run.gold.saturating_sub(amount);
                self.notify(Notification::GoldSpent { amount, total: self.run.gold });
            }
            ResourceKind::Life => {
                self.run.life = self.run.life.saturating_sub(amount);
                self.notify(Notification::LifeLost { amount, total: self.run.life });
            }
            ResourceKind::Nothing => {}
        }

        let amount = option.reward.amount;
        match option.reward.kind {
            ResourceKind::Gold => self.grant_gold(amount),
            ResourceKind::Life => self.grant_life(amount),
            ResourceKind::Nothing => {}
        }

        self.advance_node();
    }

    /// Move to the next node (or finish the run after the last one).
    ///
    /// No-op outside a run and while the revive prompt is open.
    pub fn advance_node(&mut self) {
        if !self.has_active_run() || self.phase == RunPhase::Revive {
            return;
        }
        if self.run.advance() {
            self.set_phase(RunPhase::Map);
        } else {
            self.finish(RunOutcome::Cleared);
        }
    }

    /// Answer the revive prompt. Only acts from `Revive`.
    pub fn revive(&mut self, accept: bool) {
        if self.phase != RunPhase::Revive {
            return;
        }
        if accept && !self.run.revive_used {
            self.run.revive_used = true;
            self.run.life = self.run.life.max(1);
            self.notify(Notification::Revived);
            self.resolve_current_node();
        } else {
            self.finish(RunOutcome::Defeated);
        }
    }

    // === Internals ===

    fn resolve_current_node(&mut self) {
        let node_type = self.current_node().node_type;
        match node_type {
            NodeType::Battle | NodeType::Elite | NodeType::Boss => self.resolve_battle(node_type),
            NodeType::Shop => {
                self.generate_shop();
                self.set_phase(RunPhase::Shop);
            }
            NodeType::Event => {
                let events = self.content.events();
                self.current_event = self.rng.next_index(events.len()).and_then(|i| events.get(i)).cloned();
                self.set_phase(RunPhase::Event);
            }
        }
    }

    fn resolve_battle(&mut self, node_type: NodeType) {
        let report = BattleScorer::new(self.content.synergies()).score(&BattleContext {
            team: &self.run.roster,
            hexes: &self.run.hexes,
            artifacts: &self.run.artifacts,
            act_index: self.run.act_index,
            node_type,
        });
        let won = report.outcome.is_win();
        let screen = if node_type == NodeType::Boss { RunPhase::Boss } else { RunPhase::Battle };
        self.battle_report = Some(report);

        if won {
            self.grant_gold(self.config.win_gold(self.run.act_index));
            self.current_rewards = self.rewards.generate(
                &mut self.rng,
                self.content.disciples(),
                self.content.hexes(),
                self.content.artifacts(),
            );
            self.set_phase(screen);
            return;
        }

        self.run.life = self.run.life.saturating_sub(1);
        self.notify(Notification::LifeLost { amount: 1, total: self.run.life });
        if self.run.life > 0 {
            self.set_phase(screen);
        } else if !self.run.revive_used {
            self.set_phase(RunPhase::Revive);
        } else {
            self.finish(RunOutcome::Defeated);
        }
    }

    pub(crate) fn generate_shop(&mut self) {
        let active_tags = self.run.active_tags();
        self.current_shop = self.shop.generate_shop(
            &mut self.rng,
            self.content.disciples(),
            self.run.act_index,
            &active_tags,
        );
    }

    pub(crate) fn grant_gold(&mut self, amount: u32) {
        self.run.gold = self.run.gold.saturating_add(amount);
        self.notify(Notification::GoldGained { amount, total: self.run.gold });
    }

    pub(crate) fn grant_life(&mut self, amount: u32) {
        self.run.life = self.run.life.saturating_add(amount);
        self.notify(Notification::LifeGained { amount, total: self.run.life });
    }

    fn reject_for_gold(&mut self, needed: u32) {
        tracing::warn!(
            target: "xianxia_run::run",
            needed,
            available = self.run.gold,
            "run.command.insufficient_gold"
        );
        self.notify(Notification::InsufficientGold {
            needed,
            available: self.run.gold,
        });
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        tracing::info!(
            target: "xianxia_run::run",
            ?outcome,
            act = self.run.act_index,
            node = self.run.node_index,
            "run.finished"
        );
        self.notify(Notification::RunFinished(outcome));
        self.set_phase(RunPhase::Result);
    }

    pub(crate) fn set_phase(&mut self, phase: RunPhase) {
        tracing::debug!(
            target: "xianxia_run::run",
            from = ?self.phase,
            to = ?phase,
            act = self.run.act_index,
            node = self.run.node_index,
            "run.phase.changed"
        );
        self.phase = phase;
        if let Some(observer) = self.observer.as_mut() {
            observer.phase_changed(phase);
        }
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        tracing::debug!(target: "xianxia_run::run", %notification, "run.notification");
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&notification);
        }
    }
}

impl std::fmt::Debug for RunStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStateMachine")
            .field("phase", &self.phase)
            .field("seed", &self.seed)
            .field("run", &self.run)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
