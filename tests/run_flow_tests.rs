//! Run state machine flow tests.
//!
//! These drive whole runs through the public command surface:
//! - Progression and bounds
//! - Battle wins, losses and the revive prompt
//! - Shop purchases and refreshes
//! - Events and observer ordering

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use xianxia_run::content::{BaseStats, ContentTables};
use xianxia_run::map::{ACT_COUNT, NODES_PER_ACT};
use xianxia_run::{
    ArtifactDef, BattleOutcome, ContentProvider, DiscipleDef, EventDef, EventOption, HexDef, MapGenerator, NodeType,
    Notification, RandomSource, ResourceDelta, RewardKind, RunConfig, RunObserver, RunOutcome, RunPhase,
    RunStateMachine, SynergyDef,
};

/// Content whose starting pair wins every battle (or loses every battle).
fn content(strong: bool) -> Arc<ContentProvider> {
    let stats = if strong {
        BaseStats { hp: 2000.0, atk: 300.0, speed: 10.0 }
    } else {
        BaseStats { hp: 1.0, atk: 1.0, speed: 10.0 }
    };
    let tables = ContentTables {
        disciples: vec![
            DiscipleDef::new(1, "青云", 1, stats, 1.0).with_tag("剑"),
            DiscipleDef::new(2, "紫霞", 2, stats, 1.0).with_tag("剑"),
            DiscipleDef::new(3, "赤炎", 3, stats, 2.0).with_tag("火"),
        ],
        hexes: vec![HexDef::new(10, "剑意", 2, 1.0).with_tag("剑")],
        artifacts: vec![ArtifactDef::new(20, "玉佩", 1)],
        synergies: vec![SynergyDef::new("剑").with_tier(2, 10.0, 20.0)],
        events: vec![
            EventDef::new(30, "奇遇").with_option(EventOption::new(
                "献金",
                ResourceDelta::gold(5),
                ResourceDelta::life(1),
            )),
        ],
    };
    Arc::new(ContentProvider::new(tables).unwrap())
}

fn started(strong: bool, config: RunConfig) -> RunStateMachine {
    let mut machine = RunStateMachine::new(content(strong), config);
    machine.start_new_run_with_seed(42);
    machine
}

/// Advance from the start of the run to the first node of `node_type` in act 0.
fn walk_to_act0(machine: &mut RunStateMachine, node_type: NodeType) {
    let index = machine
        .map()
        .act(0)
        .unwrap()
        .iter()
        .position(|n| n.node_type == node_type)
        .unwrap();
    for _ in 0..index {
        machine.advance_node();
    }
    assert_eq!(machine.current_node().node_type, node_type);
}

#[derive(Clone, Debug, PartialEq)]
enum Seen {
    Phase(RunPhase),
    Note(Notification),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Seen>>>);

impl RunObserver for Recorder {
    fn phase_changed(&mut self, phase: RunPhase) {
        self.0.borrow_mut().push(Seen::Phase(phase));
    }

    fn notify(&mut self, notification: &Notification) {
        self.0.borrow_mut().push(Seen::Note(notification.clone()));
    }
}

#[test]
fn test_fifteen_advances_finish_the_run() {
    let mut machine = started(true, RunConfig::default());

    for step in 0..ACT_COUNT * NODES_PER_ACT {
        assert_eq!(machine.phase(), RunPhase::Map, "step {step}");
        machine.advance_node();
        let info = machine.run_info();
        assert!(info.act < ACT_COUNT);
        assert!(info.node < NODES_PER_ACT);
    }

    assert_eq!(machine.phase(), RunPhase::Result);
    assert_eq!(machine.outcome(), Some(RunOutcome::Cleared));
    assert!(machine.result_summary().starts_with("Result: Cleared"));

    // No active run: further advances are no-ops.
    machine.advance_node();
    assert_eq!(machine.phase(), RunPhase::Result);
}

#[test]
fn test_fourteen_advances_reach_boss() {
    let mut machine = started(true, RunConfig::default());
    for _ in 0..ACT_COUNT * NODES_PER_ACT - 1 {
        machine.advance_node();
    }

    let info = machine.run_info();
    assert_eq!((info.act, info.node), (2, 4));
    assert_eq!(info.node_type, NodeType::Boss);

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Boss);
    assert_eq!(machine.battle_report().unwrap().outcome, BattleOutcome::Win);
}

#[test]
fn test_battle_win_grants_gold_and_rewards() {
    let mut machine = started(true, RunConfig::default());
    assert_eq!(machine.current_node().node_type, NodeType::Battle);

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Battle);
    assert_eq!(machine.run_state().gold(), 25);
    let kinds: Vec<_> = machine.current_rewards().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![RewardKind::Disciple, RewardKind::Hex, RewardKind::Artifact]);

    machine.to_reward();
    assert_eq!(machine.phase(), RunPhase::Reward);

    machine.choose_reward(7);
    assert_eq!(machine.phase(), RunPhase::Reward);

    machine.choose_reward(1);
    assert_eq!(machine.run_state().hexes().len(), 1);
    assert_eq!(machine.phase(), RunPhase::Map);
    assert_eq!(machine.run_state().node_index(), 1);
}

#[test]
fn test_disciple_and_artifact_rewards() {
    let mut machine = started(true, RunConfig::default());
    machine.enter_current_node();
    machine.to_reward();
    machine.choose_reward(0);
    assert_eq!(machine.run_state().roster().len(), 3);

    // second battle of act 0 is node 3
    while machine.run_state().node_index() < 3 {
        machine.advance_node();
    }
    machine.enter_current_node();
    machine.to_reward();
    machine.choose_reward(2);
    assert_eq!(machine.run_state().artifacts().len(), 1);
    assert_eq!(machine.run_state().artifacts()[0].name, "玉佩");
}

#[test]
fn test_battle_loss_costs_life_and_skips_reward() {
    let mut machine = started(false, RunConfig::default());

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Battle);
    assert_eq!(machine.battle_report().unwrap().outcome, BattleOutcome::Loss);
    assert_eq!(machine.run_state().life(), 4);
    assert_eq!(machine.run_state().gold(), 20);

    machine.to_reward();
    assert_eq!(machine.phase(), RunPhase::Map);
    assert_eq!(machine.run_state().node_index(), 1);
}

#[test]
fn test_revive_only_once() {
    let mut machine = started(false, RunConfig::default().with_starting_life(1));

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Revive);
    assert_eq!(machine.run_state().life(), 0);

    machine.revive(true);
    assert!(machine.run_state().revive_used());
    // Re-entered the same battle and lost again.
    assert_eq!(machine.run_state().node_index(), 0);
    assert_eq!(machine.phase(), RunPhase::Result);
    assert_eq!(machine.outcome(), Some(RunOutcome::Defeated));

    machine.revive(true);
    assert_eq!(machine.phase(), RunPhase::Result);
}

#[test]
fn test_revive_then_second_depletion_ends_run() {
    let mut machine = started(false, RunConfig::default().with_starting_life(1));

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Revive);
    machine.add_life(1);
    machine.revive(true);
    // life max(1, 1) = 1, lost again -> 0, revive used -> Result
    assert_eq!(machine.phase(), RunPhase::Result);
}

#[test]
fn test_revive_declined() {
    let mut machine = started(false, RunConfig::default().with_starting_life(1));
    machine.enter_current_node();
    machine.revive(false);

    assert_eq!(machine.phase(), RunPhase::Result);
    assert!(!machine.run_state().revive_used());
    assert!(machine.result_summary().starts_with("Result: Fell at act 1 node 1"));
}

#[test]
fn test_revive_accept_returns_to_play() {
    let mut machine = started(false, RunConfig::default().with_starting_life(1));
    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Revive);

    // The rematch is lost again, but with life to spare the run continues.
    machine.add_life(3);
    machine.revive(true);
    assert_eq!(machine.phase(), RunPhase::Battle);
    assert_eq!(machine.run_state().life(), 2);

    machine.to_reward();
    assert_eq!(machine.phase(), RunPhase::Map);
    assert_eq!(machine.run_state().node_index(), 1);
}

#[test]
fn test_revive_prompt_blocks_moving_on() {
    let mut machine = started(false, RunConfig::default().with_starting_life(1));
    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Revive);
    let before = machine.run_state().clone();

    machine.advance_node();
    machine.go_next_node();
    machine.force_hex_reward();
    machine.to_reward();
    machine.enter_current_node();

    assert_eq!(machine.phase(), RunPhase::Revive);
    assert_eq!(machine.run_state(), &before);
}

#[test]
fn test_weak_team_run_ends_in_defeat() {
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let mut machine = RunStateMachine::new(content(false), RunConfig::default().with_starting_life(1))
        .with_observer(Box::new(recorder));
    machine.start_new_run_with_seed(42);

    for _ in 0..40 {
        machine.enter_current_node();
        machine.advance_node();
        machine.to_reward();
    }
    assert_eq!(machine.phase(), RunPhase::Revive);
    machine.revive(true);

    assert_eq!(machine.phase(), RunPhase::Result);
    assert_eq!(machine.outcome(), Some(RunOutcome::Defeated));
    let prompts = log.borrow().iter().filter(|s| **s == Seen::Phase(RunPhase::Revive)).count();
    assert_eq!(prompts, 1);
}

#[test]
fn test_paid_refresh_only_in_shop() {
    let mut machine = started(true, RunConfig::default());
    machine.refresh_shop(false);
    assert_eq!(machine.run_state().gold(), 20);
    assert!(machine.shop_snapshot().items.is_empty());
    assert!(machine.pity_snapshot().is_empty());

    machine.enter_current_node();
    machine.refresh_shop(false);
    assert_eq!(machine.run_state().gold(), 25);
    assert!(machine.shop_snapshot().items.is_empty());
}

#[test]
fn test_map_drawn_from_run_stream() {
    let machine = started(true, RunConfig::default());
    let expected = MapGenerator::generate_with(&mut RandomSource::new(42));
    assert_eq!(machine.map(), &expected);
}

#[test]
fn test_shop_purchase_and_refresh() {
    let mut machine = started(true, RunConfig::default());
    walk_to_act0(&mut machine, NodeType::Shop);

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Shop);
    assert_eq!(machine.shop_snapshot().items.len(), 5);

    let item = machine.shop_snapshot().items[0].clone();
    machine.buy_shop_item(0);
    assert_eq!(machine.run_state().gold(), 20 - item.price);
    assert_eq!(machine.run_state().roster().len(), 3);
    assert_eq!(machine.phase(), RunPhase::Shop);

    machine.buy_shop_item(99);
    assert_eq!(machine.run_state().roster().len(), 3);

    let gold = machine.run_state().gold();
    machine.refresh_shop(false);
    assert_eq!(machine.run_state().gold(), gold - 5);

    machine.advance_node();
    assert_eq!(machine.phase(), RunPhase::Map);
}

#[test]
fn test_shop_rejects_when_broke() {
    let mut machine = started(true, RunConfig::default().with_starting_gold(1));
    walk_to_act0(&mut machine, NodeType::Shop);
    machine.enter_current_node();

    let before = machine.run_state().clone();
    let shop_before = machine.shop_snapshot().clone();

    machine.buy_shop_item(0);
    machine.refresh_shop(false);

    assert_eq!(machine.run_state(), &before);
    assert_eq!(machine.shop_snapshot(), &shop_before);

    // Forced refresh ignores gold.
    machine.refresh_shop(true);
    assert_eq!(machine.run_state().gold(), 1);
}

#[test]
fn test_event_node() {
    let mut machine = started(true, RunConfig::default());
    walk_to_act0(&mut machine, NodeType::Event);

    machine.enter_current_node();
    assert_eq!(machine.phase(), RunPhase::Event);
    assert_eq!(machine.current_event().unwrap().name, "奇遇");

    machine.choose_event_option(3);
    assert_eq!(machine.phase(), RunPhase::Event);

    machine.choose_event_option(0);
    assert_eq!(machine.run_state().gold(), 15);
    assert_eq!(machine.run_state().life(), 6);
    assert_eq!(machine.phase(), RunPhase::Map);
}

#[test]
fn test_enter_only_from_map() {
    let mut machine = started(true, RunConfig::default());
    machine.enter_current_node();
    let gold = machine.run_state().gold();

    machine.enter_current_node();
    assert_eq!(machine.run_state().gold(), gold);
}

#[test]
fn test_menu_and_restart() {
    let mut machine = started(true, RunConfig::default());
    machine.advance_node();
    machine.go_to_menu();
    assert_eq!(machine.phase(), RunPhase::Menu);
    assert!(!machine.has_active_run());

    machine.advance_node();
    assert_eq!(machine.run_state().node_index(), 1);
    // Abandoned run stays readable.
    assert!(machine.result_summary().starts_with("Result: In progress: act 1 node 2"));
    machine.go_next_node();
    assert_eq!(machine.run_state().node_index(), 0);

    machine.start_new_run_with_seed(42);
    assert_eq!(machine.phase(), RunPhase::Map);
    assert_eq!(machine.run_state().node_index(), 0);
    assert!(machine.pity_snapshot().is_empty());
}

#[test]
fn test_roster_never_empty_after_start() {
    let mut machine = RunStateMachine::new(Arc::new(ContentProvider::builtin()), RunConfig::default());
    machine.start_new_run_with_seed(3);
    assert_eq!(machine.run_state().roster().len(), 1);
}

#[test]
fn test_map_preview_follows_position() {
    let mut machine = started(true, RunConfig::default());
    machine.advance_node();
    let preview = machine.map_preview();
    let current = preview.current().unwrap();
    assert_eq!((current.act, current.index), (0, 1));
}

#[test]
fn test_observer_order() {
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let mut machine = RunStateMachine::new(content(true), RunConfig::default()).with_observer(Box::new(recorder));

    machine.start_new_run_with_seed(42);
    machine.enter_current_node();

    let seen = log.borrow();
    assert_eq!(
        *seen,
        vec![
            Seen::Note(Notification::RunStarted { seed: 42 }),
            Seen::Phase(RunPhase::Map),
            Seen::Note(Notification::GoldGained { amount: 5, total: 25 }),
            Seen::Phase(RunPhase::Battle),
        ]
    );
}

#[test]
fn test_observer_sees_rejection() {
    let recorder = Recorder::default();
    let log = recorder.0.clone();
    let mut machine = started(true, RunConfig::default().with_starting_gold(0));
    walk_to_act0(&mut machine, NodeType::Shop);
    machine.enter_current_node();
    machine.set_observer(Some(Box::new(recorder)));

    machine.refresh_shop(false);

    assert_eq!(
        *log.borrow(),
        vec![Seen::Note(Notification::InsufficientGold { needed: 5, available: 0 })]
    );
}
