use crate::ctrl::{
    Controller, FlowRemoved, FlowRule, InstructionKind, ProfileConfig, RemovedReason, SwitchEvent,
    SwitchId, ToggleState,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

fn builtin_controller() -> Controller {
    let table = ProfileConfig::builtin()
        .build_table()
        .expect("builtin profile is valid");
    Controller::new(table)
}

/// (in_port, priority, output) 三元组，便于断言
fn shape(rules: &[FlowRule]) -> Vec<(Option<u32>, u16, u32)> {
    rules
        .iter()
        .map(|r| (r.in_port(), r.priority(), r.output_port()))
        .collect()
}

#[test]
fn handshake_returns_profile_rules_in_order() {
    let ctrl = builtin_controller();
    let rules = ctrl.on_handshake_complete(SwitchId(1));
    assert_eq!(shape(&rules), vec![(Some(2), 2, 1), (Some(1), 3, 2)]);
    assert!(rules.iter().all(|r| r.instruction() == InstructionKind::Apply));
    assert!(rules.iter().all(|r| r.hard_timeout_s() == Some(2)));
}

#[test]
fn handshake_is_idempotent_and_does_not_touch_toggle_state() {
    let ctrl = builtin_controller();
    for id in [SwitchId(1), SwitchId(2), SwitchId(3)] {
        let first = ctrl.on_handshake_complete(id);
        for _ in 0..3 {
            assert_eq!(ctrl.on_handshake_complete(id), first);
        }
        assert_eq!(ctrl.toggle_state(id), ToggleState::A);
    }
}

#[test]
fn handshake_for_switch_two_uses_permanent_write_rules() {
    let ctrl = builtin_controller();
    let rules = ctrl.on_handshake_complete(SwitchId(2));
    assert_eq!(
        rules.iter().map(FlowRule::render).collect::<Vec<_>>(),
        vec![
            "flow-mod cmd=add,table=0,flags=0x0001,prio=2 in_port=2 write:output=3",
            "flow-mod cmd=add,table=0,flags=0x0001,prio=1 in_port=3 write:output=2",
        ]
    );
}

#[test]
fn flow_removed_alternates_with_period_two() {
    let ctrl = builtin_controller();
    let id = SwitchId(1);

    let first = ctrl.on_flow_removed(id);
    assert_eq!(shape(&first), vec![(Some(2), 2, 1), (Some(1), 1, 2)]);
    assert_eq!(ctrl.toggle_state(id), ToggleState::B);

    let second = ctrl.on_flow_removed(id);
    assert_eq!(shape(&second), vec![(Some(3), 2, 1), (Some(1), 1, 3)]);
    assert_eq!(ctrl.toggle_state(id), ToggleState::A);

    let third = ctrl.on_flow_removed(id);
    assert_eq!(third, first);
}

#[test]
fn flow_removed_for_switch_three_uses_write_instructions() {
    let ctrl = builtin_controller();
    let rules = ctrl.on_flow_removed(SwitchId(3));
    assert_eq!(shape(&rules), vec![(Some(2), 2, 1), (Some(1), 1, 2)]);
    assert!(rules.iter().all(|r| r.instruction() == InstructionKind::Write));
}

#[test]
fn flow_removed_without_alternating_behavior_is_always_empty() {
    let ctrl = builtin_controller();
    for _ in 0..5 {
        assert!(ctrl.on_flow_removed(SwitchId(2)).is_empty());
    }
    assert_eq!(ctrl.toggle_state(SwitchId(2)), ToggleState::A);
}

#[test]
fn unknown_switch_yields_empty_sequences() {
    let ctrl = builtin_controller();
    assert!(ctrl.on_handshake_complete(SwitchId(99)).is_empty());
    assert!(ctrl.on_flow_removed(SwitchId(99)).is_empty());
    assert!(ctrl.on_flow_removed(SwitchId(99)).is_empty());
}

#[test]
fn dispatch_routes_both_event_kinds() {
    let ctrl = builtin_controller();
    let hs = ctrl.dispatch(&SwitchEvent::HandshakeComplete(SwitchId(3)));
    assert_eq!(shape(&hs), vec![(Some(0), 2, 1), (Some(0), 1, 2)]);

    let msg = FlowRemoved {
        switch: SwitchId(3),
        table: 0,
        priority: 2,
        matches: BTreeMap::new(),
        reason: RemovedReason::HardTimeout,
        duration_s: 2,
    };
    let ev = SwitchEvent::FlowRemoved(msg);
    assert_eq!(ev.switch(), SwitchId(3));
    let first = ctrl.dispatch(&ev);
    let second = ctrl.dispatch(&SwitchEvent::FlowRemoved(FlowRemoved::bare(SwitchId(3))));
    assert_ne!(first, second);
    assert_eq!(ctrl.toggle_state(SwitchId(3)), ToggleState::A);
}

#[test]
fn emitted_rules_are_fresh_copies() {
    let ctrl = builtin_controller();
    let a = ctrl.on_handshake_complete(SwitchId(1));
    drop(a);
    let b = ctrl.on_handshake_complete(SwitchId(1));
    assert_eq!(b.as_slice(), ctrl.profiles().lookup(SwitchId(1)).expect("configured").handshake());
}

#[test]
fn concurrent_flow_removed_on_distinct_switches_is_independent() {
    let ctrl = Arc::new(builtin_controller());
    let n1 = 1_001;
    let n3 = 1_000;

    thread::scope(|s| {
        let c1 = Arc::clone(&ctrl);
        let c3 = Arc::clone(&ctrl);
        s.spawn(move || {
            for _ in 0..n1 {
                c1.on_flow_removed(SwitchId(1));
            }
        });
        s.spawn(move || {
            for _ in 0..n3 {
                c3.on_flow_removed(SwitchId(3));
            }
        });
    });

    // 最终状态只取决于各自的调用次数
    assert_eq!(ctrl.toggle_state(SwitchId(1)), ToggleState::B);
    assert_eq!(ctrl.toggle_state(SwitchId(3)), ToggleState::A);
}
