use crate::ctrl::{Controller, ProfileConfig};
use crate::net::NetWorld;
use crate::sim::{SimTime, Simulator};
use crate::topo::tri_switches::{build_tri_switches, TriSwitchOpts};
use crate::viz::{VizEventKind, VizLogger, VizNodeKind};
use std::sync::Arc;

fn world() -> NetWorld {
    let table = ProfileConfig::builtin().build_table().expect("builtin");
    NetWorld::new(Arc::new(Controller::new(table)))
}

#[test]
fn viz_meta_includes_nodes_links_and_ports() {
    let mut world = world();
    let h0 = world.net.add_host("h0");
    let s0 = world.net.add_switch("s0");
    world.net.set_position(s0, 10.0, 20.0);

    let delay = SimTime::from_micros(2);
    let bw = 10_u64 * 1_000_000_000;
    world.net.connect(h0, s0, bw, delay);

    world.net.viz = Some(VizLogger::default());
    world.net.emit_viz_meta();

    let events = &world.net.viz.as_ref().expect("viz enabled").events;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].t_ns, 0);
    assert_eq!(events[0].dpid, None);

    let (nodes, links) = match &events[0].kind {
        VizEventKind::Meta { nodes, links } => (nodes, links),
        _ => panic!("expected Meta event"),
    };

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, h0.0);
    assert_eq!(nodes[0].kind, VizNodeKind::Host);
    assert_eq!(nodes[0].dpid, None);
    assert_eq!(nodes[0].x, None);
    assert_eq!(nodes[1].name, "s0");
    assert_eq!(nodes[1].kind, VizNodeKind::Switch);
    assert_eq!(nodes[1].dpid, Some(1));
    assert_eq!((nodes[1].x, nodes[1].y), (Some(10.0), Some(20.0)));

    assert_eq!(links.len(), 1);
    assert_eq!((links[0].a, links[0].a_port), (h0.0, 1));
    assert_eq!((links[0].b, links[0].b_port), (s0.0, 1));
    assert_eq!(links[0].rate_bps, bw);
    assert_eq!(links[0].delay_ns, delay.0);
}

#[test]
fn viz_meta_is_noop_without_logger() {
    let mut world = world();
    world.net.add_host("h0");
    world.net.emit_viz_meta();
    assert!(world.net.viz.is_none());
}

#[test]
fn viz_trace_follows_meta_with_tagged_switch_events() {
    let mut world = world();
    build_tri_switches(&mut world, &TriSwitchOpts::default());
    world.net.viz = Some(VizLogger::default());
    world.net.emit_viz_meta();

    let mut sim = Simulator::default();
    world.start(&mut sim);
    sim.run_until(SimTime::from_secs(3), &mut world);

    let events = &world.net.viz.as_ref().expect("viz enabled").events;
    assert!(matches!(events[0].kind, VizEventKind::Meta { .. }));
    assert!(events[1..].iter().all(|e| e.dpid.is_some()));
    assert!(events.windows(2).all(|w| w[0].t_ns <= w[1].t_ns));

    let handshakes = events
        .iter()
        .filter(|e| matches!(e.kind, VizEventKind::Handshake { .. }))
        .count();
    assert_eq!(handshakes, 3);

    let replaced = events
        .iter()
        .filter(|e| matches!(e.kind, VizEventKind::FlowMod { replaced: true, .. }))
        .count();
    assert_eq!(replaced, 2);

    let toggles = events
        .iter()
        .filter_map(|e| match &e.kind {
            VizEventKind::FlowRemoved { toggle, rules, .. } if e.dpid == Some(1) => {
                Some((toggle.as_str(), *rules))
            }
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(toggles, vec![("B", 2), ("A", 2)]);

    let json = serde_json::to_value(&events[1]).expect("serialize");
    assert_eq!(json["kind"], "handshake");
    assert_eq!(json["t_ns"], 0);
}
