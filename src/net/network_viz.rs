//! Visualization hooks for the network.

use crate::ctrl::{FlowRemoved, MatchField, ToggleState};
use crate::sim::SimTime;
use crate::viz::{VizEvent, VizEventKind, VizLinkInfo, VizNodeInfo, VizNodeKind};

use super::node::NodeKind;
use super::{Network, NodeId};

impl Network {
    fn viz_push(&mut self, t: SimTime, node: NodeId, kind: VizEventKind) {
        let dpid = self.switch(node).map(|s| s.dpid().0);
        if let Some(v) = &mut self.viz {
            v.push(VizEvent {
                t_ns: t.0,
                dpid,
                kind,
            });
        }
    }

    pub fn emit_viz_meta(&mut self) {
        if self.viz.is_none() {
            return;
        }
        let nodes = self
            .nodes()
            .map(|n| {
                let pos = self.position(n.id());
                VizNodeInfo {
                    id: n.id().0,
                    name: n.name().to_string(),
                    kind: match n.kind() {
                        NodeKind::Host => VizNodeKind::Host,
                        NodeKind::Switch => VizNodeKind::Switch,
                        NodeKind::Controller => VizNodeKind::Controller,
                    },
                    dpid: n.as_switch().map(|s| s.dpid().0),
                    x: pos.map(|p| p.0),
                    y: pos.map(|p| p.1),
                }
            })
            .collect::<Vec<_>>();
        let links = self
            .links
            .iter()
            .map(|l| VizLinkInfo {
                a: l.a.0,
                a_port: l.a_port,
                b: l.b.0,
                b_port: l.b_port,
                rate_bps: l.rate_bps,
                delay_ns: l.delay.0,
            })
            .collect::<Vec<_>>();
        if let Some(v) = &mut self.viz {
            v.push(VizEvent {
                t_ns: 0,
                dpid: None,
                kind: VizEventKind::Meta { nodes, links },
            });
        }
    }

    pub(crate) fn viz_handshake(&mut self, t: SimTime, node: NodeId) {
        self.viz_push(t, node, VizEventKind::Handshake { node: node.0 });
    }

    pub(crate) fn viz_flow_mod(&mut self, t: SimTime, node: NodeId, cmd: &str, entry_id: u64, replaced: bool) {
        self.viz_push(
            t,
            node,
            VizEventKind::FlowMod {
                node: node.0,
                cmd: cmd.to_string(),
                entry_id,
                replaced,
            },
        );
    }

    pub(crate) fn viz_flow_mod_rejected(&mut self, t: SimTime, node: NodeId, cmd: &str, reason: &str) {
        self.viz_push(
            t,
            node,
            VizEventKind::FlowModRejected {
                node: node.0,
                cmd: cmd.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    pub(crate) fn viz_flow_expired(&mut self, t: SimTime, node: NodeId, msg: &FlowRemoved, entry_id: u64) {
        self.viz_push(
            t,
            node,
            VizEventKind::FlowExpired {
                node: node.0,
                entry_id,
                priority: msg.priority,
                in_port: msg.matches.get(&MatchField::InPort).copied(),
            },
        );
    }

    pub(crate) fn viz_flow_removed(
        &mut self,
        t: SimTime,
        node: NodeId,
        rules: usize,
        toggle: ToggleState,
    ) {
        self.viz_push(
            t,
            node,
            VizEventKind::FlowRemoved {
                node: node.0,
                rules,
                toggle: toggle.to_string(),
            },
        );
    }
}
