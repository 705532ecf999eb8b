//! 网络拓扑管理
//!
//! 节点、带端口号的链路、交换机流表以及控制通道参数。

use std::collections::HashMap;

use super::flow_table::FlowEntry;
use super::id::{LinkId, NodeId, PortNo};
use super::link::Link;
use super::node::{ControllerNode, Host, Node, NodeKind, Switch};
use super::stats::Stats;
use crate::ctrl::{FlowRemoved, FlowRule, RemovedReason, SwitchId};
use crate::sim::SimTime;
use crate::viz::VizLogger;
use tracing::{debug, info, trace};

/// 网络拓扑
#[derive(Default)]
pub struct Network {
    nodes: Vec<Box<dyn Node>>,
    pub(crate) positions: Vec<Option<(f64, f64)>>,
    pub(crate) links: Vec<Link>,
    ports: Vec<Vec<LinkId>>,
    dpids: HashMap<SwitchId, NodeId>,
    ctrl_latency: SimTime,
    pub stats: Stats,
    pub viz: Option<VizLogger>,
}

impl Network {
    fn push_node(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = node.id();
        self.nodes.push(node);
        self.positions.push(None);
        self.ports.push(Vec::new());
        id
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.next_id();
        self.push_node(Box::new(Host::new(id, name)))
    }

    /// 添加交换机节点，datapath id 按添加顺序从 1 开始分配
    pub fn add_switch(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.next_id();
        let dpid = SwitchId(self.dpids.len() as u64 + 1);
        self.dpids.insert(dpid, id);
        debug!(node = ?id, %dpid, "添加交换机");
        self.push_node(Box::new(Switch::new(id, name, dpid)))
    }

    /// 添加控制器节点
    pub fn add_controller(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.next_id();
        self.push_node(Box::new(ControllerNode::new(id, name)))
    }

    /// 连接两个节点（双向链路），两端各分配一个新端口
    ///
    /// # Panics
    ///
    /// `a` 或 `b` 不是由本网络分配时 panic。
    pub fn connect(&mut self, a: NodeId, b: NodeId, rate_bps: u64, delay: SimTime) -> LinkId {
        let id = LinkId(self.links.len());
        self.ports[a.0].push(id);
        let a_port = self.ports[a.0].len() as PortNo;
        self.ports[b.0].push(id);
        let b_port = self.ports[b.0].len() as PortNo;
        trace!(?a, a_port, ?b, b_port, "连接节点");
        self.links.push(Link {
            a,
            a_port,
            b,
            b_port,
            rate_bps,
            delay,
        });
        id
    }

    /// 设置节点坐标；不属于本网络的节点被忽略
    pub fn set_position(&mut self, node: NodeId, x: f64, y: f64) {
        if let Some(slot) = self.positions.get_mut(node.0) {
            *slot = Some((x, y));
        }
    }

    pub fn position(&self, node: NodeId) -> Option<(f64, f64)> {
        self.positions.get(node.0).copied().flatten()
    }

    /// # Panics
    ///
    /// `id` 不是由本网络分配时 panic。
    pub fn node(&self, id: NodeId) -> &dyn Node {
        self.nodes[id.0].as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &dyn Node> {
        self.nodes.iter().map(|n| n.as_ref())
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn switch(&self, id: NodeId) -> Option<&Switch> {
        self.nodes.get(id.0).and_then(|n| n.as_switch())
    }

    pub fn switch_mut(&mut self, id: NodeId) -> Option<&mut Switch> {
        self.nodes.get_mut(id.0).and_then(|n| n.as_switch_mut())
    }

    /// 按添加顺序列出所有交换机
    pub fn switches(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.kind() == NodeKind::Switch)
            .map(|n| n.id())
            .collect()
    }

    pub fn node_of_dpid(&self, dpid: SwitchId) -> Option<NodeId> {
        self.dpids.get(&dpid).copied()
    }

    /// 节点的端口数
    pub fn port_count(&self, node: NodeId) -> usize {
        self.ports.get(node.0).map_or(0, Vec::len)
    }

    /// `node` 上连向 `peer` 的端口号
    pub fn port_to(&self, node: NodeId, peer: NodeId) -> Option<PortNo> {
        self.ports.get(node.0)?.iter().find_map(|l| {
            let link = &self.links[l.0];
            if link.peer_of(node) == Some(peer) {
                link.port_of(node)
            } else {
                None
            }
        })
    }

    /// 控制通道单向时延（控制器 <-> 交换机）
    pub fn ctrl_latency(&self) -> SimTime {
        self.ctrl_latency
    }

    pub fn set_ctrl_latency(&mut self, latency: SimTime) {
        self.ctrl_latency = latency;
    }

    /// 把规则写入交换机流表，返回新表项的副本和是否覆盖了旧表项。
    pub(crate) fn install_rule(
        &mut self,
        node: NodeId,
        rule: FlowRule,
        now: SimTime,
    ) -> Option<(FlowEntry, bool)> {
        let sw = self.switch_mut(node)?;
        let (id, replaced) = sw.table.install(rule, now);
        let entry = sw.table.get(id)?.clone();
        let dpid = sw.dpid();
        self.stats.flow_mods_applied += 1;
        if let Some(old) = &replaced {
            self.stats.flows_replaced += 1;
            debug!(%dpid, old_entry = old.id, new_entry = id, "覆盖已有表项");
        }
        Some((entry, replaced.is_some()))
    }

    /// 硬超时到期：删除表项并生成 flow-removed 消息。表项已被覆盖时返回 `None`。
    pub(crate) fn expire_entry(&mut self, node: NodeId, entry_id: u64, now: SimTime) -> Option<FlowRemoved> {
        let sw = self.switch_mut(node)?;
        let Some(entry) = sw.table.remove(entry_id) else {
            trace!(?node, entry_id, "表项已不存在，忽略过期事件");
            return None;
        };
        let dpid = sw.dpid();
        self.stats.flows_expired += 1;
        let duration = now.since(entry.installed_at);
        info!(
            %dpid,
            entry_id,
            priority = entry.rule.priority(),
            in_port = ?entry.rule.in_port(),
            "⌛ 表项硬超时"
        );
        Some(FlowRemoved {
            switch: dpid,
            table: entry.rule.table(),
            priority: entry.rule.priority(),
            matches: entry.rule.matches().clone(),
            reason: RemovedReason::HardTimeout,
            duration_s: (duration.0 / 1_000_000_000) as u32,
        })
    }
}
