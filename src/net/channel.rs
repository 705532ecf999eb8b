//! 控制通道
//!
//! 交换机与控制器之间的交互，全部以仿真事件表示：
//! - [`SwitchConnect`]：握手完成，控制器下发初始规则
//! - [`FlowModArrive`]：flow-mod 文本到达交换机，解析后写入流表并调度硬超时
//! - [`FlowExpire`]：表项硬超时，交换机删除表项并上报 flow-removed
//! - [`FlowRemovedArrive`]：flow-removed 到达控制器，控制器按切换状态下发规则
//!
//! 控制器 -> 交换机、交换机 -> 控制器两个方向都经过 `Network::ctrl_latency` 的时延。

use super::id::NodeId;
use super::net_world::NetWorld;
use crate::ctrl::{FlowRemoved, FlowRule, SwitchEvent};
use crate::sim::{Event, Simulator, World};
use tracing::{debug, info, trace, warn};

impl NetWorld {
    /// 为所有交换机调度握手（按添加顺序），在 `sim.now() + ctrl_latency` 完成。
    pub fn start(&self, sim: &mut Simulator) {
        let latency = self.net.ctrl_latency();
        for node in self.net.switches() {
            sim.schedule_after(latency, SwitchConnect { node });
        }
    }

    /// 控制器把规则渲染成文本并发往交换机
    fn send_flow_mods(&mut self, node: NodeId, rules: Vec<FlowRule>, sim: &mut Simulator) {
        let latency = self.net.ctrl_latency();
        for rule in rules {
            let cmd = rule.render();
            trace!(?node, %cmd, "发送 flow-mod");
            self.net.stats.flow_mods_sent += 1;
            sim.schedule_after(latency, FlowModArrive { node, cmd });
        }
    }
}

/// 事件：交换机与控制器握手完成
#[derive(Debug)]
pub struct SwitchConnect {
    pub node: NodeId,
}

impl Event for SwitchConnect {
    #[tracing::instrument(skip(self, sim, world), fields(node = ?self.node))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let SwitchConnect { node } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        let Some(sw) = w.net.switch_mut(node) else {
            warn!("节点不是交换机，忽略握手");
            return;
        };
        sw.connected = true;
        let dpid = sw.dpid();
        w.net.stats.handshakes += 1;
        w.net.viz_handshake(sim.now(), node);

        let rules = w.controller.dispatch(&SwitchEvent::HandshakeComplete(dpid));
        w.send_flow_mods(node, rules, sim);
    }
}

/// 事件：flow-mod 指令到达交换机
#[derive(Debug)]
pub struct FlowModArrive {
    pub node: NodeId,
    pub cmd: String,
}

impl Event for FlowModArrive {
    #[tracing::instrument(skip(self, sim, world), fields(node = ?self.node))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let FlowModArrive { node, cmd } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");
        let now = sim.now();

        let rule = match cmd.parse::<FlowRule>() {
            Ok(rule) => rule,
            Err(err) => {
                warn!(%err, "丢弃无法解析的 flow-mod");
                w.net.stats.flow_mods_rejected += 1;
                w.net.viz_flow_mod_rejected(now, node, &cmd, &err.to_string());
                return;
            }
        };

        let Some((entry, replaced)) = w.net.install_rule(node, rule, now) else {
            warn!("节点不是交换机，丢弃 flow-mod");
            w.net.stats.flow_mods_rejected += 1;
            return;
        };
        info!(%cmd, entry_id = entry.id, replaced, "📝 写入流表");
        w.net.viz_flow_mod(now, node, &cmd, entry.id, replaced);

        if let Some(at) = entry.expires_at() {
            debug!(entry_id = entry.id, expires_at = ?at, "调度硬超时");
            sim.schedule(
                at,
                FlowExpire {
                    node,
                    entry_id: entry.id,
                },
            );
        }
    }
}

/// 事件：表项硬超时到期
#[derive(Debug)]
pub struct FlowExpire {
    pub node: NodeId,
    pub entry_id: u64,
}

impl Event for FlowExpire {
    #[tracing::instrument(skip(self, sim, world), fields(node = ?self.node, entry_id = self.entry_id))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let FlowExpire { node, entry_id } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        let Some(msg) = w.net.expire_entry(node, entry_id, sim.now()) else {
            return;
        };
        w.net.viz_flow_expired(sim.now(), node, &msg, entry_id);
        sim.schedule_after(w.net.ctrl_latency(), FlowRemovedArrive { node, msg });
    }
}

/// 事件：flow-removed 消息到达控制器
#[derive(Debug)]
pub struct FlowRemovedArrive {
    pub node: NodeId,
    pub msg: FlowRemoved,
}

impl Event for FlowRemovedArrive {
    #[tracing::instrument(skip(self, sim, world), fields(node = ?self.node, switch = %self.msg.switch))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let FlowRemovedArrive { node, msg } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<NetWorld>()
            .expect("world must be NetWorld");

        w.net.stats.flow_removed_msgs += 1;
        let dpid = msg.switch;
        let rules = w.controller.dispatch(&SwitchEvent::FlowRemoved(msg));
        let state = w.controller.toggle_state(dpid);
        w.net.viz_flow_removed(sim.now(), node, rules.len(), state);
        w.send_flow_mods(node, rules, sim);
    }
}

