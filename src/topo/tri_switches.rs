//! 三交换机拓扑构建
//!
//! ```text
//!                  +----+
//!                  | s2 | === h2
//!                  +----+
//!                 /      \
//!               c0 (控制器，只连控制通道)
//!               /          \
//!   h0 === +----+ ------ +----+ === h1
//!          | s0 |        | s1 |
//!          +----+        +----+
//! ```
//!
//! 节点创建顺序：h0 h1 h2 s0 s1 s2 c0。交换机 dpid 依次为 1、2、3。
//! 每台交换机的端口按接入顺序编号：
//! - s0：1=h0，2=s1，3=s2
//! - s1：1=h1，2=s0，3=s2
//! - s2：1=h2，2=s1，3=s0

use crate::net::{NetWorld, NodeId};
use crate::sim::SimTime;

/// 三交换机拓扑配置选项
#[derive(Debug, Clone)]
pub struct TriSwitchOpts {
    /// 链路速率（bps）
    pub link_rate_bps: u64,
    /// 链路传播时延
    pub link_delay: SimTime,
    /// 是否设置可视化坐标
    pub positions: bool,
}

impl Default for TriSwitchOpts {
    fn default() -> Self {
        Self {
            link_rate_bps: 100_000_000,
            link_delay: SimTime::from_millis(2),
            positions: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriSwitchTopology {
    pub hosts: [NodeId; 3],
    pub switches: [NodeId; 3],
    pub controller: NodeId,
}

/// 构建三交换机拓扑
pub fn build_tri_switches(world: &mut NetWorld, opts: &TriSwitchOpts) -> TriSwitchTopology {
    let net = &mut world.net;
    let hosts = [net.add_host("h0"), net.add_host("h1"), net.add_host("h2")];
    let switches = [
        net.add_switch("s0"),
        net.add_switch("s1"),
        net.add_switch("s2"),
    ];

    let (rate, delay) = (opts.link_rate_bps, opts.link_delay);

    // host i <-> switch i
    for (h, s) in hosts.iter().zip(switches.iter()) {
        net.connect(*h, *s, rate, delay);
    }
    // s0 <-> s1 <-> s2 <-> s0
    net.connect(switches[0], switches[1], rate, delay);
    net.connect(switches[1], switches[2], rate, delay);
    net.connect(switches[2], switches[0], rate, delay);

    let controller = net.add_controller("c0");

    if opts.positions {
        net.set_position(hosts[0], 14.5, 25.0);
        net.set_position(hosts[1], 65.5, 25.0);
        net.set_position(hosts[2], 40.0, 70.0);
        net.set_position(switches[0], 23.0, 30.0);
        net.set_position(switches[1], 57.0, 30.0);
        net.set_position(switches[2], 40.0, 60.0);
        net.set_position(controller, 40.0, 40.0);
    }

    TriSwitchTopology {
        hosts,
        switches,
        controller,
    }
}
