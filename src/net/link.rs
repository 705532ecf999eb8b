//! 链路类型
//!
//! 双向共享链路（CSMA 风格）。只记录两端端口和链路参数，不建模数据包传输。

use super::id::{NodeId, PortNo};
use crate::sim::SimTime;

/// 网络链路
#[derive(Debug, Clone)]
pub struct Link {
    pub a: NodeId,
    pub a_port: PortNo,
    pub b: NodeId,
    pub b_port: PortNo,
    pub rate_bps: u64,
    pub delay: SimTime,
}

impl Link {
    /// 链路在 `node` 一侧的端口号
    pub fn port_of(&self, node: NodeId) -> Option<PortNo> {
        if node == self.a {
            Some(self.a_port)
        } else if node == self.b {
            Some(self.b_port)
        } else {
            None
        }
    }

    /// 链路另一端
    pub fn peer_of(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
