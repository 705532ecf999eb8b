//! 节点类型
//!
//! 定义网络节点，包括节点 trait 和具体实现（主机、交换机、控制器）。

use super::flow_table::FlowTable;
use super::id::NodeId;
use crate::ctrl::SwitchId;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Host,
    Switch,
    Controller,
}

/// 节点接口
pub trait Node: Send {
    /// 获取节点标识符
    fn id(&self) -> NodeId;

    /// 获取节点名称
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    fn as_switch(&self) -> Option<&Switch> {
        None
    }

    fn as_switch_mut(&mut self) -> Option<&mut Switch> {
        None
    }
}

/// 主机节点
#[derive(Debug)]
pub struct Host {
    id: NodeId,
    name: String,
}

impl Host {
    /// 创建新主机
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Node for Host {
    fn id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Host
    }
}

/// OpenFlow 交换机：持有 datapath id 和流表
#[derive(Debug)]
pub struct Switch {
    id: NodeId,
    name: String,
    dpid: SwitchId,
    pub table: FlowTable,
    pub connected: bool,
}

impl Switch {
    /// 创建新交换机
    pub fn new(id: NodeId, name: impl Into<String>, dpid: SwitchId) -> Self {
        Self {
            id,
            name: name.into(),
            dpid,
            table: FlowTable::default(),
            connected: false,
        }
    }

    pub fn dpid(&self) -> SwitchId {
        self.dpid
    }
}

impl Node for Switch {
    fn id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Switch
    }

    fn as_switch(&self) -> Option<&Switch> {
        Some(self)
    }

    fn as_switch_mut(&mut self) -> Option<&mut Switch> {
        Some(self)
    }
}

/// 控制器所在节点（只参与拓扑展示）
#[derive(Debug)]
pub struct ControllerNode {
    id: NodeId,
    name: String,
}

impl ControllerNode {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Node for ControllerNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Controller
    }
}
