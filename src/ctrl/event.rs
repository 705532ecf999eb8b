//! 交换机生命周期事件

use super::id::SwitchId;
use super::rule::MatchField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 流表项被删除的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovedReason {
    IdleTimeout,
    HardTimeout,
    Delete,
}

/// 交换机上报的 flow-removed 消息。
///
/// 除 `switch` 外的字段只用于日志；控制器的决策只看交换机身份。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRemoved {
    pub switch: SwitchId,
    pub table: u8,
    pub priority: u16,
    pub matches: BTreeMap<MatchField, u32>,
    pub reason: RemovedReason,
    pub duration_s: u32,
}

impl FlowRemoved {
    /// 只有交换机身份、其余字段取默认值的消息
    pub fn bare(switch: SwitchId) -> Self {
        Self {
            switch,
            table: 0,
            priority: 0,
            matches: BTreeMap::new(),
            reason: RemovedReason::HardTimeout,
            duration_s: 0,
        }
    }
}

/// 控制器消费的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchEvent {
    HandshakeComplete(SwitchId),
    FlowRemoved(FlowRemoved),
}

impl SwitchEvent {
    pub fn switch(&self) -> SwitchId {
        match self {
            SwitchEvent::HandshakeComplete(id) => *id,
            SwitchEvent::FlowRemoved(msg) => msg.switch,
        }
    }
}
