//! 静态规则表
//!
//! 在配置阶段一次性构建，运行期只读。

use super::error::UnknownSwitch;
use super::id::SwitchId;
use super::rule::FlowRule;
use super::toggle::ToggleState;
use std::collections::HashMap;

/// flow-removed 时交替下发的两组规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternatingRules {
    a: Vec<FlowRule>,
    b: Vec<FlowRule>,
}

impl AlternatingRules {
    pub fn new(a: Vec<FlowRule>, b: Vec<FlowRule>) -> Self {
        Self { a, b }
    }

    pub fn for_state(&self, state: ToggleState) -> &[FlowRule] {
        match state {
            ToggleState::A => &self.a,
            ToggleState::B => &self.b,
        }
    }
}

/// 单台交换机的规则配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRuleProfile {
    handshake: Vec<FlowRule>,
    alternating: Option<AlternatingRules>,
}

impl SwitchRuleProfile {
    pub fn new(handshake: Vec<FlowRule>, alternating: Option<AlternatingRules>) -> Self {
        Self {
            handshake,
            alternating,
        }
    }

    pub fn handshake(&self) -> &[FlowRule] {
        &self.handshake
    }

    pub fn alternating(&self) -> Option<&AlternatingRules> {
        self.alternating.as_ref()
    }
}

/// dpid -> 规则配置
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    profiles: HashMap<SwitchId, SwitchRuleProfile>,
}

impl ProfileTable {
    /// 插入一台交换机的配置；若该 dpid 已存在则返回旧配置。
    pub fn insert(&mut self, id: SwitchId, profile: SwitchRuleProfile) -> Option<SwitchRuleProfile> {
        self.profiles.insert(id, profile)
    }

    pub fn lookup(&self, id: SwitchId) -> Result<&SwitchRuleProfile, UnknownSwitch> {
        self.profiles.get(&id).ok_or(UnknownSwitch(id))
    }

    pub fn contains(&self, id: SwitchId) -> bool {
        self.profiles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// 按 dpid 升序列出已配置的交换机
    pub fn switches(&self) -> Vec<SwitchId> {
        let mut ids = self.profiles.keys().copied().collect::<Vec<_>>();
        ids.sort();
        ids
    }
}
