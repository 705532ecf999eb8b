//! 规则配置文件（JSON）
//!
//! ```json
//! { "switches": [
//!     { "dpid": 1,
//!       "handshake": [ { "table": 0, "in_port": 2, "priority": 2, "hard_timeout_s": 2,
//!                        "instruction": "apply", "output": 1 } ],
//!       "on_flow_removed": { "a": [ ... ], "b": [ ... ] } } ] }
//! ```
//!
//! 规则字段在反序列化阶段全部可缺省，缺失的必填字段由 [`FlowRuleBuilder`] 在构建规则表时报错，
//! 这样错误信息能指出是哪台交换机、哪个字段。

use super::error::{ConfigError, RuleError};
use super::id::SwitchId;
use super::profile::{AlternatingRules, ProfileTable, SwitchRuleProfile};
use super::rule::{FlowRule, FlowRuleBuilder, InstructionKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub switches: Vec<SwitchProfileSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchProfileSpec {
    pub dpid: u64,
    #[serde(default)]
    pub handshake: Vec<RuleSpec>,
    #[serde(default)]
    pub on_flow_removed: Option<AlternatingSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternatingSpec {
    pub a: Vec<RuleSpec>,
    pub b: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub table: Option<u8>,
    #[serde(default)]
    pub in_port: Option<u32>,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_timeout_s: Option<u16>,
    #[serde(default)]
    pub instruction: Option<InstructionKind>,
    #[serde(default)]
    pub output: Option<u32>,
}

impl RuleSpec {
    fn new(
        in_port: u32,
        priority: u16,
        hard_timeout_s: Option<u16>,
        instruction: InstructionKind,
        output: u32,
    ) -> Self {
        Self {
            table: Some(0),
            in_port: Some(in_port),
            priority: Some(priority),
            hard_timeout_s,
            instruction: Some(instruction),
            output: Some(output),
        }
    }

    pub fn to_rule(&self) -> Result<FlowRule, RuleError> {
        let mut b = FlowRuleBuilder::default().hard_timeout_s(self.hard_timeout_s);
        if let Some(table) = self.table {
            b = b.table(table);
        }
        if let Some(port) = self.in_port {
            b = b.in_port(port);
        }
        if let Some(prio) = self.priority {
            b = b.priority(prio);
        }
        if let Some(kind) = self.instruction {
            b = b.instruction(kind);
        }
        if let Some(out) = self.output {
            b = b.output(out);
        }
        b.build()
    }
}

fn build_rules(switch: SwitchId, specs: &[RuleSpec]) -> Result<Vec<FlowRule>, ConfigError> {
    specs
        .iter()
        .map(|s| {
            s.to_rule()
                .map_err(|source| ConfigError::MalformedRule { switch, source })
        })
        .collect()
}

impl ProfileConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 三交换机示例的内置配置：
    /// - dpid 1：握手下发两条 apply 规则（硬超时 2s），删除时在 A/B 两组之间交替
    /// - dpid 2：握手下发两条永久 write 规则，无交替
    /// - dpid 3：握手下发两条 write 规则（硬超时 2s），删除时在 A/B 两组之间交替
    pub fn builtin() -> Self {
        use InstructionKind::{Apply, Write};
        let hard = Some(2);
        Self {
            switches: vec![
                SwitchProfileSpec {
                    dpid: 1,
                    handshake: vec![
                        RuleSpec::new(2, 2, hard, Apply, 1),
                        RuleSpec::new(1, 3, hard, Apply, 2),
                    ],
                    on_flow_removed: Some(AlternatingSpec {
                        a: vec![
                            RuleSpec::new(2, 2, hard, Apply, 1),
                            RuleSpec::new(1, 1, hard, Apply, 2),
                        ],
                        b: vec![
                            RuleSpec::new(3, 2, hard, Apply, 1),
                            RuleSpec::new(1, 1, hard, Apply, 3),
                        ],
                    }),
                },
                SwitchProfileSpec {
                    dpid: 2,
                    handshake: vec![
                        RuleSpec::new(2, 2, None, Write, 3),
                        RuleSpec::new(3, 1, None, Write, 2),
                    ],
                    on_flow_removed: None,
                },
                SwitchProfileSpec {
                    dpid: 3,
                    handshake: vec![
                        RuleSpec::new(0, 2, hard, Write, 1),
                        RuleSpec::new(0, 1, hard, Write, 2),
                    ],
                    on_flow_removed: Some(AlternatingSpec {
                        a: vec![
                            RuleSpec::new(2, 2, hard, Write, 1),
                            RuleSpec::new(1, 1, hard, Write, 2),
                        ],
                        b: vec![
                            RuleSpec::new(3, 2, hard, Write, 1),
                            RuleSpec::new(1, 1, hard, Write, 3),
                        ],
                    }),
                },
            ],
        }
    }

    /// 校验并构建规则表
    pub fn build_table(&self) -> Result<ProfileTable, ConfigError> {
        let mut table = ProfileTable::default();
        for entry in &self.switches {
            let id = SwitchId(entry.dpid);
            let handshake = build_rules(id, &entry.handshake)?;
            let alternating = match &entry.on_flow_removed {
                Some(alt) => Some(AlternatingRules::new(
                    build_rules(id, &alt.a)?,
                    build_rules(id, &alt.b)?,
                )),
                None => None,
            };
            if table
                .insert(id, SwitchRuleProfile::new(handshake, alternating))
                .is_some()
            {
                return Err(ConfigError::DuplicateSwitch(id));
            }
        }
        Ok(table)
    }
}
