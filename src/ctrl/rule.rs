//! flow-mod 规则
//!
//! [`FlowRule`] 是下发给交换机流表的一条指令，构造后不可变。线格式：
//!
//! ```text
//! flow-mod cmd=add,table=<int>,[hard=<int>,]flags=0x0001,prio=<int> in_port=<int> <apply|write>:output=<int>
//! ```

use super::error::RuleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// flags 字段：要求交换机在表项删除时上报 flow-removed。
pub const FLAG_SEND_FLOW_REM: u16 = 0x0001;

/// 匹配字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    InPort,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::InPort => "in_port",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "in_port" => Some(MatchField::InPort),
            _ => None,
        }
    }
}

/// 指令类型：apply 立即执行动作；write 写入 action set，流水线结束时执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    Apply,
    Write,
}

impl InstructionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionKind::Apply => "apply",
            InstructionKind::Write => "write",
        }
    }
}

/// 一条 flow-mod 规则（cmd=add）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowRule {
    table: u8,
    matches: BTreeMap<MatchField, u32>,
    priority: u16,
    hard_timeout_s: Option<u16>,
    instruction: InstructionKind,
    output_port: u32,
}

impl FlowRule {
    pub fn builder() -> FlowRuleBuilder {
        FlowRuleBuilder::default()
    }

    pub fn table(&self) -> u8 {
        self.table
    }

    pub fn matches(&self) -> &BTreeMap<MatchField, u32> {
        &self.matches
    }

    pub fn in_port(&self) -> Option<u32> {
        self.matches.get(&MatchField::InPort).copied()
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// `None` 表示永不硬超时
    pub fn hard_timeout_s(&self) -> Option<u16> {
        self.hard_timeout_s
    }

    pub fn instruction(&self) -> InstructionKind {
        self.instruction
    }

    pub fn output_port(&self) -> u32 {
        self.output_port
    }

    pub fn flags(&self) -> u16 {
        FLAG_SEND_FLOW_REM
    }

    /// 同一 table 内 (priority, match) 相同的两条规则指向同一个流表项。
    pub fn same_entry(&self, other: &FlowRule) -> bool {
        self.table == other.table && self.priority == other.priority && self.matches == other.matches
    }

    /// 渲染成线格式文本（一行，不含换行符）
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FlowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flow-mod cmd=add,table={}", self.table)?;
        if let Some(hard) = self.hard_timeout_s {
            write!(f, ",hard={hard}")?;
        }
        write!(f, ",flags=0x{:04x},prio={} ", FLAG_SEND_FLOW_REM, self.priority)?;
        for (i, (field, value)) in self.matches.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", field.as_str(), value)?;
        }
        write!(f, " {}:output={}", self.instruction.as_str(), self.output_port)
    }
}

/// [`FlowRule`] 构造器：缺少必填字段时 `build` 失败。
#[derive(Debug, Clone, Default)]
pub struct FlowRuleBuilder {
    table: Option<u8>,
    matches: BTreeMap<MatchField, u32>,
    priority: Option<u16>,
    hard_timeout_s: Option<u16>,
    instruction: Option<InstructionKind>,
    output_port: Option<u32>,
}

impl FlowRuleBuilder {
    pub fn table(mut self, table: u8) -> Self {
        self.table = Some(table);
        self
    }

    pub fn match_field(mut self, field: MatchField, value: u32) -> Self {
        self.matches.insert(field, value);
        self
    }

    pub fn in_port(self, port: u32) -> Self {
        self.match_field(MatchField::InPort, port)
    }

    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn hard_timeout_s(mut self, secs: Option<u16>) -> Self {
        self.hard_timeout_s = secs;
        self
    }

    pub fn instruction(mut self, kind: InstructionKind) -> Self {
        self.instruction = Some(kind);
        self
    }

    pub fn apply_output(self, port: u32) -> Self {
        self.instruction(InstructionKind::Apply).output(port)
    }

    pub fn write_output(self, port: u32) -> Self {
        self.instruction(InstructionKind::Write).output(port)
    }

    pub fn output(mut self, port: u32) -> Self {
        self.output_port = Some(port);
        self
    }

    pub fn build(self) -> Result<FlowRule, RuleError> {
        let table = self.table.ok_or(RuleError::MissingField("table"))?;
        let priority = self.priority.ok_or(RuleError::MissingField("priority"))?;
        if self.matches.is_empty() {
            return Err(RuleError::MissingField("match"));
        }
        let instruction = self
            .instruction
            .ok_or(RuleError::MissingField("instruction"))?;
        let output_port = self.output_port.ok_or(RuleError::MissingField("output"))?;
        Ok(FlowRule {
            table,
            matches: self.matches,
            priority,
            hard_timeout_s: self.hard_timeout_s,
            instruction,
            output_port,
        })
    }
}
