//! 响应式流表控制器
//!
//! 根据交换机身份（datapath id）和每台交换机的切换状态，在握手完成与流表项删除两类事件上
//! 下发 flow-mod 指令：
//! - [`ProfileTable`]：静态规则表，dpid -> 握手规则 + 可选的 A/B 交替规则
//! - [`ToggleStore`]：每台交换机一个二值状态
//! - [`Controller`]：事件分发
//! - [`FlowRule`]：flow-mod 值对象及其文本线格式

mod config;
mod controller;
mod error;
mod event;
mod id;
mod profile;
mod rule;
mod toggle;
mod wire;

pub use config::{AlternatingSpec, ProfileConfig, RuleSpec, SwitchProfileSpec};
pub use controller::Controller;
pub use error::{ConfigError, RuleError, UnknownSwitch};
pub use event::{FlowRemoved, RemovedReason, SwitchEvent};
pub use id::SwitchId;
pub use profile::{AlternatingRules, ProfileTable, SwitchRuleProfile};
pub use rule::{FlowRule, FlowRuleBuilder, InstructionKind, MatchField, FLAG_SEND_FLOW_REM};
pub use toggle::{ToggleState, ToggleStore};
