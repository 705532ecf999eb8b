//! 控制器错误类型

use super::id::SwitchId;
use std::path::PathBuf;
use thiserror::Error;

/// 流表规则构造 / 解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// 构造时缺少必填字段（静态配置错误）
    #[error("flow rule is missing required field `{0}`")]
    MissingField(&'static str),

    /// 线格式文本无法解析
    #[error("malformed flow-mod `{line}`: {reason}")]
    Parse { line: String, reason: String },
}

impl RuleError {
    pub(crate) fn parse(line: &str, reason: impl Into<String>) -> Self {
        RuleError::Parse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// 事件引用了没有规则配置的交换机。分发器把它当作空结果处理，不向外传播。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no rule profile configured for switch {0}")]
pub struct UnknownSwitch(pub SwitchId);

/// 规则配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read profile config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse profile config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("switch {0} is configured more than once")]
    DuplicateSwitch(SwitchId),

    #[error("switch {switch}: {source}")]
    MalformedRule {
        switch: SwitchId,
        #[source]
        source: RuleError,
    },
}
