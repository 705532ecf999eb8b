use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// 可视化事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 拓扑元信息（t=0 的第一条事件）
    Meta {
        nodes: Vec<VizNodeInfo>,
        links: Vec<VizLinkInfo>,
    },
    /// 交换机与控制器握手完成
    Handshake { node: usize },
    /// 交换机写入一条 flow-mod
    FlowMod {
        node: usize,
        cmd: String,
        entry_id: u64,
        /// 是否覆盖了 (table, priority, match) 相同的旧表项
        replaced: bool,
    },
    /// 交换机丢弃无法解析的 flow-mod
    FlowModRejected {
        node: usize,
        cmd: String,
        reason: String,
    },
    /// 表项硬超时
    FlowExpired {
        node: usize,
        entry_id: u64,
        priority: u16,
        in_port: Option<u32>,
    },
    /// flow-removed 到达控制器
    FlowRemoved {
        node: usize,
        /// 控制器因此下发的规则数
        rules: usize,
        /// 处理后的切换状态（"A" / "B"）
        toggle: String,
    },
}

/// 节点类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VizNodeKind {
    Host,
    Switch,
    Controller,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub name: String,
    pub kind: VizNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpid: Option<u64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizLinkInfo {
    pub a: usize,
    pub a_port: u32,
    pub b: usize,
    pub b_port: u32,
    /// 链路速率（bps）
    pub rate_bps: u64,
    /// 传播时延（ns）
    pub delay_ns: u64,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizEvent {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpid: Option<u64>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    /// 以 JSON 数组写出全部事件
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, &self.events).map_err(io::Error::other)?;
        out.flush()
    }
}
