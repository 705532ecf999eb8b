//! 交换机流表
//!
//! 只保存表项并处理硬超时；不做数据包匹配转发，`lookup` 仅用于查询某个入端口当前生效的规则。

use super::id::PortNo;
use crate::ctrl::FlowRule;
use crate::sim::SimTime;

/// 流表项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEntry {
    /// 交换机内唯一的表项编号，覆盖写入会分配新编号
    pub id: u64,
    pub rule: FlowRule,
    pub installed_at: SimTime,
}

impl FlowEntry {
    /// 硬超时到期时刻；永久表项（无 hard 或 hard=0）返回 `None`
    pub fn expires_at(&self) -> Option<SimTime> {
        self.rule
            .hard_timeout_s()
            .filter(|&s| s > 0)
            .map(|s| self.installed_at.after(SimTime::from_secs(s as u64)))
    }
}

#[derive(Debug, Default)]
pub struct FlowTable {
    entries: Vec<FlowEntry>,
    next_id: u64,
}

impl FlowTable {
    /// 写入一条规则（cmd=add）。table/priority/match 完全相同的旧表项被替换并返回。
    pub fn install(&mut self, rule: FlowRule, now: SimTime) -> (u64, Option<FlowEntry>) {
        let id = self.next_id;
        self.next_id += 1;
        let entry = FlowEntry {
            id,
            rule,
            installed_at: now,
        };
        match self.entries.iter().position(|e| e.rule.same_entry(&entry.rule)) {
            Some(idx) => {
                let old = std::mem::replace(&mut self.entries[idx], entry);
                (id, Some(old))
            }
            None => {
                self.entries.push(entry);
                (id, None)
            }
        }
    }

    /// 按编号删除表项。已被覆盖或删除的编号返回 `None`。
    pub fn remove(&mut self, id: u64) -> Option<FlowEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn get(&self, id: u64) -> Option<&FlowEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 从 `in_port` 进入 `table` 的流量当前命中的表项：优先级最高者，同优先级取先写入的。
    pub fn lookup(&self, table: u8, in_port: PortNo) -> Option<&FlowEntry> {
        self.entries
            .iter()
            .filter(|e| e.rule.table() == table && e.rule.in_port() == Some(in_port))
            .fold(None, |best: Option<&FlowEntry>, e| match best {
                Some(b) if b.rule.priority() >= e.rule.priority() => Some(b),
                _ => Some(e),
            })
    }

    pub fn entries(&self) -> &[FlowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
