//! 每台交换机的二值切换状态
//!
//! 每个 dpid 独占一个原子单元：读取当前值并翻转是一次 `fetch_xor`，同一交换机的两次翻转不会交错，
//! 不同交换机之间只在首次插入时竞争一次写锁。

use super::id::SwitchId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// 交替规则当前选中哪一组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToggleState {
    #[default]
    A,
    B,
}

impl ToggleState {
    pub fn flipped(self) -> Self {
        match self {
            ToggleState::A => ToggleState::B,
            ToggleState::B => ToggleState::A,
        }
    }

    // 原子单元里 false = A, true = B
    fn from_bit(bit: bool) -> Self {
        if bit { ToggleState::B } else { ToggleState::A }
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleState::A => f.write_str("A"),
            ToggleState::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ToggleStore {
    slots: RwLock<HashMap<SwitchId, Arc<AtomicBool>>>,
}

impl ToggleStore {
    /// 当前状态；从未出现过的交换机为 `A`。
    pub fn get(&self, id: SwitchId) -> ToggleState {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&id)
            .map(|cell| ToggleState::from_bit(cell.load(Ordering::Acquire)))
            .unwrap_or_default()
    }

    /// 翻转状态，返回翻转后的值。
    pub fn flip(&self, id: SwitchId) -> ToggleState {
        self.take_and_flip(id).flipped()
    }

    /// 读取并翻转，返回翻转前的值。
    pub fn take_and_flip(&self, id: SwitchId) -> ToggleState {
        let cell = self.slot(id);
        ToggleState::from_bit(cell.fetch_xor(true, Ordering::AcqRel))
    }

    /// 已经出现过的交换机数量
    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: SwitchId) -> Arc<AtomicBool> {
        if let Some(cell) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Arc::clone(cell);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id).or_default())
    }
}
