//! 交换机标识符

use serde::{Deserialize, Serialize};
use std::fmt;

/// 交换机身份：由交换网络在握手时分配的 datapath id。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchId(pub u64);

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dpid:{}", self.0)
    }
}
