//! 统计信息
//!
//! 控制通道与流表的计数器。

/// 网络统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub handshakes: u64,
    /// 控制器发出的 flow-mod 数
    pub flow_mods_sent: u64,
    /// 交换机成功写入流表的 flow-mod 数
    pub flow_mods_applied: u64,
    /// 交换机无法解析而丢弃的 flow-mod 数
    pub flow_mods_rejected: u64,
    /// 写入时覆盖了已有表项的次数
    pub flows_replaced: u64,
    pub flows_expired: u64,
    /// 送达控制器的 flow-removed 消息数
    pub flow_removed_msgs: u64,
}
