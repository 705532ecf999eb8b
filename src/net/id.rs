//! 标识符类型
//!
//! 定义节点和链路的唯一标识符。

/// 节点标识符（按创建顺序编号，从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// 链路标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// 交换机端口号（每个节点从 1 开始按接入顺序编号）
pub type PortNo = u32;
