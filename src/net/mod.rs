//! 交换网络模块
//!
//! 节点、带端口号的链路、交换机流表，以及交换机与控制器之间的控制通道事件。
//! 不建模数据包传输。

mod channel;
mod flow_table;
mod id;
mod link;
mod net_world;
mod network;
mod network_viz;
mod node;
mod stats;

pub use channel::{FlowExpire, FlowModArrive, FlowRemovedArrive, SwitchConnect};
pub use flow_table::{FlowEntry, FlowTable};
pub use id::{LinkId, NodeId, PortNo};
pub use link::Link;
pub use net_world::NetWorld;
pub use network::Network;
pub use node::{ControllerNode, Host, Node, NodeKind, Switch};
pub use stats::Stats;
