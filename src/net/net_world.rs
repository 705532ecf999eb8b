//! 网络世界实现
//!
//! 仿真世界：交换网络 + 共享的控制器。

use super::network::Network;
use crate::ctrl::Controller;
use crate::sim::World;
use std::any::Any;
use std::sync::Arc;

/// 持有 Network 与控制器的世界。控制器以 `Arc` 共享，可同时被仿真外的线程使用。
pub struct NetWorld {
    pub net: Network,
    pub controller: Arc<Controller>,
}

impl NetWorld {
    pub fn new(controller: Arc<Controller>) -> Self {
        Self {
            net: Network::default(),
            controller,
        }
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
