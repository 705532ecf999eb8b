//! 事件与世界
//!
//! 事件由仿真器按 (时间, 序号) 顺序取出执行；世界持有业务状态，由事件通过向下转型访问。

use super::simulator::Simulator;
use std::any::Any;

/// 可调度的事件。`self: Box<Self>` 让事件执行时拿回自身字段的所有权。
///
/// 事件内部可以继续调度新事件（例如流表项安装后调度其超时事件）。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}

/// 仿真世界：交换网络与控制器等业务状态的容器。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 每个事件执行后回调，默认什么都不做
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
