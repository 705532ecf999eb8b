//! 离散事件仿真核心
//!
//! 仿真时间、事件、世界和仿真器。控制器与交换机之间的所有交互都以事件形式调度。

mod event;
mod scheduled_event;
mod simulator;
mod time;

pub use event::{Event, World};
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
