//! 拓扑构建

pub mod tri_switches;
