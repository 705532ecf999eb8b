//! 三交换机 OpenFlow 仿真
//!
//! 三台交换机呈三角形互连，各挂一台主机，由一个响应式控制器管理：握手时下发初始规则，
//! 表项硬超时后按每台交换机的 A/B 状态交替下发规则。

use clap::Parser;
use ofsim_rs::ctrl::{ConfigError, Controller, ProfileConfig};
use ofsim_rs::net::NetWorld;
use ofsim_rs::sim::{SimTime, Simulator};
use ofsim_rs::topo::tri_switches::{build_tri_switches, TriSwitchOpts};
use ofsim_rs::viz::VizLogger;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "tri-switches", about = "三交换机 OpenFlow 仿真：响应式流表控制器")]
struct Args {
    /// 仿真时长（秒）
    #[arg(long, default_value_t = 10)]
    sim_time: u64,
    /// 输出 debug 级别日志（RUST_LOG 优先）
    #[arg(long)]
    verbose: bool,
    /// 仿真结束时打印每台交换机的流表
    #[arg(long)]
    trace: bool,
    /// 规则配置 JSON；缺省使用内置的三交换机配置
    #[arg(long)]
    profiles: Option<PathBuf>,
    /// 输出可视化事件 JSON
    #[arg(long)]
    viz_json: Option<PathBuf>,
    /// 控制通道单向时延（微秒）
    #[arg(long, default_value_t = 0)]
    ctrl_latency_us: u64,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("write viz json {path}: {source}")]
    Viz {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn run(args: Args) -> Result<(), RunError> {
    let config = match &args.profiles {
        Some(path) => ProfileConfig::load(path)?,
        None => ProfileConfig::builtin(),
    };
    let table = config.build_table()?;
    info!(switches = table.len(), "规则表已加载");

    let mut sim = Simulator::default();
    let mut world = NetWorld::new(Arc::new(Controller::new(table)));
    world
        .net
        .set_ctrl_latency(SimTime::from_micros(args.ctrl_latency_us));

    build_tri_switches(&mut world, &TriSwitchOpts::default());

    if args.viz_json.is_some() {
        world.net.viz = Some(VizLogger::default());
        world.net.emit_viz_meta();
    }

    world.start(&mut sim);
    sim.run_until(SimTime::from_secs(args.sim_time), &mut world);

    if args.trace {
        for node in world.net.switches() {
            let Some(sw) = world.net.switch(node) else {
                continue;
            };
            println!(
                "{} {} entries={} toggle={}",
                sw.dpid(),
                world.net.node(node).name(),
                sw.table.len(),
                world.controller.toggle_state(sw.dpid())
            );
            for entry in sw.table.entries() {
                println!(
                    "  #{} installed@{} {}",
                    entry.id,
                    entry.installed_at,
                    entry.rule
                );
            }
        }
    }

    if let (Some(path), Some(viz)) = (&args.viz_json, &world.net.viz) {
        viz.write_json(path).map_err(|source| RunError::Viz {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), events = viz.events.len(), "可视化事件已写出");
    }

    let stats = &world.net.stats;
    println!(
        "done @ {:?}, handshakes={}, flow_mods={}, flows_expired={}, flow_removed={}",
        sim.now(),
        stats.handshakes,
        stats.flow_mods_applied,
        stats.flows_expired,
        stats.flow_removed_msgs
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // 初始化 tracing
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "仿真失败");
            ExitCode::FAILURE
        }
    }
}
