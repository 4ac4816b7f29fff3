//! masked — two small scenarios for the smart_nav enemy navigation layer.
//!
//! A single building with a main entrance and one fire exit.  The same enemy
//! starts deep inside near the fire exit, first with roaming off (it may only
//! leave through the main entrance, and only to reach a player) and then with
//! roaming on (it searches the whole map and uses whichever door is closest).
//!
//! Run with `RUST_LOG=debug` for per-agent navigation detail.

use std::time::Instant;

use anyhow::Result;
use glam::Vec3;

use sn_core::{AgentId, NavConfig};
use sn_sim::{AgentSpec, HostWorld, SimBuilder, SimObserver, SimSettings, SiteLayout};

// ── Constants ─────────────────────────────────────────────────────────────────

const INTERIOR_Y:  f32 = -200.0;
const SIM_SECS:    f32 = 30.0;
const FRAME_SECS:  f32 = 0.05;
const AI_INTERVAL: f32 = 0.2;

// ── Site ──────────────────────────────────────────────────────────────────────

fn build_site() -> SiteLayout {
    let mut layout = SiteLayout::new(-100.0);
    layout.add_entrance_pair(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, INTERIOR_Y, 0.0), true);
    layout.add_entrance_pair(Vec3::new(120.0, 0.0, 40.0), Vec3::new(90.0, INTERIOR_Y, 10.0), false);
    layout.inside_nodes = vec![
        Vec3::new(20.0, INTERIOR_Y, 5.0),
        Vec3::new(45.0, INTERIOR_Y, -10.0),
        Vec3::new(70.0, INTERIOR_Y, 15.0),
        Vec3::new(85.0, INTERIOR_Y, 0.0),
    ];
    layout.outside_nodes = vec![
        Vec3::new(-30.0, 0.0, 20.0),
        Vec3::new(60.0, 0.0, 60.0),
        Vec3::new(140.0, 0.0, 70.0),
    ];
    layout
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Report {
    teleports:  Vec<(f64, AgentId, Vec3, bool)>,
    last_now:   f64,
    chase_secs: f64,
}

impl SimObserver for Report {
    fn on_interval(&mut self, now: f64, world: &HostWorld) {
        if world.agents.iter().any(|a| a.chasing.is_some()) {
            self.chase_secs += now - self.last_now;
        }
        self.last_now = now;
    }

    fn on_teleport(&mut self, agent: AgentId, position: Vec3, outside: bool) {
        self.teleports.push((self.last_now, agent, position, outside));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn run_scenario(name: &str, roaming: bool) -> Result<()> {
    let t0 = Instant::now();
    let mut sim = SimBuilder::new(build_site())
        .settings(SimSettings { frame_secs: FRAME_SECS, ai_interval_secs: AI_INTERVAL, total_secs: SIM_SECS })
        .nav_config(NavConfig::default().with_roaming(roaming))
        .latency(3)
        .agent(AgentSpec { speed: 8.0, ..AgentSpec::at(Vec3::new(80.0, INTERIOR_Y, 5.0)) })
        .player(Vec3::new(-20.0, 0.0, 10.0))
        .build()?;

    let mut report = Report::default();
    sim.run(&mut report)?;

    log::info!("── {name} (roaming {roaming}) ──");
    for (at, agent, position, outside) in &report.teleports {
        let side = if *outside { "outside" } else { "inside" };
        log::info!("  t={at:>6.2}s  {agent} teleported {side} at {position}");
    }
    if report.teleports.is_empty() {
        log::info!("  no entrance used");
    }
    let a = &sim.world.agents[0];
    log::info!(
        "  final: {} at {}, chasing {:?}, {:.1}s spent chasing",
        if a.outside { "outside" } else { "inside" },
        a.position,
        a.chasing,
        report.chase_secs,
    );
    log::info!(
        "  {} path requests, wall time {:.1} ms",
        sim.navigator.service.submissions(),
        t0.elapsed().as_secs_f64() * 1e3,
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run_scenario("confined", false)?;
    run_scenario("roaming", true)?;
    Ok(())
}
