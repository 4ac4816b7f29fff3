//! Fluent builder for constructing a [`Sim`].

use glam::Vec3;
use sn_core::{AgentId, NavConfig};
use sn_navigator::NavigatorBuilder;
use sn_pathfinding::ScriptedPathfinder;

use crate::{HostWorld, Sim, SimError, SimResult, SimSettings, SiteLayout};

/// One enemy to place at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSpec {
    pub position:     Vec3,
    pub speed:        f32,
    /// Agents without a navigation component never take part in smart
    /// pathing.
    pub has_nav:      bool,
    pub search_width: f32,
}

impl AgentSpec {
    pub fn at(position: Vec3) -> Self {
        Self { position, speed: 5.0, has_nav: true, search_width: 40.0 }
    }
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SiteLayout`]: sides, entrances, and AI nodes
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                  |
/// |--------------------|--------------------------|
/// | `.settings(s)`     | `SimSettings::default()` |
/// | `.nav_config(c)`   | `NavConfig::default()`   |
/// | `.latency(n)`      | `2` frames               |
/// | `.sight_range(r)`  | `30.0`                   |
/// | `.agent(spec)`     | no agents                |
/// | `.player(pos)`     | no players               |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(layout)
///     .nav_config(NavConfig::default().with_roaming(true))
///     .agent(AgentSpec::at(Vec3::new(0.0, -200.0, 0.0)))
///     .player(Vec3::new(40.0, 0.0, 0.0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    layout:      SiteLayout,
    settings:    SimSettings,
    nav_config:  NavConfig,
    latency:     u32,
    sight_range: f32,
    agents:      Vec<AgentSpec>,
    players:     Vec<Vec3>,
}

impl SimBuilder {
    pub fn new(layout: SiteLayout) -> Self {
        Self {
            layout,
            settings:    SimSettings::default(),
            nav_config:  NavConfig::default(),
            latency:     2,
            sight_range: 30.0,
            agents:      Vec::new(),
            players:     Vec::new(),
        }
    }

    pub fn settings(mut self, settings: SimSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn nav_config(mut self, config: NavConfig) -> Self {
        self.nav_config = config;
        self
    }

    /// Frames the scripted pathfinder takes to answer a request.
    pub fn latency(mut self, frames: u32) -> Self {
        self.latency = frames;
        self
    }

    pub fn sight_range(mut self, range: f32) -> Self {
        self.sight_range = range;
        self
    }

    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.agents.push(spec);
        self
    }

    pub fn player(mut self, position: Vec3) -> Self {
        self.players.push(position);
        self
    }

    /// Validate inputs, spawn everything, run the creation and start hooks,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let s = &self.settings;
        for (what, v) in [
            ("frame_secs", s.frame_secs),
            ("ai_interval_secs", s.ai_interval_secs),
            ("total_secs", s.total_secs),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimError::Config(format!("{what} must be positive, got {v}")));
            }
        }
        for (index, e) in self.layout.entrances.iter().enumerate() {
            if e.partner >= self.layout.entrances.len() {
                return Err(SimError::DanglingEntrance { index, partner: e.partner });
            }
        }

        let layout = self.layout.clone();
        let service = ScriptedPathfinder::new(self.latency, move |q| layout.route(q.from, q.to, q.links));
        let mut navigator = NavigatorBuilder::new(service).config(self.nav_config).build()?;

        let mut world = HostWorld::new(self.layout, self.sight_range);
        for spec in &self.agents {
            world.spawn_agent(spec.position, spec.speed, spec.has_nav, spec.search_width);
        }
        for &position in &self.players {
            world.add_player(position);
        }

        for i in 0..world.agents.len() {
            let agent = AgentId(i as u32);
            navigator.on_agent_created(agent, &world);
            navigator.on_agent_started(agent, &mut world);
        }

        log::info!(
            "sim ready: {} agents, {} players, roaming {}",
            world.agents.len(),
            world.players.len(),
            navigator.is_roaming()
        );
        Ok(Sim::new(self.settings, world, navigator))
    }
}
