//! The `Sim` struct and its frame loop.

use sn_core::{AgentId, SimClock};
use sn_host::{AgentBody, AreaSearch, WorldQueries};
use sn_navigator::Navigator;
use sn_pathfinding::ScriptedPathfinder;

use crate::{HostWorld, SimObserver, SimResult};

/// Timing for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    /// Seconds per frame.
    pub frame_secs:       f32,
    /// Seconds between AI intervals.
    pub ai_interval_secs: f32,
    /// Length of [`Sim::run`].
    pub total_secs:       f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self { frame_secs: 0.1, ai_interval_secs: 0.2, total_secs: 60.0 }
    }
}

/// The simulation runner.
///
/// Each frame:
///
/// 1. **Pathfinding**: the scripted service advances one step.
/// 2. **Movement**: agents walk toward their destination or chased player.
/// 3. **Interval** (every `ai_interval_secs`): each live agent runs the
///    host's interval logic with smart navigation wired in:
///    - targetability gate once the entrance cooldown has passed; `false`
///      ends this agent's interval,
///    - pursue the closest reachable player, or
///    - (re)start the area search and advance it.
/// 4. **Teleports**: entrance teleports are reported and any change of side
///    re-runs the node replacement hook.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub settings:  SimSettings,
    pub clock:     SimClock,
    pub world:     HostWorld,
    pub navigator: Navigator<ScriptedPathfinder>,
    interval_frames: u64,
}

impl Sim {
    pub(crate) fn new(settings: SimSettings, world: HostWorld, navigator: Navigator<ScriptedPathfinder>) -> Self {
        let clock = SimClock::new(settings.frame_secs);
        let interval_frames = clock.frames_for_secs(settings.ai_interval_secs);
        Self { settings, clock, world, navigator, interval_frames }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `settings.total_secs` of session time have passed.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.clock.frames_for_secs(self.settings.total_secs);
        while self.clock.frame < end {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.now_secs());
        Ok(())
    }

    /// Run exactly `n` frames from the current position.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Remove an agent from play and drop its navigation state.
    pub fn despawn(&mut self, agent: AgentId) {
        if let Some(a) = self.world.agents.get_mut(agent.index()) {
            a.alive = false;
            a.destination = None;
            a.chasing = None;
        }
        let routine = self.world.player_search_routine(agent);
        self.world.stop_search(agent, routine);
        self.navigator.on_agent_destroyed(agent);
    }

    // ── Frame processing ──────────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        self.navigator.service.advance();
        self.world.step_movement(self.settings.frame_secs);

        if self.clock.frame.is_multiple_of(self.interval_frames) {
            for i in 0..self.world.agents.len() {
                let agent = AgentId(i as u32);
                if self.world.agents[i].alive {
                    self.run_interval(agent);
                }
            }
            observer.on_interval(self.clock.now_secs(), &self.world);
        }

        for event in self.world.drain_teleports() {
            observer.on_teleport(event.agent, event.position, event.outside);
            if event.changed_outside {
                self.navigator.on_agent_set_outside(event.agent, &mut self.world);
            }
        }

        self.clock.advance();
        self.world.now = self.clock.now_secs();
    }

    /// One agent's interval logic.
    fn run_interval(&mut self, agent: AgentId) {
        let world = &mut self.world;
        let nav = &mut self.navigator;

        if nav.gate_due(world.secs_since_entrance_use(agent)) && !nav.check_targetable(agent, world) {
            return;
        }

        let routine = world.player_search_routine(agent);
        if let Some(player) = world.closest_player(agent) {
            if world.search_in_progress(routine) {
                world.stop_search(agent, routine);
            }
            nav.pursue_player(agent, player, world);
            return;
        }

        if !world.search_in_progress(routine) {
            let origin = world.position(agent);
            nav.start_search(agent, origin, routine, world);
        }
        world.step_search(agent);
    }
}
