//! The `Navigator` facade: lifecycle hooks and the host-facing entry points.

use glam::Vec3;
use sn_core::{AgentId, NavConfig, PlayerId, RoutineId};
use sn_host::NavHost;
use sn_pathfinding::PathfindingService;

use crate::{
    DestinationArrivalController, GoToOutcome, PathRequestRegistry, SearchModeController,
    TargetabilityGate, pursue_player, replace_ai_nodes,
};

/// Smart navigation for one running session.
///
/// Holds the pathfinding service plus all per-agent side tables.  Built once
/// per session via [`NavigatorBuilder`][crate::NavigatorBuilder]; dropping
/// it drops every entry.
///
/// The host wires three call sites to it:
///
/// | Host call site                          | Entry point                          |
/// |-----------------------------------------|--------------------------------------|
/// | periodic interval, after entrance cooldown | [`check_targetable`][Self::check_targetable] (early-return on `false`) |
/// | "start area search"                     | [`start_search`][Self::start_search] |
/// | "move towards target player"            | [`pursue_player`][Self::pursue_player] |
///
/// plus the lifecycle hooks `on_agent_created`, `on_agent_started`,
/// `on_agent_set_outside`, and `on_agent_destroyed`.
pub struct Navigator<S: PathfindingService> {
    /// The pathfinding service.  `pub` so the host can pump it.
    pub service: S,

    pub(crate) config:   NavConfig,
    pub(crate) registry: PathRequestRegistry,
    pub(crate) search:   SearchModeController,
    pub(crate) gate:     TargetabilityGate,
}

impl<S: PathfindingService> Navigator<S> {
    // ── Configuration ─────────────────────────────────────────────────────

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Flip the global roaming toggle.  Takes effect on the next call of any
    /// entry point; running searches pick it up when they are restarted.
    pub fn set_global_roaming(&mut self, roaming: bool) {
        if self.config.global_roaming != roaming {
            log::info!("global roaming {}", if roaming { "enabled" } else { "disabled" });
        }
        self.config.global_roaming = roaming;
    }

    #[inline]
    pub fn is_roaming(&self) -> bool {
        self.config.global_roaming
    }

    /// Arrival controller for the current settings.
    #[inline]
    pub fn arrival(&self) -> DestinationArrivalController {
        DestinationArrivalController::from_config(&self.config)
    }

    pub fn gate(&self) -> &TargetabilityGate {
        &self.gate
    }

    pub fn registry(&self) -> &PathRequestRegistry {
        &self.registry
    }

    pub fn search_modes(&self) -> &SearchModeController {
        &self.search
    }

    // ── Lifecycle hooks ───────────────────────────────────────────────────

    /// Register a freshly created agent with the pathfinding service.
    ///
    /// Agents without a navigation component are skipped and never take
    /// part in smart pathing.  Returns whether the agent was registered.
    pub fn on_agent_created<H: NavHost + ?Sized>(&mut self, agent: AgentId, host: &H) -> bool {
        let Some(nav) = host.nav_agent(agent) else {
            log::debug!("{agent}: no navigation component, smart pathing disabled");
            return false;
        };
        self.service.register_agent(nav);
        self.registry.register(agent, nav);
        true
    }

    /// The agent finished its own start-up; swap in whole-map AI nodes when
    /// roaming.
    pub fn on_agent_started<H: NavHost + ?Sized>(&mut self, agent: AgentId, host: &mut H) {
        replace_ai_nodes(agent, host, self.config.global_roaming);
    }

    /// The agent moved between inside and outside.
    pub fn on_agent_set_outside<H: NavHost + ?Sized>(&mut self, agent: AgentId, host: &mut H) {
        replace_ai_nodes(agent, host, self.config.global_roaming);
    }

    /// Drop every entry for `agent`.  Idempotent; unknown agents are fine.
    pub fn on_agent_destroyed(&mut self, agent: AgentId) {
        if let Some(task) = self.registry.remove(agent) {
            self.service.abandon(task.handle);
        }
        self.search.remove(agent);
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// One non-blocking request/consume step toward `target`.
    pub fn go_to_destination<H: NavHost + ?Sized>(
        &mut self,
        agent:  AgentId,
        target: Vec3,
        host:   &mut H,
    ) -> GoToOutcome {
        let arrival = self.arrival();
        self.registry.request_or_consume(
            agent,
            target,
            &mut self.service,
            host,
            &arrival,
            self.config.resubmit,
        )
    }

    /// `false` tells the host to skip the rest of this interval's logic.
    pub fn check_targetable<H: NavHost + ?Sized>(&mut self, agent: AgentId, host: &mut H) -> bool {
        let arrival = self.arrival();
        self.gate.check(
            agent,
            &mut self.registry,
            &mut self.service,
            host,
            &arrival,
            &self.config,
        )
    }

    /// `true` if the gate should run, given seconds since the agent last used
    /// an entrance.
    #[inline]
    pub fn gate_due(&self, secs_since_entrance_use: f32) -> bool {
        self.gate.is_due(secs_since_entrance_use)
    }

    /// Replacement for the host's "start area search".
    pub fn start_search<H: NavHost + ?Sized>(
        &mut self,
        agent:   AgentId,
        origin:  Vec3,
        routine: RoutineId,
        host:    &mut H,
    ) {
        let arrival = self.arrival();
        self.search.start_search(agent, origin, routine, host, arrival);
    }

    /// Replacement for the host's "move towards target player".
    pub fn pursue_player<H: NavHost + ?Sized>(
        &mut self,
        agent:  AgentId,
        player: PlayerId,
        host:   &mut H,
    ) {
        let arrival = self.arrival();
        pursue_player(
            &mut self.registry,
            agent,
            player,
            &mut self.service,
            host,
            &arrival,
            self.config.resubmit,
        );
    }
}
