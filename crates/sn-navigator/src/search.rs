//! Confined vs. roaming area searches.

use std::sync::Arc;

use glam::Vec3;
use sn_core::{AgentId, AllowedLinkMask, RoutineId};
use sn_host::{NavHost, WaypointSink};
use sn_pathfinding::PathDestination;

use crate::{AgentMap, DestinationArrivalController};

/// Per-agent search-mode bookkeeping.
///
/// Present only while the agent's player search runs in roaming mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchModeState {
    pub roaming:     bool,
    /// Width the player-search routine had before roaming widened it.
    pub saved_width: Option<f32>,
}

/// Switches an agent's player search between the confined width and an
/// unbounded roaming width, and starts searches through an
/// [`ArrivalWaypointSink`].
#[derive(Debug, Default)]
pub struct SearchModeController {
    states: AgentMap<SearchModeState>,
}

impl SearchModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, agent: AgentId) -> Option<&SearchModeState> {
        self.states.get(&agent)
    }

    /// Drop the agent's bookkeeping.  Safe to call repeatedly.
    pub fn remove(&mut self, agent: AgentId) -> Option<SearchModeState> {
        self.states.remove(&agent)
    }

    /// Start (or restart) `routine` for `agent` around `origin`.
    ///
    /// Only the agent's own player-search routine has its width adjusted;
    /// any routine is started with waypoints routed through `arrival`.
    pub fn start_search<H: NavHost + ?Sized>(
        &mut self,
        agent:   AgentId,
        origin:  Vec3,
        routine: RoutineId,
        host:    &mut H,
        arrival: DestinationArrivalController,
    ) {
        if routine == host.player_search_routine(agent) {
            self.apply_width_mode(agent, routine, arrival.roaming, host);
        }

        let links = AllowedLinkMask::for_roaming(arrival.roaming);
        host.start_search(agent, origin, links, routine, Arc::new(ArrivalWaypointSink { arrival }));
    }

    fn apply_width_mode<H: NavHost + ?Sized>(
        &mut self,
        agent:   AgentId,
        routine: RoutineId,
        roaming: bool,
        host:    &mut H,
    ) {
        if roaming {
            let state = self.states.entry(agent).or_default();
            state.roaming = true;
            if state.saved_width.is_none() {
                let width = host.search_width(routine);
                log::debug!("{agent}: saving search width {width} for roaming");
                state.saved_width = Some(width);
            }
            host.set_search_width(routine, f32::INFINITY);
        } else if let Some(state) = self.states.remove(&agent) {
            if let Some(width) = state.saved_width {
                log::debug!("{agent}: restoring search width {width}");
                host.set_search_width(routine, width);
            }
        }
    }
}

/// Routes each search waypoint through a [`DestinationArrivalController`]
/// so special links found during a search are used.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalWaypointSink {
    pub arrival: DestinationArrivalController,
}

impl WaypointSink for ArrivalWaypointSink {
    fn on_waypoint(
        &self,
        agent:       AgentId,
        destination: &PathDestination,
        host:        &mut dyn NavHost,
    ) -> bool {
        self.arrival.apply(agent, destination, host)
    }
}
