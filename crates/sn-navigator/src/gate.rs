//! Periodic "is anyone worth chasing?" check.

use sn_core::{AgentId, NavConfig};
use sn_host::NavHost;
use sn_pathfinding::PathfindingService;

use crate::{DestinationArrivalController, GoToOutcome, PathRequestRegistry};

/// Decides each interval whether the host's built-in targeting logic runs,
/// or whether the agent is instead sent toward the main entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetabilityGate {
    /// Seconds after the last entrance use before the gate runs again.
    pub recheck_secs: f32,
}

impl TargetabilityGate {
    pub fn from_config(config: &NavConfig) -> Self {
        Self { recheck_secs: config.entrance_recheck_secs }
    }

    /// `true` once more than `recheck_secs` have passed since the agent last
    /// used an entrance.
    #[inline]
    pub fn is_due(&self, secs_since_entrance_use: f32) -> bool {
        secs_since_entrance_use > self.recheck_secs
    }

    /// `true` lets the caller proceed with normal targeting this tick;
    /// `false` means the agent is busy heading out.
    ///
    /// | Situation                         | Result |
    /// |-----------------------------------|--------|
    /// | roaming                           | `true` |
    /// | a player is reachable             | `true` |
    /// | exit path pending                 | `false` |
    /// | exit path resolved (search stops) | `false` |
    /// | exit path failed / no entrance    | `true` |
    pub fn check<S, H>(
        &self,
        agent:    AgentId,
        registry: &mut PathRequestRegistry,
        service:  &mut S,
        host:     &mut H,
        arrival:  &DestinationArrivalController,
        config:   &NavConfig,
    ) -> bool
    where
        S: PathfindingService + ?Sized,
        H: NavHost + ?Sized,
    {
        if config.global_roaming {
            return true;
        }
        if host.closest_player(agent).is_some() {
            return true;
        }

        let outside_entrance = !host.is_outside(agent);
        let Some(entrance) = host.main_entrance_position(true, outside_entrance) else {
            log::warn!("{agent}: no main entrance position, leaving targeting alone");
            return true;
        };

        match registry.request_or_consume(agent, entrance, service, host, arrival, config.resubmit) {
            GoToOutcome::Pending => false,
            GoToOutcome::Resolved(_) => {
                let routine = host.player_search_routine(agent);
                host.stop_search(agent, routine);
                false
            }
            GoToOutcome::Failed => true,
        }
    }
}

impl Default for TargetabilityGate {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}
