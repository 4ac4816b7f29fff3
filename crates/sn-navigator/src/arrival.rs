//! Acting on a resolved path destination.

use glam::Vec3;
use sn_core::{AgentId, ArrivalOrder, EntranceId, NavConfig};
use sn_host::NavHost;
use sn_pathfinding::{DestinationKind, PathDestination};

/// Moves an agent toward a path destination and fires the destination's
/// link action once the agent stands on it.
///
/// Cheap to copy: it carries only the settings in force when it was made,
/// so search callbacks can hold their own copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestinationArrivalController {
    /// Inclusive distance from the destination at which the action fires.
    pub radius:  f32,
    pub order:   ArrivalOrder,
    /// Roaming agents keep their search flagged as running across an
    /// entrance teleport.
    pub roaming: bool,
}

impl DestinationArrivalController {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            radius:  config.arrival_radius,
            order:   config.arrival_order,
            roaming: config.global_roaming,
        }
    }

    /// `true` if `position` is within the arrival radius of `destination`.
    #[inline]
    pub fn has_arrived(&self, position: Vec3, destination: &PathDestination) -> bool {
        destination.within(position, self.radius)
    }

    /// Drive `agent` toward `destination`.
    ///
    /// Returns `false` only for destination kinds this controller cannot
    /// act on; the caller treats that as a failed path.
    pub fn apply<H: NavHost + ?Sized>(
        &self,
        agent:       AgentId,
        destination: &PathDestination,
        host:        &mut H,
    ) -> bool {
        if let DestinationKind::Unknown(code) = destination.kind {
            log::trace!("{agent}: unrecognized destination kind {code}");
            return false;
        }

        match self.order {
            ArrivalOrder::MoveThenCheck => {
                host.set_destination(agent, destination.position);
                self.activate_if_arrived(agent, destination, host);
            }
            ArrivalOrder::CheckThenMove => {
                if !self.activate_if_arrived(agent, destination, host) {
                    host.set_destination(agent, destination.position);
                }
            }
        }
        true
    }

    /// Fire the kind-specific action if the agent has arrived and the
    /// destination can be activated from where it stands.
    ///
    /// Returns `true` if arrival was handled (including the no-op for direct
    /// destinations).
    pub fn activate_if_arrived<H: NavHost + ?Sized>(
        &self,
        agent:       AgentId,
        destination: &PathDestination,
        host:        &mut H,
    ) -> bool {
        let position = host.position(agent);
        if !self.has_arrived(position, destination) || !host.can_activate(destination, position) {
            return false;
        }

        match destination.kind {
            DestinationKind::DirectToDestination => true,
            DestinationKind::InternalTeleport { exit } => {
                log::debug!("{agent}: internal teleport to {exit}");
                host.warp(agent, exit);
                true
            }
            DestinationKind::Elevator { floor } => {
                log::debug!("{agent}: calling elevator at {floor}");
                host.call_elevator(floor);
                true
            }
            DestinationKind::EntranceTeleport { entrance } => self.use_entrance(agent, entrance, host),
            DestinationKind::Unknown(_) => false,
        }
    }

    /// Teleport through `entrance`.  A no-op (returning `false`) while the
    /// exit point cannot be resolved.
    pub fn use_entrance<H: NavHost + ?Sized>(
        &self,
        agent:    AgentId,
        entrance: EntranceId,
        host:     &mut H,
    ) -> bool {
        let exit = match host.exit_point(entrance) {
            Some(exit) => exit,
            None => match host.find_exit_point(entrance) {
                Some(exit) => exit,
                None => {
                    log::debug!("{agent}: exit point of {entrance} not found, skipping teleport");
                    return false;
                }
            },
        };
        let set_outside = !host.is_entrance_to_building(entrance);
        log::info!(
            "{agent}: using {entrance} to go {}",
            if set_outside { "outside" } else { "inside" }
        );

        if self.roaming {
            // The search routine must not react to the position jump.
            let routine = host.player_search_routine(agent);
            let was_in_progress = host.search_in_progress(routine);
            host.set_search_in_progress(routine, false);
            host.teleport_and_sync(agent, exit, set_outside);
            host.set_search_in_progress(routine, was_in_progress);
        } else {
            host.teleport_and_sync(agent, exit, set_outside);
        }
        true
    }
}

impl Default for DestinationArrivalController {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}
