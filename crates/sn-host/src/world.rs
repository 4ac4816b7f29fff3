//! Read-only world lookups and single-shot world actions.

use glam::Vec3;
use sn_core::{AgentId, ElevatorFloorId, EntranceId, PlayerId};
use sn_pathfinding::PathDestination;

/// World state the navigation layer consults but does not own.
pub trait WorldQueries {
    /// The closest player the agent can currently reach or see.
    fn closest_player(&self, agent: AgentId) -> Option<PlayerId>;

    fn player_position(&self, player: PlayerId) -> Option<Vec3>;

    /// Position of the main entrance.
    ///
    /// `teleport_position` selects the teleport point instead of the walkable
    /// approach; `outside_entrance` selects the exterior side.
    fn main_entrance_position(&self, teleport_position: bool, outside_entrance: bool) -> Option<Vec3>;

    /// AI nodes outside (`true`) or inside (`false`) the building.
    fn ai_nodes(&self, outside: bool) -> Vec<Vec3>;

    /// Destination-specific activation check (elevator doors open, teleport
    /// not on cooldown, …) for an agent standing at `from`.
    fn can_activate(&self, destination: &PathDestination, from: Vec3) -> bool;

    /// Press the call button of an elevator floor.
    fn call_elevator(&mut self, floor: ElevatorFloorId);

    /// The entrance's exit point if it has already been found.
    fn exit_point(&self, entrance: EntranceId) -> Option<Vec3>;

    /// Locate the entrance's exit point and remember it.  `None` if the
    /// paired entrance cannot be found.
    fn find_exit_point(&mut self, entrance: EntranceId) -> Option<Vec3>;

    /// `true` if using the entrance takes the agent into the building.
    fn is_entrance_to_building(&self, entrance: EntranceId) -> bool;
}
