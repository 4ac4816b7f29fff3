//! Waypoint callback handed to search routines.

use sn_core::AgentId;
use sn_pathfinding::PathDestination;

use crate::NavHost;

/// Receives each waypoint a search routine picks.
///
/// The host stores the sink alongside the running routine and invokes it
/// with itself as `host`, so implementations can move the agent and fire
/// link actions.  Returns `false` when the waypoint could not be acted on.
pub trait WaypointSink: Send + Sync {
    fn on_waypoint(
        &self,
        agent:       AgentId,
        destination: &PathDestination,
        host:        &mut dyn NavHost,
    ) -> bool;
}
