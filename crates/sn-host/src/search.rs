//! The host's area-search routines.

use std::sync::Arc;

use glam::Vec3;
use sn_core::{AgentId, AllowedLinkMask, RoutineId};

use crate::WaypointSink;

/// Mutable access to search routines plus start/stop.
pub trait AreaSearch {
    /// The routine the agent uses to look for players.
    fn player_search_routine(&self, agent: AgentId) -> RoutineId;

    fn search_in_progress(&self, routine: RoutineId) -> bool;

    fn set_search_in_progress(&mut self, routine: RoutineId, in_progress: bool);

    fn search_width(&self, routine: RoutineId) -> f32;

    fn set_search_width(&mut self, routine: RoutineId, width: f32);

    /// Start (or restart) `routine` for `agent` around `origin`.
    ///
    /// Every waypoint the routine picks must be handed to `sink` instead of
    /// being walked to directly.
    fn start_search(
        &mut self,
        agent:   AgentId,
        origin:  Vec3,
        links:   AllowedLinkMask,
        routine: RoutineId,
        sink:    Arc<dyn WaypointSink>,
    );

    fn stop_search(&mut self, agent: AgentId, routine: RoutineId);
}
