//! The movement primitive and per-agent state the host exposes.

use glam::Vec3;
use sn_core::{AgentId, NavAgentHandle, PlayerId};

/// Host-owned agent body.
///
/// The navigation layer calls these; it never implements movement itself.
pub trait AgentBody {
    /// The pathfinding handle of the agent's navigation component, or `None`
    /// if the agent has none (it then never takes part in smart pathing).
    fn nav_agent(&self, agent: AgentId) -> Option<NavAgentHandle>;

    fn position(&self, agent: AgentId) -> Vec3;

    /// `true` while the agent is outside the building.
    fn is_outside(&self, agent: AgentId) -> bool;

    /// Order the agent's navigation component to walk toward `position`.
    fn set_destination(&mut self, agent: AgentId, position: Vec3);

    /// Relocate instantly, bypassing pathing.
    fn warp(&mut self, agent: AgentId, position: Vec3);

    /// Relocate through an entrance teleport and replicate it, flipping the
    /// agent's outside flag to `set_outside`.
    fn teleport_and_sync(&mut self, agent: AgentId, position: Vec3, set_outside: bool);

    /// The host's built-in "chase this player" movement.
    fn move_towards_player(&mut self, agent: AgentId, player: PlayerId);

    /// Replace the set of AI nodes the agent's searches pick from.
    fn set_search_nodes(&mut self, agent: AgentId, nodes: Vec<Vec3>);
}
