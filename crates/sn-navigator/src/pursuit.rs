//! Smart-path replacement for the host's "chase this player" call.

use sn_core::{AgentId, AllowedLinkMask, PlayerId, ResubmitPolicy};
use sn_host::NavHost;
use sn_pathfinding::PathfindingService;

use crate::{DestinationArrivalController, PathRequestRegistry, TaskPoll};

/// Chase `player`, taking special links when the path needs them.
///
/// A direct path hands control back to the host's own chase movement; any
/// link on the way is walked to and activated.  Agents without a navigation
/// handle always use the host's chase.
pub fn pursue_player<S, H>(
    registry: &mut PathRequestRegistry,
    agent:    AgentId,
    player:   PlayerId,
    service:  &mut S,
    host:     &mut H,
    arrival:  &DestinationArrivalController,
    policy:   ResubmitPolicy,
) where
    S: PathfindingService + ?Sized,
    H: NavHost + ?Sized,
{
    let Some(nav) = registry.nav_handle(agent) else {
        host.move_towards_player(agent, player);
        return;
    };

    match registry.poll(agent, service) {
        TaskPoll::Idle => {}
        TaskPoll::Pending => {
            if policy == ResubmitPolicy::WhenConsumed {
                return;
            }
        }
        TaskPoll::Ready(Some(destination)) if destination.is_direct() => {
            host.move_towards_player(agent, player);
        }
        TaskPoll::Ready(Some(destination)) => {
            arrival.apply(agent, &destination, host);
        }
        TaskPoll::Ready(None) => {}
    }

    let Some(target) = host.player_position(player) else {
        return;
    };
    let links = AllowedLinkMask::for_roaming(arrival.roaming);
    let from = host.position(agent);
    registry.submit(agent, nav, from, target, links, service);
}
