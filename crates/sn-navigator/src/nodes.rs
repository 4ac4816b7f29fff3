//! Whole-map AI nodes for roaming agents.

use sn_core::AgentId;
use sn_host::NavHost;

/// Give a roaming agent every outside node followed by every inside node,
/// so its searches can span the map.  Does nothing when not roaming.
///
/// Run after the agent starts and whenever its inside/outside flag flips,
/// since the host resets the node list at both points.
pub fn replace_ai_nodes<H: NavHost + ?Sized>(agent: AgentId, host: &mut H, roaming: bool) {
    if !roaming {
        return;
    }
    let mut nodes = host.ai_nodes(true);
    nodes.extend(host.ai_nodes(false));
    log::debug!("{agent}: roaming over {} AI nodes", nodes.len());
    host.set_search_nodes(agent, nodes);
}
