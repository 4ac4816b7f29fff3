//! Per-agent side-table type.

use sn_core::AgentId;

/// Map keyed by agent identity.
#[cfg(not(feature = "fx-hash"))]
pub type AgentMap<V> = std::collections::HashMap<AgentId, V>;

/// Map keyed by agent identity.
#[cfg(feature = "fx-hash")]
pub type AgentMap<V> = rustc_hash::FxHashMap<AgentId, V>;
