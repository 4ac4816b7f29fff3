//! Simulation observer trait for progress reporting and scenario checks.

use glam::Vec3;
use sn_core::AgentId;

use crate::HostWorld;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: teleport logger
///
/// ```rust,ignore
/// struct TeleportLog(Vec<(AgentId, bool)>);
///
/// impl SimObserver for TeleportLog {
///     fn on_teleport(&mut self, agent: AgentId, _at: Vec3, outside: bool) {
///         self.0.push((agent, outside));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every AI interval, once all agents have run their logic.
    fn on_interval(&mut self, _now_secs: f64, _world: &HostWorld) {}

    /// Called for every entrance teleport performed during the last frame.
    fn on_teleport(&mut self, _agent: AgentId, _position: Vec3, _outside: bool) {}

    /// Called once after the final frame completes.
    fn on_sim_end(&mut self, _now_secs: f64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
