//! The asynchronous pathfinding service seam.
//!
//! # Protocol
//!
//! Submission and polling happen on the simulation update; the actual search
//! may run anywhere.  Polling never blocks: a task that has not finished
//! simply reports "not ready".  Submitting a new task for a navigation agent
//! supersedes whatever that agent had in flight — there is no explicit
//! cancellation token.

use glam::Vec3;
use sn_core::{AllowedLinkMask, NavAgentHandle, TaskHandle};

use crate::PathDestination;

/// Result slot index used for single-target tasks.
pub const SINGLE_RESULT: usize = 0;

/// Inputs of one submitted path task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathQuery {
    pub agent: NavAgentHandle,
    pub from:  Vec3,
    pub to:    Vec3,
    pub links: AllowedLinkMask,
}

/// Pluggable asynchronous pathfinding engine.
///
/// The navigation layer is a pure consumer: it registers agents, submits
/// tasks, and polls results.  Implementations decide how and where the
/// search runs.
pub trait PathfindingService {
    /// Make `agent` known to the service.  Registering twice is harmless.
    fn register_agent(&mut self, agent: NavAgentHandle);

    /// Start computing a path for `agent` from `from` to `to` through the
    /// link categories in `links`.
    fn submit_path_task(
        &mut self,
        agent: NavAgentHandle,
        from:  Vec3,
        to:    Vec3,
        links: AllowedLinkMask,
    ) -> TaskHandle;

    /// `true` once result slot `index` of `task` can be read.
    fn is_result_ready(&self, task: TaskHandle, index: usize) -> bool;

    /// The destination in result slot `index`, or `None` if the search
    /// completed without one (or the task is unknown / not ready).
    fn result(&self, task: TaskHandle, index: usize) -> Option<PathDestination>;

    /// The caller lost interest in `task`.  Default: keep whatever the
    /// service does with finished work.
    fn abandon(&mut self, _task: TaskHandle) {}
}
