//! Per-agent path tasks and the request/consume protocol.
//!
//! # Protocol
//!
//! Each call for an agent looks at the task submitted on a *previous* call:
//!
//! | Previous task     | Outcome     | Then                                   |
//! |-------------------|-------------|----------------------------------------|
//! | none              | `Pending`   | submit                                 |
//! | not ready         | `Pending`   | submit only under `ResubmitPolicy::EveryCall` |
//! | ready, destination| `Resolved` / `Failed` (arrival controller decides) | submit |
//! | ready, no result  | `Failed`    | submit                                 |
//!
//! So the answer reported now is always the one computed for the request
//! before, and a fresh request goes out for the next call.

use glam::Vec3;
use sn_core::{AgentId, AllowedLinkMask, NavAgentHandle, ResubmitPolicy, TaskHandle};
use sn_host::NavHost;
use sn_pathfinding::{PathDestination, PathfindingService, SINGLE_RESULT};

use crate::{AgentMap, DestinationArrivalController};

/// Result of one request/consume step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoToOutcome {
    /// No usable result yet; the agent is mid-transit or waiting.
    Pending,
    /// The previous result was acted on.
    Resolved(PathDestination),
    /// The previous result was missing or could not be acted on.
    Failed,
}

/// State of an agent's live task as seen by a poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskPoll {
    /// The agent has never submitted.
    Idle,
    Pending,
    Ready(Option<PathDestination>),
}

/// One submitted path computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTask {
    pub handle: TaskHandle,
    pub from:   Vec3,
    pub target: Vec3,
    pub links:  AllowedLinkMask,
}

/// Owns the navigation handle and the single live path task of every
/// managed agent.
///
/// Entries are inserted by the lifecycle hooks and removed explicitly on
/// agent teardown.  Submitting a new task overwrites the previous slot.
#[derive(Debug, Default)]
pub struct PathRequestRegistry {
    nav_handles: AgentMap<NavAgentHandle>,
    tasks:       AgentMap<PathTask>,
}

impl PathRequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the agent's navigation handle.
    pub fn register(&mut self, agent: AgentId, nav: NavAgentHandle) {
        self.nav_handles.insert(agent, nav);
    }

    pub fn is_registered(&self, agent: AgentId) -> bool {
        self.nav_handles.contains_key(&agent)
    }

    #[inline]
    pub fn nav_handle(&self, agent: AgentId) -> Option<NavAgentHandle> {
        self.nav_handles.get(&agent).copied()
    }

    pub fn task(&self, agent: AgentId) -> Option<&PathTask> {
        self.tasks.get(&agent)
    }

    /// Number of agents with a task slot.
    pub fn live_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Forget everything about `agent`, returning its last task so the
    /// caller can tell the service.  Safe to call repeatedly.
    pub fn remove(&mut self, agent: AgentId) -> Option<PathTask> {
        self.nav_handles.remove(&agent);
        self.tasks.remove(&agent)
    }

    /// Read the state of the agent's live task without changing anything.
    pub fn poll<S: PathfindingService + ?Sized>(&self, agent: AgentId, service: &S) -> TaskPoll {
        match self.tasks.get(&agent) {
            None => TaskPoll::Idle,
            Some(task) if !service.is_result_ready(task.handle, SINGLE_RESULT) => TaskPoll::Pending,
            Some(task) => TaskPoll::Ready(service.result(task.handle, SINGLE_RESULT)),
        }
    }

    /// Submit a task for `agent`, replacing whatever occupied its slot.
    pub fn submit<S: PathfindingService + ?Sized>(
        &mut self,
        agent:   AgentId,
        nav:     NavAgentHandle,
        from:    Vec3,
        target:  Vec3,
        links:   AllowedLinkMask,
        service: &mut S,
    ) -> TaskHandle {
        let handle = service.submit_path_task(nav, from, target, links);
        log::trace!("{agent}: submitted {handle} toward {target} with {links:?}");
        self.tasks.insert(agent, PathTask { handle, from, target, links });
        handle
    }

    /// One request/consume step toward `target`.
    ///
    /// Never blocks.  Agents without a navigation handle always report
    /// `Failed` so callers fall back to their default behavior.
    pub fn request_or_consume<S, H>(
        &mut self,
        agent:   AgentId,
        target:  Vec3,
        service: &mut S,
        host:    &mut H,
        arrival: &DestinationArrivalController,
        policy:  ResubmitPolicy,
    ) -> GoToOutcome
    where
        S: PathfindingService + ?Sized,
        H: NavHost + ?Sized,
    {
        let Some(nav) = self.nav_handle(agent) else {
            return GoToOutcome::Failed;
        };

        let outcome = match self.poll(agent, service) {
            TaskPoll::Idle => GoToOutcome::Pending,
            TaskPoll::Pending => {
                if policy == ResubmitPolicy::WhenConsumed {
                    return GoToOutcome::Pending;
                }
                GoToOutcome::Pending
            }
            TaskPoll::Ready(Some(destination)) => {
                if arrival.apply(agent, &destination, host) {
                    GoToOutcome::Resolved(destination)
                } else {
                    GoToOutcome::Failed
                }
            }
            TaskPoll::Ready(None) => GoToOutcome::Failed,
        };

        let links = AllowedLinkMask::for_roaming(arrival.roaming);
        let from = host.position(agent);
        self.submit(agent, nav, from, target, links, service);
        outcome
    }
}
