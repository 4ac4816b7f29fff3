//! In-memory pathfinding service with a fixed completion latency.
//!
//! `ScriptedPathfinder` does no graph search of its own.  A resolver closure
//! maps each [`PathQuery`] to an optional [`PathDestination`]; the answer
//! becomes readable `latency` calls to [`ScriptedPathfinder::advance`] after
//! submission.  Hosts use it for tests, replays, and demos where the real
//! navmesh lives elsewhere.

use std::collections::{HashMap, HashSet};

use sn_core::{AllowedLinkMask, NavAgentHandle, TaskHandle};

use crate::{
    PathDestination, PathQuery, PathfindingError, PathfindingResult, PathfindingService,
    SINGLE_RESULT,
};

/// Maps a query to the first step of its path (`None` = no path).
pub type Resolver = Box<dyn Fn(&PathQuery) -> Option<PathDestination> + Send + Sync>;

struct TaskState {
    query:     PathQuery,
    remaining: u32,
    result:    Option<PathDestination>,
}

impl TaskState {
    #[inline]
    fn is_ready(&self) -> bool {
        self.remaining == 0
    }
}

/// A [`PathfindingService`] that answers every query through a closure.
pub struct ScriptedPathfinder {
    latency:     u32,
    resolver:    Resolver,
    registered:  HashSet<NavAgentHandle>,
    tasks:       HashMap<TaskHandle, TaskState>,
    /// Most recent task per navigation agent.  Older tasks are dropped on
    /// submission, so each agent has at most one task in flight.
    latest:      HashMap<NavAgentHandle, TaskHandle>,
    next_task:   u64,
    submissions: u64,
}

impl ScriptedPathfinder {
    /// Service whose tasks complete after `latency` advances.  A latency of
    /// zero resolves at submission.
    pub fn new<F>(latency: u32, resolver: F) -> Self
    where
        F: Fn(&PathQuery) -> Option<PathDestination> + Send + Sync + 'static,
    {
        Self {
            latency,
            resolver:    Box::new(resolver),
            registered:  HashSet::new(),
            tasks:       HashMap::new(),
            latest:      HashMap::new(),
            next_task:   0,
            submissions: 0,
        }
    }

    /// Service that always routes straight to the requested target.
    pub fn direct(latency: u32) -> Self {
        Self::new(latency, |q| Some(PathDestination::direct(q.to)))
    }

    /// Replace the resolver; tasks already in flight use the new one when
    /// they complete.
    pub fn set_resolver<F>(&mut self, resolver: F)
    where
        F: Fn(&PathQuery) -> Option<PathDestination> + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
    }

    /// Progress every in-flight task by one step.
    pub fn advance(&mut self) {
        for task in self.tasks.values_mut() {
            if task.remaining == 0 {
                continue;
            }
            task.remaining -= 1;
            if task.remaining == 0 {
                task.result = (self.resolver)(&task.query);
            }
        }
    }

    /// Total number of tasks ever submitted.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Number of unfinished tasks attributed to `agent` (0 or 1).
    pub fn outstanding_for(&self, agent: NavAgentHandle) -> usize {
        self.tasks
            .values()
            .filter(|t| t.query.agent == agent && !t.is_ready())
            .count()
    }

    /// Inputs of a live task.
    pub fn query(&self, task: TaskHandle) -> PathfindingResult<&PathQuery> {
        self.tasks
            .get(&task)
            .map(|t| &t.query)
            .ok_or(PathfindingError::UnknownTask(task))
    }

    /// The latest task submitted for `agent`.
    pub fn latest_task(&self, agent: NavAgentHandle) -> PathfindingResult<TaskHandle> {
        if !self.registered.contains(&agent) {
            return Err(PathfindingError::UnregisteredAgent(agent));
        }
        self.latest
            .get(&agent)
            .copied()
            .ok_or(PathfindingError::UnknownTask(TaskHandle::INVALID))
    }

    pub fn is_registered(&self, agent: NavAgentHandle) -> bool {
        self.registered.contains(&agent)
    }
}

impl PathfindingService for ScriptedPathfinder {
    fn register_agent(&mut self, agent: NavAgentHandle) {
        if self.registered.insert(agent) {
            log::debug!("registered navigation agent {agent}");
        }
    }

    fn submit_path_task(
        &mut self,
        agent: NavAgentHandle,
        from:  glam::Vec3,
        to:    glam::Vec3,
        links: AllowedLinkMask,
    ) -> TaskHandle {
        let handle = TaskHandle(self.next_task);
        self.next_task += 1;
        self.submissions += 1;

        if let Some(previous) = self.latest.insert(agent, handle) {
            self.tasks.remove(&previous);
        }

        let query = PathQuery { agent, from, to, links };
        // Unregistered agents get an immediately-completed empty task.
        let (remaining, result) = if !self.registered.contains(&agent) {
            log::warn!("path task {handle} submitted for unregistered agent {agent}");
            (0, None)
        } else if self.latency == 0 {
            (0, (self.resolver)(&query))
        } else {
            (self.latency, None)
        };

        self.tasks.insert(handle, TaskState { query, remaining, result });
        handle
    }

    fn is_result_ready(&self, task: TaskHandle, index: usize) -> bool {
        index == SINGLE_RESULT && self.tasks.get(&task).is_some_and(TaskState::is_ready)
    }

    fn result(&self, task: TaskHandle, index: usize) -> Option<PathDestination> {
        if index != SINGLE_RESULT {
            return None;
        }
        self.tasks
            .get(&task)
            .filter(|t| t.is_ready())
            .and_then(|t| t.result)
    }

    fn abandon(&mut self, task: TaskHandle) {
        if let Some(state) = self.tasks.remove(&task) {
            if self.latest.get(&state.query.agent) == Some(&task) {
                self.latest.remove(&state.query.agent);
            }
        }
    }
}
