//! Pathfinding-subsystem error type.

use thiserror::Error;

use sn_core::{NavAgentHandle, TaskHandle};

/// Errors produced by `sn-pathfinding` inspection helpers.
#[derive(Debug, Error)]
pub enum PathfindingError {
    #[error("task {0} is unknown or was superseded")]
    UnknownTask(TaskHandle),

    #[error("navigation agent {0} was never registered")]
    UnregisteredAgent(NavAgentHandle),
}

pub type PathfindingResult<T> = Result<T, PathfindingError>;
