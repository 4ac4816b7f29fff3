//! Framework error type.
//!
//! Errors only surface at construction and validation boundaries.  The
//! per-frame navigation API resolves every runtime condition locally and
//! never returns one of these.

use thiserror::Error;

use crate::{AgentId, EntranceId, RoutineId};

/// The top-level error type for `sn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("search routine {0} not found")]
    RoutineNotFound(RoutineId),

    #[error("entrance {0} not found")]
    EntranceNotFound(EntranceId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `sn-*` crates.
pub type NavResult<T> = Result<T, NavError>;
