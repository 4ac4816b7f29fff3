//! `sn-pathfinding` — path results and the pathfinding service seam.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`destination`] | `PathDestination`, `DestinationKind`                       |
//! | [`service`]     | `PathfindingService` trait, `PathQuery`                    |
//! | [`scripted`]    | `ScriptedPathfinder` — in-memory service with fixed latency |
//! | [`error`]       | `PathfindingError`, `PathfindingResult<T>`                 |
//!
//! Graph search and link discovery belong to the service.  The navigation
//! layer only submits tasks and polls their results, so any engine that can
//! answer "where should this agent walk next, and what link is there" can
//! sit behind [`PathfindingService`].

pub mod destination;
pub mod error;
pub mod scripted;
pub mod service;


pub use destination::{DestinationKind, PathDestination};
pub use error::{PathfindingError, PathfindingResult};
pub use scripted::{Resolver, ScriptedPathfinder};
pub use service::{PathQuery, PathfindingService, SINGLE_RESULT};
