//! `sn-core` — foundational types for the `smart_nav` enemy navigation layer.
//!
//! This crate is a dependency of every other `sn-*` crate.  It has no `sn-*`
//! dependencies and minimal external ones (`glam`, `bitflags`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `PlayerId`, `RoutineId`, `EntranceId`, `ElevatorFloorId`, `NavAgentHandle`, `TaskHandle` |
//! | [`links`]  | `AllowedLinkMask` bit set                                       |
//! | [`config`] | `NavConfig`, `ArrivalOrder`, `ResubmitPolicy`                   |
//! | [`time`]   | `SimClock` (seconds since session start)                        |
//! | [`error`]  | `NavError`, `NavResult`                                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod links;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalOrder, NavConfig, ResubmitPolicy};
pub use error::{NavError, NavResult};
pub use glam::Vec3;
pub use ids::{AgentId, ElevatorFloorId, EntranceId, NavAgentHandle, PlayerId, RoutineId, TaskHandle};
pub use links::AllowedLinkMask;
pub use time::SimClock;
