//! `sn-navigator` — smart pathing for enemy agents.
//!
//! Instead of walking straight at a goal, an agent asks the pathfinding
//! service for a path that may pass through special links (internal
//! teleporters, elevators, the main entrance, fire exits) and acts on the
//! answer once it is ready.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`registry`]  | `PathRequestRegistry` — one path task per agent; `GoToOutcome`    |
//! | [`arrival`]   | `DestinationArrivalController` — move, then fire link actions     |
//! | [`search`]    | `SearchModeController`, `ArrivalWaypointSink` — roaming searches  |
//! | [`gate`]      | `TargetabilityGate` — head for the exit when nobody is reachable  |
//! | [`pursuit`]   | `pursue_player` — smart-path replacement for the chase call       |
//! | [`nodes`]     | `replace_ai_nodes` — whole-map AI nodes while roaming             |
//! | [`navigator`] | `Navigator<S>` — entry points and lifecycle hooks                 |
//! | [`builder`]   | `NavigatorBuilder<S>`                                             |
//!
//! # Update model
//!
//! ```text
//! interval tick ─► check_targetable ─► go_to_destination ─► registry poll
//!                                                     │
//!                            Pending ◄────────────────┤
//!                                                     ▼
//!                            DestinationArrivalController::apply ─► host
//! ```
//!
//! Everything runs on the host's simulation update.  Nothing blocks: a poll
//! of an unfinished task reports `Pending` and the caller tries again next
//! interval.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for per-agent side tables |

pub mod arrival;
pub mod builder;
pub mod gate;
pub mod map;
pub mod navigator;
pub mod nodes;
pub mod pursuit;
pub mod registry;
pub mod search;

#[cfg(test)]
mod tests;

pub use arrival::DestinationArrivalController;
pub use builder::NavigatorBuilder;
pub use gate::TargetabilityGate;
pub use map::AgentMap;
pub use navigator::Navigator;
pub use nodes::replace_ai_nodes;
pub use pursuit::pursue_player;
pub use registry::{GoToOutcome, PathRequestRegistry, PathTask, TaskPoll};
pub use search::{ArrivalWaypointSink, SearchModeController, SearchModeState};
