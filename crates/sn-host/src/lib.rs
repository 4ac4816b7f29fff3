//! `sn-host` — the host game's side of the navigation contract.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`body`]   | `AgentBody` — movement primitive and per-agent state reads      |
//! | [`search`] | `AreaSearch` — the host's area-search routines                  |
//! | [`world`]  | `WorldQueries` — players, entrances, elevators, AI nodes        |
//! | [`sink`]   | `WaypointSink` — callback the search routine hands waypoints to |
//!
//! # Design notes
//!
//! The navigation layer never owns game objects.  Everything it reads or
//! mutates goes through these traits, implemented once by the host
//! integration.  [`NavHost`] bundles all three so controllers can take a
//! single `&mut H` (or `&mut dyn NavHost` from inside a search callback).
//!
//! All methods are object safe; no generics appear in signatures.

pub mod body;
pub mod search;
pub mod sink;
pub mod world;


pub use body::AgentBody;
pub use search::AreaSearch;
pub use sink::WaypointSink;
pub use world::WorldQueries;

/// Everything the navigation layer needs from the host.
pub trait NavHost: AgentBody + AreaSearch + WorldQueries {}

impl<T: AgentBody + AreaSearch + WorldQueries + ?Sized> NavHost for T {}
