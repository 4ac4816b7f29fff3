//! `sn-sim` — in-memory reference host for the `smart_nav` layer.
//!
//! [`HostWorld`] implements every host trait from `sn-host` over plain
//! vectors: agents, players, entrance teleports, search routines.  [`Sim`]
//! drives it with a fixed-step frame loop and wires the navigator into the
//! host's interval logic the same way a game integration would.
//!
//! # Frame loop
//!
//! ```text
//! every frame:
//!   ① pathfinder.advance()
//!   ② agents walk toward destination / chased player
//!   ③ every ai_interval_secs, per live agent:
//!        gate due && !check_targetable  → skip rest of interval
//!        closest player?                → pursue_player
//!        else                           → start_search (if idle), step search
//!   ④ report teleports; side changes re-run on_agent_set_outside
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sn_sim::{AgentSpec, NoopObserver, SimBuilder, SiteLayout};
//!
//! let mut layout = SiteLayout::new(-100.0);
//! layout.add_entrance_pair(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -200.0, 0.0), true);
//! let mut sim = SimBuilder::new(layout)
//!     .agent(AgentSpec::at(Vec3::new(10.0, -200.0, 0.0)))
//!     .player(Vec3::new(15.0, 0.0, 0.0))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod layout;
pub mod observer;
pub mod sim;
pub mod world;


pub use builder::{AgentSpec, SimBuilder};
pub use error::{SimError, SimResult};
pub use layout::{Entrance, SiteLayout};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimSettings};
pub use world::{HostWorld, SearchRoutine, SimAgent, SimPlayer, TeleportEvent};
