//! Strongly typed, zero-cost identifier wrappers.
//!
//! Host objects (enemies, players, search routines, teleports) are referred
//! to by stable integer handles rather than object identity, so per-agent
//! side tables can be ordinary maps keyed by value.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// One managed enemy instance.
    pub struct AgentId(u32);
}

typed_id! {
    /// A player the enemy may target.
    pub struct PlayerId(u32);
}

typed_id! {
    /// An area-search routine owned by the host.  An agent usually has one
    /// tracked player-search routine plus any number of ad-hoc ones.
    pub struct RoutineId(u32);
}

typed_id! {
    /// An entrance teleport (main entrance or fire exit, either side).
    pub struct EntranceId(u32);
}

typed_id! {
    /// One floor stop of an elevator.
    pub struct ElevatorFloorId(u32);
}

typed_id! {
    /// The pathfinding service's handle for a registered navigation agent.
    pub struct NavAgentHandle(u32);
}

typed_id! {
    /// One submitted asynchronous path computation.
    pub struct TaskHandle(u64);
}
