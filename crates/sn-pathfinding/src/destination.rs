//! The resolved next step of a smart path.

use glam::Vec3;
use sn_core::{ElevatorFloorId, EntranceId};

/// What sits at a [`PathDestination`] and what must happen on arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DestinationKind {
    /// Plain walking target; nothing fires on arrival.
    DirectToDestination,

    /// An internal teleporter.  `exit` is the linked destination transform's
    /// position the agent is warped to.
    InternalTeleport { exit: Vec3 },

    /// An elevator floor stop whose call action must be triggered.
    Elevator { floor: ElevatorFloorId },

    /// An entrance teleport (main entrance or fire exit).
    EntranceTeleport { entrance: EntranceId },

    /// A link type reported by the service that this layer cannot activate.
    Unknown(u8),
}

/// Result of a completed path task: where to walk, and what is there.
///
/// For every kind other than `DirectToDestination`, `position` is the link's
/// entry point the agent has to reach before the link action fires.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDestination {
    pub position: Vec3,
    pub kind:     DestinationKind,
}

impl PathDestination {
    #[inline]
    pub fn direct(position: Vec3) -> Self {
        Self { position, kind: DestinationKind::DirectToDestination }
    }

    #[inline]
    pub fn internal_teleport(position: Vec3, exit: Vec3) -> Self {
        Self { position, kind: DestinationKind::InternalTeleport { exit } }
    }

    #[inline]
    pub fn elevator(position: Vec3, floor: ElevatorFloorId) -> Self {
        Self { position, kind: DestinationKind::Elevator { floor } }
    }

    #[inline]
    pub fn entrance(position: Vec3, entrance: EntranceId) -> Self {
        Self { position, kind: DestinationKind::EntranceTeleport { entrance } }
    }

    /// `true` for plain walking targets.
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.kind, DestinationKind::DirectToDestination)
    }

    /// `true` if `point` lies within `radius` of the destination position.
    #[inline]
    pub fn within(&self, point: Vec3, radius: f32) -> bool {
        self.position.distance(point) <= radius
    }
}
