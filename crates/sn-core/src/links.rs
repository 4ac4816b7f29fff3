//! Special-link categories the pathfinding service may route through.

use bitflags::bitflags;

bitflags! {
    /// Set of special-link categories enabled for one path request.
    ///
    /// Computed per request from the current roaming mode; see
    /// [`AllowedLinkMask::for_roaming`].
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AllowedLinkMask: u8 {
        const INTERNAL_TELEPORTS = 1 << 0;
        const ELEVATORS          = 1 << 1;
        const MAIN_ENTRANCE      = 1 << 2;
        const FIRE_EXITS         = 1 << 3;
    }
}

impl AllowedLinkMask {
    /// Links every agent may use regardless of mode.
    pub const CONFINED: AllowedLinkMask = AllowedLinkMask::INTERNAL_TELEPORTS
        .union(AllowedLinkMask::ELEVATORS)
        .union(AllowedLinkMask::MAIN_ENTRANCE);

    /// The mask for a request made while roaming is `roaming`.
    ///
    /// Roaming adds fire exits on top of the confined set.
    #[inline]
    pub fn for_roaming(roaming: bool) -> Self {
        if roaming {
            Self::CONFINED | Self::FIRE_EXITS
        } else {
            Self::CONFINED
        }
    }
}

impl Default for AllowedLinkMask {
    fn default() -> Self {
        Self::CONFINED
    }
}
