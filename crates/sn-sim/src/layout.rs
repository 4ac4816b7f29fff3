//! Static site geometry: which side of the building a point is on, where the
//! entrance teleports are, and the AI nodes agents search between.

use glam::Vec3;
use sn_core::{AllowedLinkMask, EntranceId};
use sn_pathfinding::PathDestination;

/// One side of an entrance teleport pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub position: Vec3,
    /// `true` for the door standing outside the building.
    pub outside:  bool,
    /// Main entrance (`true`) or fire exit (`false`).
    pub main:     bool,
    /// Index of the matching door on the other side.
    pub partner:  usize,
}

impl Entrance {
    /// Link category needed to path through this door.
    #[inline]
    pub fn link(&self) -> AllowedLinkMask {
        if self.main { AllowedLinkMask::MAIN_ENTRANCE } else { AllowedLinkMask::FIRE_EXITS }
    }
}

/// Two-sided site: an open exterior above `interior_ceiling_y` and a building
/// interior below it, joined only through entrance teleports.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayout {
    pub interior_ceiling_y: f32,
    pub entrances:          Vec<Entrance>,
    pub outside_nodes:      Vec<Vec3>,
    pub inside_nodes:       Vec<Vec3>,
}

impl SiteLayout {
    pub fn new(interior_ceiling_y: f32) -> Self {
        Self {
            interior_ceiling_y,
            entrances:     Vec::new(),
            outside_nodes: Vec::new(),
            inside_nodes:  Vec::new(),
        }
    }

    /// Add a linked door pair and return `(outside, inside)` ids.
    pub fn add_entrance_pair(&mut self, outside: Vec3, inside: Vec3, main: bool) -> (EntranceId, EntranceId) {
        let o = self.entrances.len();
        let i = o + 1;
        self.entrances.push(Entrance { position: outside, outside: true, main, partner: i });
        self.entrances.push(Entrance { position: inside, outside: false, main, partner: o });
        (EntranceId(o as u32), EntranceId(i as u32))
    }

    #[inline]
    pub fn is_outside(&self, point: Vec3) -> bool {
        point.y >= self.interior_ceiling_y
    }

    pub fn entrance(&self, id: EntranceId) -> Option<&Entrance> {
        self.entrances.get(id.index())
    }

    pub fn nodes(&self, outside: bool) -> &[Vec3] {
        if outside { &self.outside_nodes } else { &self.inside_nodes }
    }

    /// Next hop from `from` toward `to` using only links in `links`.
    ///
    /// Same-side targets are walked to directly.  Crossing sides goes through
    /// the closest permitted door on the near side; `None` if there is none.
    pub fn route(&self, from: Vec3, to: Vec3, links: AllowedLinkMask) -> Option<PathDestination> {
        let from_outside = self.is_outside(from);
        if from_outside == self.is_outside(to) {
            return Some(PathDestination::direct(to));
        }
        self.entrances
            .iter()
            .enumerate()
            .filter(|(_, e)| e.outside == from_outside && links.contains(e.link()))
            .min_by(|(_, a), (_, b)| {
                a.position.distance_squared(from).total_cmp(&b.position.distance_squared(from))
            })
            .map(|(i, e)| PathDestination::entrance(e.position, EntranceId(i as u32)))
    }
}
