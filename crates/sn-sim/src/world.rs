//! `HostWorld`: the in-memory game state the navigator drives.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use sn_core::{
    AgentId, AllowedLinkMask, ElevatorFloorId, EntranceId, NavAgentHandle, PlayerId, RoutineId,
};
use sn_host::{AgentBody, AreaSearch, WaypointSink, WorldQueries};
use sn_pathfinding::{DestinationKind, PathDestination};

use crate::SiteLayout;

/// Distance at which a walking agent counts as having reached a point.
pub const REACH_EPS: f32 = 0.05;

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SimAgent {
    pub position:          Vec3,
    pub outside:           bool,
    /// Units per second.
    pub speed:             f32,
    pub nav:               Option<NavAgentHandle>,
    pub destination:       Option<Vec3>,
    pub chasing:           Option<PlayerId>,
    pub search_routine:    RoutineId,
    pub search_nodes:      Vec<Vec3>,
    /// Session time of the last entrance teleport.
    pub last_entrance_use: f64,
    pub alive:             bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimPlayer {
    pub position: Vec3,
    pub outside:  bool,
}

/// One area-search routine.  Visits the owner's search nodes nearest-first,
/// limited to `width` around `origin`.
pub struct SearchRoutine {
    pub owner:       AgentId,
    pub width:       f32,
    pub in_progress: bool,
    pub origin:      Vec3,
    pub links:       AllowedLinkMask,
    pub visited:     Vec<usize>,
    pub current:     Option<usize>,
    sink:            Option<Arc<dyn WaypointSink>>,
}

impl SearchRoutine {
    pub fn new(owner: AgentId, width: f32) -> Self {
        Self {
            owner,
            width,
            in_progress: false,
            origin:      Vec3::ZERO,
            links:       AllowedLinkMask::CONFINED,
            visited:     Vec::new(),
            current:     None,
            sink:        None,
        }
    }
}

/// An entrance teleport performed since the last drain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportEvent {
    pub agent:           AgentId,
    pub position:        Vec3,
    pub outside:         bool,
    pub changed_outside: bool,
}

// ── HostWorld ─────────────────────────────────────────────────────────────────

/// All host-side state, indexed by id.
pub struct HostWorld {
    pub layout:         SiteLayout,
    pub agents:         Vec<SimAgent>,
    pub players:        Vec<SimPlayer>,
    pub routines:       Vec<SearchRoutine>,
    pub elevator_calls: HashMap<ElevatorFloorId, u32>,
    /// Players farther than this are never reported as closest.
    pub sight_range:    f32,
    /// Session time, kept in step by the sim.
    pub now:            f64,
    exit_points:        Vec<Option<Vec3>>,
    teleports:          Vec<TeleportEvent>,
}

impl HostWorld {
    pub fn new(layout: SiteLayout, sight_range: f32) -> Self {
        let exit_points = vec![None; layout.entrances.len()];
        Self {
            layout,
            agents: Vec::new(),
            players: Vec::new(),
            routines: Vec::new(),
            elevator_calls: HashMap::new(),
            sight_range,
            now: 0.0,
            exit_points,
            teleports: Vec::new(),
        }
    }

    /// Add an agent with its own tracked search routine.
    pub fn spawn_agent(&mut self, position: Vec3, speed: f32, has_nav: bool, search_width: f32) -> AgentId {
        let agent = AgentId(self.agents.len() as u32);
        let routine = RoutineId(self.routines.len() as u32);
        let outside = self.layout.is_outside(position);
        self.routines.push(SearchRoutine::new(agent, search_width));
        self.agents.push(SimAgent {
            position,
            outside,
            speed,
            nav: has_nav.then_some(NavAgentHandle(agent.0)),
            destination: None,
            chasing: None,
            search_routine: routine,
            search_nodes: self.layout.nodes(outside).to_vec(),
            last_entrance_use: f64::NEG_INFINITY,
            alive: true,
        });
        agent
    }

    pub fn add_player(&mut self, position: Vec3) -> PlayerId {
        let outside = self.layout.is_outside(position);
        self.players.push(SimPlayer { position, outside });
        PlayerId((self.players.len() - 1) as u32)
    }

    pub fn agent(&self, agent: AgentId) -> Option<&SimAgent> {
        self.agents.get(agent.index())
    }

    pub fn routine(&self, routine: RoutineId) -> Option<&SearchRoutine> {
        self.routines.get(routine.index())
    }

    /// Seconds since `agent` last went through an entrance.
    pub fn secs_since_entrance_use(&self, agent: AgentId) -> f32 {
        self.agent(agent).map_or(f32::INFINITY, |a| (self.now - a.last_entrance_use) as f32)
    }

    pub fn drain_teleports(&mut self) -> Vec<TeleportEvent> {
        std::mem::take(&mut self.teleports)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Walk every live agent toward its destination (or chased player).
    pub fn step_movement(&mut self, dt: f32) {
        for a in 0..self.agents.len() {
            let agent = &self.agents[a];
            if !agent.alive {
                continue;
            }
            let target = match agent.chasing {
                Some(p) => self
                    .players
                    .get(p.index())
                    .filter(|pl| pl.outside == agent.outside)
                    .map(|pl| pl.position),
                None => agent.destination,
            };
            let Some(target) = target else { continue };

            let agent = &mut self.agents[a];
            let step = agent.speed * dt;
            let offset = target - agent.position;
            if offset.length() <= step.max(REACH_EPS) {
                agent.position = target;
                agent.destination = None;
            } else {
                agent.position += offset.normalize() * step;
            }
        }
    }

    // ── Search ────────────────────────────────────────────────────────────

    /// Advance the agent's running search by one interval: retire the current
    /// node once reached, pick the next one, and feed the next hop toward it
    /// to the routine's waypoint sink.
    pub fn step_search(&mut self, agent: AgentId) {
        let Some(a) = self.agents.get(agent.index()) else { return };
        let position = a.position;
        let routine_id = a.search_routine;
        let nodes = a.search_nodes.clone();
        let Some(routine) = self.routines.get_mut(routine_id.index()) else { return };
        if !routine.in_progress {
            return;
        }

        if let Some(cur) = routine.current {
            if nodes.get(cur).is_none_or(|n| n.distance(position) <= 1.0) {
                routine.visited.push(cur);
                routine.current = None;
            }
        }
        if routine.current.is_none() {
            routine.current = nodes
                .iter()
                .enumerate()
                .filter(|(i, n)| !routine.visited.contains(i) && n.distance(routine.origin) <= routine.width)
                .min_by(|(_, a), (_, b)| a.distance_squared(position).total_cmp(&b.distance_squared(position)))
                .map(|(i, _)| i);
        }
        let Some(cur) = routine.current else {
            log::debug!("{agent}: search exhausted");
            routine.in_progress = false;
            routine.sink = None;
            return;
        };

        let links = routine.links;
        let Some(waypoint) = self.layout.route(position, nodes[cur], links) else {
            routine.visited.push(cur);
            routine.current = None;
            return;
        };
        if let Some(sink) = routine.sink.clone() {
            sink.on_waypoint(agent, &waypoint, self);
        }
    }
}

// ── Host traits ───────────────────────────────────────────────────────────────

impl AgentBody for HostWorld {
    fn nav_agent(&self, agent: AgentId) -> Option<NavAgentHandle> {
        self.agent(agent).and_then(|a| a.nav)
    }

    fn position(&self, agent: AgentId) -> Vec3 {
        self.agent(agent).map_or(Vec3::ZERO, |a| a.position)
    }

    fn is_outside(&self, agent: AgentId) -> bool {
        self.agent(agent).is_some_and(|a| a.outside)
    }

    fn set_destination(&mut self, agent: AgentId, position: Vec3) {
        if let Some(a) = self.agents.get_mut(agent.index()) {
            a.destination = Some(position);
            a.chasing = None;
        }
    }

    fn warp(&mut self, agent: AgentId, position: Vec3) {
        if let Some(a) = self.agents.get_mut(agent.index()) {
            a.position = position;
            a.destination = None;
        }
    }

    fn teleport_and_sync(&mut self, agent: AgentId, position: Vec3, set_outside: bool) {
        let now = self.now;
        let Some(a) = self.agents.get_mut(agent.index()) else { return };
        let changed_outside = a.outside != set_outside;
        a.position = position;
        a.outside = set_outside;
        a.destination = None;
        a.chasing = None;
        a.last_entrance_use = now;
        if changed_outside {
            a.search_nodes = self.layout.nodes(set_outside).to_vec();
            if let Some(r) = self.routines.get_mut(a.search_routine.index()) {
                r.visited.clear();
                r.current = None;
            }
        }
        self.teleports.push(TeleportEvent { agent, position, outside: set_outside, changed_outside });
    }

    fn move_towards_player(&mut self, agent: AgentId, player: PlayerId) {
        if let Some(a) = self.agents.get_mut(agent.index()) {
            a.chasing = Some(player);
            a.destination = None;
        }
    }

    fn set_search_nodes(&mut self, agent: AgentId, nodes: Vec<Vec3>) {
        if let Some(a) = self.agents.get_mut(agent.index()) {
            a.search_nodes = nodes;
        }
    }
}

impl AreaSearch for HostWorld {
    fn player_search_routine(&self, agent: AgentId) -> RoutineId {
        self.agent(agent).map_or(RoutineId::INVALID, |a| a.search_routine)
    }

    fn search_in_progress(&self, routine: RoutineId) -> bool {
        self.routine(routine).is_some_and(|r| r.in_progress)
    }

    fn set_search_in_progress(&mut self, routine: RoutineId, in_progress: bool) {
        if let Some(r) = self.routines.get_mut(routine.index()) {
            r.in_progress = in_progress;
        }
    }

    fn search_width(&self, routine: RoutineId) -> f32 {
        self.routine(routine).map_or(0.0, |r| r.width)
    }

    fn set_search_width(&mut self, routine: RoutineId, width: f32) {
        if let Some(r) = self.routines.get_mut(routine.index()) {
            r.width = width;
        }
    }

    fn start_search(
        &mut self,
        agent:   AgentId,
        origin:  Vec3,
        links:   AllowedLinkMask,
        routine: RoutineId,
        sink:    Arc<dyn WaypointSink>,
    ) {
        let Some(r) = self.routines.get_mut(routine.index()) else {
            log::warn!("{agent}: start_search on unknown {routine}");
            return;
        };
        r.owner = agent;
        r.origin = origin;
        r.links = links;
        r.in_progress = true;
        r.visited.clear();
        r.current = None;
        r.sink = Some(sink);
        log::trace!("{agent}: search started at {origin} (width {})", r.width);
    }

    fn stop_search(&mut self, agent: AgentId, routine: RoutineId) {
        if let Some(r) = self.routines.get_mut(routine.index()) {
            r.in_progress = false;
            r.current = None;
            r.sink = None;
            log::trace!("{agent}: search stopped");
        }
    }
}

impl WorldQueries for HostWorld {
    fn closest_player(&self, agent: AgentId) -> Option<PlayerId> {
        let a = self.agent(agent)?;
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.outside == a.outside)
            .map(|(i, p)| (i, p.position.distance(a.position)))
            .filter(|&(_, d)| d <= self.sight_range)
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(i, _)| PlayerId(i as u32))
    }

    fn player_position(&self, player: PlayerId) -> Option<Vec3> {
        self.players.get(player.index()).map(|p| p.position)
    }

    fn main_entrance_position(&self, _teleport_position: bool, outside_entrance: bool) -> Option<Vec3> {
        self.layout
            .entrances
            .iter()
            .find(|e| e.main && e.outside == outside_entrance)
            .map(|e| e.position)
    }

    fn ai_nodes(&self, outside: bool) -> Vec<Vec3> {
        self.layout.nodes(outside).to_vec()
    }

    fn can_activate(&self, destination: &PathDestination, from: Vec3) -> bool {
        match destination.kind {
            DestinationKind::EntranceTeleport { entrance } => self
                .layout
                .entrance(entrance)
                .is_some_and(|e| e.outside == self.layout.is_outside(from)),
            DestinationKind::Unknown(_) => false,
            _ => true,
        }
    }

    fn call_elevator(&mut self, floor: ElevatorFloorId) {
        *self.elevator_calls.entry(floor).or_default() += 1;
    }

    fn exit_point(&self, entrance: EntranceId) -> Option<Vec3> {
        self.exit_points.get(entrance.index()).copied().flatten()
    }

    fn find_exit_point(&mut self, entrance: EntranceId) -> Option<Vec3> {
        let partner = self.layout.entrance(entrance)?.partner;
        let exit = self.layout.entrances.get(partner)?.position;
        if let Some(slot) = self.exit_points.get_mut(entrance.index()) {
            *slot = Some(exit);
        }
        log::debug!("{entrance}: exit point found at {exit}");
        Some(exit)
    }

    fn is_entrance_to_building(&self, entrance: EntranceId) -> bool {
        self.layout.entrance(entrance).is_some_and(|e| e.outside)
    }
}
