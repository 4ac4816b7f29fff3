//! Unit tests for sn-navigator.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glam::Vec3;
use sn_core::{
    AgentId, AllowedLinkMask, ArrivalOrder, ElevatorFloorId, EntranceId, NavAgentHandle,
    NavConfig, PlayerId, ResubmitPolicy, RoutineId,
};
use sn_host::{AgentBody, AreaSearch, WaypointSink, WorldQueries};
use sn_pathfinding::{DestinationKind, PathDestination, PathfindingService, ScriptedPathfinder};

use crate::{
    DestinationArrivalController, GoToOutcome, Navigator, NavigatorBuilder, PathRequestRegistry,
    TaskPoll,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const AGENT: AgentId = AgentId(1);
const NAV: NavAgentHandle = NavAgentHandle(10);
const ROUTINE: RoutineId = RoutineId(100);
const PLAYER: PlayerId = PlayerId(7);
const ENTRANCE: EntranceId = EntranceId(3);

#[derive(Default)]
struct Routine {
    width:       f32,
    in_progress: bool,
    starts:      u32,
    links:       Option<AllowedLinkMask>,
    sink:        Option<Arc<dyn WaypointSink>>,
}

/// Recording host with a single managed agent by default.
struct MockHost {
    positions:       HashMap<AgentId, Vec3>,
    nav:             HashMap<AgentId, NavAgentHandle>,
    outside:         HashSet<AgentId>,
    destinations:    Vec<(AgentId, Vec3)>,
    warps:           Vec<(AgentId, Vec3)>,
    /// `(agent, position, set_outside, search_in_progress_during_teleport)`
    teleports:       Vec<(AgentId, Vec3, bool, bool)>,
    chases:          Vec<(AgentId, PlayerId)>,
    search_nodes:    HashMap<AgentId, Vec<Vec3>>,
    routines:        HashMap<RoutineId, Routine>,
    stopped:         Vec<(AgentId, RoutineId)>,
    closest_player:  Option<PlayerId>,
    players:         HashMap<PlayerId, Vec3>,
    main_entrance:   Option<Vec3>,
    outside_nodes:   Vec<Vec3>,
    inside_nodes:    Vec<Vec3>,
    activatable:     bool,
    elevator_calls:  Vec<ElevatorFloorId>,
    exit_cache:      HashMap<EntranceId, Vec3>,
    findable_exits:  HashMap<EntranceId, Vec3>,
    find_calls:      usize,
    into_building:   HashSet<EntranceId>,
}

impl MockHost {
    fn new() -> Self {
        let mut routines = HashMap::new();
        routines.insert(ROUTINE, Routine { width: 200.0, ..Routine::default() });
        Self {
            positions:      HashMap::from([(AGENT, Vec3::ZERO)]),
            nav:            HashMap::from([(AGENT, NAV)]),
            outside:        HashSet::new(),
            destinations:   vec![],
            warps:          vec![],
            teleports:      vec![],
            chases:         vec![],
            search_nodes:   HashMap::new(),
            routines,
            stopped:        vec![],
            closest_player: None,
            players:        HashMap::from([(PLAYER, Vec3::new(20.0, 0.0, 0.0))]),
            main_entrance:  Some(Vec3::new(50.0, 0.0, 0.0)),
            outside_nodes:  vec![Vec3::new(100.0, 0.0, 0.0)],
            inside_nodes:   vec![Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-6.0, 0.0, 0.0)],
            activatable:    true,
            elevator_calls: vec![],
            exit_cache:     HashMap::new(),
            findable_exits: HashMap::new(),
            find_calls:     0,
            into_building:  HashSet::new(),
        }
    }

    fn place(&mut self, agent: AgentId, position: Vec3) {
        self.positions.insert(agent, position);
    }

    fn width(&self) -> f32 {
        self.routines[&ROUTINE].width
    }

    fn last_destination(&self) -> Option<Vec3> {
        self.destinations.last().map(|&(_, p)| p)
    }
}

impl AgentBody for MockHost {
    fn nav_agent(&self, agent: AgentId) -> Option<NavAgentHandle> {
        self.nav.get(&agent).copied()
    }
    fn position(&self, agent: AgentId) -> Vec3 {
        self.positions.get(&agent).copied().unwrap_or(Vec3::ZERO)
    }
    fn is_outside(&self, agent: AgentId) -> bool {
        self.outside.contains(&agent)
    }
    fn set_destination(&mut self, agent: AgentId, position: Vec3) {
        self.destinations.push((agent, position));
    }
    fn warp(&mut self, agent: AgentId, position: Vec3) {
        self.warps.push((agent, position));
        self.positions.insert(agent, position);
    }
    fn teleport_and_sync(&mut self, agent: AgentId, position: Vec3, set_outside: bool) {
        let routine = self.player_search_routine(agent);
        let searching = self.search_in_progress(routine);
        self.teleports.push((agent, position, set_outside, searching));
        self.positions.insert(agent, position);
        if set_outside {
            self.outside.insert(agent);
        } else {
            self.outside.remove(&agent);
        }
    }
    fn move_towards_player(&mut self, agent: AgentId, player: PlayerId) {
        self.chases.push((agent, player));
    }
    fn set_search_nodes(&mut self, agent: AgentId, nodes: Vec<Vec3>) {
        self.search_nodes.insert(agent, nodes);
    }
}

impl AreaSearch for MockHost {
    fn player_search_routine(&self, _agent: AgentId) -> RoutineId {
        ROUTINE
    }
    fn search_in_progress(&self, routine: RoutineId) -> bool {
        self.routines.get(&routine).is_some_and(|r| r.in_progress)
    }
    fn set_search_in_progress(&mut self, routine: RoutineId, in_progress: bool) {
        self.routines.entry(routine).or_default().in_progress = in_progress;
    }
    fn search_width(&self, routine: RoutineId) -> f32 {
        self.routines.get(&routine).map_or(0.0, |r| r.width)
    }
    fn set_search_width(&mut self, routine: RoutineId, width: f32) {
        self.routines.entry(routine).or_default().width = width;
    }
    fn start_search(
        &mut self,
        _agent:  AgentId,
        _origin: Vec3,
        links:   AllowedLinkMask,
        routine: RoutineId,
        sink:    Arc<dyn WaypointSink>,
    ) {
        let r = self.routines.entry(routine).or_default();
        r.in_progress = true;
        r.starts += 1;
        r.links = Some(links);
        r.sink = Some(sink);
    }
    fn stop_search(&mut self, agent: AgentId, routine: RoutineId) {
        self.stopped.push((agent, routine));
        if let Some(r) = self.routines.get_mut(&routine) {
            r.in_progress = false;
        }
    }
}

impl WorldQueries for MockHost {
    fn closest_player(&self, _agent: AgentId) -> Option<PlayerId> {
        self.closest_player
    }
    fn player_position(&self, player: PlayerId) -> Option<Vec3> {
        self.players.get(&player).copied()
    }
    fn main_entrance_position(&self, _teleport_position: bool, _outside_entrance: bool) -> Option<Vec3> {
        self.main_entrance
    }
    fn ai_nodes(&self, outside: bool) -> Vec<Vec3> {
        if outside { self.outside_nodes.clone() } else { self.inside_nodes.clone() }
    }
    fn can_activate(&self, _destination: &PathDestination, _from: Vec3) -> bool {
        self.activatable
    }
    fn call_elevator(&mut self, floor: ElevatorFloorId) {
        self.elevator_calls.push(floor);
    }
    fn exit_point(&self, entrance: EntranceId) -> Option<Vec3> {
        self.exit_cache.get(&entrance).copied()
    }
    fn find_exit_point(&mut self, entrance: EntranceId) -> Option<Vec3> {
        self.find_calls += 1;
        let exit = self.findable_exits.get(&entrance).copied()?;
        self.exit_cache.insert(entrance, exit);
        Some(exit)
    }
    fn is_entrance_to_building(&self, entrance: EntranceId) -> bool {
        self.into_building.contains(&entrance)
    }
}

fn arrival() -> DestinationArrivalController {
    DestinationArrivalController::default()
}

fn roaming_arrival() -> DestinationArrivalController {
    DestinationArrivalController { roaming: true, ..arrival() }
}

/// Registry with `AGENT` registered, plus a service of the given latency.
fn registry_with(latency: u32) -> (PathRequestRegistry, ScriptedPathfinder) {
    let mut service = ScriptedPathfinder::direct(latency);
    service.register_agent(NAV);
    let mut registry = PathRequestRegistry::new();
    registry.register(AGENT, NAV);
    (registry, service)
}

fn navigator(service: ScriptedPathfinder, config: NavConfig, host: &MockHost) -> Navigator<ScriptedPathfinder> {
    let mut nav = NavigatorBuilder::new(service).config(config).build().unwrap();
    assert!(nav.on_agent_created(AGENT, host));
    nav
}

// ── DestinationArrivalController ──────────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use super::*;

    #[test]
    fn far_destination_only_moves() {
        let mut host = MockHost::new();
        let dest = PathDestination::elevator(Vec3::new(5.0, 0.0, 0.0), ElevatorFloorId(2));
        assert!(arrival().apply(AGENT, &dest, &mut host));
        assert_eq!(host.last_destination(), Some(dest.position));
        assert!(host.elevator_calls.is_empty());
    }

    #[test]
    fn radius_is_inclusive() {
        let mut host = MockHost::new();
        let dest = PathDestination::elevator(Vec3::new(1.0, 0.0, 0.0), ElevatorFloorId(2));
        arrival().apply(AGENT, &dest, &mut host);
        assert_eq!(host.elevator_calls, vec![ElevatorFloorId(2)]);
    }

    #[test]
    fn elevator_respects_activation_precondition() {
        let mut host = MockHost::new();
        host.activatable = false;
        let dest = PathDestination::elevator(Vec3::new(0.5, 0.0, 0.0), ElevatorFloorId(2));
        assert!(arrival().apply(AGENT, &dest, &mut host));
        assert!(host.elevator_calls.is_empty());
        assert_eq!(host.destinations.len(), 1);
    }

    #[test]
    fn internal_teleport_warps_to_exit() {
        let mut host = MockHost::new();
        let exit = Vec3::new(0.0, 10.0, 30.0);
        let dest = PathDestination::internal_teleport(Vec3::new(0.2, 0.0, 0.0), exit);
        assert!(arrival().apply(AGENT, &dest, &mut host));
        assert_eq!(host.warps, vec![(AGENT, exit)]);
        assert_eq!(host.position(AGENT), exit);
    }

    #[test]
    fn direct_arrival_has_no_side_effect() {
        let mut host = MockHost::new();
        let dest = PathDestination::direct(Vec3::new(0.5, 0.0, 0.0));
        assert!(arrival().apply(AGENT, &dest, &mut host));
        assert!(host.warps.is_empty() && host.teleports.is_empty() && host.elevator_calls.is_empty());
        assert_eq!(host.destinations.len(), 1);
    }

    #[test]
    fn unknown_kind_is_not_handled() {
        let mut host = MockHost::new();
        let dest = PathDestination { position: Vec3::ZERO, kind: DestinationKind::Unknown(42) };
        assert!(!arrival().apply(AGENT, &dest, &mut host));
        assert!(host.destinations.is_empty());
    }

    #[test]
    fn check_then_move_skips_move_after_action() {
        let mut host = MockHost::new();
        let ctl = DestinationArrivalController { order: ArrivalOrder::CheckThenMove, ..arrival() };
        let dest = PathDestination::elevator(Vec3::new(0.5, 0.0, 0.0), ElevatorFloorId(4));
        assert!(ctl.apply(AGENT, &dest, &mut host));
        assert_eq!(host.elevator_calls.len(), 1);
        assert!(host.destinations.is_empty());

        let far = PathDestination::elevator(Vec3::new(9.0, 0.0, 0.0), ElevatorFloorId(4));
        assert!(ctl.apply(AGENT, &far, &mut host));
        assert_eq!(host.last_destination(), Some(far.position));
    }

    #[test]
    fn entrance_uses_cached_exit_point() {
        let mut host = MockHost::new();
        let exit = Vec3::new(70.0, 0.0, 0.0);
        host.exit_cache.insert(ENTRANCE, exit);
        let dest = PathDestination::entrance(Vec3::ZERO, ENTRANCE);
        arrival().apply(AGENT, &dest, &mut host);
        assert_eq!(host.find_calls, 0);
        assert_eq!(host.teleports, vec![(AGENT, exit, true, false)]);
        assert!(host.is_outside(AGENT));
    }

    #[test]
    fn entrance_finds_exit_point_once() {
        let mut host = MockHost::new();
        let exit = Vec3::new(-30.0, 0.0, 0.0);
        host.findable_exits.insert(ENTRANCE, exit);
        host.into_building.insert(ENTRANCE);
        let dest = PathDestination::entrance(Vec3::ZERO, ENTRANCE);

        arrival().apply(AGENT, &dest, &mut host);
        host.place(AGENT, Vec3::ZERO);
        arrival().apply(AGENT, &dest, &mut host);

        assert_eq!(host.find_calls, 1);
        assert_eq!(host.teleports.len(), 2);
        // Going into the building clears the outside flag.
        assert!(!host.teleports[0].2);
    }

    #[test]
    fn unresolvable_exit_point_is_a_no_op() {
        let mut host = MockHost::new();
        let dest = PathDestination::entrance(Vec3::ZERO, ENTRANCE);
        assert!(arrival().apply(AGENT, &dest, &mut host));
        assert!(host.teleports.is_empty());
        assert_eq!(host.find_calls, 1);

        // Retried on the next evaluation.
        arrival().apply(AGENT, &dest, &mut host);
        assert_eq!(host.find_calls, 2);
    }

    #[test]
    fn unresolvable_exit_point_still_moves_under_check_then_move() {
        let mut host = MockHost::new();
        let ctl = DestinationArrivalController { order: ArrivalOrder::CheckThenMove, ..arrival() };
        let dest = PathDestination::entrance(Vec3::new(0.5, 0.0, 0.0), ENTRANCE);
        assert!(ctl.apply(AGENT, &dest, &mut host));
        assert_eq!(host.last_destination(), Some(dest.position));
    }

    #[test]
    fn roaming_teleport_suspends_search_flag() {
        let mut host = MockHost::new();
        host.set_search_in_progress(ROUTINE, true);
        host.exit_cache.insert(ENTRANCE, Vec3::X * 80.0);
        let dest = PathDestination::entrance(Vec3::ZERO, ENTRANCE);

        roaming_arrival().apply(AGENT, &dest, &mut host);

        assert_eq!(host.teleports.len(), 1);
        assert!(!host.teleports[0].3, "search flag must be cleared during the teleport");
        assert!(host.search_in_progress(ROUTINE), "search flag restored afterwards");
    }

    #[test]
    fn confined_teleport_leaves_search_flag() {
        let mut host = MockHost::new();
        host.set_search_in_progress(ROUTINE, true);
        host.exit_cache.insert(ENTRANCE, Vec3::X * 80.0);
        let dest = PathDestination::entrance(Vec3::ZERO, ENTRANCE);

        arrival().apply(AGENT, &dest, &mut host);

        assert!(host.teleports[0].3);
    }
}

// ── PathRequestRegistry ───────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;

    fn step(
        registry: &mut PathRequestRegistry,
        service:  &mut ScriptedPathfinder,
        host:     &mut MockHost,
        target:   Vec3,
        policy:   ResubmitPolicy,
    ) -> GoToOutcome {
        registry.request_or_consume(AGENT, target, service, host, &arrival(), policy)
    }

    #[test]
    fn first_call_submits_and_is_pending() {
        let (mut registry, mut service) = registry_with(2);
        let mut host = MockHost::new();
        let target = Vec3::new(30.0, 0.0, 0.0);

        let outcome = step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::WhenConsumed);

        assert_eq!(outcome, GoToOutcome::Pending);
        assert_eq!(service.submissions(), 1);
        let task = registry.task(AGENT).unwrap();
        assert_eq!(task.target, target);
        assert_eq!(task.links, AllowedLinkMask::CONFINED);
        assert!(host.destinations.is_empty());
    }

    #[test]
    fn pending_task_is_left_alone_when_consumed_policy() {
        let (mut registry, mut service) = registry_with(3);
        let mut host = MockHost::new();
        let target = Vec3::new(30.0, 0.0, 0.0);
        step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::WhenConsumed);
        let handle = registry.task(AGENT).unwrap().handle;

        service.advance();
        let outcome = step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::WhenConsumed);

        assert_eq!(outcome, GoToOutcome::Pending);
        assert_eq!(service.submissions(), 1);
        assert_eq!(registry.task(AGENT).unwrap().handle, handle);
    }

    #[test]
    fn pending_task_is_superseded_under_every_call() {
        let (mut registry, mut service) = registry_with(3);
        let mut host = MockHost::new();
        let target = Vec3::new(30.0, 0.0, 0.0);
        step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::EveryCall);
        let first = registry.task(AGENT).unwrap().handle;

        let outcome = step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::EveryCall);

        assert_eq!(outcome, GoToOutcome::Pending);
        assert_eq!(service.submissions(), 2);
        assert_ne!(registry.task(AGENT).unwrap().handle, first);
        assert_eq!(service.outstanding_for(NAV), 1);
    }

    #[test]
    fn ready_result_is_applied_then_resubmitted() {
        let (mut registry, mut service) = registry_with(1);
        let mut host = MockHost::new();
        let target = Vec3::new(30.0, 0.0, 0.0);
        step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::WhenConsumed);
        service.advance();

        let outcome = step(&mut registry, &mut service, &mut host, target, ResubmitPolicy::WhenConsumed);

        assert_eq!(outcome, GoToOutcome::Resolved(PathDestination::direct(target)));
        assert_eq!(host.last_destination(), Some(target));
        assert_eq!(service.submissions(), 2);
        assert_eq!(registry.poll(AGENT, &service), TaskPoll::Pending);
    }

    #[test]
    fn missing_result_fails_and_resubmits() {
        let mut service = ScriptedPathfinder::new(0, |_| None);
        service.register_agent(NAV);
        let mut registry = PathRequestRegistry::new();
        registry.register(AGENT, NAV);
        let mut host = MockHost::new();

        assert_eq!(
            step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed),
            GoToOutcome::Pending
        );
        assert_eq!(
            step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed),
            GoToOutcome::Failed
        );
        assert_eq!(service.submissions(), 2);
    }

    #[test]
    fn unknown_destination_kind_fails() {
        let mut service = ScriptedPathfinder::new(0, |q| {
            Some(PathDestination { position: q.to, kind: DestinationKind::Unknown(9) })
        });
        service.register_agent(NAV);
        let mut registry = PathRequestRegistry::new();
        registry.register(AGENT, NAV);
        let mut host = MockHost::new();

        step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);
        let outcome = step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);
        assert_eq!(outcome, GoToOutcome::Failed);
    }

    #[test]
    fn unregistered_agent_fails_without_submitting() {
        let mut service = ScriptedPathfinder::direct(0);
        let mut registry = PathRequestRegistry::new();
        let mut host = MockHost::new();
        let outcome = step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);
        assert_eq!(outcome, GoToOutcome::Failed);
        assert_eq!(service.submissions(), 0);
    }

    #[test]
    fn roaming_requests_allow_fire_exits() {
        let (mut registry, mut service) = registry_with(1);
        let mut host = MockHost::new();
        registry.request_or_consume(
            AGENT, Vec3::X, &mut service, &mut host, &roaming_arrival(), ResubmitPolicy::WhenConsumed,
        );
        assert_eq!(registry.task(AGENT).unwrap().links, AllowedLinkMask::all());
    }

    #[test]
    fn resubmission_starts_from_post_action_position() {
        let exit = Vec3::new(0.0, 0.0, 90.0);
        let mut service = ScriptedPathfinder::new(0, move |q| {
            Some(PathDestination::internal_teleport(q.from, exit))
        });
        service.register_agent(NAV);
        let mut registry = PathRequestRegistry::new();
        registry.register(AGENT, NAV);
        let mut host = MockHost::new();

        step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);
        step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);

        assert_eq!(host.warps, vec![(AGENT, exit)]);
        assert_eq!(registry.task(AGENT).unwrap().from, exit);
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut registry, mut service) = registry_with(1);
        let mut host = MockHost::new();
        step(&mut registry, &mut service, &mut host, Vec3::X, ResubmitPolicy::WhenConsumed);
        assert!(registry.remove(AGENT).is_some());
        assert!(registry.remove(AGENT).is_none());
        assert!(registry.remove(AgentId(999)).is_none());
        assert_eq!(registry.live_tasks(), 0);
        assert!(!registry.is_registered(AGENT));
    }
}

// ── SearchModeController ──────────────────────────────────────────────────────

#[cfg(test)]
mod search_tests {
    use super::*;
    use crate::SearchModeController;

    #[test]
    fn roaming_saves_and_restores_width() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();

        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());
        assert!(host.width().is_infinite());
        assert_eq!(ctl.state(AGENT).unwrap().saved_width, Some(200.0));

        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, arrival());
        assert_eq!(host.width(), 200.0);
        assert!(ctl.state(AGENT).is_none());
    }

    #[test]
    fn repeated_roaming_starts_keep_first_snapshot() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();

        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());
        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());
        assert_eq!(ctl.state(AGENT).unwrap().saved_width, Some(200.0));

        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, arrival());
        assert_eq!(host.width(), 200.0);
    }

    #[test]
    fn confined_start_without_snapshot_keeps_width() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();
        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, arrival());
        assert_eq!(host.width(), 200.0);
        assert_eq!(host.routines[&ROUTINE].starts, 1);
    }

    #[test]
    fn other_routines_are_not_widened() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();
        let other = RoutineId(5);
        host.set_search_width(other, 15.0);

        ctl.start_search(AGENT, Vec3::ZERO, other, &mut host, roaming_arrival());

        assert_eq!(host.search_width(other), 15.0);
        assert!(ctl.state(AGENT).is_none());
        assert_eq!(host.routines[&other].starts, 1);
    }

    #[test]
    fn search_gets_mode_link_mask() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();
        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, arrival());
        assert_eq!(host.routines[&ROUTINE].links, Some(AllowedLinkMask::CONFINED));
        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());
        assert_eq!(host.routines[&ROUTINE].links, Some(AllowedLinkMask::all()));
    }

    #[test]
    fn waypoints_go_through_arrival_controller() {
        let mut ctl = SearchModeController::new();
        let mut host = MockHost::new();
        host.exit_cache.insert(ENTRANCE, Vec3::new(0.0, 0.0, -40.0));
        ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());

        let sink = host.routines[&ROUTINE].sink.clone().unwrap();
        let waypoint = PathDestination::entrance(Vec3::new(0.3, 0.0, 0.0), ENTRANCE);
        assert!(sink.on_waypoint(AGENT, &waypoint, &mut host));

        assert_eq!(host.last_destination(), Some(waypoint.position));
        assert_eq!(host.teleports.len(), 1);
        // Roaming sink keeps the search running across the teleport.
        assert!(host.search_in_progress(ROUTINE));
    }
}

// ── TargetabilityGate ─────────────────────────────────────────────────────────

#[cfg(test)]
mod gate_tests {
    use super::*;
    use crate::TargetabilityGate;

    #[test]
    fn due_only_after_cooldown() {
        let gate = TargetabilityGate::default();
        assert!(!gate.is_due(2.9));
        assert!(!gate.is_due(3.0));
        assert!(gate.is_due(3.01));
    }

    #[test]
    fn roaming_always_targetable() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default().with_roaming(true), &host);
        assert!(nav.check_targetable(AGENT, &mut host));
        assert_eq!(nav.service.submissions(), 0);
    }

    #[test]
    fn reachable_player_is_targetable() {
        let mut host = MockHost::new();
        host.closest_player = Some(PLAYER);
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        assert!(nav.check_targetable(AGENT, &mut host));
        assert_eq!(nav.service.submissions(), 0);
    }

    #[test]
    fn heads_for_entrance_when_nobody_reachable() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(2), NavConfig::default(), &host);

        assert!(!nav.check_targetable(AGENT, &mut host));
        let task = nav.registry().task(AGENT).unwrap();
        assert_eq!(task.target, host.main_entrance.unwrap());

        // Still pending: suppressed, nothing resubmitted.
        nav.service.advance();
        assert!(!nav.check_targetable(AGENT, &mut host));
        assert_eq!(nav.service.submissions(), 1);
    }

    #[test]
    fn resolved_exit_path_stops_search() {
        let mut host = MockHost::new();
        host.set_search_in_progress(ROUTINE, true);
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);

        assert!(!nav.check_targetable(AGENT, &mut host));
        assert!(!nav.check_targetable(AGENT, &mut host));

        assert_eq!(host.stopped, vec![(AGENT, ROUTINE)]);
        assert!(!host.search_in_progress(ROUTINE));
        assert_eq!(host.last_destination(), host.main_entrance);
    }

    #[test]
    fn failed_exit_path_falls_through() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::new(0, |_| None), NavConfig::default(), &host);
        assert!(!nav.check_targetable(AGENT, &mut host));
        assert!(nav.check_targetable(AGENT, &mut host));
        assert!(host.stopped.is_empty());
    }

    #[test]
    fn missing_entrance_falls_through() {
        let mut host = MockHost::new();
        host.main_entrance = None;
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        assert!(nav.check_targetable(AGENT, &mut host));
        assert_eq!(nav.service.submissions(), 0);
    }

    #[test]
    fn unregistered_agent_falls_through() {
        let mut host = MockHost::new();
        host.nav.clear();
        let mut nav = NavigatorBuilder::new(ScriptedPathfinder::direct(0)).build().unwrap();
        assert!(!nav.on_agent_created(AGENT, &host));
        assert!(nav.check_targetable(AGENT, &mut host));
    }
}

// ── pursue_player ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod pursuit_tests {
    use super::*;

    #[test]
    fn without_nav_handle_uses_host_chase() {
        let mut host = MockHost::new();
        let mut nav = NavigatorBuilder::new(ScriptedPathfinder::direct(0)).build().unwrap();
        nav.pursue_player(AGENT, PLAYER, &mut host);
        assert_eq!(host.chases, vec![(AGENT, PLAYER)]);
        assert_eq!(nav.service.submissions(), 0);
    }

    #[test]
    fn first_call_only_submits_toward_player() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(1), NavConfig::default(), &host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        assert!(host.chases.is_empty());
        assert_eq!(nav.registry().task(AGENT).unwrap().target, host.players[&PLAYER]);
    }

    #[test]
    fn pending_does_nothing() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(5), NavConfig::default(), &host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        assert!(host.chases.is_empty());
        assert_eq!(nav.service.submissions(), 1);
    }

    #[test]
    fn direct_result_hands_back_to_host_chase() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        assert_eq!(host.chases, vec![(AGENT, PLAYER)]);
        assert!(host.destinations.is_empty());
        assert_eq!(nav.service.submissions(), 2);
    }

    #[test]
    fn link_result_walks_to_link() {
        let link = Vec3::new(4.0, 0.0, 0.0);
        let service = ScriptedPathfinder::new(0, move |_| {
            Some(PathDestination::elevator(link, ElevatorFloorId(1)))
        });
        let mut host = MockHost::new();
        let mut nav = navigator(service, NavConfig::default(), &host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        nav.pursue_player(AGENT, PLAYER, &mut host);
        assert!(host.chases.is_empty());
        assert_eq!(host.last_destination(), Some(link));
    }
}

// ── Navigator lifecycle ───────────────────────────────────────────────────────

#[cfg(test)]
mod navigator_tests {
    use super::*;

    #[test]
    fn builder_rejects_invalid_config() {
        let config = NavConfig { arrival_radius: -1.0, ..NavConfig::default() };
        assert!(NavigatorBuilder::new(ScriptedPathfinder::direct(0)).config(config).build().is_err());
    }

    #[test]
    fn builder_roaming_flag() {
        let nav = NavigatorBuilder::new(ScriptedPathfinder::direct(0)).roaming(true).build().unwrap();
        assert!(nav.is_roaming());
        assert!(nav.arrival().roaming);
    }

    #[test]
    fn created_agent_is_registered_with_service() {
        let host = MockHost::new();
        let nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        assert!(nav.service.is_registered(NAV));
        assert!(nav.registry().is_registered(AGENT));
    }

    #[test]
    fn destroy_is_idempotent_and_complete() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(3), NavConfig::default().with_roaming(true), &host);
        nav.go_to_destination(AGENT, Vec3::X, &mut host);
        nav.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host);
        assert!(nav.search_modes().state(AGENT).is_some());

        nav.on_agent_destroyed(AGENT);
        nav.on_agent_destroyed(AGENT);
        nav.on_agent_destroyed(AgentId(404));

        assert_eq!(nav.registry().live_tasks(), 0);
        assert!(nav.search_modes().state(AGENT).is_none());
        assert_eq!(nav.service.outstanding_for(NAV), 0);
    }

    #[test]
    fn started_agent_gets_all_nodes_when_roaming() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default().with_roaming(true), &host);
        nav.on_agent_started(AGENT, &mut host);
        let nodes = &host.search_nodes[&AGENT];
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], host.outside_nodes[0]);
    }

    #[test]
    fn node_replacement_is_skipped_when_confined() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        nav.on_agent_set_outside(AGENT, &mut host);
        assert!(host.search_nodes.is_empty());
    }

    #[test]
    fn roaming_toggle_restores_width_through_navigator() {
        let mut host = MockHost::new();
        let mut nav = navigator(ScriptedPathfinder::direct(0), NavConfig::default(), &host);
        nav.set_global_roaming(true);
        nav.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host);
        assert!(host.width().is_infinite());
        nav.set_global_roaming(false);
        nav.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host);
        assert_eq!(host.width(), 200.0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::SearchModeController;

    proptest! {
        #[test]
        fn action_fires_iff_within_radius_and_activatable(
            x in -3.0f32..3.0,
            z in -3.0f32..3.0,
            activatable in any::<bool>(),
            check_first in any::<bool>(),
        ) {
            let mut host = MockHost::new();
            host.activatable = activatable;
            let agent_pos = Vec3::new(x, 0.0, z);
            host.place(AGENT, agent_pos);
            let order = if check_first { ArrivalOrder::CheckThenMove } else { ArrivalOrder::MoveThenCheck };
            let ctl = DestinationArrivalController { order, ..arrival() };
            let dest = PathDestination::elevator(Vec3::ZERO, ElevatorFloorId(0));

            ctl.apply(AGENT, &dest, &mut host);

            let expected = agent_pos.distance(dest.position) <= 1.0 && activatable;
            prop_assert_eq!(host.elevator_calls.len() == 1, expected);
        }

        #[test]
        fn at_most_one_outstanding_task(
            latency in 0u32..4,
            ops in proptest::collection::vec(any::<bool>(), 1..40),
            every_call in any::<bool>(),
        ) {
            let (mut registry, mut service) = registry_with(latency);
            let mut host = MockHost::new();
            let policy = if every_call { ResubmitPolicy::EveryCall } else { ResubmitPolicy::WhenConsumed };
            for call in ops {
                if call {
                    registry.request_or_consume(
                        AGENT, Vec3::new(9.0, 0.0, 0.0), &mut service, &mut host, &arrival(), policy,
                    );
                } else {
                    service.advance();
                }
                prop_assert!(service.outstanding_for(NAV) <= 1);
                prop_assert!(registry.live_tasks() <= 1);
            }
        }

        #[test]
        fn width_returns_to_original(
            width in 1.0f32..500.0,
            toggles in proptest::collection::vec(any::<bool>(), 0..12),
        ) {
            let mut ctl = SearchModeController::new();
            let mut host = MockHost::new();
            host.set_search_width(ROUTINE, width);

            ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, roaming_arrival());
            for roaming in toggles {
                let a = if roaming { roaming_arrival() } else { arrival() };
                ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, a);
            }
            ctl.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host, arrival());

            prop_assert_eq!(host.width(), width);
            prop_assert!(ctl.state(AGENT).is_none());
        }

        #[test]
        fn cleanup_is_idempotent(destroys in 1usize..5, register in any::<bool>()) {
            let mut host = MockHost::new();
            let mut nav = NavigatorBuilder::new(ScriptedPathfinder::direct(1)).roaming(true).build().unwrap();
            if register {
                nav.on_agent_created(AGENT, &host);
                nav.go_to_destination(AGENT, Vec3::X, &mut host);
                nav.start_search(AGENT, Vec3::ZERO, ROUTINE, &mut host);
            }
            for _ in 0..destroys {
                nav.on_agent_destroyed(AGENT);
            }
            prop_assert_eq!(nav.registry().live_tasks(), 0);
            prop_assert!(!nav.registry().is_registered(AGENT));
            prop_assert!(nav.search_modes().state(AGENT).is_none());
        }
    }
}
