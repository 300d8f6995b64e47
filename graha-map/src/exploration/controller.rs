//! Mission controller state machine.
//!
//! Runs the arrival → decision cycle: every arrival is reported to the
//! arbiter and reconciled with its confirmation, every decision combines the
//! frontier with a target route and is announced before it is driven.

use std::collections::{HashSet, VecDeque};

use crate::arbiter::{Arbiter, DiscoveredPath, PathSelected, PathStatus};
use crate::core::{BLOCKED, Direction, Endpoint, Node};
use crate::error::Result;
use crate::planet::Planet;

use super::frontier::Frontier;
use super::state::{Arrival, ArrivalOutcome, FinishReason, MissionState};

/// Mission controller.
///
/// Owns the discovered [`Planet`], the exploration [`Frontier`] and the
/// current route, and talks to the mothership through an [`Arbiter`].
///
/// # Usage
///
/// ```rust,ignore
/// let mut controller = MissionController::new(arbiter);
/// let mut arrival = rover.start_arrival();
/// loop {
///     controller.on_arrival(arrival)?;
///     if controller.is_finished() {
///         break;
///     }
///     let scanned = (!controller.already_known()).then(|| rover.scan());
///     match controller.decide_next(scanned.as_deref())? {
///         Some(direction) => arrival = rover.drive(direction),
///         None => break,
///     }
/// }
/// ```
pub struct MissionController<A: Arbiter> {
    arbiter: A,
    planet: Planet,
    frontier: Frontier,
    visited: HashSet<Node>,
    route: VecDeque<Endpoint>,
    target: Option<Node>,
    current: Option<Node>,
    heading: Direction,
    start: Option<Endpoint>,
    planet_name: Option<String>,
    state: MissionState,
    /// Start endpoints of unveiled free paths, queued at the next decision.
    unveiled_candidates: Vec<Endpoint>,
}

impl<A: Arbiter> MissionController<A> {
    /// Create a controller waiting for its first arrival.
    pub fn new(arbiter: A) -> Self {
        Self {
            arbiter,
            planet: Planet::new(),
            frontier: Frontier::new(),
            visited: HashSet::new(),
            route: VecDeque::new(),
            target: None,
            current: None,
            heading: Direction::North,
            start: None,
            planet_name: None,
            state: MissionState::AwaitingAssignment,
            unveiled_candidates: Vec::new(),
        }
    }

    /// Process an arrival at a node.
    ///
    /// The first arrival announces readiness and adopts the assigned start.
    /// Later arrivals report the driven path and adopt the confirmed end.
    /// Returns [`ArrivalOutcome::SegmentComplete`] when the active target
    /// was reached.
    pub fn on_arrival(&mut self, arrival: Arrival) -> Result<ArrivalOutcome> {
        // Leftover replies from earlier exchanges must not answer this one
        self.arbiter.discard_stale();

        let node = match self.state.clone() {
            MissionState::AwaitingAssignment => self.adopt_assignment()?,
            MissionState::Navigating { from, exit } => self.confirm_path(from, exit, arrival)?,
            MissionState::Deciding { .. } => {
                log::warn!(
                    "Arrival at {} without a chosen exit, not reporting a path",
                    arrival.node
                );
                self.current = Some(arrival.node);
                self.heading = arrival.heading;
                arrival.node
            }
            MissionState::Finished(_) => {
                log::debug!("Arrival at {} after mission end ignored", arrival.node);
                return Ok(ArrivalOutcome::SegmentComplete);
            }
        };

        self.state = MissionState::Deciding { node };

        if self.target == Some(node) {
            log::info!("Target {} reached", node);
            self.target = None;
            if let Some(message) = self.arbiter.target_reached()? {
                self.finish(FinishReason::MissionDone(message));
            }
            return Ok(ArrivalOutcome::SegmentComplete);
        }

        Ok(ArrivalOutcome::Continue {
            node,
            heading: self.heading,
        })
    }

    fn adopt_assignment(&mut self) -> Result<Node> {
        let assigned = self.arbiter.announce_ready()?;
        let node = assigned.start();

        log::info!(
            "Mission start on '{}' at {} heading {}",
            assigned.planet_name,
            node,
            assigned.start_orientation
        );
        self.current = Some(node);
        self.heading = assigned.start_orientation;
        self.start = Some(node.towards(assigned.start_orientation));
        if self.planet_name.is_none() {
            self.planet_name = Some(assigned.planet_name);
        }
        Ok(node)
    }

    fn confirm_path(&mut self, from: Node, exit: Direction, arrival: Arrival) -> Result<Node> {
        let report = if arrival.obstacle {
            // Turned back on the path, so both ends are the exit just taken
            DiscoveredPath::new(from.towards(exit), from.towards(exit), PathStatus::Blocked)
        } else {
            let observed_end = arrival.node.towards(arrival.heading.opposite());
            DiscoveredPath::new(from.towards(exit), observed_end, PathStatus::Free)
        };

        let confirmed = self.arbiter.report_path(report)?;
        let end = confirmed.end();
        let heading = end.direction.opposite();

        if end.node != arrival.node || heading != arrival.heading {
            log::warn!(
                "Position corrected: {} heading {} -> {} heading {}",
                arrival.node,
                arrival.heading,
                end.node,
                heading
            );
            self.reset_route();
        }

        self.current = Some(end.node);
        self.heading = heading;

        if arrival.obstacle {
            let blocked = confirmed.start();
            log::info!("Obstacle on {}", blocked);
            // A known path keeps its far end and is blocked from both sides
            if !self.planet.mark_blocked(blocked) {
                self.planet.add_path(blocked, end, confirmed.path_weight);
                self.planet.mark_blocked(blocked);
            }
            self.reset_route();
        } else {
            self.planet
                .add_path(confirmed.start(), end, confirmed.path_weight);
        }

        Ok(end.node)
    }

    /// Whether the current node needs no scan.
    ///
    /// A node with all four exits known has its exits queued on the frontier
    /// so they are judged like any other candidate.
    pub fn already_known(&mut self) -> bool {
        let Some(node) = self.current else {
            return false;
        };

        if self.planet.is_fully_known(node) {
            self.frontier
                .prepend(Direction::ALL.map(|direction| node.towards(direction)));
            return true;
        }
        self.visited.contains(&node)
    }

    /// Choose the next exit at the current node.
    ///
    /// `scanned` holds the exits found by a fresh scan, `None` when the node
    /// was not scanned. Returns `None` when the mission is over.
    pub fn decide_next(&mut self, scanned: Option<&[Direction]>) -> Result<Option<Direction>> {
        if self.state.is_terminal() {
            return Ok(None);
        }
        let Some(node) = self.current else {
            log::warn!("No position yet, cannot decide");
            return Ok(None);
        };

        if let Some(message) = self.arbiter.take_done() {
            self.finish(FinishReason::MissionDone(message));
            return Ok(None);
        }

        self.apply_target_change(node)?;
        if self.state.is_terminal() {
            return Ok(None);
        }
        self.apply_unveiled();
        self.update_frontier(node, scanned);

        let Some(step) = self.next_step(node) else {
            self.complete_exploration()?;
            return Ok(None);
        };

        let mut exit = step.direction;
        if let Some(forced) = self
            .arbiter
            .select_path(PathSelected::new(node.towards(exit)))?
            && forced != exit
        {
            match self.planet.path(node.towards(forced)) {
                // Blocked but leading elsewhere: it was seen free before, the override is outdated
                Some(known) if known.is_blocked() && known.node != node => {
                    log::warn!(
                        "Ignoring stale override to {} at {}, path is blocked",
                        forced,
                        node
                    );
                    self.arbiter.report_blocked(DiscoveredPath::new(
                        node.towards(forced),
                        known.endpoint(),
                        PathStatus::Blocked,
                    ))?;
                }
                _ => {
                    log::info!("Override at {}: {} -> {}", node, exit, forced);
                    exit = forced;
                    self.reset_route();
                }
            }
        }

        self.frontier.remove(node.towards(exit));
        self.state = MissionState::Navigating { from: node, exit };
        log::debug!(
            "Leaving {} towards {} ({} route steps left, {} candidates)",
            node,
            exit,
            self.route.len(),
            self.frontier.len()
        );
        Ok(Some(exit))
    }

    fn apply_target_change(&mut self, node: Node) -> Result<()> {
        let Some(target) = self.arbiter.take_target() else {
            return Ok(());
        };

        if target == node {
            log::info!("Target {} set at the current node", target);
            self.target = None;
            if let Some(message) = self.arbiter.target_reached()? {
                self.finish(FinishReason::MissionDone(message));
            }
        } else {
            log::info!("New target {}", target);
            self.target = Some(target);
            self.reset_route();
        }
        Ok(())
    }

    fn apply_unveiled(&mut self) {
        for path in self.arbiter.take_unveiled() {
            let (start, end) = (path.start(), path.end());
            log::debug!("Unveiled {} <-> {} weight {}", start, end, path.path_weight);
            self.planet.add_path(start, end, path.path_weight);
            self.reset_route();

            if path.path_weight == BLOCKED {
                self.frontier.remove(start);
                self.frontier.remove(end);
            } else {
                self.unveiled_candidates.push(start);
            }
        }
    }

    fn update_frontier(&mut self, node: Node, scanned: Option<&[Direction]>) {
        if let Some(directions) = scanned {
            self.frontier
                .prepend(directions.iter().map(|direction| node.towards(*direction)));
        }

        let candidates: Vec<Endpoint> = self
            .unveiled_candidates
            .drain(..)
            .filter(|entry| !self.frontier.contains(*entry))
            .collect();
        self.frontier.prepend(candidates);

        self.visited.insert(node);
        self.frontier.retain_interesting(&self.planet, &self.visited);
    }

    /// Next route step, planning a new route when the current one is used up.
    fn next_step(&mut self, node: Node) -> Option<Endpoint> {
        if let Some(&step) = self.route.front()
            && step.node != node
        {
            log::warn!("Route step {} does not start at {}, replanning", step, node);
            self.reset_route();
        }

        if self.route.is_empty() {
            let snapshot = self.frontier.snapshot();
            let discovery = self.frontier.next_step(&self.planet, node);
            let toward_target = self
                .target
                .and_then(|target| self.planet.shortest_path(node, target))
                .filter(|route| !route.is_empty());

            let route = match (toward_target, discovery) {
                (Some(route), _) => {
                    log::debug!("Routing to target in {} steps", route.len());
                    // Discovery progress is abandoned, the candidate goes back
                    self.frontier.restore(snapshot);
                    route
                }
                (None, Some(route)) => {
                    if let Some(target) = self.target {
                        log::debug!("Target {} unreachable, exploring", target);
                    }
                    route
                }
                (None, None) => return None,
            };
            self.route = route.into();
        }

        self.route.pop_front()
    }

    fn complete_exploration(&mut self) -> Result<()> {
        log::info!(
            "Exploration completed: {} nodes, {} paths known",
            self.planet.node_count(),
            self.planet.path_count()
        );
        let reason = match self.arbiter.exploration_completed()? {
            Some(message) => FinishReason::MissionDone(message),
            None => FinishReason::ExplorationCompleted,
        };
        self.finish(reason);
        Ok(())
    }

    fn reset_route(&mut self) {
        self.route.clear();
        self.frontier.reinstate_popped();
    }

    fn finish(&mut self, reason: FinishReason) {
        log::info!("Mission finished: {:?}", reason);
        self.state = MissionState::Finished(reason);
    }

    /// Discovered map.
    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    /// Exploration frontier.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Active target.
    pub fn target(&self) -> Option<Node> {
        self.target
    }

    /// Current (authoritative) node.
    pub fn current_node(&self) -> Option<Node> {
        self.current
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Assigned start endpoint.
    pub fn start(&self) -> Option<Endpoint> {
        self.start
    }

    /// Remaining steps of the current route.
    pub fn route(&self) -> impl Iterator<Item = &Endpoint> {
        self.route.iter()
    }

    /// Current state.
    pub fn state(&self) -> &MissionState {
        &self.state
    }

    /// Is the mission over?
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Nodes scanned or decided at so far.
    pub fn visited(&self) -> &HashSet<Node> {
        &self.visited
    }

    /// Assigned planet name.
    pub fn planet_name(&self) -> Option<&str> {
        self.planet_name.as_deref()
    }

    /// Arbiter the controller talks to.
    pub fn arbiter(&self) -> &A {
        &self.arbiter
    }

    /// Mutable access to the arbiter.
    pub fn arbiter_mut(&mut self) -> &mut A {
        &mut self.arbiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{PathConfirmed, PathUnveiled, PlanetAssigned};
    use crate::error::Error;

    /// Arbiter answering from a script and recording what it was sent.
    #[derive(Default)]
    struct ScriptedArbiter {
        fail_ready: bool,
        confirmations: VecDeque<PathConfirmed>,
        overrides: VecDeque<Direction>,
        target: Option<Node>,
        unveiled: Vec<PathUnveiled>,
        done: Option<String>,
        done_on_signal: Option<String>,
        reported: Vec<DiscoveredPath>,
        blocked: Vec<DiscoveredPath>,
        selected: Vec<PathSelected>,
        signals: Vec<&'static str>,
    }

    impl Arbiter for ScriptedArbiter {
        fn announce_ready(&mut self) -> Result<PlanetAssigned> {
            if self.fail_ready {
                return Err(Error::ArbiterTimeout {
                    request: "ready",
                    attempts: 3,
                });
            }
            Ok(PlanetAssigned {
                planet_name: "Test".to_string(),
                start_x: 0,
                start_y: 0,
                start_orientation: Direction::North,
            })
        }

        fn report_path(&mut self, path: DiscoveredPath) -> Result<PathConfirmed> {
            self.reported.push(path.clone());
            Ok(self.confirmations.pop_front().unwrap_or_else(|| {
                let weight = match path.path_status {
                    PathStatus::Free => 1,
                    PathStatus::Blocked => BLOCKED,
                };
                PathConfirmed::new(path.start(), path.end(), path.path_status, weight)
            }))
        }

        fn report_blocked(&mut self, path: DiscoveredPath) -> Result<()> {
            self.blocked.push(path);
            Ok(())
        }

        fn select_path(&mut self, selected: PathSelected) -> Result<Option<Direction>> {
            self.selected.push(selected);
            Ok(self.overrides.pop_front())
        }

        fn target_reached(&mut self) -> Result<Option<String>> {
            self.signals.push("targetReached");
            Ok(self.done_on_signal.clone())
        }

        fn exploration_completed(&mut self) -> Result<Option<String>> {
            self.signals.push("explorationCompleted");
            Ok(self.done_on_signal.clone())
        }

        fn take_target(&mut self) -> Option<Node> {
            self.target.take()
        }

        fn take_unveiled(&mut self) -> Vec<PathUnveiled> {
            std::mem::take(&mut self.unveiled)
        }

        fn take_done(&mut self) -> Option<String> {
            self.done.take()
        }

        fn discard_stale(&mut self) {}
    }

    fn n(x: i32, y: i32) -> Node {
        Node::new(x, y)
    }

    fn unveil(start: Endpoint, end: Endpoint, weight: i32) -> PathUnveiled {
        let status = if weight == BLOCKED {
            PathStatus::Blocked
        } else {
            PathStatus::Free
        };
        PathConfirmed::new(start, end, status, weight)
    }

    /// Controller that has adopted its assignment at (0, 0) heading north.
    fn started(arbiter: ScriptedArbiter) -> MissionController<ScriptedArbiter> {
        let mut controller = MissionController::new(arbiter);
        controller
            .on_arrival(Arrival::new(n(0, 0), Direction::North))
            .unwrap();
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = MissionController::new(ScriptedArbiter::default());
        assert_eq!(controller.state(), &MissionState::AwaitingAssignment);
        assert_eq!(controller.current_node(), None);
        assert!(!controller.is_finished());
    }

    #[test]
    fn test_first_arrival_adopts_assignment() {
        let mut controller = MissionController::new(ScriptedArbiter::default());
        let outcome = controller
            .on_arrival(Arrival::new(n(9, 9), Direction::West))
            .unwrap();

        assert_eq!(
            outcome,
            ArrivalOutcome::Continue {
                node: n(0, 0),
                heading: Direction::North
            }
        );
        assert_eq!(controller.planet_name(), Some("Test"));
        assert_eq!(controller.start(), Some(n(0, 0).towards(Direction::North)));
        assert_eq!(controller.state(), &MissionState::Deciding { node: n(0, 0) });
    }

    #[test]
    fn test_assignment_failure_propagates() {
        let mut controller = MissionController::new(ScriptedArbiter {
            fail_ready: true,
            ..Default::default()
        });
        let result = controller.on_arrival(Arrival::new(n(0, 0), Direction::North));
        assert!(matches!(result, Err(Error::ArbiterTimeout { .. })));
    }

    #[test]
    fn test_decide_takes_scanned_exit_and_announces_it() {
        let mut controller = started(ScriptedArbiter::default());
        assert!(!controller.already_known());

        let exit = controller
            .decide_next(Some(&[Direction::North, Direction::East]))
            .unwrap();

        assert_eq!(exit, Some(Direction::North));
        assert_eq!(
            controller.state(),
            &MissionState::Navigating {
                from: n(0, 0),
                exit: Direction::North
            }
        );
        assert_eq!(
            controller.arbiter().selected,
            vec![PathSelected::new(n(0, 0).towards(Direction::North))]
        );
        let queued: Vec<Endpoint> = controller.frontier().iter().copied().collect();
        assert_eq!(queued, vec![n(0, 0).towards(Direction::East)]);
        assert!(controller.visited().contains(&n(0, 0)));
    }

    #[test]
    fn test_arrival_reports_and_adopts_correction() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.confirmations.push_back(PathConfirmed::new(
            n(0, 0).towards(Direction::North),
            n(0, 2).towards(Direction::South),
            PathStatus::Free,
            2,
        ));
        let mut controller = started(arbiter);
        controller.decide_next(Some(&[Direction::North])).unwrap();

        let outcome = controller
            .on_arrival(Arrival::new(n(0, 1), Direction::North))
            .unwrap();

        assert_eq!(
            outcome,
            ArrivalOutcome::Continue {
                node: n(0, 2),
                heading: Direction::North
            }
        );
        assert_eq!(
            controller.arbiter().reported,
            vec![DiscoveredPath::new(
                n(0, 0).towards(Direction::North),
                n(0, 1).towards(Direction::South),
                PathStatus::Free
            )]
        );
        let known = controller.planet().path(n(0, 2).towards(Direction::South));
        assert_eq!(known.map(|t| (t.node, t.weight)), Some((n(0, 0), 2)));
    }

    #[test]
    fn test_obstacle_reports_blocked_self_path() {
        let mut controller = started(ScriptedArbiter::default());
        controller.decide_next(Some(&[Direction::East])).unwrap();

        // Turned back at the obstacle, now facing west at the start node
        controller
            .on_arrival(Arrival::blocked(n(0, 0), Direction::West))
            .unwrap();

        let report = &controller.arbiter().reported[0];
        assert_eq!(report.path_status, PathStatus::Blocked);
        assert_eq!(report.start(), n(0, 0).towards(Direction::East));
        assert_eq!(report.end(), n(0, 0).towards(Direction::East));
        assert!(
            controller
                .planet()
                .path(n(0, 0).towards(Direction::East))
                .is_some_and(|t| t.is_blocked())
        );
        // The blocked candidate is filtered at the next decision
        assert!(controller.already_known());
        assert_eq!(controller.decide_next(None).unwrap(), None);
        assert!(!controller.frontier().contains(n(0, 0).towards(Direction::East)));
    }

    #[test]
    fn test_obstacle_on_known_path_blocks_both_ends() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.unveiled = vec![unveil(
            n(0, 0).towards(Direction::East),
            n(1, 0).towards(Direction::West),
            1,
        )];
        let mut controller = started(arbiter);
        assert_eq!(
            controller.decide_next(Some(&[Direction::East])).unwrap(),
            Some(Direction::East)
        );

        controller
            .on_arrival(Arrival::blocked(n(0, 0), Direction::West))
            .unwrap();

        let planet = controller.planet();
        let near = planet.path(n(0, 0).towards(Direction::East)).unwrap();
        let far = planet.path(n(1, 0).towards(Direction::West)).unwrap();
        assert_eq!(near.endpoint(), n(1, 0).towards(Direction::West));
        assert!(near.is_blocked());
        assert_eq!(far.endpoint(), n(0, 0).towards(Direction::East));
        assert!(far.is_blocked());
        assert_eq!(planet.shortest_path(n(1, 0), n(0, 0)), None);
        assert_eq!(planet.shortest_path(n(0, 0), n(1, 0)), None);
    }

    #[test]
    fn test_exploration_completed_when_nothing_left() {
        let mut controller = started(ScriptedArbiter::default());

        assert_eq!(controller.decide_next(Some(&[])).unwrap(), None);
        assert_eq!(controller.arbiter().signals, vec!["explorationCompleted"]);
        assert_eq!(
            controller.state(),
            &MissionState::Finished(FinishReason::ExplorationCompleted)
        );
        assert_eq!(controller.decide_next(None).unwrap(), None);
    }

    #[test]
    fn test_exploration_completed_with_done_reply() {
        let mut controller = started(ScriptedArbiter {
            done_on_signal: Some("Planet explored".to_string()),
            ..Default::default()
        });

        controller.decide_next(Some(&[])).unwrap();
        assert_eq!(
            controller.state(),
            &MissionState::Finished(FinishReason::MissionDone("Planet explored".to_string()))
        );
    }

    #[test]
    fn test_pending_done_finishes() {
        let mut controller = started(ScriptedArbiter::default());
        controller.arbiter_mut().done = Some("bye".to_string());

        assert_eq!(controller.decide_next(Some(&[Direction::North])).unwrap(), None);
        assert!(controller.is_finished());
        assert!(controller.arbiter().selected.is_empty());
    }

    #[test]
    fn test_target_route_preferred_and_frontier_restored() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.target = Some(n(1, 1));
        arbiter.unveiled = vec![
            unveil(
                n(0, 0).towards(Direction::East),
                n(1, 0).towards(Direction::West),
                1,
            ),
            unveil(
                n(1, 0).towards(Direction::North),
                n(1, 1).towards(Direction::South),
                1,
            ),
        ];
        let mut controller = started(arbiter);

        let exit = controller
            .decide_next(Some(&[Direction::North, Direction::East]))
            .unwrap();

        assert_eq!(exit, Some(Direction::East));
        assert_eq!(controller.target(), Some(n(1, 1)));
        // The discovery candidate at the start node was handed back
        assert!(controller.frontier().contains(n(0, 0).towards(Direction::North)));
        assert!(!controller.frontier().contains(n(0, 0).towards(Direction::East)));

        let route: Vec<Endpoint> = controller.route().copied().collect();
        assert_eq!(route, vec![n(1, 0).towards(Direction::North)]);
    }

    #[test]
    fn test_target_reached_on_arrival() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.target = Some(n(0, 1));
        arbiter.unveiled = vec![unveil(
            n(0, 0).towards(Direction::North),
            n(0, 1).towards(Direction::South),
            1,
        )];
        let mut controller = started(arbiter);
        assert_eq!(
            controller.decide_next(Some(&[Direction::North])).unwrap(),
            Some(Direction::North)
        );

        let outcome = controller
            .on_arrival(Arrival::new(n(0, 1), Direction::North))
            .unwrap();

        assert_eq!(outcome, ArrivalOutcome::SegmentComplete);
        assert_eq!(controller.target(), None);
        assert_eq!(controller.arbiter().signals, vec!["targetReached"]);
        assert!(!controller.is_finished());
    }

    #[test]
    fn test_target_at_current_node() {
        let mut controller = started(ScriptedArbiter::default());
        controller.arbiter_mut().target = Some(n(0, 0));

        let exit = controller.decide_next(Some(&[Direction::South])).unwrap();

        assert_eq!(exit, Some(Direction::South));
        assert_eq!(controller.target(), None);
        assert_eq!(controller.arbiter().signals, vec!["targetReached"]);
    }

    #[test]
    fn test_override_adopted() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.overrides.push_back(Direction::West);
        let mut controller = started(arbiter);

        let exit = controller
            .decide_next(Some(&[Direction::North, Direction::West]))
            .unwrap();

        assert_eq!(exit, Some(Direction::West));
        assert!(!controller.frontier().contains(n(0, 0).towards(Direction::West)));
        assert!(controller.frontier().contains(n(0, 0).towards(Direction::North)));
    }

    #[test]
    fn test_stale_override_reported_blocked() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.overrides.push_back(Direction::West);
        arbiter.unveiled = vec![unveil(
            n(0, 0).towards(Direction::West),
            n(-1, 0).towards(Direction::East),
            BLOCKED,
        )];
        let mut controller = started(arbiter);

        let exit = controller
            .decide_next(Some(&[Direction::North, Direction::West]))
            .unwrap();

        assert_eq!(exit, Some(Direction::North));
        assert_eq!(
            controller.arbiter().blocked,
            vec![DiscoveredPath::new(
                n(0, 0).towards(Direction::West),
                n(-1, 0).towards(Direction::East),
                PathStatus::Blocked
            )]
        );
    }

    #[test]
    fn test_fully_known_node_queues_all_exits() {
        let mut arbiter = ScriptedArbiter::default();
        arbiter.unveiled = Direction::ALL
            .iter()
            .enumerate()
            .map(|(i, direction)| {
                unveil(
                    n(0, 0).towards(*direction),
                    n(5, i as i32).towards(Direction::South),
                    1,
                )
            })
            .collect();
        let mut controller = started(arbiter);
        // Unveiled paths are applied at the first decision
        controller.decide_next(None).unwrap();
        controller
            .on_arrival(Arrival::new(n(5, 0), Direction::North))
            .unwrap();
        controller.decide_next(None).unwrap();
        controller
            .on_arrival(Arrival::new(n(0, 0), Direction::South))
            .unwrap();

        assert!(controller.planet().is_fully_known(n(0, 0)));
        assert!(controller.already_known());
        for direction in Direction::ALL {
            assert!(controller.frontier().contains(n(0, 0).towards(direction)));
        }
    }
}
