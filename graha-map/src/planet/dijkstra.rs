//! Dijkstra's shortest path algorithm over the planet graph.
//!
//! Only paths with a positive weight are traversed. Equal-cost routes are
//! resolved deterministically: queue entries with equal cost pop in ascending
//! node order, exits are relaxed in ascending direction order, and a
//! predecessor is only replaced on a strict improvement.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::core::{Endpoint, Node, Route};

use super::Planet;

/// State for Dijkstra's algorithm priority queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DijkstraState {
    /// Accumulated cost from the start node.
    cost: u64,
    /// Node reached at that cost.
    node: Node,
}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the shortest route from `start` to `goal`.
///
/// Each route step is the node being left and the direction taken; the goal
/// itself is not part of the route.
pub(super) fn shortest_path(planet: &Planet, start: Node, goal: Node) -> Option<Route> {
    if start == goal {
        return Some(Vec::new());
    }
    if !planet.contains(start) || !planet.contains(goal) {
        return None;
    }

    let mut dist: HashMap<Node, u64> = HashMap::new();
    // Step taken to reach each node on its best known route
    let mut prev: HashMap<Node, Endpoint> = HashMap::new();
    dist.insert(start, 0);

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0,
        node: start,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        // Stale entry, a cheaper one was already processed
        if dist.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        if node == goal {
            break;
        }

        for (direction, target) in planet.edges_of(node) {
            if !target.is_traversable() {
                continue;
            }

            let next = cost + target.weight as u64;
            if dist.get(&target.node).is_none_or(|&best| next < best) {
                dist.insert(target.node, next);
                prev.insert(target.node, node.towards(direction));
                heap.push(DijkstraState {
                    cost: next,
                    node: target.node,
                });
            }
        }
    }

    // Reconstruct by walking predecessors back to the start
    let mut route = Vec::new();
    let mut current = goal;
    while current != start {
        let step = *prev.get(&current)?;
        route.push(step);
        current = step.node;
    }
    route.reverse();

    log::trace!(
        "Route {} -> {}: {} steps, cost {:?}",
        start,
        goal,
        route.len(),
        dist.get(&goal)
    );
    Some(route)
}

/// Total weight of `route` on `planet`.
///
/// `None` if a step is unknown or not traversable.
pub fn route_cost(planet: &Planet, route: &[Endpoint]) -> Option<u64> {
    route.iter().try_fold(0u64, |total, step| {
        let target = planet.path(*step)?;
        target
            .is_traversable()
            .then(|| total + target.weight as u64)
    })
}
