//! Graph map of a discovered planet.
//!
//! Each node maps up to four exit directions to the far end of the path
//! leaving in that direction. Paths are always stored from both ends, so the
//! map reads the same whichever endpoint a lookup starts from.
//!
//! The map only grows. Paths are never removed; a path found to be
//! impassable is re-weighted to [`BLOCKED`].
//!
//! # Example
//!
//! ```rust
//! use graha_map::core::{Direction, Node};
//! use graha_map::planet::Planet;
//!
//! let mut planet = Planet::new();
//! let a = Node::new(0, 0);
//! let b = Node::new(0, 1);
//! planet.add_path(a.towards(Direction::North), b.towards(Direction::South), 2);
//!
//! assert_eq!(planet.path(b.towards(Direction::South)).map(|t| t.node), Some(a));
//! assert_eq!(planet.shortest_path(a, b).map(|r| r.len()), Some(1));
//! ```

mod dijkstra;

pub use dijkstra::route_cost;

use std::collections::BTreeMap;

use crate::core::{BLOCKED, Direction, Endpoint, Node, PathTarget, Weight};

/// Known exits of a single node.
pub type NodePaths = BTreeMap<Direction, PathTarget>;

/// Discovered paths, keyed by node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Planet {
    paths: BTreeMap<Node, NodePaths>,
}

impl Planet {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the path between `start` and `end`, from both ends.
    pub fn add_path(&mut self, start: Endpoint, end: Endpoint, weight: Weight) {
        self.paths.entry(start.node).or_default().insert(
            start.direction,
            PathTarget {
                node: end.node,
                direction: end.direction,
                weight,
            },
        );
        self.paths.entry(end.node).or_default().insert(
            end.direction,
            PathTarget {
                node: start.node,
                direction: start.direction,
                weight,
            },
        );
    }

    /// Whole map view.
    #[inline]
    pub fn paths(&self) -> &BTreeMap<Node, NodePaths> {
        &self.paths
    }

    /// Known exits of `node` in ascending direction order (empty when unknown).
    pub fn edges_of(&self, node: Node) -> impl Iterator<Item = (Direction, &PathTarget)> + '_ {
        self.paths
            .get(&node)
            .into_iter()
            .flat_map(|exits| exits.iter().map(|(direction, target)| (*direction, target)))
    }

    /// Far end of the path leaving `endpoint`, if known.
    #[inline]
    pub fn path(&self, endpoint: Endpoint) -> Option<PathTarget> {
        self.paths
            .get(&endpoint.node)
            .and_then(|exits| exits.get(&endpoint.direction))
            .copied()
    }

    /// Number of known exits of `node`.
    #[inline]
    pub fn known_directions(&self, node: Node) -> usize {
        self.paths.get(&node).map_or(0, BTreeMap::len)
    }

    /// All four exits of `node` are known (blocked ones included).
    #[inline]
    pub fn is_fully_known(&self, node: Node) -> bool {
        self.known_directions(node) == Direction::ALL.len()
    }

    /// Whether `node` appears in the map at all.
    #[inline]
    pub fn contains(&self, node: Node) -> bool {
        self.paths.contains_key(&node)
    }

    /// Mark the path leaving `endpoint` as blocked, from both ends.
    ///
    /// Returns `false` and leaves the map untouched when no such path is known.
    pub fn mark_blocked(&mut self, endpoint: Endpoint) -> bool {
        let Some(target) = self.path(endpoint) else {
            return false;
        };

        if let Some(entry) = self
            .paths
            .get_mut(&endpoint.node)
            .and_then(|exits| exits.get_mut(&endpoint.direction))
        {
            entry.weight = BLOCKED;
        }
        if let Some(entry) = self
            .paths
            .get_mut(&target.node)
            .and_then(|exits| exits.get_mut(&target.direction))
        {
            entry.weight = BLOCKED;
        }
        true
    }

    /// Number of nodes with at least one known exit.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of distinct paths (each stored pair counts once).
    pub fn path_count(&self) -> usize {
        self.iter_paths().count()
    }

    /// Every distinct path once, as `(start, end, weight)`.
    ///
    /// The start is the smaller of the two endpoints.
    pub fn iter_paths(&self) -> impl Iterator<Item = (Endpoint, Endpoint, Weight)> + '_ {
        self.paths.iter().flat_map(|(node, exits)| {
            exits.iter().filter_map(move |(direction, target)| {
                let start = node.towards(*direction);
                let end = target.endpoint();
                (start <= end).then_some((start, end, target.weight))
            })
        })
    }

    /// Shortest route from `start` to `target` over traversable paths.
    ///
    /// `Some(vec![])` when `start == target`, `None` when the target cannot
    /// be reached.
    pub fn shortest_path(&self, start: Node, target: Node) -> Option<crate::core::Route> {
        dijkstra::shortest_path(self, start, target)
    }
}
