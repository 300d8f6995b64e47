//! Grid nodes and the endpoints that hang off them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::direction::Direction;

/// Traversal cost of a path as reported by the mothership.
///
/// `-1` marks a known blocked path, any positive value is a cost.
/// Zero never occurs.
pub type Weight = i32;

/// Weight of a path known to be blocked.
pub const BLOCKED: Weight = -1;

/// Grid node (integer coordinates).
///
/// Ordered by `x`, then `y`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Node {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Node {
    /// Create a new node
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Endpoint leaving this node in `direction`.
    #[inline]
    pub fn towards(self, direction: Direction) -> Endpoint {
        Endpoint::new(self, direction)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A (node, direction) pair.
///
/// Used for both ends of a path, for route steps and for frontier candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Node the direction leaves from
    pub node: Node,
    /// Exit direction
    pub direction: Direction,
}

impl Endpoint {
    /// Create a new endpoint
    #[inline]
    pub fn new(node: Node, direction: Direction) -> Self {
        Self { node, direction }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.node, self.direction)
    }
}

/// Far end of a known path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathTarget {
    /// Node the path arrives at
    pub node: Node,
    /// Direction at the arrival node the path is attached to
    pub direction: Direction,
    /// Path weight
    pub weight: Weight,
}

impl PathTarget {
    /// Endpoint at the far end.
    #[inline]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.node, self.direction)
    }

    /// Whether the path is known to be blocked.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.weight == BLOCKED
    }

    /// Whether the path can be driven.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        self.weight > 0
    }
}

/// Ordered list of steps; each step is the node to leave and the direction to take.
pub type Route = Vec<Endpoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ordering() {
        assert!(Node::new(0, 5) < Node::new(1, 0));
        assert!(Node::new(1, -1) < Node::new(1, 0));
    }

    #[test]
    fn test_path_target_flags() {
        let free = PathTarget {
            node: Node::new(1, 0),
            direction: Direction::West,
            weight: 3,
        };
        let blocked = PathTarget {
            weight: BLOCKED,
            ..free
        };

        assert!(free.is_traversable());
        assert!(!free.is_blocked());
        assert!(blocked.is_blocked());
        assert!(!blocked.is_traversable());
        assert_eq!(free.endpoint(), Node::new(1, 0).towards(Direction::West));
    }

    #[test]
    fn test_display() {
        let endpoint = Node::new(-2, 3).towards(Direction::South);
        assert_eq!(endpoint.to_string(), "(-2, 3)→S");
    }
}
