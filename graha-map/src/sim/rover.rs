//! Simulated rover driving on the true planet.

use crate::core::{Direction, Endpoint, Node};
use crate::exploration::Arrival;
use crate::planet::Planet;

use super::planet_file::{DriftEntry, PlanetFile};

/// Rover with a perfect drive and an optionally drifting odometry.
pub struct Rover {
    truth: Planet,
    node: Node,
    heading: Direction,
    arrivals: usize,
    drift: Vec<DriftEntry>,
}

impl Rover {
    /// Rover standing at `start`.
    pub fn new(truth: Planet, start: Endpoint) -> Self {
        Self {
            truth,
            node: start.node,
            heading: start.direction,
            arrivals: 0,
            drift: Vec::new(),
        }
    }

    /// Rover for a planet file, drift entries included.
    pub fn from_planet_file(file: &PlanetFile) -> Self {
        Self::new(file.planet(), file.start_endpoint()).with_drift(file.drift.clone())
    }

    /// Report wrong nodes on the given arrivals.
    pub fn with_drift(mut self, drift: Vec<DriftEntry>) -> Self {
        self.drift = drift;
        self
    }

    /// True node.
    pub fn node(&self) -> Node {
        self.node
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Drives done so far.
    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    /// Arrival at the start position, before the first drive.
    pub fn start_arrival(&self) -> Arrival {
        Arrival::new(self.node, self.heading)
    }

    /// Exits of the current node, blocked ones included.
    pub fn scan(&self) -> Vec<Direction> {
        self.truth
            .edges_of(self.node)
            .map(|(direction, _)| direction)
            .collect()
    }

    /// Adopt a pose from the controller.
    pub fn relocalize(&mut self, node: Node, heading: Direction) {
        if node != self.node {
            log::debug!("Rover relocalized from {} to {}", self.node, node);
        }
        self.node = node;
        self.heading = heading;
    }

    /// Drive out of the current node through `direction`.
    ///
    /// A blocked or missing path turns the rover back to the node it left.
    pub fn drive(&mut self, direction: Direction) -> Arrival {
        self.arrivals += 1;

        let arrival = match self.truth.path(self.node.towards(direction)) {
            Some(target) if target.is_traversable() => {
                self.node = target.node;
                self.heading = target.direction.opposite();
                Arrival::new(self.node, self.heading)
            }
            _ => {
                log::debug!("Rover turned back at {}", self.node.towards(direction));
                self.heading = direction.opposite();
                Arrival::blocked(self.node, self.heading)
            }
        };

        match self.drift.iter().find(|drift| drift.arrival == self.arrivals) {
            Some(drift) => Arrival {
                node: Node::new(drift.x, drift.y),
                ..arrival
            },
            None => arrival,
        }
    }
}
